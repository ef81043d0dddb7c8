use super::RawAward;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// On-disk shapes accepted for raw award exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAwardFormat {
    Csv,
    Json,
}

impl RawAwardFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RawAwardError {
    #[error("failed to read award export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid award CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid award JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("award export must be a JSON array or an object with a `results` array")]
    UnexpectedShape,
    #[error("award record {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("cannot infer award export format from '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),
}

pub fn load_raw_awards<P: AsRef<Path>>(path: P) -> Result<Vec<RawAward>, RawAwardError> {
    let path = path.as_ref();
    let format = RawAwardFormat::from_path(path)
        .ok_or_else(|| RawAwardError::UnsupportedFormat(path.display().to_string()))?;
    let file = File::open(path)?;
    read_raw_awards(file, format)
}

pub fn read_raw_awards<R: Read>(
    reader: R,
    format: RawAwardFormat,
) -> Result<Vec<RawAward>, RawAwardError> {
    match format {
        RawAwardFormat::Csv => read_csv(reader),
        RawAwardFormat::Json => read_json(reader),
    }
}

fn read_csv<R: Read>(reader: R) -> Result<Vec<RawAward>, RawAwardError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let mut fields = Map::new();
        for (header, value) in headers.iter().zip(row.iter()) {
            if value.is_empty() {
                continue;
            }
            fields.insert(header.to_string(), Value::String(value.to_string()));
        }
        records.push(RawAward(fields));
    }

    Ok(records)
}

fn read_json<R: Read>(reader: R) -> Result<Vec<RawAward>, RawAwardError> {
    let document: Value = serde_json::from_reader(reader)?;
    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut object) => match object.remove("results") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(RawAwardError::UnexpectedShape),
        },
        _ => return Err(RawAwardError::UnexpectedShape),
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(fields) => Ok(RawAward(fields)),
            _ => Err(RawAwardError::NotAnObject { index }),
        })
        .collect()
}

/// Parses the date formats seen in spending exports. Anything unrecognised is `None`.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok()
}
