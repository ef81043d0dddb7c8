use award_integrity::awards::load_raw_awards;
use award_integrity::awards::source::{AwardPage, AwardSource, SourceError};
use award_integrity::awards::RawAwardError;
use award_integrity::insights::store::{InsightStore, StoreError, StoredInsight};
use award_integrity::insights::Fingerprint;
use award_integrity::RawAward;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Serves a local export through the paged source interface.
#[derive(Debug, Clone)]
pub(crate) struct StaticAwardSource {
    records: Vec<RawAward>,
}

impl StaticAwardSource {
    pub(crate) fn new(records: Vec<RawAward>) -> Self {
        Self { records }
    }

    pub(crate) fn from_path(path: &Path) -> Result<Self, RawAwardError> {
        Ok(Self::new(load_raw_awards(path)?))
    }
}

impl AwardSource for StaticAwardSource {
    fn fetch_page(&self, page: usize, page_size: usize) -> Result<AwardPage, SourceError> {
        let start = page.saturating_sub(1).saturating_mul(page_size);
        let results = self
            .records
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();
        Ok(AwardPage {
            results,
            total: Some(self.records.len()),
        })
    }
}

/// Insight store backed by a single JSON array on disk.
#[derive(Debug)]
pub(crate) struct JsonFileInsightStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileInsightStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub(crate) fn load(&self) -> Result<Vec<StoredInsight>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|err| {
            StoreError::Corrupt(format!("{}: {err}", self.path.display()))
        })
    }
}

impl InsightStore for JsonFileInsightStore {
    fn existing_fingerprints(
        &self,
        fingerprints: &[Fingerprint],
    ) -> Result<BTreeSet<Fingerprint>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .map(|row| row.draft.fingerprint)
            .filter(|fingerprint| fingerprints.contains(fingerprint))
            .collect())
    }

    fn insert(&self, insights: Vec<StoredInsight>) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        let mut rows = self.load()?;
        let mut known: BTreeSet<Fingerprint> =
            rows.iter().map(|row| row.draft.fingerprint.clone()).collect();
        for insight in insights {
            if known.insert(insight.draft.fingerprint.clone()) {
                rows.push(insight);
            }
        }

        let rendered = serde_json::to_string_pretty(&rows)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        self.replace_contents(rendered.as_bytes())
    }
}

impl JsonFileInsightStore {
    /// Writes a sibling temp file and renames it over the store, so readers see
    /// either the old rows or the new ones.
    fn replace_contents(&self, contents: &[u8]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Month-over-month threshold as a non-negative, finite percent.
pub(crate) fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a percent ({err})"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("threshold must be a non-negative percent, got '{raw}'"));
    }
    Ok(value)
}
