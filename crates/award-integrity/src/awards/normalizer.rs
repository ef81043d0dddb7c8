use super::parser::parse_date;
use super::{Award, AwardTypeCode, RawAward};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

// Alias lists hold keys already passed through `normalize_key`, in precedence order.
const ID_KEYS: &[&str] = &["awardid", "id"];
const AMOUNT_KEYS: &[&str] = &["awardamount", "federalfundsobligated"];
const START_KEYS: &[&str] = &["startdate", "date", "periodofperformancestartdate"];
const END_KEYS: &[&str] = &["enddate", "periodofperformanceenddate"];
const RECIPIENT_KEYS: &[&str] = &["recipientname"];
const FUNDING_AGENCY_KEYS: &[&str] = &["fundingagency"];
const AWARDING_AGENCY_KEYS: &[&str] = &["awardingagency"];
const STATE_KEYS: &[&str] = &["placeofperformancestate", "recipientstate", "state"];
const DESCRIPTION_KEYS: &[&str] = &["description"];
const AWARD_TYPE_KEYS: &[&str] = &["awardtypecode", "awardtype"];

/// Maps raw records onto the canonical [`Award`] shape, one-to-one and in input order.
///
/// Never fails: unparsable dates become `None`, missing or non-numeric amounts become `0`.
/// Scores are left empty for the scorer to fill.
pub fn normalize_awards(raw: &[RawAward]) -> Vec<Award> {
    raw.iter().map(normalize_award).collect()
}

pub fn normalize_award(raw: &RawAward) -> Award {
    let fields = FieldIndex::new(raw);

    Award {
        id: fields.text(ID_KEYS).unwrap_or_default(),
        amount: fields.lookup(AMOUNT_KEYS).map(amount_value).unwrap_or(0.0),
        score: None,
        start_date: fields.date(START_KEYS),
        end_date: fields.date(END_KEYS),
        recipient: fields.text(RECIPIENT_KEYS),
        funding_agency: fields.text(FUNDING_AGENCY_KEYS),
        awarding_agency: fields.text(AWARDING_AGENCY_KEYS),
        state: fields.text(STATE_KEYS),
        description: fields.text(DESCRIPTION_KEYS),
        award_type: fields
            .text(AWARD_TYPE_KEYS)
            .and_then(|value| AwardTypeCode::parse(&value)),
    }
}

/// Lowercases and drops everything but ASCII alphanumerics, so `"Award ID"`,
/// `award_id` and `awardId` all collapse to `awardid`.
pub(crate) fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

struct FieldIndex<'a> {
    values: HashMap<String, &'a Value>,
}

impl<'a> FieldIndex<'a> {
    fn new(raw: &'a RawAward) -> Self {
        let mut values = HashMap::with_capacity(raw.fields().len());
        for (key, value) in raw.fields() {
            if value.is_null() {
                continue;
            }
            values.entry(normalize_key(key)).or_insert(value);
        }
        Self { values }
    }

    fn lookup(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| {
            self.values
                .get(*key)
                .copied()
                .filter(|value| !is_blank(value))
        })
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        self.lookup(keys).and_then(text_value)
    }

    fn date(&self, keys: &[&str]) -> Option<NaiveDate> {
        self.text(keys).and_then(|value| parse_date(&value))
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.trim().is_empty())
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn amount_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };

    parsed
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .unwrap_or(0.0)
}
