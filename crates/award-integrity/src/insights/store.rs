//! Persistence boundary for mined drafts, keyed by fingerprint.

use super::{Fingerprint, InsightDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightStatus {
    PendingReview,
    /// Set by the review step outside this crate. Published rows still block
    /// re-insertion of their fingerprint.
    Published,
}

/// Draft as written to the store. New rows always start in review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredInsight {
    #[serde(flatten)]
    pub draft: InsightDraft,
    pub status: InsightStatus,
    pub generated_at: DateTime<Utc>,
}

impl StoredInsight {
    pub fn pending(mut draft: InsightDraft, generated_at: DateTime<Utc>) -> Self {
        draft.auto_publish_eligible = draft.risk_level.auto_publishable();
        Self {
            draft,
            status: InsightStatus::PendingReview,
            generated_at,
        }
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.draft.fingerprint
    }
}

/// Storage abstraction with a unique constraint on fingerprint.
pub trait InsightStore: Send + Sync {
    /// Returns the subset of `fingerprints` already stored.
    fn existing_fingerprints(
        &self,
        fingerprints: &[Fingerprint],
    ) -> Result<BTreeSet<Fingerprint>, StoreError>;

    fn insert(&self, insights: Vec<StoredInsight>) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("insight store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("insight store is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PersistOutcome {
    pub created: usize,
    pub skipped: usize,
}

/// Inserts drafts whose fingerprint is not yet stored. Repeats within `drafts` are
/// skipped as well, so a rerun over the same window creates nothing.
pub fn persist_drafts<S>(
    store: &S,
    drafts: Vec<InsightDraft>,
    generated_at: DateTime<Utc>,
) -> Result<PersistOutcome, StoreError>
where
    S: InsightStore + ?Sized,
{
    if drafts.is_empty() {
        return Ok(PersistOutcome::default());
    }

    let fingerprints: Vec<Fingerprint> = drafts
        .iter()
        .map(|draft| draft.fingerprint.clone())
        .collect();
    let mut seen = store.existing_fingerprints(&fingerprints)?;

    let total = drafts.len();
    let fresh: Vec<StoredInsight> = drafts
        .into_iter()
        .filter(|draft| seen.insert(draft.fingerprint.clone()))
        .map(|draft| StoredInsight::pending(draft, generated_at))
        .collect();

    let outcome = PersistOutcome {
        created: fresh.len(),
        skipped: total - fresh.len(),
    };
    if !fresh.is_empty() {
        store.insert(fresh)?;
    }
    debug!(created = outcome.created, skipped = outcome.skipped, "persisted insight drafts");

    Ok(outcome)
}
