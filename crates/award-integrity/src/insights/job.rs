//! Scheduled insight generation: fetch, normalize, score, mine, persist.

use super::store::{persist_drafts, InsightStore, StoreError};
use super::{mine_insights, InsightDraft, InsightOptions};
use crate::awards::source::{fetch_corpus, AwardSource, FetchPolicy, SourceError};
use crate::awards::normalize_awards;
use crate::scoring::score_awards;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct InsightJobConfig {
    pub fetch: FetchPolicy,
    pub options: InsightOptions,
}

/// Drafts mined from one fetched corpus, before persistence.
#[derive(Debug, Clone)]
pub struct JobPreview {
    pub drafts: Vec<InsightDraft>,
    pub total_awards: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub created: usize,
    pub skipped: usize,
    pub total_awards: usize,
    pub truncated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InsightJobError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct InsightJob<S, T> {
    source: Arc<S>,
    store: Arc<T>,
    config: InsightJobConfig,
}

impl<S, T> InsightJob<S, T>
where
    S: AwardSource + 'static,
    T: InsightStore + 'static,
{
    pub fn new(source: Arc<S>, store: Arc<T>, config: InsightJobConfig) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub fn config(&self) -> &InsightJobConfig {
        &self.config
    }

    /// Fetches and mines without touching the store.
    pub fn preview(&self, today: NaiveDate) -> Result<JobPreview, InsightJobError> {
        let corpus = fetch_corpus(self.source.as_ref(), &self.config.fetch)?;
        let total_awards = corpus.awards.len();
        info!(
            fetched = total_awards,
            reported_total = corpus.total,
            truncated = corpus.truncated,
            "fetched award corpus"
        );
        if corpus.truncated {
            warn!(fetched = total_awards, "mining a truncated award corpus");
        }

        let awards = score_awards(normalize_awards(&corpus.awards));
        let options = InsightOptions {
            today: Some(self.config.options.today.unwrap_or(today)),
            ..self.config.options.clone()
        };
        let drafts = mine_insights(&awards, &options);
        info!(drafts = drafts.len(), "mined insight drafts");

        Ok(JobPreview {
            drafts,
            total_awards,
            truncated: corpus.truncated,
        })
    }

    pub fn run(&self, now: DateTime<Utc>) -> Result<JobReport, InsightJobError> {
        let preview = self.preview(now.date_naive())?;
        let outcome = persist_drafts(self.store.as_ref(), preview.drafts, now)?;
        info!(
            created = outcome.created,
            skipped = outcome.skipped,
            "persisted insight drafts"
        );

        Ok(JobReport {
            created: outcome.created,
            skipped: outcome.skipped,
            total_awards: preview.total_awards,
            truncated: preview.truncated,
        })
    }
}
