//! Paged access to the upstream award corpus.
//!
//! The engine never performs I/O itself; batch callers implement [`AwardSource`]
//! and drain it through [`fetch_corpus`], which bounds both the number of pages
//! and the retries per page.

use super::{RawAward, RawAwardError};
use tracing::{debug, warn};

/// One page of raw awards plus the upstream's reported corpus size, if known.
#[derive(Debug, Clone, Default)]
pub struct AwardPage {
    pub results: Vec<RawAward>,
    pub total: Option<usize>,
}

/// Paged fetch capability for raw award records. Pages are 1-based.
pub trait AwardSource: Send + Sync {
    fn fetch_page(&self, page: usize, page_size: usize) -> Result<AwardPage, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("award source unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Input(#[from] RawAwardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    pub page_size: usize,
    pub max_pages: usize,
    pub attempts: usize,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_pages: 10,
            attempts: 3,
        }
    }
}

/// Snapshot of the corpus as fetched for a single run.
#[derive(Debug, Clone, Default)]
pub struct FetchedCorpus {
    pub awards: Vec<RawAward>,
    pub total: usize,
    pub truncated: bool,
}

/// Drains `source` page by page until the reported total is reached, a short page
/// arrives, or `max_pages` is hit. The corpus is truncated when the cap stops paging
/// early or fewer records arrive than the upstream reported.
pub fn fetch_corpus<S>(source: &S, policy: &FetchPolicy) -> Result<FetchedCorpus, SourceError>
where
    S: AwardSource + ?Sized,
{
    let mut awards = Vec::new();
    let mut reported_total = None;
    let mut exhausted = false;

    for page in 1..=policy.max_pages {
        let result = fetch_with_retry(source, page, policy)?;
        let received = result.results.len();
        awards.extend(result.results);
        if result.total.is_some() {
            reported_total = result.total;
        }
        debug!(page, received, collected = awards.len(), "fetched award page");

        if reported_total.is_some_and(|total| awards.len() >= total) {
            exhausted = true;
            break;
        }

        if received < policy.page_size {
            exhausted = true;
            break;
        }
    }

    let total = reported_total.unwrap_or(awards.len()).max(awards.len());
    let truncated = !exhausted || awards.len() < total;
    if truncated {
        warn!(
            collected = awards.len(),
            total,
            max_pages = policy.max_pages,
            "award corpus truncated"
        );
    }

    Ok(FetchedCorpus {
        awards,
        total,
        truncated,
    })
}

fn fetch_with_retry<S>(source: &S, page: usize, policy: &FetchPolicy) -> Result<AwardPage, SourceError>
where
    S: AwardSource + ?Sized,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match source.fetch_page(page, policy.page_size) {
            Ok(result) => return Ok(result),
            Err(err) if attempt < attempts => {
                warn!(page, attempt, error = %err, "award page fetch failed; retrying");
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use std::sync::Mutex;

    struct PagedSource {
        records: Vec<RawAward>,
        reported_total: Option<usize>,
        failures_remaining: Mutex<usize>,
        calls: Mutex<Vec<usize>>,
    }

    impl PagedSource {
        fn new(count: usize, report_total: bool) -> Self {
            let records = (0..count)
                .map(|index| {
                    let mut fields = Map::new();
                    fields.insert("Award ID".to_string(), json!(format!("award-{index}")));
                    RawAward(fields)
                })
                .collect();
            Self {
                reported_total: report_total.then_some(count),
                records,
                failures_remaining: Mutex::new(0),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_first(mut self, failures: usize) -> Self {
            self.failures_remaining = Mutex::new(failures);
            self
        }

        fn reporting_total(mut self, total: usize) -> Self {
            self.reported_total = Some(total);
            self
        }

        fn calls(&self) -> Vec<usize> {
            self.calls.lock().expect("calls mutex").clone()
        }
    }

    impl AwardSource for PagedSource {
        fn fetch_page(&self, page: usize, page_size: usize) -> Result<AwardPage, SourceError> {
            self.calls.lock().expect("calls mutex").push(page);
            let mut failures = self.failures_remaining.lock().expect("failure mutex");
            if *failures > 0 {
                *failures -= 1;
                return Err(SourceError::Unavailable("upstream timeout".to_string()));
            }

            let start = (page - 1) * page_size;
            let results = self
                .records
                .iter()
                .skip(start)
                .take(page_size)
                .cloned()
                .collect();
            Ok(AwardPage {
                results,
                total: self.reported_total,
            })
        }
    }

    fn policy(page_size: usize, max_pages: usize) -> FetchPolicy {
        FetchPolicy {
            page_size,
            max_pages,
            attempts: 2,
        }
    }

    #[test]
    fn stops_once_reported_total_is_collected() {
        let source = PagedSource::new(20, true);
        let corpus = fetch_corpus(&source, &policy(10, 5)).expect("fetch");
        assert_eq!(corpus.awards.len(), 20);
        assert_eq!(corpus.total, 20);
        assert!(!corpus.truncated);
        assert_eq!(source.calls(), vec![1, 2]);
    }

    #[test]
    fn stops_on_short_page_when_total_unknown() {
        let source = PagedSource::new(25, false);
        let corpus = fetch_corpus(&source, &policy(10, 5)).expect("fetch");
        assert_eq!(corpus.awards.len(), 25);
        assert_eq!(corpus.total, 25);
        assert!(!corpus.truncated);
        assert_eq!(source.calls(), vec![1, 2, 3]);
    }

    #[test]
    fn page_cap_bounds_fetch_and_flags_truncation() {
        let source = PagedSource::new(50, true);
        let corpus = fetch_corpus(&source, &policy(10, 2)).expect("fetch");
        assert_eq!(corpus.awards.len(), 20);
        assert_eq!(corpus.total, 50);
        assert!(corpus.truncated);
    }

    #[test]
    fn short_page_before_reported_total_is_truncated() {
        let source = PagedSource::new(15, true).reporting_total(40);
        let corpus = fetch_corpus(&source, &policy(10, 5)).expect("fetch");
        assert_eq!(corpus.awards.len(), 15);
        assert_eq!(corpus.total, 40);
        assert!(corpus.truncated);
        assert_eq!(source.calls(), vec![1, 2]);
    }

    #[test]
    fn retries_transient_failures_within_attempt_budget() {
        let source = PagedSource::new(5, true).failing_first(1);
        let corpus = fetch_corpus(&source, &policy(10, 3)).expect("retry succeeds");
        assert_eq!(corpus.awards.len(), 5);
        assert_eq!(source.calls(), vec![1, 1]);
    }

    #[test]
    fn surfaces_error_after_attempts_exhausted() {
        let source = PagedSource::new(5, true).failing_first(2);
        let error = fetch_corpus(&source, &policy(10, 3)).expect_err("fails");
        assert!(matches!(error, SourceError::Unavailable(_)));
        assert_eq!(source.calls(), vec![1, 1]);
    }
}
