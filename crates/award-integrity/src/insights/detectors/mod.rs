mod concentration;
mod month_over_month;
mod outliers;

pub use concentration::SpendingConcentrationDetector;
pub use month_over_month::MonthOverMonthDetector;
pub use outliers::OutlierDetector;

use super::{AnalysisWindow, InsightDraft};

/// One independent finding generator run by the miner.
pub trait InsightDetector: Send + Sync {
    /// Decide if this detector should run for the given window.
    fn enable(&self, _window: &AnalysisWindow<'_>) -> bool {
        true
    }

    fn detect(&self, window: &AnalysisWindow<'_>) -> Vec<InsightDraft>;

    /// Returns a stable name for logging.
    fn name(&self) -> &'static str;
}
