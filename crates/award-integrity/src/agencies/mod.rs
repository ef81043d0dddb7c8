//! Per-agency roll-ups for the dashboard charts.
//!
//! Every call recomputes from the full scored award list; there is no running state.

mod format;

pub use format::format_agency_currency;

use crate::awards::Award;
use crate::scoring::ComplianceBand;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl ScoreDistribution {
    fn record(&mut self, band: ComplianceBand) {
        match band {
            ComplianceBand::Green => self.green += 1,
            ComplianceBand::Yellow => self.yellow += 1,
            ComplianceBand::Red => self.red += 1,
        }
    }

    pub const fn total(&self) -> usize {
        self.green + self.yellow + self.red
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyStats {
    pub agency_name: String,
    pub total_spending: f64,
    pub project_count: usize,
    pub avg_score: u8,
    pub score_distribution: ScoreDistribution,
}

#[derive(Default)]
struct AgencyAccumulator {
    total_spending: f64,
    project_count: usize,
    score_sum: u64,
    distribution: ScoreDistribution,
}

/// Groups awards by funding agency and returns the groups by total spend, largest first.
///
/// Unscored awards count as a score of 0, both in the average and in the red band.
pub fn aggregate_by_agency(awards: &[Award]) -> Vec<AgencyStats> {
    let mut groups: BTreeMap<&str, AgencyAccumulator> = BTreeMap::new();

    for award in awards {
        let score = award.total_score().unwrap_or(0);
        let entry = groups.entry(award.agency_bucket()).or_default();
        entry.total_spending += award.amount;
        entry.project_count += 1;
        entry.score_sum += u64::from(score);
        entry.distribution.record(ComplianceBand::from_score(score));
    }

    let mut stats: Vec<AgencyStats> = groups
        .into_iter()
        .map(|(agency_name, group)| AgencyStats {
            agency_name: agency_name.to_string(),
            total_spending: group.total_spending,
            project_count: group.project_count,
            avg_score: rounded_mean(group.score_sum, group.project_count),
            score_distribution: group.distribution,
        })
        .collect();

    // Stable sort: equal spend keeps alphabetical order from the map.
    stats.sort_by(|left, right| right.total_spending.total_cmp(&left.total_spending));
    stats
}

fn rounded_mean(sum: u64, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    ((2 * sum + count) / (2 * count)).min(100) as u8
}
