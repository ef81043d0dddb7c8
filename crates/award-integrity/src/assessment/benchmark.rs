use serde::Serialize;

/// Fixed public benchmark figures. The average was derived once from public
/// award data and is not recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Benchmarks {
    pub average_score: u8,
    pub high_compliance_threshold: u8,
    pub medium_compliance_threshold: u8,
    pub description: &'static str,
}

pub const fn benchmarks() -> Benchmarks {
    Benchmarks {
        average_score: 68,
        high_compliance_threshold: 75,
        medium_compliance_threshold: 50,
        description: "Based on analysis of public IIJA award data",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkPosition {
    Above,
    Average,
    Below,
}

/// Difference bands against the public average. The percentile attached to each
/// band is a fixed proxy, not a computed percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkBand {
    FarAbove,
    Above,
    Average,
    Below,
    FarBelow,
}

impl BenchmarkBand {
    pub const fn from_difference(difference: i32) -> Self {
        if difference >= 15 {
            Self::FarAbove
        } else if difference >= 5 {
            Self::Above
        } else if difference >= -5 {
            Self::Average
        } else if difference >= -15 {
            Self::Below
        } else {
            Self::FarBelow
        }
    }

    pub const fn percentile(self) -> u8 {
        match self {
            Self::FarAbove => 90,
            Self::Above => 75,
            Self::Average => 50,
            Self::Below => 25,
            Self::FarBelow => 10,
        }
    }

    pub const fn position(self) -> BenchmarkPosition {
        match self {
            Self::FarAbove | Self::Above => BenchmarkPosition::Above,
            Self::Average => BenchmarkPosition::Average,
            Self::Below | Self::FarBelow => BenchmarkPosition::Below,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FarAbove => "far above",
            Self::Above => "above",
            Self::Average => "average",
            Self::Below => "below",
            Self::FarBelow => "far below",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchmarkComparison {
    pub band: BenchmarkBand,
    pub comparison: BenchmarkPosition,
    pub percentile: u8,
    /// Absolute distance from the public average; direction is in `comparison`.
    pub difference: u8,
}

pub fn compare_to_benchmark(user_score: u8) -> BenchmarkComparison {
    let difference = i32::from(user_score) - i32::from(benchmarks().average_score);
    let band = BenchmarkBand::from_difference(difference);

    BenchmarkComparison {
        band,
        comparison: band.position(),
        percentile: band.percentile(),
        difference: difference.unsigned_abs() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_follow_difference_thresholds() {
        assert_eq!(BenchmarkBand::from_difference(15), BenchmarkBand::FarAbove);
        assert_eq!(BenchmarkBand::from_difference(14), BenchmarkBand::Above);
        assert_eq!(BenchmarkBand::from_difference(5), BenchmarkBand::Above);
        assert_eq!(BenchmarkBand::from_difference(4), BenchmarkBand::Average);
        assert_eq!(BenchmarkBand::from_difference(-5), BenchmarkBand::Average);
        assert_eq!(BenchmarkBand::from_difference(-6), BenchmarkBand::Below);
        assert_eq!(BenchmarkBand::from_difference(-15), BenchmarkBand::Below);
        assert_eq!(BenchmarkBand::from_difference(-16), BenchmarkBand::FarBelow);
    }

    #[test]
    fn comparison_reports_absolute_difference() {
        let below = compare_to_benchmark(40);
        assert_eq!(below.difference, 28);
        assert_eq!(below.comparison, BenchmarkPosition::Below);
        assert_eq!(below.band, BenchmarkBand::FarBelow);
        assert_eq!(below.percentile, 10);
    }
}
