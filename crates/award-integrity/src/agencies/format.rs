/// Compact dollar label used on agency charts: `$1.2B`, `$3.4M`, `$560K`.
pub fn format_agency_currency(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("${:.1}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else {
        format!("${:.0}K", amount / 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::format_agency_currency;

    #[test]
    fn picks_unit_by_magnitude() {
        assert_eq!(format_agency_currency(2_340_000_000.0), "$2.3B");
        assert_eq!(format_agency_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_agency_currency(45_600_000.0), "$45.6M");
        assert_eq!(format_agency_currency(560_400.0), "$560K");
        assert_eq!(format_agency_currency(0.0), "$0K");
    }
}
