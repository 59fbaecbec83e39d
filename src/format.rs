//! Display Formatting
//!
//! French display helpers for dates, numbers and percentages.

use chrono::NaiveDate;

/// Format an ISO date (`YYYY-MM-DD`) as `DD/MM/YYYY`.
///
/// Unparseable input is returned unchanged.
pub fn format_date_fr(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Round a number and group thousands with non-breaking spaces (fr-FR style).
pub fn format_number_fr(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            grouped.push('\u{00a0}');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a ratio as a percentage with two decimals, e.g. `0.845` → `84.50%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_iso_to_french() {
        assert_eq!(format_date_fr("2024-03-05"), "05/03/2024");
    }

    #[test]
    fn date_invalid_passes_through() {
        assert_eq!(format_date_fr("N/A"), "N/A");
        assert_eq!(format_date_fr(""), "");
    }

    #[test]
    fn number_rounds_and_groups() {
        assert_eq!(format_number_fr(1234567.4), "1\u{00a0}234\u{00a0}567");
        assert_eq!(format_number_fr(999.6), "1\u{00a0}000");
        assert_eq!(format_number_fr(42.0), "42");
        assert_eq!(format_number_fr(0.0), "0");
    }

    #[test]
    fn percentage_two_decimals() {
        assert_eq!(format_percentage(0.845), "84.50%");
        assert_eq!(format_percentage(1.0), "100.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }
}
