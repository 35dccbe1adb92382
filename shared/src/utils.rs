// Brazilian number and date handling shared by the engine and the CLI.
// Parsing never fails loudly at the row level: bad amounts coerce to zero and
// bad dates to `None`, the validator is the one that reports them.

pub mod brazilian_format {
    use std::str::FromStr;
    use anyhow::{Result, anyhow};
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    use crate::models::RawValue;

    // Formats tried after the D/M/YYYY form, in order. All of them start with
    // a four-digit year, checked before any of them is tried.
    const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    const FALLBACK_DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    // Characters allowed in something we hand to f64::from_str. Keeps out
    // "inf", "nan" and friends which Rust would happily accept.
    fn looks_numeric(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    }

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replacen(',', ".", 1); // Replace decimal separator

        if !looks_numeric(&normalized) {
            return Err(anyhow!("Failed to parse decimal '{}': not a number", s));
        }
        let value = f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Failed to parse decimal '{}': out of range", s));
        }
        Ok(value)
    }

    /// Plain decimal literal such as `"1234.56"`, `"-3"` or `"1e3"`.
    pub fn is_plain_number(s: &str) -> bool {
        let s = s.trim();
        looks_numeric(s) && f64::from_str(s).map(f64::is_finite).unwrap_or(false)
    }

    /// Permissive amount coercion. Never fails: empty or unparseable input is 0.
    pub fn parse_number(value: &RawValue) -> f64 {
        match value {
            RawValue::Number(n) if n.is_finite() => *n,
            RawValue::Text(s) if !s.trim().is_empty() => parse_decimal(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Whether a raw cell counts as numeric for validation purposes.
    /// `None` means the cell is empty and is not inspected at all.
    pub fn is_numeric(value: &RawValue) -> Option<bool> {
        match value {
            RawValue::Empty => None,
            RawValue::Text(s) if s.trim().is_empty() => None,
            RawValue::Number(_) | RawValue::Bool(_) | RawValue::Date(_) => Some(true),
            RawValue::Text(s) => Some(is_plain_number(s) || parse_decimal(s).is_ok()),
        }
    }

    // Splits "D/M/YYYY" or "DD/MM/YYYY" into (day, month, year) when the
    // shape matches. Day and month need not be zero-padded.
    fn day_month_year_parts(s: &str) -> Option<(u32, u32, i32)> {
        let mut parts = s.split('/');
        let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let digits = |p: &str, min: usize, max: usize| {
            (min..=max).contains(&p.len()) && p.chars().all(|c| c.is_ascii_digit())
        };
        if !(digits(day, 1, 2) && digits(month, 1, 2) && digits(year, 4, 4)) {
            return None;
        }
        Some((day.parse().ok()?, month.parse().ok()?, year.parse().ok()?))
    }

    // chrono's %Y takes any number of digits, so "31/12/23" would otherwise
    // come back as the year 31.
    fn starts_with_full_year(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() >= 4
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && !bytes.get(4).is_some_and(u8::is_ascii_digit)
    }

    // "YYYY-MM" is the first of that month, "YYYY" the first of January.
    fn parse_partial_date(s: &str) -> Option<NaiveDate> {
        let (year, month) = match s.split_once('-') {
            Some((year, month)) => {
                if month.is_empty() || month.len() > 2 || !month.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                (year, month.parse().ok()?)
            }
            None if s.len() == 4 => (s, 1),
            None => return None,
        };
        NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
    }

    fn parse_generic_date(s: &str) -> Option<NaiveDate> {
        if !starts_with_full_year(s) {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }
        FALLBACK_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| {
                FALLBACK_DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| parse_partial_date(s))
    }

    /// Reference-date coercion. Never fails: anything unrecognized is `None`.
    pub fn to_date_or_null(value: &RawValue) -> Option<NaiveDate> {
        match value {
            RawValue::Date(d) => Some(*d),
            RawValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                // A D/M/YYYY shape is authoritative: an impossible day there
                // does not fall through to the generic formats.
                match day_month_year_parts(s) {
                    Some((day, month, year)) => NaiveDate::from_ymd_opt(year, month, day),
                    None => parse_generic_date(s),
                }
            }
            _ => None,
        }
    }

    fn group_thousands(n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out
    }

    /// `1234.5` -> `"R$ 1.234,50"`. Non-finite values render as zero.
    pub fn format_brl(value: f64) -> String {
        if !value.is_finite() {
            return "R$ 0,00".to_string();
        }
        let cents = (value.abs() * 100.0).round() as u64;
        let body = format!("R$ {},{:02}", group_thousands(cents / 100), cents % 100);
        if value < 0.0 && cents > 0 {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Counts are integral; rounds and groups thousands with '.'.
    pub fn format_count(value: f64) -> String {
        if !value.is_finite() {
            return "0".to_string();
        }
        let rounded = value.round();
        let grouped = group_thousands(rounded.abs() as u64);
        if rounded < 0.0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    pub fn format_percent(rate: f64) -> String {
        format!("{:.1}%", rate)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn text(s: &str) -> RawValue {
            RawValue::Text(s.to_string())
        }

        #[test]
        fn test_parse_decimal_simple() {
            assert_eq!(parse_decimal("123,45").unwrap(), 123.45);
        }

        #[test]
        fn test_parse_decimal_with_thousands() {
            assert_eq!(parse_decimal("1.234,56").unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_decimal_large_number() {
            assert_eq!(parse_decimal("600.822.115,84").unwrap(), 600822115.84);
        }

        #[test]
        fn test_parse_decimal_rejects_words() {
            assert!(parse_decimal("abc").is_err());
            assert!(parse_decimal("inf").is_err());
            assert!(parse_decimal("NaN").is_err());
        }

        #[test]
        fn test_parse_number_never_fails() {
            assert_eq!(parse_number(&RawValue::Empty), 0.0);
            assert_eq!(parse_number(&text("")), 0.0);
            assert_eq!(parse_number(&text("abc")), 0.0);
            assert_eq!(parse_number(&RawValue::Bool(true)), 0.0);
            assert_eq!(parse_number(&text(" 1.234,56 ")), 1234.56);
            assert_eq!(parse_number(&text("-10,5")), -10.5);
            assert_eq!(parse_number(&RawValue::Number(42.0)), 42.0);
        }

        #[test]
        fn test_parse_number_dot_is_thousands_in_text() {
            // Text amounts are always read pt-BR style.
            assert_eq!(parse_number(&text("1.500")), 1500.0);
        }

        #[test]
        fn test_is_numeric() {
            assert_eq!(is_numeric(&RawValue::Empty), None);
            assert_eq!(is_numeric(&text("  ")), None);
            assert_eq!(is_numeric(&RawValue::Number(-1.0)), Some(true));
            assert_eq!(is_numeric(&text("1.234,56")), Some(true));
            assert_eq!(is_numeric(&text("12.5")), Some(true));
            assert_eq!(is_numeric(&text("abc")), Some(false));
            assert_eq!(is_numeric(&text("12abc")), Some(false));
        }

        #[test]
        fn test_to_date_day_month_year() {
            assert_eq!(to_date_or_null(&text("31/12/2023")), NaiveDate::from_ymd_opt(2023, 12, 31));
            assert_eq!(to_date_or_null(&text("1/2/2024")), NaiveDate::from_ymd_opt(2024, 2, 1));
        }

        #[test]
        fn test_to_date_invalid_day_is_none() {
            assert_eq!(to_date_or_null(&text("32/12/2023")), None);
            assert_eq!(to_date_or_null(&text("31/12/23")), None);
            assert_eq!(to_date_or_null(&text("15/01/24")), None);
            assert_eq!(to_date_or_null(&text("05/03/24")), None);
        }

        #[test]
        fn test_to_date_short_years_never_parse_as_ancient_dates() {
            assert_eq!(to_date_or_null(&text("23/12/31")), None);
            assert_eq!(to_date_or_null(&text("24-01-15")), None);
            assert_eq!(to_date_or_null(&text("20240-01-15")), None);
        }

        #[test]
        fn test_to_date_partial_iso_forms() {
            assert_eq!(to_date_or_null(&text("2024-01")), NaiveDate::from_ymd_opt(2024, 1, 1));
            assert_eq!(to_date_or_null(&text("2024-3")), NaiveDate::from_ymd_opt(2024, 3, 1));
            assert_eq!(to_date_or_null(&text("2024")), NaiveDate::from_ymd_opt(2024, 1, 1));
            assert_eq!(to_date_or_null(&text("2024-13")), None);
            assert_eq!(to_date_or_null(&text("2024-01-x")), None);
        }

        #[test]
        fn test_to_date_with_hours_and_minutes() {
            assert_eq!(to_date_or_null(&text("2024-01-15 10:00")), NaiveDate::from_ymd_opt(2024, 1, 15));
            assert_eq!(to_date_or_null(&text("2024-01-15T10:00")), NaiveDate::from_ymd_opt(2024, 1, 15));
            assert_eq!(to_date_or_null(&text("2024-01-15 10:00:30")), NaiveDate::from_ymd_opt(2024, 1, 15));
        }

        #[test]
        fn test_to_date_generic_fallback() {
            assert_eq!(to_date_or_null(&text("2024-03-15")), NaiveDate::from_ymd_opt(2024, 3, 15));
            assert_eq!(to_date_or_null(&text("2024-03-15T10:20:00Z")), NaiveDate::from_ymd_opt(2024, 3, 15));
            assert_eq!(to_date_or_null(&text("2024/03/15")), NaiveDate::from_ymd_opt(2024, 3, 15));
        }

        #[test]
        fn test_to_date_garbage_is_none() {
            assert_eq!(to_date_or_null(&text("not a date")), None);
            assert_eq!(to_date_or_null(&RawValue::Empty), None);
            assert_eq!(to_date_or_null(&RawValue::Number(45000.0)), None);
        }

        #[test]
        fn test_format_brl() {
            assert_eq!(format_brl(1234.5), "R$ 1.234,50");
            assert_eq!(format_brl(0.0), "R$ 0,00");
            assert_eq!(format_brl(-600822115.84), "-R$ 600.822.115,84");
            assert_eq!(format_brl(f64::NAN), "R$ 0,00");
        }

        #[test]
        fn test_format_count_and_percent() {
            assert_eq!(format_count(1234567.0), "1.234.567");
            assert_eq!(format_count(999.0), "999");
            assert_eq!(format_percent(50.0), "50.0%");
            assert_eq!(format_percent(33.333), "33.3%");
        }
    }
}
