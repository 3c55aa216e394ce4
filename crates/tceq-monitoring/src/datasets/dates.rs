use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};

/// TCEQ fiscal years start on September 1 of the prior calendar year.
pub const FISCAL_YEAR_START_MONTH: u32 = 9;

/// Earliest year an export date can plausibly carry. Anything older is a truncated or
/// mistyped year.
pub const MIN_RECORD_YEAR: i32 = 1900;

// `%Y` also accepts "22", so the two-digit form is only reached once that read is rejected.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d"];

/// Fiscal year a date falls in: September 1, 2022 opens fiscal year 2023.
pub fn fiscal_year(date: NaiveDate) -> i32 {
    if date.month() >= FISCAL_YEAR_START_MONTH {
        date.year() + 1
    } else {
        date.year()
    }
}

/// Parses an export date cell. Unparseable text is treated as a missing value.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    // Some exports carry a trailing "0:00" time component.
    let token = value.split_whitespace().next()?;

    DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(token, format).ok())
        .find(|date| date.year() >= MIN_RECORD_YEAR)
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = empty_string_as_none(deserializer)?;
    Ok(raw.as_deref().and_then(parse_record_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn fiscal_year_turns_over_on_september_first() {
        assert_eq!(fiscal_year(date(2022, 8, 31)), 2022);
        assert_eq!(fiscal_year(date(2022, 9, 1)), 2023);
        assert_eq!(fiscal_year(date(2022, 12, 31)), 2023);
        assert_eq!(fiscal_year(date(2023, 1, 1)), 2023);
    }

    #[test]
    fn parses_month_day_year_and_iso_dates() {
        assert_eq!(parse_record_date("9/1/2022"), Some(date(2022, 9, 1)));
        assert_eq!(parse_record_date("09/01/2022"), Some(date(2022, 9, 1)));
        assert_eq!(parse_record_date("2022-09-01"), Some(date(2022, 9, 1)));
        assert_eq!(parse_record_date(" 3/4/2015 0:00 "), Some(date(2015, 3, 4)));
    }

    #[test]
    fn two_digit_years_resolve_to_modern_dates() {
        assert_eq!(parse_record_date("9/1/22"), Some(date(2022, 9, 1)));
        assert_eq!(parse_record_date("12/31/99"), Some(date(1999, 12, 31)));
        assert_eq!(parse_record_date("9/1/22").map(fiscal_year), Some(2023));
    }

    #[test]
    fn malformed_dates_become_missing() {
        assert!(parse_record_date("").is_none());
        assert!(parse_record_date("   ").is_none());
        assert!(parse_record_date("TBD").is_none());
        assert!(parse_record_date("13/45/2020").is_none());
        assert!(parse_record_date("9/1/0022").is_none());
        assert!(parse_record_date("0099-12-31").is_none());
    }
}
