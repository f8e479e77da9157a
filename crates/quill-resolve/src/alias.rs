//! Date alias evaluation.
//!
//! Maps the symbolic tokens `today`, `yesterday` and `tomorrow` — or an
//! explicit date string in the configured format — to a calendar date.
//! Offsets are day-granular; time of day never influences the filename.

use chrono::{Days, NaiveDate};

use crate::datefmt;
use crate::error::{ResolveError, ResolveResult};

/// Resolve an alias token to a date, keeping the human-facing label.
///
/// # Errors
///
/// Returns [`ResolveError::DailyAliasInvalid`] when an explicit token does
/// not parse under `format`, or when a day offset leaves the supported
/// calendar range.
pub fn alias_date(
    token: &str,
    today: NaiveDate,
    format: &str,
) -> ResolveResult<(NaiveDate, String)> {
    let out_of_range = || ResolveError::DailyAliasInvalid {
        alias: token.to_string(),
        format: format.to_string(),
    };
    match token {
        "today" => Ok((today, "today".to_string())),
        "yesterday" => Ok((
            today.checked_sub_days(Days::new(1)).ok_or_else(out_of_range)?,
            "yesterday".to_string(),
        )),
        "tomorrow" => Ok((
            today.checked_add_days(Days::new(1)).ok_or_else(out_of_range)?,
            "tomorrow".to_string(),
        )),
        explicit => {
            let date = datefmt::parse(explicit, format).ok_or_else(out_of_range)?;
            Ok((date, explicit.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_symbolic_tokens() {
        let today = day(2023, 5, 9);
        assert_eq!(
            alias_date("today", today, "YYYY-MM-DD").unwrap(),
            (today, "today".to_string())
        );
        assert_eq!(
            alias_date("yesterday", today, "YYYY-MM-DD").unwrap().0,
            day(2023, 5, 8)
        );
        assert_eq!(
            alias_date("tomorrow", today, "YYYY-MM-DD").unwrap().0,
            day(2023, 5, 10)
        );
    }

    #[test]
    fn test_offset_crosses_month_boundary() {
        let today = day(2023, 5, 31);
        assert_eq!(
            alias_date("tomorrow", today, "YYYY-MM-DD").unwrap().0,
            day(2023, 6, 1)
        );
    }

    #[test]
    fn test_explicit_date() {
        let today = day(2023, 5, 9);
        let (date, label) = alias_date("2022-12-25", today, "YYYY-MM-DD").unwrap();
        assert_eq!(date, day(2022, 12, 25));
        assert_eq!(label, "2022-12-25");
    }

    #[test]
    fn test_invalid_explicit_date() {
        let today = day(2023, 5, 9);
        let err = alias_date("not-a-date", today, "YYYY-MM-DD").unwrap_err();
        assert!(matches!(err, ResolveError::DailyAliasInvalid { .. }));
    }
}
