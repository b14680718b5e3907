//! Supported date bounds and lookback window arithmetic.

use crate::core::error::ReportError;
use chrono::{Days, NaiveDate};

/// Days fetched on top of the averaging window to cover weekends and holidays.
const LOOKBACK_BUFFER_DAYS: u64 = 2;

/// Range of dates a report can be requested for.
///
/// Only the lower bound is configured. The upper bound is always the day
/// before `today`, so it is computed from the date handed to each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedWindow {
    pub earliest_date: NaiveDate,
}

impl SupportedWindow {
    pub fn new(earliest_date: NaiveDate) -> Self {
        Self { earliest_date }
    }

    pub fn latest_date(&self, today: NaiveDate) -> NaiveDate {
        today.pred_opt().unwrap_or(NaiveDate::MIN)
    }
}

/// Fails with [`ReportError::DateOutOfBounds`] unless
/// `window.earliest_date <= date <= today - 1 day`.
pub fn validate(
    date: NaiveDate,
    window: &SupportedWindow,
    today: NaiveDate,
) -> Result<(), ReportError> {
    if date < window.earliest_date || date > window.latest_date(today) {
        return Err(ReportError::DateOutOfBounds {
            earliest: window.earliest_date,
        });
    }
    Ok(())
}

/// Returns the inclusive `(start, end)` range to fetch for `date`.
pub fn lookback_range(date: NaiveDate, average_days_amount: u32) -> (NaiveDate, NaiveDate) {
    let days = Days::new(u64::from(average_days_amount) + LOOKBACK_BUFFER_DAYS);
    let start = date.checked_sub_days(days).unwrap_or(NaiveDate::MIN);
    (start, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> SupportedWindow {
        SupportedWindow::new(date(2000, 1, 1))
    }

    #[test]
    fn test_rejects_date_before_earliest() {
        let result = validate(date(1999, 12, 31), &window(), date(2020, 6, 1));
        match result {
            Err(ReportError::DateOutOfBounds { earliest }) => {
                assert_eq!(earliest, date(2000, 1, 1))
            }
            other => panic!("Expected DateOutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_today() {
        let today = date(2020, 6, 1);
        let err = validate(today, &window(), today).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Exchange rate date should be between 2000-01-01 and yesterday"
        );
    }

    #[test]
    fn test_accepts_bounds() {
        let today = date(2020, 6, 1);
        assert!(validate(date(2000, 1, 1), &window(), today).is_ok());
        assert!(validate(date(2020, 5, 31), &window(), today).is_ok());
    }

    #[test]
    fn test_lookback_range_default_amount() {
        let (start, end) = lookback_range(date(2020, 2, 5), 5);
        assert_eq!(start, date(2020, 1, 29));
        assert_eq!(end, date(2020, 2, 5));
    }

    #[test]
    fn test_lookback_range_zero_amount_keeps_buffer() {
        let (start, end) = lookback_range(date(2010, 1, 1), 0);
        assert_eq!(start, date(2009, 12, 30));
        assert_eq!(end, date(2010, 1, 1));
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..20_000).prop_map(|offset| date(1970, 1, 1) + Duration::days(offset))
    }

    proptest! {
        #[test]
        fn prop_dates_inside_window_are_valid(d in any_date(), ahead in 1i64..1_000) {
            let earliest = date(1970, 1, 1);
            let today = d + Duration::days(ahead);
            prop_assert!(validate(d, &SupportedWindow::new(earliest), today).is_ok());
        }

        #[test]
        fn prop_dates_before_earliest_are_rejected(d in any_date(), behind in 1i64..1_000) {
            let earliest = d + Duration::days(behind);
            let today = earliest + Duration::days(30);
            let err = validate(d, &SupportedWindow::new(earliest), today).unwrap_err();
            prop_assert!(err.to_string().contains(&earliest.to_string()));
        }

        #[test]
        fn prop_dates_from_today_are_rejected(today in any_date(), ahead in 0i64..1_000) {
            let earliest = date(1960, 1, 1);
            let d = today + Duration::days(ahead);
            let is_out_of_bounds = matches!(
                validate(d, &SupportedWindow::new(earliest), today),
                Err(ReportError::DateOutOfBounds { .. })
            );
            prop_assert!(is_out_of_bounds);
        }

        #[test]
        fn prop_lookback_spans_amount_plus_buffer(d in any_date(), n in 0u32..365) {
            let (start, end) = lookback_range(d, n);
            prop_assert_eq!(end, d);
            prop_assert_eq!((end - start).num_days(), i64::from(n) + 2);
        }
    }
}
