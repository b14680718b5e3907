//! Date keyed rate series and extraction of the requested day.

use crate::core::error::ReportError;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Rates per calendar date, keyed by currency code. A currency mapped to
/// `None` (or missing entirely) has no rate on that date.
pub type RateSeries = BTreeMap<NaiveDate, HashMap<String, Option<f64>>>;

/// Splits `series` into the rate for `requested_date` and the rates of every
/// other date, ascending by date.
///
/// Dates without a `target` rate project to `None` in the remainder.
pub fn extract(
    series: &RateSeries,
    requested_date: NaiveDate,
    target: &str,
) -> Result<(f64, Vec<Option<f64>>), ReportError> {
    let rate = series
        .get(&requested_date)
        .and_then(|rates| rates.get(target).copied().flatten())
        .ok_or(ReportError::RateNotFound)?;

    let remainder = series
        .iter()
        .filter(|(date, _)| **date != requested_date)
        .map(|(_, rates)| rates.get(target).copied().flatten())
        .collect();

    Ok((rate, remainder))
}
