//! Error kinds produced by the report engine

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Exchange rate date should be between {earliest} and yesterday")]
    DateOutOfBounds { earliest: NaiveDate },

    #[error("Requested exchange rate date could not be found")]
    RateNotFound,

    /// Failure reported by the history fetcher, passed through untouched.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
