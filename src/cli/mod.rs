//! Command line presentation of reports and usage history

pub mod history;
pub mod report;
pub mod setup;
pub mod ui;

use crate::core::ReportError;
use crate::providers::ProviderError;
use thiserror::Error;

/// Malformed user input, rejected before any work is done.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0}")]
    InvalidDate(String),
}

/// Maps a failed command to a short title and a detail message for the user.
pub fn describe_error(err: &anyhow::Error) -> (&'static str, String) {
    if let Some(InputError::InvalidDate(detail)) = err.downcast_ref::<InputError>() {
        return ("Invalid date", detail.clone());
    }

    match err.downcast_ref::<ReportError>() {
        Some(e @ ReportError::DateOutOfBounds { .. }) => ("Date out of bounds", e.to_string()),
        Some(e @ ReportError::RateNotFound) => ("Exchange rate not found", e.to_string()),
        Some(ReportError::Upstream(inner)) => match inner.downcast_ref::<ProviderError>() {
            Some(e @ ProviderError::UnsupportedCurrency(_)) => {
                ("Not supported currency", e.to_string())
            }
            _ => (
                "Unknown error",
                format!("Error occurred while fetching rate history: {inner}"),
            ),
        },
        None => ("Unknown error", err.to_string()),
    }
}
