//! Directional trend classification over a date ordered rate sequence.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Ascending,
    Descending,
    Constant,
    Undefined,
}

impl Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Trend::Ascending => "ascending",
                Trend::Descending => "descending",
                Trend::Constant => "constant",
                Trend::Undefined => "undefined",
            }
        )
    }
}

/// Classifies the movement of `rates`, oldest first.
///
/// Every adjacent pair must agree with the direction set by the first pair,
/// otherwise the result is [`Trend::Undefined`] and scanning stops. Equality
/// is exact. Returns `None` when fewer than two rates are present.
///
/// Absent rates are skipped, so the values on either side of a gap are
/// compared with each other directly.
pub fn classify(rates: &[Option<f64>]) -> Option<Trend> {
    let mut present = rates.iter().flatten();
    let mut current = *present.next()?;
    let mut trend = None;

    for &next in present {
        let step = if current < next {
            Trend::Ascending
        } else if current > next {
            Trend::Descending
        } else if current == next {
            Trend::Constant
        } else {
            // NaN on either side
            Trend::Undefined
        };

        if step == Trend::Undefined || trend.is_some_and(|t| t != step) {
            return Some(Trend::Undefined);
        }
        trend = Some(step);
        current = next;
    }

    trend
}
