//! Assembles exchange rate reports from a fetched rate history.
use crate::core::average::average;
use crate::core::error::ReportError;
use crate::core::history::HistoryFetcher;
use crate::core::series::extract;
use crate::core::trend::{Trend, classify};
use crate::core::usage::UsageRecorder;
use crate::core::window::{SupportedWindow, lookback_range, validate};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_AVERAGE_DAYS_AMOUNT: u32 = 5;

/// Rate of `base -> target` on one date, with the average and trend of the
/// days leading up to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateReport {
    pub id: String,
    pub rate: f64,
    pub average_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// Builds the report for `date` from its own rate and the ascending rates of
/// the preceding days.
pub fn build_report(
    date: NaiveDate,
    base: &str,
    target: &str,
    rate: f64,
    remainder: &[Option<f64>],
) -> RateReport {
    RateReport {
        id: format!("{base}_{target}_{date}"),
        rate,
        average_rate: average(remainder),
        trend: classify(remainder),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    pub average_days_amount: u32,
    pub window: SupportedWindow,
}

impl Default for ReportSettings {
    fn default() -> Self {
        let earliest_date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        ReportSettings {
            average_days_amount: DEFAULT_AVERAGE_DAYS_AMOUNT,
            window: SupportedWindow::new(earliest_date),
        }
    }
}

pub struct ReportEngine {
    settings: ReportSettings,
    fetcher: Arc<dyn HistoryFetcher>,
    recorder: Arc<dyn UsageRecorder>,
}

impl ReportEngine {
    pub fn new(
        settings: ReportSettings,
        fetcher: Arc<dyn HistoryFetcher>,
        recorder: Arc<dyn UsageRecorder>,
    ) -> Self {
        Self {
            settings,
            fetcher,
            recorder,
        }
    }

    /// Produces the report for `date`, treating `today` as the current date.
    ///
    /// A usage record is handed to the recorder only once the report is built.
    pub async fn get_report(
        &self,
        date: NaiveDate,
        base: &str,
        target: &str,
        today: NaiveDate,
    ) -> Result<RateReport, ReportError> {
        validate(date, &self.settings.window, today)?;

        let (start, end) = lookback_range(date, self.settings.average_days_amount);
        let series = self.fetcher.fetch(start, end, base, target).await?;

        let (rate, remainder) = extract(&series, date, target)?;
        let report = build_report(date, base, target, rate, &remainder);

        self.recorder.record(date, base, target);
        Ok(report)
    }
}
