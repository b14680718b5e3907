//! Usage log of report requests and the recorder feeding it.
use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A single answered report request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLog {
    pub request_date_time: NaiveDateTime,
    pub requested_date: NaiveDate,
    pub base_currency: String,
    pub target_currency: String,
}

/// Receives one call per answered report. Implementations must not block
/// the caller and must not report failures back to it.
pub trait UsageRecorder: Send + Sync {
    fn record(&self, date: NaiveDate, base: &str, target: &str);
}

pub trait UsageLogStore: Send + Sync {
    fn save(&self, log: &UsageLog) -> Result<()>;

    /// Logs with `start <= request_date_time <= end`, oldest first.
    fn find_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<UsageLog>>;
}

/// Writes usage logs to a store on tokio's blocking pool.
pub struct BackgroundUsageRecorder {
    store: Arc<dyn UsageLogStore>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundUsageRecorder {
    pub fn new(store: Arc<dyn UsageLogStore>) -> Self {
        Self {
            store,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Waits for writes started by [`UsageRecorder::record`] to finish.
    pub async fn flush(&self) {
        let handles = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return,
        };
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Usage log task failed");
            }
        }
    }
}

fn save_logged(store: &dyn UsageLogStore, log: &UsageLog) {
    match store.save(log) {
        Ok(()) => debug!(?log, "Saved usage log"),
        Err(e) => warn!(error = %e, "Failed to save usage log"),
    }
}

impl UsageRecorder for BackgroundUsageRecorder {
    fn record(&self, date: NaiveDate, base: &str, target: &str) {
        let log = UsageLog {
            request_date_time: Local::now().naive_local(),
            requested_date: date,
            base_currency: base.to_string(),
            target_currency: target.to_string(),
        };

        let Ok(runtime) = Handle::try_current() else {
            save_logged(self.store.as_ref(), &log);
            return;
        };

        let store = Arc::clone(&self.store);
        let handle = runtime.spawn_blocking(move || save_logged(store.as_ref(), &log));
        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
    }
}

const END_OF_DAY_MICROS: u32 = 999_999;

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, END_OF_DAY_MICROS).unwrap_or(NaiveTime::MIN)
}

/// Inclusive request time range covering one calendar day.
pub fn daily_range(year: i32, month: u32, day: u32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("Invalid date '{year:04}-{month:02}-{day:02}'"))?;
    Ok((date.and_time(NaiveTime::MIN), date.and_time(end_of_day())))
}

/// Inclusive request time range covering one calendar month.
pub fn monthly_range(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    if !(1..=12).contains(&month) {
        return Err(anyhow!(
            "Invalid value for month (valid values 1 - 12): {month}"
        ));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid date '{year:04}-{month:02}'"))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| anyhow!("Invalid date '{year:04}-{month:02}'"))?;
    Ok((first.and_time(NaiveTime::MIN), last.and_time(end_of_day())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryUsageStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_range() {
        let (start, end) = daily_range(2020, 2, 5).unwrap();
        assert_eq!(start.to_string(), "2020-02-05 00:00:00");
        assert_eq!(end.to_string(), "2020-02-05 23:59:59.999999");
    }

    #[test]
    fn test_daily_range_invalid_day() {
        let err = daily_range(2020, 2, 31).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date '2020-02-31'");
    }

    #[test]
    fn test_monthly_range() {
        let (start, end) = monthly_range(2020, 2).unwrap();
        assert_eq!(start.date(), date(2020, 2, 1));
        assert_eq!(end.date(), date(2020, 2, 29));

        let (start, end) = monthly_range(2019, 12).unwrap();
        assert_eq!(start.date(), date(2019, 12, 1));
        assert_eq!(end.date(), date(2019, 12, 31));
    }

    #[test]
    fn test_monthly_range_invalid_month() {
        let err = monthly_range(2020, 13).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for month (valid values 1 - 12): 13"
        );
    }

    #[test]
    fn test_usage_log_json_shape() {
        let log = UsageLog {
            request_date_time: date(2024, 3, 1).and_hms_opt(10, 0, 0).unwrap(),
            requested_date: date(2020, 2, 5),
            base_currency: "USD".to_string(),
            target_currency: "BRL".to_string(),
        };
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["requestedDate"], "2020-02-05");
        assert_eq!(json["baseCurrency"], "USD");
        assert_eq!(json["targetCurrency"], "BRL");
    }

    #[tokio::test]
    async fn test_background_recorder_writes_after_flush() {
        let store = Arc::new(MemoryUsageStore::new());
        let recorder = BackgroundUsageRecorder::new(store.clone());

        recorder.record(date(2020, 2, 5), "USD", "BRL");
        recorder.flush().await;

        let today = Local::now().date_naive();
        let (start, end) = (
            today.pred_opt().unwrap().and_time(NaiveTime::MIN),
            today.succ_opt().unwrap().and_time(end_of_day()),
        );
        let logs = store.find_between(start, end).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].requested_date, date(2020, 2, 5));
        assert_eq!(logs[0].base_currency, "USD");
        assert_eq!(logs[0].target_currency, "BRL");
    }

    struct FailingStore;

    impl UsageLogStore for FailingStore {
        fn save(&self, _log: &UsageLog) -> Result<()> {
            Err(anyhow!("disk full"))
        }

        fn find_between(&self, _: NaiveDateTime, _: NaiveDateTime) -> Result<Vec<UsageLog>> {
            Err(anyhow!("disk full"))
        }
    }

    #[tokio::test]
    async fn test_background_recorder_swallows_store_failures() {
        let recorder = BackgroundUsageRecorder::new(Arc::new(FailingStore));

        recorder.record(date(2020, 2, 5), "USD", "BRL");
        recorder.record(date(2020, 2, 6), "USD", "BRL");
        recorder.flush().await;

        assert!(recorder.pending.lock().unwrap().is_empty());
    }

    #[test]
    fn test_inline_recorder_swallows_store_failures() {
        let recorder = BackgroundUsageRecorder::new(Arc::new(FailingStore));
        recorder.record(date(2020, 2, 5), "USD", "BRL");
    }

    #[test]
    fn test_recorder_without_runtime_writes_inline() {
        let store = Arc::new(MemoryUsageStore::new());
        let recorder = BackgroundUsageRecorder::new(store.clone());

        recorder.record(date(2021, 7, 1), "EUR", "USD");

        let logs = store
            .find_between(NaiveDateTime::MIN, NaiveDateTime::MAX)
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].base_currency, "EUR");
    }
}
