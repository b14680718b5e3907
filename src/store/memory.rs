use crate::core::usage::{UsageLog, UsageLogStore};
use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use std::sync::RwLock;
use tracing::debug;

/// In-memory usage log, lost when the process exits.
#[derive(Default)]
pub struct MemoryUsageStore {
    logs: RwLock<Vec<UsageLog>>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UsageLogStore for MemoryUsageStore {
    fn save(&self, log: &UsageLog) -> Result<()> {
        let mut logs = self
            .logs
            .write()
            .map_err(|_| anyhow!("Usage log lock poisoned"))?;
        logs.push(log.clone());
        debug!("Usage log PUT, {} entries", logs.len());
        Ok(())
    }

    fn find_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<UsageLog>> {
        let logs = self
            .logs
            .read()
            .map_err(|_| anyhow!("Usage log lock poisoned"))?;
        let mut found: Vec<UsageLog> = logs
            .iter()
            .filter(|log| log.request_date_time >= start && log.request_date_time <= end)
            .cloned()
            .collect();
        found.sort_by_key(|log| log.request_date_time);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn log_at(day: u32, hour: u32, base: &str) -> UsageLog {
        UsageLog {
            request_date_time: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            requested_date: NaiveDate::from_ymd_opt(2020, 2, 5).unwrap(),
            base_currency: base.to_string(),
            target_currency: "BRL".to_string(),
        }
    }

    #[test]
    fn test_find_between_is_inclusive_and_ordered() {
        let store = MemoryUsageStore::new();
        store.save(&log_at(2, 9, "EUR")).unwrap();
        store.save(&log_at(1, 0, "USD")).unwrap();
        store.save(&log_at(3, 0, "GBP")).unwrap();

        let found = store
            .find_between(
                log_at(1, 0, "").request_date_time,
                log_at(2, 9, "").request_date_time,
            )
            .unwrap();

        let bases: Vec<&str> = found.iter().map(|l| l.base_currency.as_str()).collect();
        assert_eq!(bases, vec!["USD", "EUR"]);
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryUsageStore::new();
        let found = store
            .find_between(NaiveDateTime::MIN, NaiveDateTime::MAX)
            .unwrap();
        assert!(found.is_empty());
    }
}
