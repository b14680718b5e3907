use crate::core::usage::{UsageLog, UsageLogStore};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

const PARTITION: &str = "usage_log";

/// Shifts every representable chrono year into six positive digits.
const YEAR_OFFSET: i32 = 300_000;

/// Fixed width timestamp whose byte order matches time order for any year.
fn time_key(at: NaiveDateTime) -> String {
    format!(
        "{:06}-{}",
        at.year() + YEAR_OFFSET,
        at.format("%m-%dT%H:%M:%S%.9f")
    )
}

/// Usage log persisted in a fjall keyspace.
pub struct FjallUsageStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
    sequence: AtomicU64,
}

impl FjallUsageStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open usage log at {}", path.display()))?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened usage log at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
            sequence: AtomicU64::new(0),
        })
    }
}

impl UsageLogStore for FjallUsageStore {
    fn save(&self, log: &UsageLog) -> Result<()> {
        // `<timestamp>#<sequence>`, so logs stamped the same instant keep insertion order.
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let key = format!("{}#{seq:010}", time_key(log.request_date_time));

        self.partition.insert(key.as_str(), serde_json::to_vec(log)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Usage log PUT for key: {}", key);
        Ok(())
    }

    fn find_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<UsageLog>> {
        // '$' sorts right after '#', so every key stamped `end` is included.
        let lower = time_key(start);
        let upper = format!("{}$", time_key(end));

        self.partition
            .range(lower..upper)
            .map(|item| -> Result<UsageLog> {
                let (_, value) = item?;
                let log: UsageLog = serde_json::from_slice(&value)
                    .context("Failed to decode stored usage log")?;
                Ok(log)
            })
            .collect()
    }
}
