pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::usage::UsageLogStore;
use anyhow::Result;
use disk::FjallUsageStore;
use memory::MemoryUsageStore;
use std::sync::Arc;
use tracing::warn;

/// Opens the persistent usage log under the configured data directory.
pub fn open_usage_store(config: &AppConfig) -> Result<Arc<dyn UsageLogStore>> {
    let path = config.default_data_path()?.join("usage");
    Ok(Arc::new(FjallUsageStore::open(&path)?))
}

/// Like [`open_usage_store`], but falls back to an in-memory log so a broken
/// data directory never blocks reporting.
pub fn open_usage_store_or_memory(config: &AppConfig) -> Arc<dyn UsageLogStore> {
    open_usage_store(config).unwrap_or_else(|e| {
        warn!(error = %e, "Usage log unavailable, keeping it in memory");
        Arc::new(MemoryUsageStore::new())
    })
}
