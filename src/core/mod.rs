//! Report engine and the abstractions it depends on

pub mod average;
pub mod config;
pub mod error;
pub mod history;
pub mod log;
pub mod report;
pub mod series;
pub mod trend;
pub mod usage;
pub mod window;

// Re-export main types for cleaner imports
pub use error::ReportError;
pub use history::HistoryFetcher;
pub use report::{RateReport, ReportEngine, ReportSettings};
pub use series::RateSeries;
pub use trend::Trend;
pub use usage::{UsageLog, UsageLogStore, UsageRecorder};
