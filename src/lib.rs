pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::usage::BackgroundUsageRecorder;
use crate::core::ReportEngine;
use crate::providers::ExchangeRatesApiProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Report {
        date: String,
        base: String,
        target: String,
        json: bool,
    },
    DailyUsage {
        year: i32,
        month: u32,
        day: u32,
        json: bool,
    },
    MonthlyUsage {
        year: i32,
        month: u32,
        json: bool,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxreport starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Report {
            date,
            base,
            target,
            json,
        } => {
            let fetcher = Arc::new(ExchangeRatesApiProvider::new(
                config.providers.exchangeratesapi_url(),
            ));
            let recorder = Arc::new(BackgroundUsageRecorder::new(
                store::open_usage_store_or_memory(&config),
            ));
            let engine = ReportEngine::new(config.report.settings(), fetcher, recorder.clone());

            let result = cli::report::run(&engine, &date, &base, &target, json).await;
            recorder.flush().await;
            result
        }
        AppCommand::DailyUsage {
            year,
            month,
            day,
            json,
        } => {
            let store = store::open_usage_store(&config)?;
            cli::history::run_daily(store.as_ref(), year, month, day, json)
        }
        AppCommand::MonthlyUsage { year, month, json } => {
            let store = store::open_usage_store(&config)?;
            cli::history::run_monthly(store.as_ref(), year, month, json)
        }
    }
}
