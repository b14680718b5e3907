use super::{InputError, ui};
use crate::core::UsageLog;
use crate::core::usage::{UsageLogStore, daily_range, monthly_range};
use anyhow::Result;
use chrono::NaiveDateTime;
use comfy_table::Cell;
use tracing::debug;

pub fn run_daily(
    store: &dyn UsageLogStore,
    year: i32,
    month: u32,
    day: u32,
    json: bool,
) -> Result<()> {
    let (start, end) =
        daily_range(year, month, day).map_err(|e| InputError::InvalidDate(e.to_string()))?;
    run(store, start, end, json)
}

pub fn run_monthly(store: &dyn UsageLogStore, year: i32, month: u32, json: bool) -> Result<()> {
    let (start, end) =
        monthly_range(year, month).map_err(|e| InputError::InvalidDate(e.to_string()))?;
    run(store, start, end, json)
}

fn run(
    store: &dyn UsageLogStore,
    start: NaiveDateTime,
    end: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let logs = store.find_between(start, end)?;
    debug!("Found {} usage logs between {} and {}", logs.len(), start, end);

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
    } else if logs.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("No reports requested between {start} and {end}."),
                ui::StyleType::Subtle
            )
        );
    } else {
        println!(
            "{}\n\n{}",
            ui::style_text("Usage history", ui::StyleType::Title),
            display_as_table(&logs)
        );
    }
    Ok(())
}

fn display_as_table(logs: &[UsageLog]) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Requested At"),
        ui::header_cell("Date"),
        ui::header_cell("Base"),
        ui::header_cell("Target"),
    ]);

    for log in logs {
        table.add_row(vec![
            Cell::new(log.request_date_time.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(log.requested_date),
            Cell::new(&log.base_currency),
            Cell::new(&log.target_currency),
        ]);
    }

    table.to_string()
}
