use super::{InputError, ui};
use crate::core::{RateReport, ReportEngine};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use comfy_table::Cell;
use tracing::{debug, info, instrument};

impl RateReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Report"),
            ui::header_cell("Rate"),
            ui::header_cell("Average Rate"),
            ui::header_cell("Trend"),
        ]);
        table.add_row(vec![
            Cell::new(&self.id),
            ui::rate_cell(self.rate),
            ui::rate_cell(self.average_rate),
            ui::trend_cell(self.trend),
        ]);

        table.to_string()
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| InputError::InvalidDate(format!("Text '{text}' could not be parsed: {e}")))
}

#[instrument(name = "RateReport", skip(engine))]
pub async fn run(
    engine: &ReportEngine,
    date: &str,
    base: &str,
    target: &str,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let today = Local::now().date_naive();
    info!(%date, base, target, "Generating exchange rate report");

    let report = engine.get_report(date, base, target, today).await?;
    debug!(?report, "Built rate report");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.display_as_table());
    }
    Ok(())
}
