use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxreport::cli::{describe_error, setup::setup, ui};
use fxreport::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the exchange rate on a date with its recent average and trend
    Report {
        /// Date of the rate, as YYYY-MM-DD
        date: String,
        /// Currency the rate is quoted against, e.g. USD
        base: String,
        /// Currency being priced, e.g. BRL
        target: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display previously requested reports
    History {
        #[command(subcommand)]
        period: HistoryPeriod,
    },
}

#[derive(Subcommand)]
enum HistoryPeriod {
    /// Reports requested on one day
    Daily {
        year: i32,
        month: u32,
        day: u32,
        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reports requested during one month
    Monthly {
        year: i32,
        month: u32,
        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },
}

impl From<Commands> for fxreport::AppCommand {
    fn from(cmd: Commands) -> fxreport::AppCommand {
        match cmd {
            Commands::Report {
                date,
                base,
                target,
                json,
            } => fxreport::AppCommand::Report {
                date,
                base,
                target,
                json,
            },
            Commands::History {
                period:
                    HistoryPeriod::Daily {
                        year,
                        month,
                        day,
                        json,
                    },
            } => fxreport::AppCommand::DailyUsage {
                year,
                month,
                day,
                json,
            },
            Commands::History {
                period: HistoryPeriod::Monthly { year, month, json },
            } => fxreport::AppCommand::MonthlyUsage { year, month, json },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fxreport::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        let (title, detail) = describe_error(e);
        eprintln!(
            "{}: {}",
            ui::style_text(title, ui::StyleType::Error),
            detail
        );
        std::process::exit(1);
    }
    result
}
