use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use spendlens_core::{GroupBy, Period};
use std::path::PathBuf;

mod config;
mod logging;
mod report;
mod state;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SPENDLENS_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version,
    long_version = LONG_VERSION,
    about = "Search and summarize personal transaction exports"
)]
struct Cli {
    /// Log level override (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Where transactions come from and the coarse pre-filter applied to them
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Transaction export, CSV or JSON (defaults to [data] file in the config)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, whole day)
    #[arg(long, value_parser = parse_day)]
    pub to: Option<NaiveDate>,

    /// Exact category label ("All" for any)
    #[arg(long)]
    pub category: Option<String>,

    /// Smallest amount to include
    #[arg(long)]
    pub min_amount: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List transactions matching a query, e.g. `cat=dining amount>=10 coffee`
    Search {
        #[command(flatten)]
        source: SourceArgs,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Search query; words are joined with spaces
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Total spending, grouped by category, merchant, day or none
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Only count transactions matching this query
        #[arg(long, short)]
        query: Option<String>,

        /// none | category | merchant | day (defaults to the config)
        #[arg(long)]
        group_by: Option<GroupBy>,

        /// Maximum number of rows (defaults to the config)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Total spending of one date range against another
    Compare {
        /// Transaction export (defaults to [data] file in the config)
        #[arg(long, short)]
        file: Option<PathBuf>,

        #[arg(long, value_parser = parse_day)]
        current_from: NaiveDate,

        #[arg(long, value_parser = parse_day)]
        current_to: NaiveDate,

        #[arg(long, value_parser = parse_day)]
        previous_from: NaiveDate,

        #[arg(long, value_parser = parse_day)]
        previous_to: NaiveDate,

        /// Restrict both totals to one exact category
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Spending against the [budgets] table for one month
    Budget {
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Month to report (YYYY-MM)
        #[arg(long, value_parser = parse_month)]
        month: NaiveDate,

        #[arg(long)]
        json: bool,
    },

    /// Show how a query is tokenized
    Tokens {
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Manage ~/.spendlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{s}': {e}"))
}

/// First day of a `YYYY-MM` month
fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM, got '{s}': {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(cli.log_level.as_deref().unwrap_or(&cfg.log.level));

    match cli.command {
        Command::Search {
            source,
            json,
            query,
        } => {
            report::run_search(&source, &query.join(" "), json, &cfg)?;
        }

        Command::Summary {
            source,
            query,
            group_by,
            limit,
            json,
        } => {
            let opts = report::SummaryOptions {
                query,
                group_by,
                limit,
                json,
            };
            report::run_summary(&source, &opts, &cfg)?;
        }

        Command::Compare {
            file,
            current_from,
            current_to,
            previous_from,
            previous_to,
            category,
            json,
        } => {
            let opts = report::CompareOptions {
                current: Period::new(current_from, current_to),
                previous: Period::new(previous_from, previous_to),
                category,
                json,
            };
            report::run_compare(file.as_deref(), &opts, &cfg)?;
        }

        Command::Budget { file, month, json } => {
            report::run_budget(file.as_deref(), month, json, &cfg)?;
        }

        Command::Tokens { query } => {
            report::run_tokens(&query.join(" "))?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}
