pub mod accounts;
pub mod classify;
pub mod config;
pub mod export;
pub mod summary;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::importer::{parse_date_mdy, read_source_files};
use crate::reports::RevenueReport;
use crate::session::Session;
use crate::settings::{load_settings, resolve_range_table};

/// `--from`/`--to` values: MM/DD/YYYY like the uploads, or YYYY-MM-DD.
pub(crate) fn parse_date_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    parse_date_mdy(raw)
        .or_else(|| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| format!("invalid date '{raw}' (expected MM/DD/YYYY or YYYY-MM-DD)"))
}

#[derive(Parser)]
#[command(
    name = "gdnrev",
    version,
    about = "Roll up GDN campaign revenue by account and day."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Inputs shared by every command that runs the revenue pipeline.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Revenue CSV files (columns: Campid, Date, Revenue)
    #[arg(required = true)]
    pub files: Vec<String>,
    /// Window start: MM/DD/YYYY or YYYY-MM-DD (default: earliest date in the data)
    #[arg(long = "from", value_parser = parse_date_arg)]
    pub from_date: Option<NaiveDate>,
    /// Window end, inclusive (default: latest date in the data)
    #[arg(long = "to", value_parser = parse_date_arg)]
    pub to_date: Option<NaiveDate>,
    /// Account range table (JSON) to use instead of the configured one
    #[arg(long)]
    pub ranges: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show account-wise, per-day and unassigned revenue for the selected window.
    Summary {
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Write the window's summaries as CSV files.
    Export {
        #[command(flatten)]
        report: ReportArgs,
        /// Directory for the CSV files (default: configured export dir)
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
    /// List the account range table in lookup order.
    Accounts {
        /// Account range table (JSON) to use instead of the configured one
        #[arg(long)]
        ranges: Option<String>,
    },
    /// Show which account each campaign id maps to.
    Classify {
        /// Campaign ids
        #[arg(required = true, allow_negative_numbers = true)]
        campaign_ids: Vec<i64>,
        /// Account range table (JSON) to use instead of the configured one
        #[arg(long)]
        ranges: Option<String>,
    },
    /// Show or change saved settings.
    Config {
        /// Use this account range table (JSON) by default
        #[arg(long = "ranges-file", conflicts_with = "clear_ranges")]
        ranges_file: Option<String>,
        /// Default directory for exported CSV files
        #[arg(long = "export-dir")]
        export_dir: Option<String>,
        /// Go back to the built-in account range table
        #[arg(long = "clear-ranges")]
        clear_ranges: bool,
    },
}

/// Load, classify, filter and aggregate the given files.
pub(crate) fn run_report(args: &ReportArgs) -> Result<RevenueReport> {
    let settings = load_settings();
    let table = resolve_range_table(args.ranges.as_deref(), &settings)?;
    let sources = read_source_files(&args.files)?;
    let mut session = Session::new(&table);
    session.load(&sources)?;
    tracing::debug!(
        files = sources.len(),
        records = session.records().len(),
        fingerprint = session.fingerprint().unwrap_or_default(),
        "loaded upload set"
    );
    session.report(args.from_date, args.to_date)
}
