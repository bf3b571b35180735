mod classifier;
mod cli;
mod error;
mod exporter;
mod fmt;
mod importer;
mod models;
mod reports;
mod session;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gdnrev=warn".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary { report } => cli::summary::run(&report),
        Commands::Export { report, output_dir } => cli::export::run(&report, output_dir.as_deref()),
        Commands::Accounts { ranges } => cli::accounts::list(ranges.as_deref()),
        Commands::Classify {
            campaign_ids,
            ranges,
        } => cli::classify::run(&campaign_ids, ranges.as_deref()),
        Commands::Config {
            ranges_file,
            export_dir,
            clear_ranges,
        } => cli::config::run(ranges_file, export_dir, clear_ranges),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
