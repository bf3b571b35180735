use std::path::PathBuf;

use crate::cli::{run_report, ReportArgs};
use crate::error::Result;
use crate::exporter::export_report;
use crate::settings::{load_settings, shellexpand_path};

fn output_dir(explicit: Option<&str>) -> PathBuf {
    let dir = match explicit {
        Some(d) => d.to_string(),
        None => load_settings().export_dir,
    };
    PathBuf::from(shellexpand_path(&dir))
}

pub fn run(args: &ReportArgs, output: Option<&str>) -> Result<()> {
    let report = run_report(args)?;
    let dir = output_dir(output);
    for path in export_report(&report, &dir)? {
        println!("Wrote {}", path.display());
    }
    if report.unassigned.is_empty() {
        println!("All campaigns have been assigned to accounts.");
    }
    Ok(())
}
