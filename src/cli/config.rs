use std::path::PathBuf;

use crate::classifier::AccountRangeTable;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

pub fn run(ranges_file: Option<String>, export_dir: Option<String>, clear_ranges: bool) -> Result<()> {
    let mut settings = load_settings();

    if ranges_file.is_none() && export_dir.is_none() && !clear_ranges {
        println!("Settings:     {}", settings_path().display());
        println!(
            "Ranges file:  {}",
            settings.ranges_file.as_deref().unwrap_or("(built-in)")
        );
        println!("Export dir:   {}", settings.export_dir);
        return Ok(());
    }

    if let Some(path) = ranges_file {
        let expanded = shellexpand_path(&path);
        // Refuse to save a table that would fail on every later run.
        let table = AccountRangeTable::load(&PathBuf::from(&expanded))?;
        println!("Loaded {} accounts from {expanded}", table.accounts().len());
        settings.ranges_file = Some(expanded);
    }
    if clear_ranges {
        settings.ranges_file = None;
    }
    if let Some(dir) = export_dir {
        settings.export_dir = shellexpand_path(&dir);
    }

    save_settings(&settings)?;
    println!("Settings saved to {}", settings_path().display());
    Ok(())
}
