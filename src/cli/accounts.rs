use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::AccountRangeTable;
use crate::error::Result;
use crate::settings::{load_settings, resolve_range_table};

pub fn list(ranges: Option<&str>) -> Result<()> {
    let table = resolve_range_table(ranges, &load_settings())?;
    println!("{}", format_accounts(&table));
    Ok(())
}

pub fn format_accounts(table: &AccountRangeTable) -> String {
    let mut out = Table::new();
    out.set_header(vec!["#", "Account", "Campaign ids"]);
    for (i, account) in table.accounts().iter().enumerate() {
        let ranges: Vec<String> = account.ranges.iter().map(|r| r.describe()).collect();
        out.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&account.name),
            Cell::new(ranges.join(", ")),
        ]);
    }
    let mut text = format!("Account Ranges ({})\n{out}", table.accounts().len());
    for (first, second) in table.overlaps() {
        text.push_str(&format!(
            "\n{} {first} overlaps {second}; {first} wins",
            "note:".yellow()
        ));
    }
    text
}
