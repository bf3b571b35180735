use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::{load_settings, resolve_range_table};

pub fn run(campaign_ids: &[i64], ranges: Option<&str>) -> Result<()> {
    let table = resolve_range_table(ranges, &load_settings())?;
    let mut out = Table::new();
    out.set_header(vec!["Campid", "Account"]);
    for id in campaign_ids {
        out.add_row(vec![Cell::new(id), Cell::new(table.assign_account(*id))]);
    }
    println!("{out}");
    Ok(())
}
