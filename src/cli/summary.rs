use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{run_report, ReportArgs};
use crate::error::Result;
use crate::fmt::{iso_date, money};
use crate::models::UNASSIGNED;
use crate::reports::RevenueReport;

pub fn run(args: &ReportArgs) -> Result<()> {
    let report = run_report(args)?;
    println!("{}", format_summary(&report));
    Ok(())
}

fn amount_cell(val: f64) -> Cell {
    if val < 0.0 {
        Cell::new(money(val).red())
    } else {
        Cell::new(money(val))
    }
}

fn account_cell(account: &str) -> Cell {
    if account == UNASSIGNED {
        Cell::new(account.yellow())
    } else {
        Cell::new(account)
    }
}

// ---------------------------------------------------------------------------
// Pure formatting functions (report data → String)
// ---------------------------------------------------------------------------

pub fn format_window(report: &RevenueReport) -> String {
    let Some(w) = &report.window else {
        return "No revenue records loaded.".to_string();
    };
    let mut text = format!("Window: {} to {}", iso_date(w.start()), iso_date(w.end()));
    if let Some(span) = &report.data_span {
        text.push_str(&format!(
            " (data: {} to {})",
            iso_date(span.start()),
            iso_date(span.end())
        ));
    }
    if report.is_empty() {
        text.push_str("\nNo records in the selected window.");
    } else {
        text.push_str(&format!(
            "\n{} records, total {}",
            report.record_count,
            money(report.total)
        ));
    }
    text
}

pub fn format_account_summary(report: &RevenueReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Account", "Revenue"]);
    for (account, revenue) in &report.by_account {
        table.add_row(vec![account_cell(account), amount_cell(*revenue)]);
    }
    table.add_row(vec![Cell::new("Total".bold()), amount_cell(report.total)]);
    format!("Account-wise Revenue\n{table}")
}

pub fn format_account_date_summary(report: &RevenueReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Account", "Date", "Revenue"]);
    for ((account, date), revenue) in &report.by_account_date {
        table.add_row(vec![
            account_cell(account),
            Cell::new(iso_date(*date)),
            amount_cell(*revenue),
        ]);
    }
    format!("Account per Day Revenue\n{table}")
}

pub fn format_unassigned(report: &RevenueReport) -> String {
    if report.unassigned.is_empty() {
        return "All campaigns have been assigned to accounts.".green().to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["Campid", "Date", "Revenue"]);
    for row in &report.unassigned {
        table.add_row(vec![
            Cell::new(row.campaign_id),
            Cell::new(iso_date(row.date)),
            amount_cell(row.revenue),
        ]);
    }
    format!("Unassigned Campaign IDs ({})\n{table}", report.unassigned.len())
}

pub fn format_summary(report: &RevenueReport) -> String {
    [
        format_window(report),
        format_account_summary(report),
        format_account_date_summary(report),
        format_unassigned(report),
    ]
    .join("\n\n")
}
