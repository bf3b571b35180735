use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fmt::{iso_date, revenue_csv};
use crate::models::RevenueRecord;
use crate::reports::{AccountDateSummary, AccountSummary, RevenueReport};

pub const ACCOUNT_WISE_FILE: &str = "filtered_account_wise_revenue.csv";
pub const ACCOUNT_PER_DAY_FILE: &str = "filtered_account_per_day_revenue.csv";
pub const UNASSIGNED_FILE: &str = "unassigned_campaign_ids.csv";

fn writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

pub fn write_account_summary<W: Write>(summary: &AccountSummary, out: W) -> Result<()> {
    let mut csv = writer(out);
    csv.write_record(["Account", "Revenue"])?;
    for (account, revenue) in summary {
        csv.write_record([account.as_str(), revenue_csv(*revenue).as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_account_date_summary<W: Write>(summary: &AccountDateSummary, out: W) -> Result<()> {
    let mut csv = writer(out);
    csv.write_record(["Account", "Date", "Revenue"])?;
    for ((account, date), revenue) in summary {
        csv.write_record([
            account.clone(),
            iso_date(*date),
            revenue_csv(*revenue),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_unassigned<W: Write>(rows: &[RevenueRecord], out: W) -> Result<()> {
    let mut csv = writer(out);
    csv.write_record(["Campid", "Date", "Revenue"])?;
    for row in rows {
        csv.write_record([
            row.campaign_id.to_string(),
            iso_date(row.date),
            revenue_csv(row.revenue),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

fn write_file(path: PathBuf, write: impl FnOnce(std::fs::File) -> Result<()>) -> Result<PathBuf> {
    let file = std::fs::File::create(&path)?;
    write(file)?;
    tracing::debug!(path = %path.display(), "wrote export");
    Ok(path)
}

/// Write the report's export files into `dir`, creating it if needed. The
/// unassigned file is only written when there is something in it.
pub fn export_report(report: &RevenueReport, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = vec![
        write_file(dir.join(ACCOUNT_WISE_FILE), |f| {
            write_account_summary(&report.by_account, f)
        })?,
        write_file(dir.join(ACCOUNT_PER_DAY_FILE), |f| {
            write_account_date_summary(&report.by_account_date, f)
        })?,
    ];
    if !report.unassigned.is_empty() {
        written.push(write_file(dir.join(UNASSIGNED_FILE), |f| {
            write_unassigned(&report.unassigned, f)
        })?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassifiedRecord, UNASSIGNED};
    use crate::reports::build_report;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(account: &str, campaign_id: i64, date: NaiveDate, revenue: f64) -> ClassifiedRecord {
        ClassifiedRecord::new(
            RevenueRecord {
                campaign_id,
                date,
                revenue,
            },
            account,
        )
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_account_summary_csv() {
        let report = build_report(
            &[
                rec("Inuvo GDN APD1", 336500, d(2024, 1, 2), 10.0),
                rec(UNASSIGNED, 999999, d(2024, 1, 3), 5.0),
            ],
            None,
        );
        let out = render(|w| write_account_summary(&report.by_account, w));
        assert_eq!(out, "Account,Revenue\nInuvo GDN APD1,10.0\nUnassigned,5.0\n");
    }

    #[test]
    fn test_account_date_csv_quotes_commas() {
        let report = build_report(&[rec("Acme, Inc", 1, d(2024, 1, 2), -1.5)], None);
        let out = render(|w| write_account_date_summary(&report.by_account_date, w));
        assert_eq!(out, "Account,Date,Revenue\n\"Acme, Inc\",2024-01-02,-1.5\n");
    }

    #[test]
    fn test_unassigned_csv() {
        let rows = vec![RevenueRecord {
            campaign_id: 999999,
            date: d(2024, 1, 3),
            revenue: 5.0,
        }];
        let out = render(|w| write_unassigned(&rows, w));
        assert_eq!(out, "Campid,Date,Revenue\n999999,2024-01-03,5.0\n");
    }

    #[test]
    fn test_empty_summaries_still_have_headers() {
        let report = build_report(&[], None);
        let out = render(|w| write_account_summary(&report.by_account, w));
        assert_eq!(out, "Account,Revenue\n");
    }

    #[test]
    fn test_export_report_skips_empty_unassigned() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("exports");
        let report = build_report(&[rec("A", 1, d(2024, 1, 2), 1.0)], None);
        let written = export_report(&report, &out_dir).unwrap();
        assert_eq!(written.len(), 2);
        assert!(out_dir.join(ACCOUNT_WISE_FILE).exists());
        assert!(out_dir.join(ACCOUNT_PER_DAY_FILE).exists());
        assert!(!out_dir.join(UNASSIGNED_FILE).exists());
    }

    #[test]
    fn test_export_report_writes_unassigned() {
        let dir = tempfile::tempdir().unwrap();
        let report = build_report(
            &[
                rec(UNASSIGNED, 7, d(2024, 1, 2), 1.0),
                rec(UNASSIGNED, 7, d(2024, 1, 2), 1.0),
            ],
            None,
        );
        let written = export_report(&report, dir.path()).unwrap();
        assert_eq!(written.len(), 3);
        let content = std::fs::read_to_string(dir.path().join(UNASSIGNED_FILE)).unwrap();
        assert_eq!(content, "Campid,Date,Revenue\n7,2024-01-02,1.0\n");
    }

    #[test]
    fn test_integer_revenue_written_with_decimal_point() {
        let table = crate::classifier::AccountRangeTable::builtin();
        let parsed = crate::importer::load_and_normalize(&[crate::models::SourceFile {
            name: "whole.csv".to_string(),
            contents: b"Campid,Date,Revenue\n336500,01/02/2024,10\n999999,01/02/2024,3\n".to_vec(),
        }])
        .unwrap();
        let report = build_report(&table.classify(parsed), None);
        let wise = render(|w| write_account_summary(&report.by_account, w));
        assert_eq!(wise, "Account,Revenue\nInuvo GDN APD1,10.0\nUnassigned,3.0\n");
        let unassigned = render(|w| write_unassigned(&report.unassigned, w));
        assert_eq!(unassigned, "Campid,Date,Revenue\n999999,2024-01-02,3.0\n");
    }
}
