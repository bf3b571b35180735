use std::path::Path;

use chrono::NaiveDate;

use crate::error::{RevError, Result};
use crate::models::{RevenueRecord, SourceFile};

pub const COL_CAMPAIGN: &str = "Campid";
pub const COL_DATE: &str = "Date";
pub const COL_REVENUE: &str = "Revenue";

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Parse `M/D/YYYY`, zero-padded or not.
pub fn parse_date_mdy(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let digits = |s: &str, max_len: usize| {
        !s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(parts[0], 2) || !digits(parts[1], 2) || parts[2].len() != 4 || !digits(parts[2], 4) {
        return None;
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Accepts `336500` as well as float-rendered ids such as `336500.0`.
pub fn parse_campaign_id(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(id) = s.parse::<i64>() {
        return Some(id);
    }
    let f: f64 = s.parse().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        Some(f as i64)
    } else {
        None
    }
}

pub fn parse_revenue(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// load_and_normalize
// ---------------------------------------------------------------------------

struct Columns {
    campaign: usize,
    date: usize,
    revenue: usize,
}

fn locate_columns(file: &str, headers: &csv::StringRecord) -> Result<Columns> {
    let names: Vec<&str> = headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();
    let find = |column: &str| {
        names
            .iter()
            .position(|h| *h == column)
            .ok_or_else(|| RevError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            })
    };
    Ok(Columns {
        campaign: find(COL_CAMPAIGN)?,
        date: find(COL_DATE)?,
        revenue: find(COL_REVENUE)?,
    })
}

fn parse_file(file: &SourceFile) -> Result<Vec<RevenueRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file.contents.as_slice());
    let csv_err = |source| RevError::CsvFile {
        file: file.name.clone(),
        source,
    };
    let cols = locate_columns(&file.name, rdr.headers().map_err(csv_err)?)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let raw_date = field(cols.date);
        let date = parse_date_mdy(raw_date).ok_or_else(|| RevError::InvalidDate {
            file: file.name.clone(),
            line,
            value: raw_date.to_string(),
        })?;

        let raw_id = field(cols.campaign);
        let campaign_id = parse_campaign_id(raw_id).ok_or_else(|| RevError::InvalidCampaignId {
            file: file.name.clone(),
            line,
            value: raw_id.to_string(),
        })?;

        let raw_revenue = field(cols.revenue);
        let revenue = if raw_revenue.trim().is_empty() {
            tracing::warn!(file = %file.name, line, campaign_id, "blank revenue counted as 0");
            0.0
        } else {
            parse_revenue(raw_revenue).ok_or_else(|| RevError::InvalidRevenue {
                file: file.name.clone(),
                line,
                value: raw_revenue.to_string(),
            })?
        };

        rows.push(RevenueRecord {
            campaign_id,
            date,
            revenue,
        });
    }
    tracing::debug!(file = %file.name, rows = rows.len(), "parsed revenue file");
    Ok(rows)
}

/// Concatenate every file's rows in order. Any bad row fails the whole batch.
pub fn load_and_normalize(files: &[SourceFile]) -> Result<Vec<RevenueRecord>> {
    let mut all = Vec::new();
    for file in files {
        all.extend(parse_file(file)?);
    }
    Ok(all)
}

pub fn read_source_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceFile>> {
    paths
        .iter()
        .map(|p| {
            let path = p.as_ref();
            Ok(SourceFile {
                name: path.display().to_string(),
                contents: std::fs::read(path)?,
            })
        })
        .collect()
}
