use chrono::NaiveDate;

use crate::error::{RevError, Result};

pub const UNASSIGNED: &str = "Unassigned";

/// One uploaded file: a display name for error messages plus its raw bytes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub contents: Vec<u8>,
}

/// One campaign's revenue for one day, as parsed from an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueRecord {
    pub campaign_id: i64,
    pub date: NaiveDate,
    pub revenue: f64,
}

/// A parsed row plus the account its campaign id maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: RevenueRecord,
    pub account: String,
}

impl ClassifiedRecord {
    pub fn new(record: RevenueRecord, account: impl Into<String>) -> Self {
        Self {
            record,
            account: account.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.record.date
    }

    pub fn revenue(&self) -> f64 {
        self.record.revenue
    }

    pub fn is_unassigned(&self) -> bool {
        self.account == UNASSIGNED
    }
}

/// Inclusive date bound. `start <= end` holds for every constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(RevError::InvalidWindow {
                start: start.format("%Y-%m-%d").to_string(),
                end: end.format("%Y-%m-%d").to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Min..max date of the records, or `None` when there are none.
    pub fn full_span(records: &[ClassifiedRecord]) -> Option<Self> {
        let start = records.iter().map(ClassifiedRecord::date).min()?;
        let end = records.iter().map(ClassifiedRecord::date).max()?;
        Some(Self { start, end })
    }

    /// Fill whichever bound is missing from the records' full span.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        records: &[ClassifiedRecord],
    ) -> Result<Option<Self>> {
        let span = Self::full_span(records);
        let start = from.or(span.map(|w| w.start));
        let end = to.or(span.map(|w| w.end));
        match (start, end) {
            (Some(s), Some(e)) => Self::new(s, e).map(Some),
            _ => Ok(None),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
