use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::models::{ClassifiedRecord, DateWindow, RevenueRecord};

/// Account name to total revenue.
pub type AccountSummary = BTreeMap<String, f64>;

/// (account name, date) to total revenue.
pub type AccountDateSummary = BTreeMap<(String, NaiveDate), f64>;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

pub fn filter_by_window(records: &[ClassifiedRecord], window: &DateWindow) -> Vec<ClassifiedRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.date()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

pub fn aggregate(records: &[ClassifiedRecord]) -> (AccountSummary, AccountDateSummary) {
    let mut by_account = AccountSummary::new();
    let mut by_account_date = AccountDateSummary::new();
    for r in records {
        *by_account.entry(r.account.clone()).or_default() += r.revenue();
        *by_account_date
            .entry((r.account.clone(), r.date()))
            .or_default() += r.revenue();
    }
    (by_account, by_account_date)
}

/// Unassigned rows as (campaign, date, revenue), first occurrence of each
/// exact tuple kept.
pub fn extract_unassigned(records: &[ClassifiedRecord]) -> Vec<RevenueRecord> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for r in records.iter().filter(|r| r.is_unassigned()) {
        let row = &r.record;
        // 0.0 and -0.0 are the same amount
        let bits = if row.revenue == 0.0 { 0 } else { row.revenue.to_bits() };
        if seen.insert((row.campaign_id, row.date, bits)) {
            rows.push(row.clone());
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Revenue report
// ---------------------------------------------------------------------------

pub struct RevenueReport {
    pub window: Option<DateWindow>,
    /// Full date span of the records before filtering.
    pub data_span: Option<DateWindow>,
    pub record_count: usize,
    pub total: f64,
    pub by_account: AccountSummary,
    pub by_account_date: AccountDateSummary,
    pub unassigned: Vec<RevenueRecord>,
}

impl RevenueReport {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Filter, aggregate and collect unassigned rows. A `None` window keeps
/// every record.
pub fn build_report(records: &[ClassifiedRecord], window: Option<DateWindow>) -> RevenueReport {
    let in_window = match &window {
        Some(w) => filter_by_window(records, w),
        None => records.to_vec(),
    };
    let (by_account, by_account_date) = aggregate(&in_window);
    let unassigned = extract_unassigned(&in_window);
    let total = in_window.iter().map(ClassifiedRecord::revenue).sum();
    tracing::debug!(
        records = records.len(),
        in_window = in_window.len(),
        accounts = by_account.len(),
        unassigned = unassigned.len(),
        "built revenue report"
    );
    RevenueReport {
        window,
        data_span: DateWindow::full_span(records),
        record_count: in_window.len(),
        total,
        by_account,
        by_account_date,
        unassigned,
    }
}
