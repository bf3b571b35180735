use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RevError, Result};
use crate::models::{ClassifiedRecord, RevenueRecord, UNASSIGNED};

/// A set of campaign ids owned by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CampaignRange {
    /// Half-open `[start, end)`.
    Span { start: i64, end: i64 },
    Ids { ids: Vec<i64> },
}

impl CampaignRange {
    pub fn span(start: i64, end: i64) -> Self {
        Self::Span { start, end }
    }

    pub fn contains(&self, campaign_id: i64) -> bool {
        match self {
            Self::Span { start, end } => *start <= campaign_id && campaign_id < *end,
            Self::Ids { ids } => ids.contains(&campaign_id),
        }
    }

    fn intersects(&self, other: &CampaignRange) -> bool {
        match (self, other) {
            (Self::Span { start: a0, end: a1 }, Self::Span { start: b0, end: b1 }) => {
                a0 < b1 && b0 < a1
            }
            (Self::Span { .. }, Self::Ids { ids }) => ids.iter().any(|id| self.contains(*id)),
            (Self::Ids { ids }, Self::Span { .. }) => ids.iter().any(|id| other.contains(*id)),
            (Self::Ids { ids: a }, Self::Ids { ids: b }) => a.iter().any(|id| b.contains(id)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Span { start, end } => format!("{start}..{end}"),
            Self::Ids { ids } => {
                let list: Vec<String> = ids.iter().map(|i| i.to_string()).collect();
                format!("[{}]", list.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRange {
    pub name: String,
    pub ranges: Vec<CampaignRange>,
}

impl AccountRange {
    fn new(name: &str, ranges: Vec<CampaignRange>) -> Self {
        Self {
            name: name.to_string(),
            ranges,
        }
    }

    pub fn contains(&self, campaign_id: i64) -> bool {
        self.ranges.iter().any(|r| r.contains(campaign_id))
    }
}

/// Ordered account lookup table. Earlier accounts win when ranges overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRangeTable {
    accounts: Vec<AccountRange>,
}

impl AccountRangeTable {
    pub fn new(accounts: Vec<AccountRange>) -> Result<Self> {
        let mut seen = HashSet::new();
        for account in &accounts {
            let name = account.name.trim();
            if name.is_empty() {
                return Err(RevError::InvalidRanges("account name is empty".to_string()));
            }
            if name == UNASSIGNED {
                return Err(RevError::InvalidRanges(format!(
                    "'{UNASSIGNED}' is reserved for unmatched campaigns"
                )));
            }
            if !seen.insert(name.to_string()) {
                return Err(RevError::InvalidRanges(format!("duplicate account '{name}'")));
            }
            for range in &account.ranges {
                if let CampaignRange::Span { start, end } = range {
                    if start >= end {
                        return Err(RevError::InvalidRanges(format!(
                            "{name}: empty range {start}..{end}"
                        )));
                    }
                }
            }
        }
        let table = Self { accounts };
        for (first, second) in table.overlaps() {
            tracing::debug!(%first, %second, "account ranges overlap, earlier account wins");
        }
        Ok(table)
    }

    /// The account table the dashboard ships with.
    pub fn builtin() -> Self {
        let span = CampaignRange::span;
        Self {
            accounts: vec![
                AccountRange::new("Inuvo GDN APD1", vec![span(336466, 336601)]),
                AccountRange::new("Inuvo GDN APD2", vec![span(264800, 264971)]),
                AccountRange::new("Inuvo GDN APD4", vec![span(336183, 336301)]),
                AccountRange::new("Inuvo GDN APD5", vec![span(327781, 336114)]),
                AccountRange::new("Inuvo GDN APD6", vec![span(265100, 265251)]),
                AccountRange::new("Inuvo GDN APD7", vec![span(265700, 265774)]),
                AccountRange::new("Inuvo GDN APPD8", vec![span(336301, 336351)]),
                AccountRange::new("Inuvo GDN APPD9", vec![span(336351, 336401)]),
                AccountRange::new("Inuvo GDN APD10", vec![span(336676, 336726)]),
                AccountRange::new("Inuvo GDN APD11", vec![span(336901, 336968)]),
                AccountRange::new("Inuvo INR 008 (PST)", vec![span(266001, 266406)]),
                AccountRange::new("Inuvo INR 009 (PST)", vec![span(336601, 336676)]),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let accounts: Vec<AccountRange> = serde_json::from_str(json)?;
        Self::new(accounts)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn accounts(&self) -> &[AccountRange] {
        &self.accounts
    }

    /// Pairs of accounts (earlier, later) whose ranges share at least one id.
    pub fn overlaps(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (i, a) in self.accounts.iter().enumerate() {
            for b in &self.accounts[i + 1..] {
                let hit = a
                    .ranges
                    .iter()
                    .any(|ra| b.ranges.iter().any(|rb| ra.intersects(rb)));
                if hit {
                    pairs.push((a.name.clone(), b.name.clone()));
                }
            }
        }
        pairs
    }

    pub fn assign_account(&self, campaign_id: i64) -> &str {
        self.accounts
            .iter()
            .find(|a| a.contains(campaign_id))
            .map(|a| a.name.as_str())
            .unwrap_or(UNASSIGNED)
    }

    pub fn classify(&self, records: Vec<RevenueRecord>) -> Vec<ClassifiedRecord> {
        let classified: Vec<ClassifiedRecord> = records
            .into_iter()
            .map(|r| {
                let account = self.assign_account(r.campaign_id).to_string();
                ClassifiedRecord::new(r, account)
            })
            .collect();
        let unassigned = classified.iter().filter(|r| r.is_unassigned()).count();
        tracing::debug!(total = classified.len(), unassigned, "classified records");
        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(json: &str) -> AccountRangeTable {
        AccountRangeTable::from_json_str(json).unwrap()
    }

    #[test]
    fn test_span_is_half_open() {
        let t = table(r#"[{"name": "A", "ranges": [{"start": 336466, "end": 336601}]}]"#);
        assert_eq!(t.assign_account(336466), "A");
        assert_eq!(t.assign_account(336500), "A");
        assert_eq!(t.assign_account(336600), "A");
        assert_eq!(t.assign_account(336601), UNASSIGNED);
        assert_eq!(t.assign_account(336465), UNASSIGNED);
    }

    #[test]
    fn test_unmatched_is_unassigned() {
        let t = AccountRangeTable::builtin();
        assert_eq!(t.assign_account(999999), UNASSIGNED);
    }

    #[test]
    fn test_total_over_extreme_ids() {
        let t = AccountRangeTable::builtin();
        for id in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert_eq!(t.assign_account(id), UNASSIGNED);
        }
    }

    #[test]
    fn test_first_listed_wins_on_overlap() {
        let t = table(
            r#"[
                {"name": "Earlier", "ranges": [{"start": 100, "end": 200}]},
                {"name": "Later", "ranges": [{"start": 150, "end": 250}]}
            ]"#,
        );
        for _ in 0..3 {
            assert_eq!(t.assign_account(175), "Earlier");
        }
        assert_eq!(t.assign_account(220), "Later");
        assert_eq!(t.overlaps(), vec![("Earlier".to_string(), "Later".to_string())]);
    }

    #[test]
    fn test_union_of_sub_ranges_and_id_lists() {
        let t = table(
            r#"[{"name": "Split", "ranges": [
                {"start": 10, "end": 20},
                {"start": 50, "end": 60},
                {"ids": [7, 99]}
            ]}]"#,
        );
        assert_eq!(t.assign_account(15), "Split");
        assert_eq!(t.assign_account(55), "Split");
        assert_eq!(t.assign_account(7), "Split");
        assert_eq!(t.assign_account(99), "Split");
        assert_eq!(t.assign_account(30), UNASSIGNED);
    }

    #[test]
    fn test_builtin_table_lookups() {
        let t = AccountRangeTable::builtin();
        assert_eq!(t.assign_account(336500), "Inuvo GDN APD1");
        assert_eq!(t.assign_account(336601), "Inuvo INR 009 (PST)");
        assert_eq!(t.assign_account(266001), "Inuvo INR 008 (PST)");
        assert_eq!(t.assign_account(330000), "Inuvo GDN APD5");
        assert!(t.overlaps().is_empty());
    }

    #[test]
    fn test_rejects_empty_span() {
        let err = AccountRangeTable::from_json_str(
            r#"[{"name": "A", "ranges": [{"start": 5, "end": 5}]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RevError::InvalidRanges(_)));
    }

    #[test]
    fn test_rejects_duplicate_and_reserved_names() {
        assert!(AccountRangeTable::from_json_str(
            r#"[{"name": "A", "ranges": []}, {"name": "A", "ranges": []}]"#
        )
        .is_err());
        assert!(AccountRangeTable::from_json_str(r#"[{"name": "Unassigned", "ranges": []}]"#)
            .is_err());
    }

    #[test]
    fn test_classify_keeps_every_record() {
        let t = table(r#"[{"name": "A", "ranges": [{"start": 336466, "end": 336601}]}]"#);
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let records = vec![
            RevenueRecord { campaign_id: 336500, date, revenue: 10.0 },
            RevenueRecord { campaign_id: 999999, date, revenue: 5.0 },
        ];
        let classified = t.classify(records.clone());
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].account, "A");
        assert!(classified[1].is_unassigned());
        assert_eq!(classified[1].record, records[1]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranges.json");
        std::fs::write(&path, r#"[{"name": "X", "ranges": [{"ids": [42]}]}]"#).unwrap();
        let t = AccountRangeTable::load(&path).unwrap();
        assert_eq!(t.accounts().len(), 1);
        assert_eq!(t.assign_account(42), "X");
    }
}
