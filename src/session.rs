use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::classifier::AccountRangeTable;
use crate::error::Result;
use crate::importer::load_and_normalize;
use crate::models::{ClassifiedRecord, DateWindow, SourceFile};
use crate::reports::{build_report, RevenueReport};

/// SHA-256 over the ordered file set. File boundaries are part of the hash.
pub fn fingerprint(files: &[SourceFile]) -> String {
    let mut hasher = Sha256::new();
    for file in files {
        hasher.update((file.contents.len() as u64).to_le_bytes());
        hasher.update(&file.contents);
    }
    hex::encode(hasher.finalize())
}

/// One user's loaded upload set. Holds the classified base records so a
/// window change only re-filters and re-aggregates. The CLI builds a fresh
/// session per run; callers that keep one alive get the reload short-circuit.
pub struct Session<'a> {
    table: &'a AccountRangeTable,
    fingerprint: Option<String>,
    records: Vec<ClassifiedRecord>,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a AccountRangeTable) -> Self {
        Self {
            table,
            fingerprint: None,
            records: Vec::new(),
        }
    }

    /// Returns `false` when the same file set is already loaded. On error
    /// the previously loaded set is left in place.
    pub fn load(&mut self, files: &[SourceFile]) -> Result<bool> {
        let fp = fingerprint(files);
        if self.fingerprint.as_deref() == Some(fp.as_str()) {
            tracing::debug!(fingerprint = %fp, "file set unchanged, reusing records");
            return Ok(false);
        }
        let parsed = load_and_normalize(files)?;
        self.records = self.table.classify(parsed);
        self.fingerprint = Some(fp);
        Ok(true)
    }

    pub fn records(&self) -> &[ClassifiedRecord] {
        &self.records
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Build a report for `from..=to`; missing bounds default to the span
    /// of the loaded data.
    pub fn report(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<RevenueReport> {
        let window = DateWindow::resolve(from, to, &self.records)?;
        Ok(build_report(&self.records, window))
    }
}
