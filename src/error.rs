use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{file}: CSV error: {source}")]
    CsvFile { file: String, source: csv::Error },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file}, line {line}: invalid date '{value}' (expected MM/DD/YYYY)")]
    InvalidDate { file: String, line: u64, value: String },

    #[error("{file}, line {line}: invalid campaign id '{value}'")]
    InvalidCampaignId { file: String, line: u64, value: String },

    #[error("{file}, line {line}: invalid revenue '{value}'")]
    InvalidRevenue { file: String, line: u64, value: String },

    #[error("Invalid date window: start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },

    #[error("Invalid account ranges: {0}")]
    InvalidRanges(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, RevError>;
