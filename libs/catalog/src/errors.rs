//! Error types for the insights pipeline
//!
//! Shared error taxonomy using thiserror. Per-record problems are never
//! errors; they are dropped or excluded with counts. Errors here are
//! refresh-fatal (`DataUnavailable`) or aggregate-fatal (`ConfigError`).

use thiserror::Error;

/// Top-level pipeline error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightsError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] DataUnavailable),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// The current refresh cannot proceed: the fetch failed or produced
/// nothing usable. Surfaced to the caller, who decides whether to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataUnavailable {
    #[error("Fetch failed: {reason}")]
    FetchFailed { reason: String },

    #[error("Source returned no rows")]
    EmptyFetch,

    #[error("No usable records: {dropped} rows dropped by validation")]
    NoUsableRecords { dropped: usize },
}

/// Configuration errors
///
/// Shape errors (`InvalidTopN`, `InvalidBuckets`, `InvalidSampleSize`) are
/// caught by up-front validation and fail the refresh before any fetch.
/// `UnknownAttribute` is judged against the fetched schema and is fatal
/// only for the aggregate that references the attribute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Attribute not present in source schema: {attribute}")]
    UnknownAttribute { attribute: String },

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("Invalid rating buckets: {reason}")]
    InvalidBuckets { reason: String },

    #[error("Sample size must be at least 1")]
    InvalidSampleSize,
}
