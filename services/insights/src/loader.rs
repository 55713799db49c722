//! Dataset loader
//!
//! Drives the row source once per refresh, coerces loosely-typed rows into
//! strongly-typed Records, drops rows without a usable title, and reports
//! drop and coercion counts for observability. A failed or empty fetch is
//! fatal to the refresh; per-row problems never are, and there are no
//! retries (the caller decides whether to re-run the refresh).

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use catalog::dataset::Dataset;
use catalog::errors::DataUnavailable;
use catalog::record::Record;

use crate::client::{RawRow, RowSource};
use crate::config::InsightsConfig;

/// Attribute names with fixed meanings in the record schema.
pub const TITLE_ATTRIBUTE: &str = "title";
pub const AUTHOR_ATTRIBUTE: &str = "author";
pub const QUANTITY_ATTRIBUTE: &str = "quantity_sold";
/// Either of these supplies the publication year.
pub const DATE_ATTRIBUTES: [&str; 2] = ["published_year", "publication_date"];

/// Union of attribute names seen across the fetched raw rows.
///
/// The engine consults this to fail an aggregate whose configured
/// attribute never appeared in the schema at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPresence {
    seen: BTreeSet<String>,
}

impl FieldPresence {
    fn observe(&mut self, row: &RawRow) {
        for key in row.keys() {
            if !self.seen.contains(key) {
                self.seen.insert(key.clone());
            }
        }
    }

    /// Whether the attribute appeared in at least one fetched row.
    pub fn contains(&self, attribute: &str) -> bool {
        self.seen.contains(attribute)
    }

    /// Whether any of the attributes appeared.
    pub fn contains_any(&self, attributes: &[&str]) -> bool {
        attributes.iter().any(|attribute| self.contains(attribute))
    }

    /// All observed attribute names, sorted.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().map(String::as_str)
    }
}

/// Per-refresh load observability counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Raw rows returned by the source.
    pub rows_fetched: usize,
    /// Records surviving validation.
    pub records_loaded: usize,
    /// Rows dropped for having no usable title.
    pub rows_dropped: usize,
    /// Field values present in the source but not coercible to their
    /// expected type (kept absent on the record).
    pub coercion_warnings: usize,
}

/// The loader's successful output: the dataset plus what was observed
/// while building it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub fields: FieldPresence,
    pub report: LoadReport,
}

/// Fetch and validate the dataset for one refresh cycle.
pub fn load(
    source: &dyn RowSource,
    config: &InsightsConfig,
) -> Result<LoadedDataset, DataUnavailable> {
    let rows = source.fetch_all().map_err(|error| {
        warn!(%error, "Row source fetch failed");
        DataUnavailable::FetchFailed {
            reason: error.to_string(),
        }
    })?;

    if rows.is_empty() {
        warn!("Row source returned no rows");
        return Err(DataUnavailable::EmptyFetch);
    }

    let mut fields = FieldPresence::default();
    let mut report = LoadReport {
        rows_fetched: rows.len(),
        ..LoadReport::default()
    };
    let mut records = Vec::with_capacity(rows.len());

    for (position, row) in rows.iter().enumerate() {
        fields.observe(row);
        match coerce_row(row, config, &mut report) {
            Some(record) => records.push(record),
            None => {
                report.rows_dropped += 1;
                warn!(position, "Dropping row without a usable title");
            }
        }
    }

    report.records_loaded = records.len();

    if records.is_empty() {
        warn!(
            rows_fetched = report.rows_fetched,
            "Every fetched row failed validation"
        );
        return Err(DataUnavailable::NoUsableRecords {
            dropped: report.rows_dropped,
        });
    }

    debug!(
        rows_fetched = report.rows_fetched,
        records_loaded = report.records_loaded,
        rows_dropped = report.rows_dropped,
        coercion_warnings = report.coercion_warnings,
        "Dataset loaded"
    );

    Ok(LoadedDataset {
        dataset: Dataset::new(records),
        fields,
        report,
    })
}

/// Coerce one raw row into a Record, or None when the title is unusable.
fn coerce_row(row: &RawRow, config: &InsightsConfig, report: &mut LoadReport) -> Option<Record> {
    let title = text_field(row, TITLE_ATTRIBUTE)?;
    let mut record = Record::new(title);
    record.author = text_field(row, AUTHOR_ATTRIBUTE);
    record.category = text_field(row, &config.category_attribute);
    record.price = decimal_field(row, &config.price_attribute, report);
    record.rating = decimal_field(row, &config.rating_attribute, report);
    record.quantity_sold = quantity_field(row, QUANTITY_ATTRIBUTE, report);
    record.published_year = year_field(row, report);
    Some(record)
}

/// Non-empty trimmed text, or absent.
fn text_field(row: &RawRow, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

/// Decimal from a JSON number or numeric string, or absent.
fn decimal_field(row: &RawRow, key: &str, report: &mut LoadReport) -> Option<Decimal> {
    let value = row.get(key)?;
    let parsed = match value {
        Value::Null => return None,
        Value::Number(number) => match number.as_i64() {
            Some(integer) => Some(Decimal::from(integer)),
            None => parse_decimal(&number.to_string()),
        },
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            parse_decimal(trimmed)
        }
        _ => None,
    };

    if parsed.is_none() {
        report.coercion_warnings += 1;
        warn!(attribute = key, "Value not coercible to decimal; treating as absent");
    }
    parsed
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Non-negative integer count, or absent.
fn quantity_field(row: &RawRow, key: &str, report: &mut LoadReport) -> Option<u64> {
    let value = row.get(key)?;
    let parsed = match value {
        Value::Null => return None,
        Value::Number(number) => number.as_u64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<u64>().ok()
        }
        _ => None,
    };

    if parsed.is_none() {
        report.coercion_warnings += 1;
        warn!(attribute = key, "Value not coercible to a count; treating as absent");
    }
    parsed
}

/// Publication year from a year integer, an ISO date, a `M/D/YYYY` date,
/// or a 4-digit year string.
fn year_field(row: &RawRow, report: &mut LoadReport) -> Option<i32> {
    let (key, value) = DATE_ATTRIBUTES
        .iter()
        .find_map(|key| row.get(*key).map(|value| (*key, value)))?;

    let parsed = match value {
        Value::Null => return None,
        Value::Number(number) => number.as_i64().and_then(|year| i32::try_from(year).ok()),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            parse_year(trimmed)
        }
        _ => None,
    };

    if parsed.is_none() {
        report.coercion_warnings += 1;
        warn!(attribute = key, "Value not coercible to a year; treating as absent");
    }
    parsed
}

fn parse_year(text: &str) -> Option<i32> {
    if let Ok(date) = NaiveDate::from_str(text) {
        return Some(date.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%m/%d/%Y") {
        return Some(date.year());
    }
    text.parse::<i32>().ok().filter(|year| (0..=9999).contains(year))
}
