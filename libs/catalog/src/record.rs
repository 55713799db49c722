//! Book record types
//!
//! A `Record` is one book entity with explicit optional attributes.
//! The loader coerces loosely-typed store rows into this shape; absent
//! source fields become `None` rather than runtime attribute lookups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One book entity with its attributes.
///
/// Only the title is required. Every other attribute may be absent in the
/// source data; each aggregate decides how to treat absent values (skip,
/// bucket, or count as excluded) without failing the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Book title. Non-empty; rows without one never become Records.
    pub title: String,
    /// Author name, if present.
    pub author: Option<String>,
    /// Category label. Open set, not a fixed enum.
    pub category: Option<String>,
    /// List price. Negative values are kept here and excluded (with a
    /// count) by the price statistics aggregate.
    pub price: Option<Decimal>,
    /// Average rating, if present.
    pub rating: Option<Decimal>,
    /// Total copies sold, if present.
    pub quantity_sold: Option<u64>,
    /// Publication year, if a date attribute was present in the source.
    pub published_year: Option<i32>,
}

impl Record {
    /// Create a record with the given title and every other attribute absent.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            category: None,
            price: None,
            rating: None,
            quantity_sold: None,
            published_year: None,
        }
    }
}
