//! Publication trend aggregate
//!
//! Book counts per publication year, the dashboard's time-based trend.
//! Records without a usable publication date are counted separately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use catalog::dataset::Dataset;

/// The publication-year trend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationTrend {
    /// Year → count, in chronological order.
    pub by_year: BTreeMap<i32, u64>,
    /// Records with no usable publication date.
    pub undated: u64,
}

/// Count books per publication year.
pub fn publication_trend(dataset: &Dataset) -> PublicationTrend {
    let mut trend = PublicationTrend::default();
    for record in dataset {
        match record.published_year {
            Some(year) => *trend.by_year.entry(year).or_insert(0) += 1,
            None => trend.undated += 1,
        }
    }
    trend
}
