//! Category count aggregate
//!
//! Maps each category value to the number of records carrying it. Records
//! with an absent category land in the "Unknown" bucket rather than being
//! dropped, so bucket counts always sum to the dataset length.

use std::collections::BTreeMap;

use catalog::dataset::Dataset;

/// Bucket label for records with an absent grouping attribute.
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// Category → record count. BTreeMap for deterministic iteration order.
pub type CategoryCounts = BTreeMap<String, u64>;

/// Count records per category, bucketing absent categories as "Unknown".
pub fn category_counts(dataset: &Dataset) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for record in dataset {
        let bucket = record.category.as_deref().unwrap_or(UNKNOWN_BUCKET);
        *counts.entry(bucket.to_string()).or_insert(0) += 1;
    }
    counts
}
