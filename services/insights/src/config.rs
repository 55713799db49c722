//! Pipeline configuration
//!
//! Recognized options for the aggregation pipeline: which attributes to
//! group and rank by, the default N for rankings, rating histogram
//! boundaries, and the optional seeded preview sample. Shape validation
//! runs before any fetch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog::errors::ConfigError;

/// Seeded random-sample settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Number of records to draw.
    pub size: usize,
    /// RNG seed. The sample is deterministic per (dataset, seed).
    pub seed: u64,
}

/// Configuration for one insights pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Attribute to group category counts by.
    pub category_attribute: String,
    /// Attribute holding the list price.
    pub price_attribute: String,
    /// Attribute holding the rating.
    pub rating_attribute: String,
    /// Default N for ranking aggregates.
    pub top_n: usize,
    /// Rating histogram boundaries, ascending. Buckets are half-open
    /// except the final one, which includes its upper boundary.
    pub rating_buckets: Vec<Decimal>,
    /// Optional deterministic preview sample. Absent = disabled.
    pub sample: Option<SampleConfig>,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            category_attribute: "category".to_string(),
            price_attribute: "price".to_string(),
            rating_attribute: "rating".to_string(),
            top_n: 10,
            rating_buckets: (0..=5).map(Decimal::from).collect(),
            sample: None,
        }
    }
}

impl InsightsConfig {
    /// Validate configuration shape before the refresh starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        if self.rating_buckets.len() < 2 {
            return Err(ConfigError::InvalidBuckets {
                reason: "need at least two boundaries".to_string(),
            });
        }
        if !self.rating_buckets.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(ConfigError::InvalidBuckets {
                reason: "boundaries must be strictly increasing".to_string(),
            });
        }
        if let Some(sample) = &self.sample {
            if sample.size == 0 {
                return Err(ConfigError::InvalidSampleSize);
            }
        }
        Ok(())
    }
}
