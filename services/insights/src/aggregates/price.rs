//! Price statistics aggregate
//!
//! Min, max, mean, and median over records with a present, non-negative
//! price. Excluded records (absent or negative price) are counted, never
//! errors. Mean and median are reported at 2 decimal places; the median of
//! an even-sized sample is the mean of the two middle values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use catalog::dataset::Dataset;

/// The four price statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
    pub median: Decimal,
}

/// Price statistics plus the exclusion bookkeeping around them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Absent when no record carries a usable price.
    pub stats: Option<PriceStats>,
    /// Records that contributed a price.
    pub samples: usize,
    /// Records excluded for an absent or negative price.
    pub excluded: usize,
}

/// Compute price statistics over the dataset.
pub fn price_stats(dataset: &Dataset) -> PriceSummary {
    let mut prices: Vec<Decimal> = Vec::new();
    let mut excluded = 0usize;

    for record in dataset {
        match record.price {
            Some(price) if price >= Decimal::ZERO => prices.push(price),
            _ => excluded += 1,
        }
    }

    prices.sort();

    if prices.is_empty() {
        return PriceSummary {
            stats: None,
            samples: 0,
            excluded,
        };
    }

    let sum: Decimal = prices.iter().sum();
    let mean = (sum / Decimal::from(prices.len() as u64)).round_dp(2);
    let median = median_of_sorted(&prices);

    debug!(samples = prices.len(), excluded, "Computed price statistics");

    PriceSummary {
        stats: Some(PriceStats {
            min: prices[0],
            max: prices[prices.len() - 1],
            mean,
            median,
        }),
        samples: prices.len(),
        excluded,
    }
}

/// Median of a sorted, non-empty slice.
fn median_of_sorted(sorted: &[Decimal]) -> Decimal {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid].round_dp(2)
    } else {
        ((sorted[mid - 1] + sorted[mid]) / Decimal::from(2)).round_dp(2)
    }
}
