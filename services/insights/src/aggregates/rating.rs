//! Rating distribution aggregate
//!
//! Bucketed counts over configurable ascending boundaries, with an
//! explicit "no rating" bucket for absent values. Buckets are half-open
//! except the final one, which includes its upper boundary ([4,5] by
//! default). Ratings outside the configured span are counted as
//! out-of-range rather than binned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog::dataset::Dataset;
use catalog::errors::ConfigError;

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub lower: Decimal,
    pub upper: Decimal,
    /// Whether `upper` itself belongs to the bucket (final bucket only).
    pub inclusive_upper: bool,
    pub count: u64,
}

impl RatingBucket {
    /// Range label for chart axes, e.g. `[1,2)` or `[4,5]`.
    pub fn label(&self) -> String {
        let close = if self.inclusive_upper { ']' } else { ')' };
        format!("[{},{}{}", self.lower, self.upper, close)
    }

    fn holds(&self, rating: Decimal) -> bool {
        rating >= self.lower
            && (rating < self.upper || (self.inclusive_upper && rating == self.upper))
    }
}

/// The full rating histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub buckets: Vec<RatingBucket>,
    /// Records with no rating at all.
    pub unrated: u64,
    /// Records whose rating falls outside the configured boundaries.
    pub out_of_range: u64,
}

/// Bucket ratings over the given ascending boundaries.
pub fn rating_distribution(
    dataset: &Dataset,
    boundaries: &[Decimal],
) -> Result<RatingDistribution, ConfigError> {
    if boundaries.len() < 2 {
        return Err(ConfigError::InvalidBuckets {
            reason: "need at least two boundaries".to_string(),
        });
    }
    if !boundaries.windows(2).all(|pair| pair[0] < pair[1]) {
        return Err(ConfigError::InvalidBuckets {
            reason: "boundaries must be strictly increasing".to_string(),
        });
    }

    let last = boundaries.len() - 2;
    let mut buckets: Vec<RatingBucket> = boundaries
        .windows(2)
        .enumerate()
        .map(|(index, pair)| RatingBucket {
            lower: pair[0],
            upper: pair[1],
            inclusive_upper: index == last,
            count: 0,
        })
        .collect();

    let mut unrated = 0u64;
    let mut out_of_range = 0u64;

    for record in dataset {
        match record.rating {
            None => unrated += 1,
            Some(rating) => match buckets.iter_mut().find(|bucket| bucket.holds(rating)) {
                Some(bucket) => bucket.count += 1,
                None => out_of_range += 1,
            },
        }
    }

    Ok(RatingDistribution {
        buckets,
        unrated,
        out_of_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::record::Record;
    use std::str::FromStr;

    fn rated(title: &str, rating: &str) -> Record {
        Record {
            rating: Some(Decimal::from_str(rating).unwrap()),
            ..Record::new(title)
        }
    }

    fn default_boundaries() -> Vec<Decimal> {
        (0..=5).map(Decimal::from).collect()
    }

    #[test]
    fn test_buckets_are_half_open_except_last() {
        let dataset = Dataset::new(vec![
            rated("A", "0.5"),
            rated("B", "1"),
            rated("C", "4.5"),
            rated("D", "5"),
        ]);

        let distribution = rating_distribution(&dataset, &default_boundaries()).unwrap();
        assert_eq!(distribution.buckets.len(), 5);
        // 0.5 → [0,1); boundary value 1 → [1,2); 4.5 and 5 → [4,5]
        assert_eq!(distribution.buckets[0].count, 1);
        assert_eq!(distribution.buckets[1].count, 1);
        assert_eq!(distribution.buckets[4].count, 2);
        assert_eq!(distribution.out_of_range, 0);
    }

    #[test]
    fn test_unrated_records_get_their_own_bucket() {
        let dataset = Dataset::new(vec![rated("A", "3.5"), Record::new("Unrated")]);
        let distribution = rating_distribution(&dataset, &default_boundaries()).unwrap();
        assert_eq!(distribution.unrated, 1);
        assert_eq!(distribution.buckets[3].count, 1);
    }

    #[test]
    fn test_out_of_range_ratings_counted_not_binned() {
        let dataset = Dataset::new(vec![rated("A", "7"), rated("B", "-1")]);
        let distribution = rating_distribution(&dataset, &default_boundaries()).unwrap();
        assert_eq!(distribution.out_of_range, 2);
        assert!(distribution.buckets.iter().all(|bucket| bucket.count == 0));
    }

    #[test]
    fn test_bucket_labels() {
        let distribution =
            rating_distribution(&Dataset::empty(), &default_boundaries()).unwrap();
        assert_eq!(distribution.buckets[0].label(), "[0,1)");
        assert_eq!(distribution.buckets[4].label(), "[4,5]");
    }

    #[test]
    fn test_empty_dataset_yields_zeroed_buckets() {
        let distribution =
            rating_distribution(&Dataset::empty(), &default_boundaries()).unwrap();
        assert!(distribution.buckets.iter().all(|bucket| bucket.count == 0));
        assert_eq!(distribution.unrated, 0);
        assert_eq!(distribution.out_of_range, 0);
    }

    #[test]
    fn test_invalid_boundaries_rejected() {
        let err = rating_distribution(&Dataset::empty(), &[Decimal::ZERO]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBuckets { .. }));

        let unsorted = [Decimal::from(2), Decimal::from(1)];
        let err = rating_distribution(&Dataset::empty(), &unsorted).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBuckets { .. }));
    }

    #[test]
    fn test_custom_boundaries() {
        let boundaries = [Decimal::ZERO, Decimal::from_str("2.5").unwrap(), Decimal::from(5)];
        let dataset = Dataset::new(vec![rated("A", "1"), rated("B", "4")]);

        let distribution = rating_distribution(&dataset, &boundaries).unwrap();
        assert_eq!(distribution.buckets.len(), 2);
        assert_eq!(distribution.buckets[0].count, 1);
        assert_eq!(distribution.buckets[1].count, 1);
    }
}
