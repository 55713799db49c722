//! Aggregation engine
//!
//! Produces the fixed set of named aggregates from a Dataset. Each
//! aggregate is independent: a record missing an attribute is skipped by
//! that aggregate alone, and an aggregate whose configured attribute never
//! appears in the fetched schema fails by itself, reported in `failures`
//! without touching the rest of the report. The engine never fails
//! outright; an empty dataset yields the empty report.

pub mod authors;
pub mod category;
pub mod price;
pub mod rating;
pub mod sample;
pub mod summary;
pub mod top_n;
pub mod trend;

pub use authors::{AuthorCount, AuthorCounts, AuthorInsights};
pub use category::{CategoryCounts, UNKNOWN_BUCKET};
pub use price::{PriceStats, PriceSummary};
pub use rating::{RatingBucket, RatingDistribution};
pub use summary::SummaryStats;
pub use top_n::RankAttribute;
pub use trend::PublicationTrend;

use serde::{Deserialize, Serialize};
use tracing::warn;

use catalog::dataset::Dataset;
use catalog::errors::ConfigError;
use catalog::record::Record;

use crate::config::InsightsConfig;
use crate::loader::{FieldPresence, AUTHOR_ATTRIBUTE, DATE_ATTRIBUTES, QUANTITY_ATTRIBUTE};

/// An aggregate that could not be computed for this refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateFailure {
    /// Name of the aggregate in the report.
    pub aggregate: String,
    /// Display form of the configuration error behind the failure.
    pub reason: String,
}

/// The fixed set of named aggregates for one refresh.
///
/// Plain serializable data (mappings, sequences, and scalars) so any
/// rendering surface can consume it without depending on the pipeline.
/// A `None` slot means that aggregate failed for this refresh; the
/// matching entry in `failures` says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub summary: SummaryStats,
    pub category_counts: Option<CategoryCounts>,
    pub price: Option<PriceSummary>,
    pub top_by_price: Option<Vec<Record>>,
    pub top_rated: Option<Vec<Record>>,
    pub bestsellers: Option<Vec<Record>>,
    pub rating_distribution: Option<RatingDistribution>,
    pub authors: Option<AuthorInsights>,
    pub publication_trend: Option<PublicationTrend>,
    pub sample: Option<Vec<Record>>,
    /// Aggregates skipped, with the configuration error that skipped them.
    pub failures: Vec<AggregateFailure>,
}

/// Computes every aggregate for a refresh under one configuration.
pub struct InsightsEngine {
    config: InsightsConfig,
}

impl InsightsEngine {
    pub fn new(config: InsightsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Compute the full report.
    ///
    /// `fields` is the union of attribute names observed in the fetched
    /// rows; aggregates referencing an attribute absent from it fail
    /// individually. An empty dataset short-circuits to the empty report;
    /// the empty state is displayable, so no failures are raised for it.
    pub fn compute(&self, dataset: &Dataset, fields: &FieldPresence) -> InsightsReport {
        if dataset.is_empty() {
            return self.empty_report();
        }

        let config = &self.config;
        let mut failures = Vec::new();

        let category_counts = if schema_gate(
            fields,
            "category_counts",
            &[config.category_attribute.as_str()],
            &mut failures,
        ) {
            Some(category::category_counts(dataset))
        } else {
            None
        };

        let price = if schema_gate(
            fields,
            "price",
            &[config.price_attribute.as_str()],
            &mut failures,
        ) {
            Some(price::price_stats(dataset))
        } else {
            None
        };

        let top_by_price = self.ranked(
            dataset,
            fields,
            "top_by_price",
            RankAttribute::Price,
            &config.price_attribute,
            &mut failures,
        );
        let top_rated = self.ranked(
            dataset,
            fields,
            "top_rated",
            RankAttribute::Rating,
            &config.rating_attribute,
            &mut failures,
        );
        let bestsellers = self.ranked(
            dataset,
            fields,
            "bestsellers",
            RankAttribute::QuantitySold,
            QUANTITY_ATTRIBUTE,
            &mut failures,
        );

        let rating_distribution = if schema_gate(
            fields,
            "rating_distribution",
            &[config.rating_attribute.as_str()],
            &mut failures,
        ) {
            match rating::rating_distribution(dataset, &config.rating_buckets) {
                Ok(distribution) => Some(distribution),
                Err(error) => {
                    push_failure("rating_distribution", error, &mut failures);
                    None
                }
            }
        } else {
            None
        };

        let authors = if schema_gate(fields, "authors", &[AUTHOR_ATTRIBUTE], &mut failures) {
            Some(authors::author_insights(dataset, config.top_n))
        } else {
            None
        };

        let publication_trend =
            if schema_gate(fields, "publication_trend", &DATE_ATTRIBUTES, &mut failures) {
                Some(trend::publication_trend(dataset))
            } else {
                None
            };

        let sample = match config.sample {
            Some(settings) if settings.size == 0 => {
                push_failure("sample", ConfigError::InvalidSampleSize, &mut failures);
                None
            }
            Some(settings) => Some(sample::sample(dataset, settings.size, settings.seed)),
            None => None,
        };

        InsightsReport {
            summary: summary::summary_stats(dataset),
            category_counts,
            price,
            top_by_price,
            top_rated,
            bestsellers,
            rating_distribution,
            authors,
            publication_trend,
            sample,
            failures,
        }
    }

    /// Rank the dataset by `attribute`, gated on schema presence.
    fn ranked(
        &self,
        dataset: &Dataset,
        fields: &FieldPresence,
        aggregate: &'static str,
        attribute: RankAttribute,
        schema_attribute: &str,
        failures: &mut Vec<AggregateFailure>,
    ) -> Option<Vec<Record>> {
        if !schema_gate(fields, aggregate, &[schema_attribute], failures) {
            return None;
        }
        match top_n::top_n(dataset, attribute, self.config.top_n) {
            Ok(records) => Some(records),
            Err(error) => {
                push_failure(aggregate, error, failures);
                None
            }
        }
    }

    /// The defined empty result for every aggregate: an empty dataset is
    /// a valid, displayable state, not an error.
    fn empty_report(&self) -> InsightsReport {
        let empty = Dataset::empty();
        InsightsReport {
            summary: SummaryStats::default(),
            category_counts: Some(CategoryCounts::new()),
            price: Some(price::price_stats(&empty)),
            top_by_price: Some(Vec::new()),
            top_rated: Some(Vec::new()),
            bestsellers: Some(Vec::new()),
            rating_distribution: rating::rating_distribution(&empty, &self.config.rating_buckets)
                .ok(),
            authors: Some(AuthorInsights::default()),
            publication_trend: Some(PublicationTrend::default()),
            sample: self.config.sample.map(|_| Vec::new()),
            failures: Vec::new(),
        }
    }
}

/// True when any of `attributes` appeared in the fetched schema;
/// otherwise records a per-aggregate failure.
fn schema_gate(
    fields: &FieldPresence,
    aggregate: &'static str,
    attributes: &[&str],
    failures: &mut Vec<AggregateFailure>,
) -> bool {
    if fields.contains_any(attributes) {
        return true;
    }
    push_failure(
        aggregate,
        ConfigError::UnknownAttribute {
            attribute: attributes.join(" / "),
        },
        failures,
    );
    false
}

fn push_failure(aggregate: &str, error: ConfigError, failures: &mut Vec<AggregateFailure>) {
    warn!(aggregate, %error, "Skipping aggregate");
    failures.push(AggregateFailure {
        aggregate: aggregate.to_string(),
        reason: error.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StaticSource;
    use crate::config::SampleConfig;
    use crate::loader;
    use serde_json::json;

    fn load_fixture() -> (Dataset, FieldPresence) {
        let source = StaticSource::from_json(json!([
            {
                "title": "A",
                "author": "Tolkien",
                "category": "Fiction",
                "price": 10,
                "rating": 4.5,
                "quantity_sold": 100,
                "published_year": 1954
            },
            {
                "title": "B",
                "author": "Atwood",
                "category": "Fiction",
                "price": 20,
                "rating": 3.5,
                "quantity_sold": 300,
                "published_year": 1985
            },
            {"title": "C", "price": 5, "rating": 2.0}
        ]))
        .unwrap();
        let loaded = loader::load(&source, &InsightsConfig::default()).unwrap();
        (loaded.dataset, loaded.fields)
    }

    #[test]
    fn test_full_report_with_complete_schema() {
        let (dataset, fields) = load_fixture();
        let engine = InsightsEngine::new(InsightsConfig::default());

        let report = engine.compute(&dataset, &fields);
        assert!(report.failures.is_empty());
        assert_eq!(report.summary.total_books, 3);

        let counts = report.category_counts.unwrap();
        assert_eq!(counts.get("Fiction"), Some(&2));
        assert_eq!(counts.get(UNKNOWN_BUCKET), Some(&1));

        let top = report.top_by_price.unwrap();
        assert_eq!(top[0].title, "B");

        let bestsellers = report.bestsellers.unwrap();
        assert_eq!(bestsellers[0].title, "B");
        // Record "C" has no quantity_sold, so only two are eligible
        assert_eq!(bestsellers.len(), 2);
    }

    #[test]
    fn test_missing_schema_attribute_fails_only_that_aggregate() {
        let source = StaticSource::from_json(json!([
            {"title": "A", "price": 10},
            {"title": "B", "price": 20}
        ]))
        .unwrap();
        let loaded = loader::load(&source, &InsightsConfig::default()).unwrap();
        let engine = InsightsEngine::new(InsightsConfig::default());

        let report = engine.compute(&loaded.dataset, &loaded.fields);
        // Price aggregates still work
        assert!(report.price.is_some());
        assert!(report.top_by_price.is_some());
        // Category, rating, author, and date aggregates fail individually
        assert!(report.category_counts.is_none());
        assert!(report.rating_distribution.is_none());
        assert!(report.authors.is_none());
        assert!(report.publication_trend.is_none());
        let failed: Vec<&str> = report
            .failures
            .iter()
            .map(|failure| failure.aggregate.as_str())
            .collect();
        assert!(failed.contains(&"category_counts"));
        assert!(failed.contains(&"rating_distribution"));
        assert!(failed.contains(&"publication_trend"));
    }

    #[test]
    fn test_empty_dataset_yields_empty_report_without_failures() {
        let engine = InsightsEngine::new(InsightsConfig {
            sample: Some(SampleConfig { size: 5, seed: 1 }),
            ..InsightsConfig::default()
        });

        let report = engine.compute(&Dataset::empty(), &FieldPresence::default());
        assert!(report.failures.is_empty());
        assert_eq!(report.summary, SummaryStats::default());
        assert_eq!(report.category_counts, Some(CategoryCounts::new()));
        assert_eq!(report.top_by_price, Some(Vec::new()));
        assert_eq!(report.sample, Some(Vec::new()));
        let distribution = report.rating_distribution.unwrap();
        assert!(distribution.buckets.iter().all(|bucket| bucket.count == 0));
    }

    #[test]
    fn test_sample_is_deterministic_across_computes() {
        let (dataset, fields) = load_fixture();
        let engine = InsightsEngine::new(InsightsConfig {
            sample: Some(SampleConfig { size: 2, seed: 9 }),
            ..InsightsConfig::default()
        });

        let first = engine.compute(&dataset, &fields);
        let second = engine.compute(&dataset, &fields);
        assert_eq!(first.sample, second.sample);
        assert_eq!(first.sample.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_report_serializes_to_plain_json() {
        let (dataset, fields) = load_fixture();
        let engine = InsightsEngine::new(InsightsConfig::default());

        let report = engine.compute(&dataset, &fields);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["summary"]["total_books"].is_number());
        assert!(json["category_counts"]["Fiction"].is_number());
    }
}
