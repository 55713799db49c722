//! Top-N ranking aggregate
//!
//! Ranks records descending by a chosen attribute. The sort is stable, so
//! tied records keep their original dataset order. Records with the
//! attribute absent are excluded from the ranking.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog::dataset::Dataset;
use catalog::errors::ConfigError;
use catalog::record::Record;

/// Attribute a top-N ranking can order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankAttribute {
    Price,
    Rating,
    QuantitySold,
}

impl RankAttribute {
    /// The record's value for this attribute, if present.
    pub fn value_of(&self, record: &Record) -> Option<Decimal> {
        match self {
            RankAttribute::Price => record.price,
            RankAttribute::Rating => record.rating,
            RankAttribute::QuantitySold => record.quantity_sold.map(Decimal::from),
        }
    }

    /// Attribute name as it appears in configuration and reports.
    pub fn name(&self) -> &'static str {
        match self {
            RankAttribute::Price => "price",
            RankAttribute::Rating => "rating",
            RankAttribute::QuantitySold => "quantity_sold",
        }
    }
}

impl fmt::Display for RankAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RankAttribute {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(RankAttribute::Price),
            "rating" => Ok(RankAttribute::Rating),
            "quantity_sold" => Ok(RankAttribute::QuantitySold),
            other => Err(ConfigError::UnknownAttribute {
                attribute: other.to_string(),
            }),
        }
    }
}

/// The `n` records with the highest value of `attribute`.
///
/// Ties break by original dataset order. An `n` larger than the eligible
/// count returns all eligible records; `n == 0` is a configuration error.
pub fn top_n(
    dataset: &Dataset,
    attribute: RankAttribute,
    n: usize,
) -> Result<Vec<Record>, ConfigError> {
    if n == 0 {
        return Err(ConfigError::InvalidTopN);
    }

    let mut eligible: Vec<(&Record, Decimal)> = dataset
        .iter()
        .filter_map(|record| attribute.value_of(record).map(|value| (record, value)))
        .collect();

    // sort_by is stable: equal values keep their dataset order
    eligible.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(eligible
        .into_iter()
        .take(n)
        .map(|(record, _)| record.clone())
        .collect())
}
