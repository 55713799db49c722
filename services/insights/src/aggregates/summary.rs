//! Headline summary metrics
//!
//! The dashboard's metric tiles: total books, distinct authors, mean
//! rating over rated records, and total copies sold.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog::dataset::Dataset;

/// Headline metrics over the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_books: usize,
    /// Distinct named authors; records without one contribute nothing.
    pub distinct_authors: usize,
    /// Mean rating over rated records, 2 decimal places.
    pub average_rating: Option<Decimal>,
    /// Records carrying a rating.
    pub rated_books: usize,
    /// Sum of quantity_sold over records carrying it.
    pub total_copies_sold: u64,
}

/// Compute the headline metrics.
pub fn summary_stats(dataset: &Dataset) -> SummaryStats {
    let mut authors: BTreeSet<&str> = BTreeSet::new();
    let mut rating_sum = Decimal::ZERO;
    let mut rated_books = 0usize;
    let mut total_copies_sold = 0u64;

    for record in dataset {
        if let Some(author) = record.author.as_deref() {
            authors.insert(author);
        }
        if let Some(rating) = record.rating {
            rating_sum += rating;
            rated_books += 1;
        }
        if let Some(sold) = record.quantity_sold {
            total_copies_sold = total_copies_sold.saturating_add(sold);
        }
    }

    let average_rating = if rated_books > 0 {
        Some((rating_sum / Decimal::from(rated_books as u64)).round_dp(2))
    } else {
        None
    };

    SummaryStats {
        total_books: dataset.len(),
        distinct_authors: authors.len(),
        average_rating,
        rated_books,
        total_copies_sold,
    }
}
