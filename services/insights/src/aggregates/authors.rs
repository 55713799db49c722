//! Author insights aggregate
//!
//! Book counts per author plus the top authors by count. Records with an
//! absent author are bucketed under "Unknown", matching the category
//! aggregate, so counts still sum to the dataset length.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use catalog::dataset::Dataset;

use crate::aggregates::category::UNKNOWN_BUCKET;

/// Author → book count. BTreeMap for deterministic iteration order.
pub type AuthorCounts = BTreeMap<String, u64>;

/// One row of the top-authors ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub books: u64,
}

/// Author counts and the derived top-authors ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInsights {
    /// Author → book count, "Unknown" bucket included.
    pub counts: AuthorCounts,
    /// Top authors by book count, ties broken alphabetically.
    pub top: Vec<AuthorCount>,
}

/// Count books per author and rank the most prolific.
pub fn author_insights(dataset: &Dataset, top_n: usize) -> AuthorInsights {
    let mut counts = AuthorCounts::new();
    for record in dataset {
        let bucket = record.author.as_deref().unwrap_or(UNKNOWN_BUCKET);
        *counts.entry(bucket.to_string()).or_insert(0) += 1;
    }

    let mut top: Vec<AuthorCount> = counts
        .iter()
        .map(|(author, &books)| AuthorCount {
            author: author.clone(),
            books,
        })
        .collect();
    // BTreeMap iteration is alphabetical; the stable sort keeps that
    // order for tied counts
    top.sort_by(|a, b| b.books.cmp(&a.books));
    top.truncate(top_n);

    AuthorInsights { counts, top }
}
