//! Catalog search
//!
//! Case-insensitive substring search over title and author, returning
//! matches in dataset order. A blank query matches nothing.

use catalog::dataset::Dataset;
use catalog::record::Record;

/// Find records whose title or author contains `query`.
pub fn search(dataset: &Dataset, query: &str) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    dataset
        .iter()
        .filter(|record| {
            record.title.to_lowercase().contains(&needle)
                || record
                    .author
                    .as_deref()
                    .map_or(false, |author| author.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: Option<&str>) -> Record {
        Record {
            author: author.map(str::to_string),
            ..Record::new(title)
        }
    }

    fn library() -> Dataset {
        Dataset::new(vec![
            book("The Hobbit", Some("J.R.R. Tolkien")),
            book("The Silmarillion", Some("J.R.R. Tolkien")),
            book("Earthsea", Some("Ursula K. Le Guin")),
            book("Anonymous Tales", None),
        ])
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let hits = search(&library(), "hobbit");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The Hobbit");
    }

    #[test]
    fn test_matches_author_in_dataset_order() {
        let hits = search(&library(), "tolkien");
        let titles: Vec<&str> = hits.iter().map(|record| record.title.as_str()).collect();
        assert_eq!(titles, vec!["The Hobbit", "The Silmarillion"]);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        assert!(search(&library(), "").is_empty());
        assert!(search(&library(), "   ").is_empty());
    }

    #[test]
    fn test_records_without_author_still_searchable_by_title() {
        let hits = search(&library(), "anonymous");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(search(&library(), "dune").is_empty());
    }
}
