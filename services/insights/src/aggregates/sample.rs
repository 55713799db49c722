//! Deterministic preview sample
//!
//! Draws a fixed-size random sample of records using a seeded ChaCha RNG:
//! the same (dataset, seed) always yields the same sample, which keeps
//! refreshes reproducible. Selected records keep their dataset order.

use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use catalog::dataset::Dataset;
use catalog::record::Record;

/// Sample up to `size` records. Smaller datasets are returned whole.
pub fn sample(dataset: &Dataset, size: usize, seed: u64) -> Vec<Record> {
    if size >= dataset.len() {
        return dataset.records().to_vec();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut chosen = index::sample(&mut rng, dataset.len(), size).into_vec();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .filter_map(|position| dataset.get(position).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_dataset(n: usize) -> Dataset {
        Dataset::new((0..n).map(|i| Record::new(format!("Book {i}"))).collect())
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let dataset = make_dataset(50);
        assert_eq!(sample(&dataset, 10, 7), sample(&dataset, 10, 7));
    }

    #[test]
    fn test_sample_preserves_dataset_order() {
        let dataset = make_dataset(50);
        let drawn = sample(&dataset, 10, 7);
        let positions: Vec<usize> = drawn
            .iter()
            .map(|record| {
                dataset
                    .iter()
                    .position(|candidate| candidate == record)
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_small_dataset_returned_whole() {
        let dataset = make_dataset(3);
        let drawn = sample(&dataset, 10, 7);
        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn, dataset.records().to_vec());
    }

    #[test]
    fn test_empty_dataset_yields_empty_sample() {
        assert!(sample(&Dataset::empty(), 10, 7).is_empty());
    }
}
