// src/model/split.rs
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Seeded holdout split shared by the trainer and the evaluator.
///
/// The test set takes `ceil(n * test_fraction)` rows from the front of a
/// seeded permutation, the train set takes the rest. Equal `(n, fraction,
/// seed)` always yields the same split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    pub fn new(n_rows: usize, test_fraction: f64, seed: u64) -> anyhow::Result<Self> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            anyhow::bail!("test fraction must be strictly between 0 and 1");
        }

        let n_test = (test_fraction * n_rows as f64).ceil() as usize;
        let n_train = n_rows.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            anyhow::bail!(
                "cannot split {} rows with test fraction {}: one side would be empty",
                n_rows,
                test_fraction
            );
        }

        let mut permutation: Vec<usize> = (0..n_rows).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        permutation.shuffle(&mut rng);

        let train = permutation.split_off(n_test);
        Ok(Self {
            train,
            test: permutation,
        })
    }

    /// Pick the rows of `items` selected by `indices`
    pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
        indices.iter().map(|&i| items[i].clone()).collect()
    }
}
