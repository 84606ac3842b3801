// src/model/forest.rs
//! Bagged ensemble of classification trees

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tree::{DecisionTree, TreeParams};
use super::SparseVector;
use crate::config::TrainingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl From<&TrainingConfig> for ForestParams {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            n_trees: config.n_trees,
            seed: config.seed,
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            min_samples_leaf: config.min_samples_leaf,
        }
    }
}

/// Random forest classifier.
///
/// Each tree is grown on a bootstrap sample drawn with its own seed, derived
/// from the forest seed, and considers `floor(sqrt(n_features))` features per
/// split. Class probabilities are the mean of the trees' leaf distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_classes: u32,
    n_features: u32,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn fit(
        x: &[SparseVector],
        y: &[u32],
        n_classes: usize,
        n_features: usize,
        params: &ForestParams,
    ) -> anyhow::Result<Self> {
        if x.is_empty() {
            anyhow::bail!("cannot fit a forest on zero rows");
        }
        if x.len() != y.len() {
            anyhow::bail!("feature rows ({}) and labels ({}) differ in length", x.len(), y.len());
        }
        if let Some(&bad) = y.iter().find(|&&label| label as usize >= n_classes) {
            anyhow::bail!("label {} out of range for {} classes", bad, n_classes);
        }
        if params.n_trees == 0 {
            anyhow::bail!("a forest needs at least one tree");
        }

        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            min_samples_leaf: params.min_samples_leaf,
            max_features: ((n_features as f64).sqrt().floor() as usize).max(1),
        };

        let mut seeder = Xoshiro256PlusPlus::seed_from_u64(params.seed);
        let n = x.len();
        let trees = (0..params.n_trees)
            .map(|i| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(seeder.gen());
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                let tree = DecisionTree::fit(x, y, bootstrap, n_classes, &tree_params, &mut rng);
                debug!(tree = i, nodes = tree.num_nodes(), depth = tree.depth(), "Grew tree");
                tree
            })
            .collect();

        Ok(Self {
            n_classes: n_classes as u32,
            n_features: n_features as u32,
            trees,
        })
    }

    /// Mean class probabilities over all trees
    pub fn predict_proba(&self, row: &SparseVector) -> Vec<f64> {
        let mut proba = vec![0.0; self.n_classes as usize];
        for tree in &self.trees {
            for &(class, p) in tree.leaf_distribution(row) {
                proba[class as usize] += p as f64;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }

    /// Most probable class and its probability; the lowest id wins ties
    pub fn predict_with_probability(&self, row: &SparseVector) -> (u32, f64) {
        let proba = self.predict_proba(row);
        proba
            .iter()
            .enumerate()
            .fold((0u32, f64::NEG_INFINITY), |best, (class, &p)| {
                if p > best.1 {
                    (class as u32, p)
                } else {
                    best
                }
            })
    }

    pub fn predict(&self, row: &SparseVector) -> u32 {
        self.predict_with_probability(row).0
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes as usize
    }

    pub fn n_features(&self) -> usize {
        self.n_features as usize
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trees.is_empty() || self.n_classes == 0 {
            anyhow::bail!("forest has no trees or no classes");
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_classes as usize)
                .map_err(|e| anyhow::anyhow!("tree {}: {}", idx, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(features: &[u32]) -> SparseVector {
        let mut counts = BTreeMap::new();
        for &f in features {
            *counts.entry(f).or_insert(0) += 1;
        }
        SparseVector::from_counts(&counts)
    }

    fn params(n_trees: usize, seed: u64) -> ForestParams {
        ForestParams {
            n_trees,
            seed,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }

    fn clustered() -> (Vec<SparseVector>, Vec<u32>) {
        // three skill clusters over a six term vocabulary
        let x = vec![
            row(&[0, 1]),
            row(&[0, 1, 2]),
            row(&[0, 2]),
            row(&[3, 4]),
            row(&[3, 4, 5]),
            row(&[4, 5]),
            row(&[1, 5]),
            row(&[1, 2, 5]),
        ];
        let y = vec![0, 0, 0, 1, 1, 1, 2, 2];
        (x, y)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = clustered();
        let forest = RandomForest::fit(&x, &y, 3, 6, &params(25, 42)).unwrap();
        forest.validate().unwrap();

        for features in &x {
            let total: f64 = forest.predict_proba(features).iter().sum();
            assert!((total - 1.0).abs() < 1e-6);
        }
        let zero_total: f64 = forest.predict_proba(&SparseVector::zero()).iter().sum();
        assert!((zero_total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = clustered();
        let a = RandomForest::fit(&x, &y, 3, 6, &params(10, 42)).unwrap();
        let b = RandomForest::fit(&x, &y, 3, 6, &params(10, 42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_learns_cluster_labels() {
        let (x, y) = clustered();
        let forest = RandomForest::fit(&x, &y, 3, 6, &params(100, 42)).unwrap();

        assert_eq!(forest.predict(&row(&[0, 1, 2])), 0);
        assert_eq!(forest.predict(&row(&[3, 4, 5])), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        let (x, y) = clustered();
        assert!(RandomForest::fit(&x, &y[..3], 3, 6, &params(5, 1)).is_err());
        assert!(RandomForest::fit(&x, &y, 2, 6, &params(5, 1)).is_err());
        assert!(RandomForest::fit(&[], &[], 3, 6, &params(5, 1)).is_err());
        assert!(RandomForest::fit(&x, &y, 3, 6, &params(0, 1)).is_err());
    }
}
