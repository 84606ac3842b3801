// src/model/tree.rs
//! Gini-impurity classification tree over sparse count features

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::SparseVector;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Non-constant features examined per split
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Rows with `x[feature] <= threshold` go left
    Split {
        feature: u32,
        threshold: f32,
        left: u32,
        right: u32,
    },
    /// Class probabilities, zero entries omitted
    Leaf { distribution: Vec<(u32, f32)> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct SplitCandidate {
    feature: u32,
    threshold: f32,
    /// Weighted child impurity, lower is better
    score: f64,
}

struct WorkItem {
    node: usize,
    samples: Vec<usize>,
    depth: usize,
}

impl DecisionTree {
    /// Grow a tree on `samples` (row indices into `x`, repeats allowed).
    ///
    /// Nodes are split until pure, too small, or at `max_depth`. The tree is
    /// built with an explicit work stack since fully grown trees on text data
    /// can be very deep.
    pub fn fit<R: Rng>(
        x: &[SparseVector],
        y: &[u32],
        samples: Vec<usize>,
        n_classes: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut nodes = vec![Node::Leaf {
            distribution: Vec::new(),
        }];
        let mut stack = vec![WorkItem {
            node: 0,
            samples,
            depth: 0,
        }];

        while let Some(item) = stack.pop() {
            let counts = class_counts(y, &item.samples, n_classes);
            let n = item.samples.len();

            let depth_exhausted = params.max_depth.is_some_and(|d| item.depth >= d);
            let is_pure = counts.iter().filter(|&&c| c > 0.0).count() <= 1;

            let split = if depth_exhausted || is_pure || n < params.min_samples_split {
                None
            } else {
                best_split(x, y, &item.samples, n_classes, params, rng)
            };

            match split {
                Some(split) => {
                    let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = item
                        .samples
                        .iter()
                        .partition(|&&s| x[s].get(split.feature) <= split.threshold);

                    let left = nodes.len();
                    let right = left + 1;
                    nodes.push(Node::Leaf {
                        distribution: Vec::new(),
                    });
                    nodes.push(Node::Leaf {
                        distribution: Vec::new(),
                    });
                    nodes[item.node] = Node::Split {
                        feature: split.feature,
                        threshold: split.threshold,
                        left: left as u32,
                        right: right as u32,
                    };

                    stack.push(WorkItem {
                        node: right,
                        samples: right_samples,
                        depth: item.depth + 1,
                    });
                    stack.push(WorkItem {
                        node: left,
                        samples: left_samples,
                        depth: item.depth + 1,
                    });
                }
                None => {
                    nodes[item.node] = Node::Leaf {
                        distribution: normalize(&counts),
                    };
                }
            }
        }

        Self { nodes }
    }

    /// Leaf distribution reached by `row`
    pub fn leaf_distribution(&self, row: &SparseVector) -> &[(u32, f32)] {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row.get(*feature) <= *threshold {
                        *left as usize
                    } else {
                        *right as usize
                    };
                }
                Node::Leaf { distribution } => return distribution,
            }
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Node::Split { left, right, .. } = &self.nodes[idx] {
                stack.push((*left as usize, depth + 1));
                stack.push((*right as usize, depth + 1));
            }
        }
        max_depth
    }

    /// Check child links point forward and inside the node array
    pub fn validate(&self, n_classes: usize) -> anyhow::Result<()> {
        if self.nodes.is_empty() {
            anyhow::bail!("tree has no nodes");
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { left, right, .. } => {
                    for child in [*left as usize, *right as usize] {
                        if child <= idx || child >= self.nodes.len() {
                            anyhow::bail!("node {} has invalid child {}", idx, child);
                        }
                    }
                }
                Node::Leaf { distribution } => {
                    if let Some(&(class, _)) =
                        distribution.iter().find(|(c, _)| *c as usize >= n_classes)
                    {
                        anyhow::bail!("leaf {} references unknown class {}", idx, class);
                    }
                }
            }
        }
        Ok(())
    }
}

fn class_counts(y: &[u32], samples: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0.0; n_classes];
    for &s in samples {
        counts[y[s] as usize] += 1.0;
    }
    counts
}

fn normalize(counts: &[f64]) -> Vec<(u32, f32)> {
    let total: f64 = counts.iter().sum();
    if total == 0.0 {
        return Vec::new();
    }
    counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0.0)
        .map(|(class, &c)| (class as u32, (c / total) as f32))
        .collect()
}

fn gini(counts: &[f64], total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|&c| (c / total) * (c / total)).sum::<f64>()
}

/// Search a random subset of the features present in the node.
///
/// Features absent from every row are constant zero and can never split, so
/// only features with at least one non-zero value are drawn. Draws continue
/// past constant features until `max_features` usable ones were examined.
fn best_split<R: Rng>(
    x: &[SparseVector],
    y: &[u32],
    samples: &[usize],
    n_classes: usize,
    params: &TreeParams,
    rng: &mut R,
) -> Option<SplitCandidate> {
    let present: BTreeSet<u32> = samples.iter().flat_map(|&s| x[s].features()).collect();
    let mut candidates: Vec<u32> = present.into_iter().collect();

    let mut best: Option<SplitCandidate> = None;
    let mut examined = 0usize;
    let mut remaining = candidates.len();

    while remaining > 0 && examined < params.max_features {
        let pick = rng.gen_range(0..remaining);
        candidates.swap(pick, remaining - 1);
        let feature = candidates[remaining - 1];
        remaining -= 1;

        let mut column: Vec<(f32, u32)> = samples
            .iter()
            .map(|&s| (x[s].get(feature), y[s]))
            .collect();
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let first = column[0].0;
        let last = column[column.len() - 1].0;
        if first == last {
            continue;
        }
        examined += 1;

        let candidate = best_threshold(feature, &column, n_classes, params.min_samples_leaf);
        if let Some(candidate) = candidate {
            if best.as_ref().map_or(true, |b| candidate.score < b.score) {
                best = Some(candidate);
            }
        }
    }

    best
}

fn best_threshold(
    feature: u32,
    sorted: &[(f32, u32)],
    n_classes: usize,
    min_samples_leaf: usize,
) -> Option<SplitCandidate> {
    let n = sorted.len();
    let mut right = vec![0.0; n_classes];
    for &(_, class) in sorted {
        right[class as usize] += 1.0;
    }
    let mut left = vec![0.0; n_classes];

    let mut best: Option<SplitCandidate> = None;
    for i in 0..n - 1 {
        let class = sorted[i].1 as usize;
        left[class] += 1.0;
        right[class] -= 1.0;

        if sorted[i].0 == sorted[i + 1].0 {
            continue;
        }

        let n_left = i + 1;
        let n_right = n - n_left;
        if n_left < min_samples_leaf || n_right < min_samples_leaf {
            continue;
        }

        let score = gini(&left, n_left as f64) * n_left as f64
            + gini(&right, n_right as f64) * n_right as f64;

        if best.as_ref().map_or(true, |b| score < b.score) {
            best = Some(SplitCandidate {
                feature,
                threshold: (sorted[i].0 + sorted[i + 1].0) / 2.0,
                score,
            });
        }
    }

    best
}
