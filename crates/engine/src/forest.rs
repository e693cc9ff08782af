// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bagged decision trees outcome predictor.
//!
//! The predictor maps the current strength code plus the starting hand
//! features to a distribution over the strength categories the hand may
//! reach at showdown. Trees are grown on bootstrap samples with gini
//! splits over a random feature subset, and the out-of-bag accuracy is
//! reported in place of a held-out fold where data is scarce.
use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of predictor inputs, the current strength code plus the four
/// starting hand features.
pub const INPUTS: usize = 5;

/// Error running ensemble inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// The input vector has the wrong length.
    BadInputLen(usize),
    /// The input vector contains a NaN or infinite value.
    NonFiniteInput,
    /// The forest has no trees.
    EmptyForest,
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::BadInputLen(n) => {
                write!(f, "expected {INPUTS} inputs, got {n}")
            }
            PredictError::NonFiniteInput => write!(f, "inputs must be finite"),
            PredictError::EmptyForest => write!(f, "the forest has no trees"),
        }
    }
}

impl std::error::Error for PredictError {}

/// Parameters for growing a forest.
#[derive(Debug, Clone)]
pub struct FitParams {
    /// Number of trees in the ensemble.
    pub trees: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum samples required to split a node.
    pub min_samples: usize,
    /// Seed for bootstrap sampling and feature subsets.
    pub seed: u64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: 16,
            min_samples: 2,
            seed: 42,
        }
    }
}

/// A single decision tree storing its nodes in a flat arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DecisionTree {
    nodes: Vec<Node>,
    root: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        dist: Vec<f32>,
    },
}

impl DecisionTree {
    /// The class distribution at the leaf the inputs fall into.
    fn leaf_dist(&self, inputs: &[f32]) -> &[f32] {
        let mut node = self.root;
        loop {
            match &self.nodes[node] {
                Node::Leaf { dist } => return dist,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if inputs[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// A bagged ensemble of decision trees.
///
/// Inference has no side effects and the forest is safe to share read-only
/// across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    trees: Vec<DecisionTree>,
    classes: usize,
}

impl Forest {
    /// Fits a forest on a feature matrix and label vector, returning the
    /// forest and its out-of-bag accuracy.
    ///
    /// Panics if `x` and `y` differ in length or are empty, or if a label
    /// is outside `0..classes`.
    pub fn fit(x: &[[f32; INPUTS]], y: &[u8], classes: usize, params: &FitParams) -> (Self, f64) {
        assert_eq!(x.len(), y.len(), "feature matrix and labels must align");
        assert!(!x.is_empty(), "cannot fit on an empty dataset");
        assert!(
            y.iter().all(|&label| (label as usize) < classes),
            "label outside 0..{classes}"
        );

        let n = x.len();

        // Each tree gets its own seeded rng so growing in parallel stays
        // deterministic.
        let fitted = (0..params.trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(t as u64));
                let mut samples = Vec::with_capacity(n);
                let mut in_bag = vec![false; n];
                for _ in 0..n {
                    let s = rng.random_range(0..n);
                    samples.push(s);
                    in_bag[s] = true;
                }

                let tree = TreeBuilder::new(x, y, classes, params, rng).build(samples);
                (tree, in_bag)
            })
            .collect::<Vec<_>>();

        // Score each sample with the trees that did not see it.
        let mut correct = 0usize;
        let mut scored = 0usize;
        for (i, sample) in x.iter().enumerate() {
            let mut dist = vec![0.0f32; classes];
            let mut voters = 0;
            for (tree, in_bag) in &fitted {
                if !in_bag[i] {
                    for (d, p) in dist.iter_mut().zip(tree.leaf_dist(sample)) {
                        *d += p;
                    }
                    voters += 1;
                }
            }

            if voters > 0 {
                scored += 1;
                if argmax(&dist) == y[i] {
                    correct += 1;
                }
            }
        }

        let oob = if scored > 0 {
            correct as f64 / scored as f64
        } else {
            0.0
        };

        let trees = fitted.into_iter().map(|(tree, _)| tree).collect();
        (Self { trees, classes }, oob)
    }

    /// Number of output classes.
    pub fn classes(&self) -> usize {
        self.classes
    }

    /// Predicts the class for the inputs, ties resolve to the lowest class.
    pub fn predict(&self, inputs: &[f32]) -> Result<u8, PredictError> {
        self.predict_proba(inputs).map(|dist| argmax(&dist))
    }

    /// The predicted class distribution, averaged over the trees.
    pub fn predict_proba(&self, inputs: &[f32]) -> Result<Vec<f32>, PredictError> {
        if inputs.len() != INPUTS {
            return Err(PredictError::BadInputLen(inputs.len()));
        } else if inputs.iter().any(|v| !v.is_finite()) {
            return Err(PredictError::NonFiniteInput);
        } else if self.trees.is_empty() {
            return Err(PredictError::EmptyForest);
        }

        let mut dist = vec![0.0f32; self.classes];
        for tree in &self.trees {
            for (d, p) in dist.iter_mut().zip(tree.leaf_dist(inputs)) {
                *d += p;
            }
        }

        let scale = 1.0 / self.trees.len() as f32;
        dist.iter_mut().for_each(|d| *d *= scale);
        Ok(dist)
    }
}

/// The class with the highest score, the lowest class on ties.
fn argmax(dist: &[f32]) -> u8 {
    let mut best = 0usize;
    for (i, &p) in dist.iter().enumerate().skip(1) {
        if p > dist[best] {
            best = i;
        }
    }
    best as u8
}

/// Grows one tree on a bootstrap sample.
struct TreeBuilder<'a> {
    x: &'a [[f32; INPUTS]],
    y: &'a [u8],
    classes: usize,
    max_depth: usize,
    min_samples: usize,
    rng: StdRng,
    nodes: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    fn new(
        x: &'a [[f32; INPUTS]],
        y: &'a [u8],
        classes: usize,
        params: &FitParams,
        rng: StdRng,
    ) -> Self {
        Self {
            x,
            y,
            classes,
            max_depth: params.max_depth,
            min_samples: params.min_samples,
            rng,
            nodes: Vec::new(),
        }
    }

    fn build(mut self, mut samples: Vec<usize>) -> DecisionTree {
        let root = self.grow(&mut samples, 0);
        DecisionTree {
            nodes: self.nodes,
            root,
        }
    }

    /// Grows a subtree over the samples and returns its node index.
    fn grow(&mut self, samples: &mut [usize], depth: usize) -> usize {
        let counts = self.class_counts(samples);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;

        if pure || depth >= self.max_depth || samples.len() < self.min_samples {
            return self.push_leaf(&counts, samples.len());
        }

        let Some((feature, threshold)) = self.best_split(samples, &counts) else {
            return self.push_leaf(&counts, samples.len());
        };

        let (mut left_samples, mut right_samples): (Vec<_>, Vec<_>) = samples
            .iter()
            .copied()
            .partition(|&s| self.x[s][feature] <= threshold);

        let left = self.grow(&mut left_samples, depth + 1);
        let right = self.grow(&mut right_samples, depth + 1);

        self.nodes.push(Node::Split {
            feature,
            threshold,
            left,
            right,
        });
        self.nodes.len() - 1
    }

    /// Picks the gini-best split over a random feature subset.
    fn best_split(&mut self, samples: &mut [usize], counts: &[usize]) -> Option<(usize, f32)> {
        let total = samples.len() as f64;
        let parent = gini(counts, total);

        // Random forest style sqrt feature subsampling.
        let mut features = [0usize; INPUTS];
        for (i, f) in features.iter_mut().enumerate() {
            *f = i;
        }
        features.shuffle(&mut self.rng);
        let subset = ((INPUTS as f64).sqrt().round() as usize).max(1);

        let mut best: Option<(f64, usize, f32)> = None;
        for &feature in &features[..subset] {
            samples.sort_unstable_by(|&a, &b| self.x[a][feature].total_cmp(&self.x[b][feature]));

            let mut left = vec![0usize; self.classes];
            let mut right = counts.to_vec();

            for i in 0..samples.len() - 1 {
                let class = self.y[samples[i]] as usize;
                left[class] += 1;
                right[class] -= 1;

                let value = self.x[samples[i]][feature];
                let next = self.x[samples[i + 1]][feature];
                if value == next {
                    continue;
                }

                let nl = (i + 1) as f64;
                let nr = total - nl;
                let impurity = (nl * gini(&left, nl) + nr * gini(&right, nr)) / total;
                if impurity < parent && best.is_none_or(|(b, _, _)| impurity < b) {
                    best = Some((impurity, feature, (value + next) / 2.0));
                }
            }
        }

        best.map(|(_, feature, threshold)| (feature, threshold))
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.classes];
        for &s in samples {
            counts[self.y[s] as usize] += 1;
        }
        counts
    }

    fn push_leaf(&mut self, counts: &[usize], total: usize) -> usize {
        let dist = counts
            .iter()
            .map(|&c| c as f32 / total.max(1) as f32)
            .collect();
        self.nodes.push(Node::Leaf { dist });
        self.nodes.len() - 1
    }
}

/// Gini impurity of the class counts.
fn gini(counts: &[usize], total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }

    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}
