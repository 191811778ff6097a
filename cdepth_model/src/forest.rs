//! Bootstrap-aggregated regression trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tree::GrowLimits;
use crate::{DepthRegressor, ModelError, RegressionTree, Sample};

/// Ensemble size, growth limits, and bootstrap seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees.
    pub n_trees: usize,
    /// Maximum tree depth; unlimited when `None`.
    pub max_depth: Option<usize>,
    /// Nodes with fewer rows become leaves.
    pub min_samples_split: usize,
    /// Seed for the bootstrap draws.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl ForestParams {
    /// Sets the ensemble size.
    ///
    /// ```
    /// use cdepth_model::ForestParams;
    ///
    /// let params = ForestParams::default().with_trees(10).with_seed(7);
    /// assert_eq!((params.n_trees, params.seed), (10, 7));
    /// ```
    #[must_use]
    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Caps tree depth; `None` grows until leaves are pure or too small.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the bootstrap seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    const fn limits(&self) -> GrowLimits {
        GrowLimits {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }
}

/// Average of trees, each grown on a bootstrap resample of the training rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// An unfitted forest.
    #[must_use]
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
        }
    }

    /// Parameters the forest was built with.
    #[must_use]
    pub const fn params(&self) -> &ForestParams {
        &self.params
    }

    /// The fitted trees; empty before [`DepthRegressor::fit`].
    #[must_use]
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Returns true once at least one tree has been grown.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}

impl DepthRegressor for RandomForest {
    fn fit(&mut self, samples: &[Sample], targets: &[f64]) -> Result<(), ModelError> {
        if samples.len() != targets.len() {
            return Err(ModelError::LengthMismatch {
                samples: samples.len(),
                targets: targets.len(),
            });
        }
        if samples.is_empty() {
            return Err(ModelError::EmptyDataset { rows: 0 });
        }

        // Draw per-tree seeds up front so the result does not depend on scheduling.
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let seeds: Vec<u64> = (0..self.params.n_trees.max(1)).map(|_| rng.r#gen()).collect();
        let limits = self.params.limits();
        let n = samples.len();

        self.trees = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                let mut tree = RegressionTree::default();
                tree.grow(samples, targets, &mut rows, limits);
                tree
            })
            .collect();

        debug!(
            "Fitted {} trees on {} rows (deepest {})",
            self.trees.len(),
            n,
            self.trees.iter().map(RegressionTree::depth).max().unwrap_or(0)
        );
        Ok(())
    }

    fn predict(&self, sample: &Sample) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(sample)).sum();
        total / self.trees.len() as f64
    }
}
