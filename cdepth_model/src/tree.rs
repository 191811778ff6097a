//! CART regression trees with squared-error splits.

use serde::{Deserialize, Serialize};

use cdepth_dataset::Features;

use crate::{DepthRegressor, ModelError, Sample};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits for one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GrowLimits {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for GrowLimits {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

/// Best split found over a set of rows.
struct Candidate {
    feature: usize,
    threshold: f64,
    error: f64,
}

/// A binary regression tree stored as a flat node list; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Number of nodes, leaves included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Longest root-to-leaf edge count.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            match nodes[idx] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        if self.nodes.is_empty() { 0 } else { walk(&self.nodes, 0) }
    }

    /// Grows the tree over the rows listed in `rows`, which may repeat.
    pub(crate) fn grow(
        &mut self,
        samples: &[Sample],
        targets: &[f64],
        rows: &mut [usize],
        limits: GrowLimits,
    ) {
        self.nodes.clear();
        if rows.is_empty() {
            self.nodes.push(TreeNode::Leaf { value: 0.0 });
            return;
        }
        self.grow_node(samples, targets, rows, limits, 0);
    }

    fn grow_node(
        &mut self,
        samples: &[Sample],
        targets: &[f64],
        rows: &mut [usize],
        limits: GrowLimits,
        depth: usize,
    ) -> usize {
        let idx = self.nodes.len();
        let mean = rows.iter().map(|&r| targets[r]).sum::<f64>() / rows.len() as f64;
        self.nodes.push(TreeNode::Leaf { value: mean });

        if rows.len() < limits.min_samples_split.max(2)
            || limits.max_depth.is_some_and(|max| depth >= max)
        {
            return idx;
        }

        let Some(best) = best_split(samples, targets, rows) else {
            return idx;
        };

        // Partition in place: rows at or below the threshold go left.
        rows.sort_by(|&a, &b| samples[a][best.feature].total_cmp(&samples[b][best.feature]));
        let split_at = rows.partition_point(|&r| samples[r][best.feature] <= best.threshold);
        let (left_rows, right_rows) = rows.split_at_mut(split_at);

        let left = self.grow_node(samples, targets, left_rows, limits, depth + 1);
        let right = self.grow_node(samples, targets, right_rows, limits, depth + 1);
        self.nodes[idx] = TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        idx
    }
}

/// Sum of squared deviations from the mean, from running sums.
fn squared_error(sum: f64, sum_sq: f64, count: usize) -> f64 {
    (sum_sq - sum * sum / count as f64).max(0.0)
}

fn best_split(samples: &[Sample], targets: &[f64], rows: &[usize]) -> Option<Candidate> {
    let total_sum: f64 = rows.iter().map(|&r| targets[r]).sum();
    let total_sq: f64 = rows.iter().map(|&r| targets[r].powi(2)).sum();
    let parent_error = squared_error(total_sum, total_sq, rows.len());
    if parent_error <= 1e-12 * total_sq.max(1.0) {
        return None;
    }

    let mut best: Option<Candidate> = None;
    let mut order = rows.to_vec();

    for feature in 0..Features::LEN {
        order.sort_by(|&a, &b| samples[a][feature].total_cmp(&samples[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 0..order.len() - 1 {
            let y = targets[order[i]];
            left_sum += y;
            left_sq += y.powi(2);

            let here = samples[order[i]][feature];
            let next = samples[order[i + 1]][feature];
            if here == next {
                continue;
            }

            let left_count = i + 1;
            let right_count = order.len() - left_count;
            let error = squared_error(left_sum, left_sq, left_count)
                + squared_error(total_sum - left_sum, total_sq - left_sq, right_count);

            if best.as_ref().is_none_or(|b| error < b.error) {
                best = Some(Candidate {
                    feature,
                    threshold: here + (next - here) / 2.0,
                    error,
                });
            }
        }
    }

    best.filter(|b| b.error < parent_error)
}

impl DepthRegressor for RegressionTree {
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
        let mut rows: Vec<usize> = (0..samples.len()).collect();
        self.grow(samples, targets, &mut rows, GrowLimits::default());
        Ok(())
    }

    fn predict(&self, sample: &Sample) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                None => return 0.0,
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    idx = if sample[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}
