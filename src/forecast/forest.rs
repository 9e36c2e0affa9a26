//! Random-forest regression.
//!
//! Bootstrap-aggregated, depth-limited regression trees over a small
//! fixed feature space. Each tree is grown on a bootstrap resample of
//! the training rows; prediction is the mean of the tree outputs.
//! Splits minimize the weighted sum of squared errors, with candidate
//! thresholds at midpoints between consecutive distinct feature values.
//!
//! # Reference
//! Breiman (2001), "Random Forests", Machine Learning 45(1)

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Forest training configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub trees: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split.
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 200,
            max_depth: 8,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn eval(&self, features: &[f64]) -> f64 {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features.get(*feature).copied().unwrap_or(0.0) <= *threshold {
                    left.eval(features)
                } else {
                    right.eval(features)
                }
            }
        }
    }
}

/// A trained regression forest.
///
/// Serializable as a whole: a saved artifact reproduces the exact same
/// predictions when loaded back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<Node>,
}

impl RandomForest {
    /// Fits a forest to `y` against the rows of `x`.
    ///
    /// `x` must carry one row per target value. Identically-seeded RNGs
    /// reproduce identical forests.
    pub fn fit<R: Rng + ?Sized>(
        x: &Array2<f64>,
        y: &[f64],
        config: &ForestConfig,
        rng: &mut R,
    ) -> Self {
        assert_eq!(x.nrows(), y.len(), "one target per feature row");
        let n = y.len();
        let mut trees = Vec::with_capacity(config.trees);
        for _ in 0..config.trees {
            let sample: Vec<usize> = if n == 0 {
                Vec::new()
            } else {
                (0..n).map(|_| rng.random_range(0..n)).collect()
            };
            trees.push(grow(x, y, &sample, config, 0));
        }
        Self { trees }
    }

    /// Predicts a single value for one feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.eval(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Number of trees in the ensemble.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

fn mean(y: &[f64], sample: &[usize]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().map(|&i| y[i]).sum::<f64>() / sample.len() as f64
}

fn grow(x: &Array2<f64>, y: &[f64], sample: &[usize], config: &ForestConfig, depth: usize) -> Node {
    let value = mean(y, sample);
    if depth >= config.max_depth || sample.len() < config.min_samples_split {
        return Node::Leaf { value };
    }
    // Pure node: nothing left to explain.
    let sse: f64 = sample.iter().map(|&i| (y[i] - value).powi(2)).sum();
    if sse <= 1e-12 {
        return Node::Leaf { value };
    }

    let Some((feature, threshold)) = best_split(x, y, sample) else {
        return Node::Leaf { value };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = sample
        .iter()
        .copied()
        .partition(|&i| x[[i, feature]] <= threshold);
    if left.is_empty() || right.is_empty() {
        return Node::Leaf { value };
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(x, y, &left, config, depth + 1)),
        right: Box::new(grow(x, y, &right, config, depth + 1)),
    }
}

/// Exhaustive split search: every feature, every midpoint between
/// consecutive distinct values, minimizing left+right SSE via prefix
/// sums.
fn best_split(x: &Array2<f64>, y: &[f64], sample: &[usize]) -> Option<(usize, f64)> {
    let n = sample.len();
    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..x.ncols() {
        let mut vals: Vec<(f64, f64)> = sample.iter().map(|&i| (x[[i, feature]], y[i])).collect();
        vals.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut prefix_sum = vec![0.0; n + 1];
        let mut prefix_sq = vec![0.0; n + 1];
        for (i, &(_, target)) in vals.iter().enumerate() {
            prefix_sum[i + 1] = prefix_sum[i] + target;
            prefix_sq[i + 1] = prefix_sq[i] + target * target;
        }

        for i in 1..n {
            if vals[i].0 <= vals[i - 1].0 {
                continue;
            }
            let threshold = (vals[i - 1].0 + vals[i].0) / 2.0;
            let (nl, nr) = (i as f64, (n - i) as f64);
            let sse_left = prefix_sq[i] - prefix_sum[i] * prefix_sum[i] / nl;
            let sum_right = prefix_sum[n] - prefix_sum[i];
            let sse_right = (prefix_sq[n] - prefix_sq[i]) - sum_right * sum_right / nr;
            let sse = sse_left + sse_right;
            if best.map_or(true, |(_, _, b)| sse < b) {
                best = Some((feature, threshold, sse));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn step_data() -> (Array2<f64>, Vec<f64>) {
        // y = 10 below x0 = 10, y = 20 above; other features are noise-free zeros.
        let n = 20;
        let mut flat = Vec::with_capacity(n * 3);
        let mut y = Vec::with_capacity(n);
        for i in 0..n {
            flat.extend_from_slice(&[i as f64, 0.0, 0.0]);
            y.push(if i < 10 { 10.0 } else { 20.0 });
        }
        (Array2::from_shape_vec((n, 3), flat).unwrap(), y)
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            trees: 50,
            max_depth: 4,
            min_samples_split: 2,
        }
    }

    #[test]
    fn test_constant_target_predicts_constant() {
        let x = Array2::from_shape_vec((4, 3), vec![0.0; 12]).unwrap();
        let y = vec![7.0; 4];
        let mut rng = StdRng::seed_from_u64(1);
        let forest = RandomForest::fit(&x, &y, &small_config(), &mut rng);
        assert!((forest.predict(&[0.0, 0.0, 0.0]) - 7.0).abs() < 1e-9);
        assert!((forest.predict(&[99.0, 1.0, 2.0]) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_learns_step_function() {
        let (x, y) = step_data();
        let mut rng = StdRng::seed_from_u64(2);
        let forest = RandomForest::fit(&x, &y, &small_config(), &mut rng);
        assert_eq!(forest.tree_count(), 50);
        assert!((forest.predict(&[2.0, 0.0, 0.0]) - 10.0).abs() < 2.0);
        assert!((forest.predict(&[17.0, 0.0, 0.0]) - 20.0).abs() < 2.0);
    }

    #[test]
    fn test_same_seed_reproduces_forest() {
        let (x, y) = step_data();
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        let fa = RandomForest::fit(&x, &y, &small_config(), &mut a);
        let fb = RandomForest::fit(&x, &y, &small_config(), &mut b);
        let probe = [9.4, 0.0, 0.0];
        assert_eq!(fa.predict(&probe), fb.predict(&probe));
    }

    #[test]
    fn test_artifact_round_trip() {
        let (x, y) = step_data();
        let mut rng = StdRng::seed_from_u64(4);
        let forest = RandomForest::fit(&x, &y, &small_config(), &mut rng);
        let json = serde_json::to_string(&forest).unwrap();
        let back: RandomForest = serde_json::from_str(&json).unwrap();
        let probe = [12.5, 0.0, 0.0];
        assert_eq!(forest.predict(&probe), back.predict(&probe));
    }
}
