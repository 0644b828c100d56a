//! Partition-distance engine: statistical distances between partition
//! shapes of two circuits.

use quilt_ir::Circuit;
use serde::{Deserialize, Serialize};

/// Smoothing constant keeping the KL divergence finite on empty buckets.
const KL_EPSILON: f64 = 1e-10;

/// Build probability distributions over partition sizes, padded to a
/// common support.
///
/// Bucket `k` holds the fraction of partitions of size `k`; both
/// distributions run from 0 to the larger maximum, so they are directly
/// comparable. Empty inputs give empty distributions.
pub fn padded_distributions(a: &[usize], b: &[usize]) -> (Vec<f64>, Vec<f64>) {
    let max = a.iter().chain(b.iter()).copied().max();
    let Some(max) = max else {
        return (vec![], vec![]);
    };

    let histogram = |sizes: &[usize]| -> Vec<f64> {
        let mut buckets = vec![0.0f64; max + 1];
        for &s in sizes {
            buckets[s] += 1.0;
        }
        if !sizes.is_empty() {
            let n = sizes.len() as f64;
            for v in &mut buckets {
                *v /= n;
            }
        }
        buckets
    };

    (histogram(a), histogram(b))
}

/// Kullback-Leibler divergence `D(p || q)` with epsilon smoothing.
///
/// Both inputs are smoothed by `1e-10` and renormalized before the sum,
/// so zero buckets never blow up. Asymmetric: `kl_divergence(p, q)` is
/// not `kl_divergence(q, p)`.
pub fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    debug_assert_eq!(p.len(), q.len());

    let smooth = |dist: &[f64]| -> Vec<f64> {
        let total: f64 = dist.iter().map(|v| v + KL_EPSILON).sum();
        dist.iter().map(|v| (v + KL_EPSILON) / total).collect()
    };

    let p = smooth(p);
    let q = smooth(q);
    p.iter()
        .zip(&q)
        .map(|(pi, qi)| pi * (pi / qi).ln())
        .sum()
}

/// Chi-squared distance `0.5 * Σ (a_i - b_i)^2 / (a_i + b_i)`.
///
/// Buckets empty in both distributions contribute nothing.
pub fn chi2_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    0.5 * a
        .iter()
        .zip(b)
        .filter(|(x, y)| **x + **y > 0.0)
        .map(|(x, y)| (x - y).powi(2) / (x + y))
        .sum::<f64>()
}

/// Computes a distance between two circuits as unitaries.
///
/// The matrix algebra lives behind this trait; the engine only assumes
/// `distance` is 0 for equivalent circuits and grows toward 1.
pub trait UnitaryBackend {
    /// Distance between two circuits over the same wire count.
    fn distance(&self, a: &Circuit, b: &Circuit) -> f64;
}

/// Summary statistics of per-block distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl DistanceStats {
    /// Summarize a distance list. Empty input gives all-zero stats.
    pub fn summarize(distances: &[f64]) -> Self {
        if distances.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &d in distances {
            min = min.min(d);
            max = max.max(d);
            sum += d;
        }
        Self {
            min,
            max,
            mean: sum / distances.len() as f64,
        }
    }
}

/// Unitary distances from every block of `a` to every block of `b`.
///
/// Row `i` holds the distances from `a[i]` to each block of `b`. Blocks
/// whose wire counts disagree score the maximal distance `1.0` without
/// consulting the backend; the shape mismatch already proves they are
/// not the same computation.
pub fn cross_block_distances(
    backend: &dyn UnitaryBackend,
    a: &[Circuit],
    b: &[Circuit],
) -> Vec<Vec<f64>> {
    a.iter()
        .map(|block_a| {
            b.iter()
                .map(|block_b| {
                    if block_a.num_qubits() != block_b.num_qubits() {
                        1.0
                    } else {
                        backend.distance(block_a, block_b)
                    }
                })
                .collect()
        })
        .collect()
}
