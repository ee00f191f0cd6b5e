//! Tower sampling and the direct decomposition of N bosons into permutation cycles.

use log::debug;
use rand::Rng;

use crate::error::{BosonError, Result};

/// Draw an index with probability proportional to `prob[i]`.
///
/// Buckets are half-open, [cum_i, cum_{i+1}), so a zero-weight bucket is never
/// returned. A total weight that is not strictly positive and finite is an error.
pub fn tower_sample<R: Rng + ?Sized>(prob: &[f64], rng: &mut R) -> Result<usize> {
    let total: f64 = prob.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(BosonError::EmptyTower(total));
    }

    let value = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, p) in prob.iter().enumerate() {
        cumulative += p;
        if value < cumulative {
            return Ok(i);
        }
    }

    Err(BosonError::TowerExhausted { value, total })
}

/// Multiplicity of every cycle length in one permutation of N particles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleDecomposition {
    /// `counts[k - 1]` is the number of cycles of length k.
    counts: Vec<usize>,
}

impl CycleDecomposition {
    pub fn new(n_particles: usize) -> Self {
        Self { counts: vec![0; n_particles] }
    }

    /// Record one more cycle of the given length.
    pub fn push(&mut self, length: usize) {
        self.counts[length - 1] += 1;
    }

    pub fn multiplicity(&self, length: usize) -> usize {
        self.counts.get(length.wrapping_sub(1)).copied().unwrap_or(0)
    }

    /// (length, multiplicity) pairs for the lengths that occur, shortest first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m > 0)
            .map(|(i, &m)| (i + 1, m))
    }

    /// Every cycle length once per occurrence, shortest first.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .flat_map(|(len, m)| std::iter::repeat(len).take(m))
    }

    pub fn n_cycles(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Σ length × multiplicity
    pub fn n_particles(&self) -> usize {
        self.iter().map(|(len, m)| len * m).sum()
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
}

/// Peel cycles off N particles one at a time.
///
/// With M particles left, the next cycle has length k with probability
/// proportional to w_k Z_{M-k}. `weights` holds w_1..w_N and `f_part` the
/// partial partition functions Z_0..Z_{N-1} (or longer) built from the same
/// weights.
pub fn sample_cycles<R: Rng + ?Sized>(
    weights: &[f64],
    f_part: &[f64],
    rng: &mut R,
) -> Result<CycleDecomposition> {
    let n = weights.len();
    if f_part.len() < n {
        return Err(BosonError::LengthMismatch {
            what: "cycle weights vs partial partition functions",
            left: n,
            right: f_part.len(),
        });
    }

    let mut cycles = CycleDecomposition::new(n);
    let mut prob = Vec::with_capacity(n);
    let mut remaining = n;

    while remaining > 0 {
        prob.clear();
        prob.extend((0..remaining).map(|i| weights[i] * f_part[remaining - 1 - i]));

        let length = tower_sample(&prob, rng)? + 1;
        cycles.push(length);
        remaining -= length;
        debug!("peeled a cycle of length {}, {} particles left", length, remaining);
    }

    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recursion::partition_functions;
    use crate::systems::{CycleWeights, Harmonic3D};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tower_frequencies() {
        let mut rng = StdRng::seed_from_u64(42);
        let prob = [1.0, 0.0, 3.0, 6.0];
        let mut hits = [0usize; 4];
        let n = 100_000;
        for _ in 0..n {
            hits[tower_sample(&prob, &mut rng).unwrap()] += 1;
        }
        assert_eq!(hits[1], 0);
        assert_relative_eq!(hits[0] as f64 / n as f64, 0.1, epsilon = 0.01);
        assert_relative_eq!(hits[2] as f64 / n as f64, 0.3, epsilon = 0.01);
        assert_relative_eq!(hits[3] as f64 / n as f64, 0.6, epsilon = 0.01);
    }

    #[test]
    fn test_tower_rejects_empty_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            tower_sample(&[0.0, 0.0], &mut rng),
            Err(BosonError::EmptyTower(_))
        ));
        assert!(tower_sample(&[], &mut rng).is_err());
        assert!(tower_sample(&[f64::INFINITY], &mut rng).is_err());
    }

    #[test]
    fn test_decomposition_conserves_particles() {
        let mut rng = StdRng::seed_from_u64(2024);
        for n in 1..=12 {
            for &beta in &[0.1, 1.0, 4.0] {
                let w = CycleWeights::evaluate(&Harmonic3D, beta, n).unwrap();
                let z = partition_functions(&w.weights);
                for _ in 0..50 {
                    let cycles = sample_cycles(&w.weights, &z, &mut rng).unwrap();
                    assert_eq!(cycles.n_particles(), n);
                    assert_eq!(cycles.lengths().sum::<usize>(), n);
                    assert_eq!(cycles.lengths().count(), cycles.n_cycles());
                }
            }
        }
    }

    #[test]
    fn test_two_particle_cycle_probabilities() {
        // P(one 2-cycle) = w_2 / (2 Z_2)
        let w = CycleWeights::evaluate(&Harmonic3D, 0.5, 2).unwrap();
        let z = partition_functions(&w.weights);
        let expected = w.weights[1] / (2.0 * z[2]);

        let mut rng = StdRng::seed_from_u64(5);
        let n = 50_000;
        let exchanged = (0..n)
            .filter(|_| sample_cycles(&w.weights, &z, &mut rng).unwrap().multiplicity(2) == 1)
            .count();
        assert_relative_eq!(exchanged as f64 / n as f64, expected, epsilon = 0.01);
    }

    #[test]
    fn test_short_partition_table_is_an_error() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(sample_cycles(&[1.0, 1.0, 1.0], &[1.0, 1.0], &mut rng).is_err());
    }
}
