//! Traits for the single-particle models the boson programs are built on.
//!
//! A `PropagatorModel` supplies everything the canonical recursion and the
//! direct samplers need from one physical system: the weight of a permutation
//! cycle of a given length, its derivative with respect to β, and a way of
//! drawing the closed imaginary-time path of one such cycle.

use rand::RngCore;

use crate::error::Result;

/// Cycle weights, their β-derivatives and the matching exact path sampler.
pub trait PropagatorModel {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Number of independent spatial axes.
    fn dimensions(&self) -> usize;

    /// Weight of a permutation cycle of `length` particles at inverse temperature `beta`.
    fn cycle_weight(&self, beta: f64, length: usize) -> f64;

    /// Analytic derivative of `cycle_weight` with respect to `beta`.
    fn cycle_weight_derivative(&self, beta: f64, length: usize) -> f64;

    /// Ground-state energy of one particle, excluded from the cycle weights.
    fn zero_point_energy(&self) -> f64;

    /// Draw the path of one axis of a cycle of `length` particles.
    ///
    /// The path has `length + 1` beads spaced `beta` apart in imaginary time and
    /// is closed: the last bead coincides with the first. Bead `j < length` is
    /// the coordinate of the `j`-th particle of the cycle.
    fn sample_cycle_axis(&self, beta: f64, length: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>>;

    /// Central-difference derivative of `cycle_weight`, for checking the analytic one.
    fn numerical_weight_derivative(&self, beta: f64, length: usize, h: f64) -> f64 {
        (self.cycle_weight(beta + h, length) - self.cycle_weight(beta - h, length)) / (2.0 * h)
    }
}

/// One-dimensional external potential acting on every bead of a path.
pub trait Potential {
    fn value(&self, x: f64) -> f64;
}
