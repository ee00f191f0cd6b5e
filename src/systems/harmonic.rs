//! Isotropic harmonic trap with ħ = m = ω = 1.
//!
//! Single-particle levels are counted from the ground state, so the weight of a
//! cycle of length i is z(iβ) = (1 - e^{-iβ})^{-d} and the zero-point energy
//! d/2 is added back separately.

use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

use super::traits::{Potential, PropagatorModel};
use crate::error::Result;
use crate::sampling::levy::harmonic_bridge;

/// Three-dimensional isotropic trap.
#[derive(Clone, Copy, Debug, Default)]
pub struct Harmonic3D;

/// One-dimensional trap.
#[derive(Clone, Copy, Debug, Default)]
pub struct Harmonic1D;

#[inline]
fn trap_weight(beta: f64, length: usize, dims: i32) -> f64 {
    let x = (-(length as f64) * beta).exp();
    (1.0 - x).powi(-dims)
}

#[inline]
fn trap_weight_derivative(beta: f64, length: usize, dims: i32) -> f64 {
    let i = length as f64;
    let x = (-i * beta).exp();
    -(dims as f64) * i * trap_weight(beta, length, dims) * x / (1.0 - x)
}

/// Closed harmonic path of a cycle: anchor from the exact diagonal density at
/// imaginary time `length * beta`, then a Lévy bridge back onto itself.
fn trap_cycle_axis(beta: f64, length: usize, rng: &mut dyn RngCore) -> Vec<f64> {
    let total = length as f64 * beta;
    let sigma = 1.0 / (2.0 * (0.5 * total).tanh()).sqrt();
    let z: f64 = rng.sample(StandardNormal);
    let anchor = sigma * z;
    harmonic_bridge(anchor, anchor, length, beta, rng)
}

impl PropagatorModel for Harmonic3D {
    fn name(&self) -> &'static str {
        "harmonic-3d"
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn cycle_weight(&self, beta: f64, length: usize) -> f64 {
        trap_weight(beta, length, 3)
    }

    fn cycle_weight_derivative(&self, beta: f64, length: usize) -> f64 {
        trap_weight_derivative(beta, length, 3)
    }

    fn zero_point_energy(&self) -> f64 {
        1.5
    }

    fn sample_cycle_axis(&self, beta: f64, length: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        Ok(trap_cycle_axis(beta, length, rng))
    }
}

impl PropagatorModel for Harmonic1D {
    fn name(&self) -> &'static str {
        "harmonic-1d"
    }

    fn dimensions(&self) -> usize {
        1
    }

    fn cycle_weight(&self, beta: f64, length: usize) -> f64 {
        trap_weight(beta, length, 1)
    }

    fn cycle_weight_derivative(&self, beta: f64, length: usize) -> f64 {
        trap_weight_derivative(beta, length, 1)
    }

    fn zero_point_energy(&self) -> f64 {
        0.5
    }

    fn sample_cycle_axis(&self, beta: f64, length: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        Ok(trap_cycle_axis(beta, length, rng))
    }
}

/// V(x) = x²/2 along one axis.
impl Potential for Harmonic1D {
    fn value(&self, x: f64) -> f64 {
        0.5 * x * x
    }
}
