//! Free particles in a periodic cubic box of side L.
//!
//! The single-particle partition function of a cycle of length i is the cube of
//! the momentum sum S_i(β) = Σ_j exp(-iβ·2π²j²/L²). The sum over j is truncated
//! to j ∈ [-R, R), where R is the image range. The same range bounds the winding
//! numbers drawn when a cycle is sampled in position space.

use rand::{Rng, RngCore};
use std::f64::consts::PI;

use super::traits::PropagatorModel;
use crate::error::{require_positive, BosonError, Result};
use crate::sampling::levy::free_bridge;
use crate::sampling::tower::tower_sample;

#[derive(Clone, Debug)]
pub struct FreeBox {
    /// Box side length L.
    pub size: f64,
    /// Truncation R of the momentum and winding sums.
    pub image_range: usize,
}

impl FreeBox {
    pub fn new(size: f64, image_range: usize) -> Result<Self> {
        require_positive("box size", size)?;
        if image_range == 0 {
            return Err(BosonError::InvalidParameter(
                "image range must be at least 1".into(),
            ));
        }
        Ok(Self { size, image_range })
    }

    /// Energy scale 2π²/L² of the lowest non-zero momentum.
    #[inline]
    fn level_spacing(&self) -> f64 {
        2.0 * (PI / self.size).powi(2)
    }

    fn momenta(&self) -> impl Iterator<Item = f64> {
        let r = self.image_range as i64;
        (-r..r).map(|j| (j * j) as f64)
    }

    /// S_i(β) for one axis.
    pub fn axis_sum(&self, beta: f64, length: usize) -> f64 {
        let a = length as f64 * beta * self.level_spacing();
        self.momenta().map(|j2| (-a * j2).exp()).sum()
    }

    /// dS_i/dβ for one axis.
    pub fn axis_sum_derivative(&self, beta: f64, length: usize) -> f64 {
        let c = length as f64 * self.level_spacing();
        self.momenta().map(|j2| -c * j2 * (-beta * c * j2).exp()).sum()
    }
}

impl PropagatorModel for FreeBox {
    fn name(&self) -> &'static str {
        "free-box"
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn cycle_weight(&self, beta: f64, length: usize) -> f64 {
        self.axis_sum(beta, length).powi(3)
    }

    fn cycle_weight_derivative(&self, beta: f64, length: usize) -> f64 {
        let s = self.axis_sum(beta, length);
        3.0 * s * s * self.axis_sum_derivative(beta, length)
    }

    fn zero_point_energy(&self) -> f64 {
        0.0
    }

    /// Anchor uniform in the box, winding number w drawn with weight
    /// exp(-w²L²/(2·length·β)), free bridge to x₀ + wL, folded back into [0, L).
    fn sample_cycle_axis(&self, beta: f64, length: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        let l = self.size;
        let r = self.image_range as i64;
        let anchor = rng.gen::<f64>() * l;

        let total_time = length as f64 * beta;
        let windings: Vec<f64> = (-r..=r)
            .map(|w| (-((w * w) as f64) * l * l / (2.0 * total_time)).exp())
            .collect();
        let w = tower_sample(&windings, rng)? as i64 - r;

        let mut path = free_bridge(anchor, anchor + w as f64 * l, length, beta, rng);
        for x in path.iter_mut() {
            let folded = x.rem_euclid(l);
            // rem_euclid can round up to l for tiny negative inputs
            *x = if folded < l { folded } else { 0.0 };
        }
        path[length] = path[0];
        Ok(path)
    }
}
