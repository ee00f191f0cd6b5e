//! Direct sampling of ideal-boson configurations.
//!
//! A configuration is drawn in two exact steps: first a permutation cycle
//! decomposition from the canonical recursion, then one closed path per cycle
//! and per axis from the model's bridge sampler. Successive samples are
//! independent; there is no Markov chain.

use log::{debug, info};
use nalgebra::Vector3;
use rand::RngCore;

use super::tower::{sample_cycles, CycleDecomposition};
use crate::error::Result;
use crate::recursion::{check_partition, partition_functions};
use crate::systems::{CycleWeights, PropagatorModel};

/// Closed imaginary-time path of one permutation cycle.
#[derive(Clone, Debug)]
pub struct CyclePath {
    pub length: usize,
    /// One path of `length + 1` beads per spatial axis.
    pub axes: Vec<Vec<f64>>,
}

impl CyclePath {
    /// Position of the j-th particle on the cycle, unused axes left at zero.
    pub fn particle(&self, j: usize) -> Vector3<f64> {
        let mut r = Vector3::zeros();
        for (axis, coords) in self.axes.iter().enumerate().take(3) {
            r[axis] = coords[j];
        }
        r
    }
}

#[derive(Clone, Debug)]
pub struct BosonConfiguration {
    pub cycles: CycleDecomposition,
    pub paths: Vec<CyclePath>,
    pub dimensions: usize,
}

impl BosonConfiguration {
    pub fn n_particles(&self) -> usize {
        self.cycles.n_particles()
    }

    pub fn particle_positions(&self) -> Vec<Vector3<f64>> {
        self.paths
            .iter()
            .flat_map(|p| (0..p.length).map(move |j| p.particle(j)))
            .collect()
    }

    /// Σ r² over all particles.
    ///
    /// In the harmonic trap this is an estimator of the total energy.
    pub fn sum_square_radius(&self) -> f64 {
        self.particle_positions().iter().map(|r| r.norm_squared()).sum()
    }

    /// All beads of one axis, cycle after cycle, closing bead included.
    pub fn axis_coordinates(&self, axis: usize) -> Vec<f64> {
        self.paths
            .iter()
            .flat_map(|p| p.axes[axis].iter().copied())
            .collect()
    }

    /// Every x coordinate, then every y, then every z.
    pub fn flattened(&self) -> Vec<f64> {
        (0..self.dimensions)
            .flat_map(|axis| self.axis_coordinates(axis))
            .collect()
    }
}

/// Weights and partition table for one (model, β, N), reused across samples.
pub struct DirectBosonSampler<'a> {
    model: &'a dyn PropagatorModel,
    weights: CycleWeights,
    partition: Vec<f64>,
}

impl<'a> DirectBosonSampler<'a> {
    pub fn new(model: &'a dyn PropagatorModel, beta: f64, n_particles: usize) -> Result<Self> {
        let weights = CycleWeights::evaluate(model, beta, n_particles)?;
        let partition = partition_functions(&weights.weights);
        check_partition(partition[n_particles])?;
        info!(
            "{}: Z_{} = {:.6e} at beta = {}",
            model.name(),
            n_particles,
            partition[n_particles],
            beta
        );
        Ok(Self { model, weights, partition })
    }

    pub fn beta(&self) -> f64 {
        self.weights.beta
    }

    pub fn n_particles(&self) -> usize {
        self.weights.n_particles()
    }

    pub fn partition(&self) -> &[f64] {
        &self.partition
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> Result<BosonConfiguration> {
        let beta = self.beta();
        let cycles = sample_cycles(&self.weights.weights, &self.partition, rng)?;
        debug!("cycle decomposition {:?}", cycles.counts());

        let dims = self.model.dimensions();
        let mut paths = Vec::with_capacity(cycles.n_cycles());
        for length in cycles.lengths() {
            let mut axes = Vec::with_capacity(dims);
            for _ in 0..dims {
                axes.push(self.model.sample_cycle_axis(beta, length, rng)?);
            }
            paths.push(CyclePath { length, axes });
        }

        Ok(BosonConfiguration {
            cycles,
            paths,
            dimensions: dims,
        })
    }
}
