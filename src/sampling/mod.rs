//! Sampling module - tower sampling, path construction and Metropolis chains.

pub mod tower;
pub mod levy;
mod paths;
mod metropolis;
mod bosons;
mod histogram;

pub use tower::{tower_sample, sample_cycles, CycleDecomposition};
pub use levy::{harmonic_bridge, free_bridge};
pub use paths::{free_open_path, HarmonicRing};
pub use metropolis::{RingPath, BeadChain};
pub use bosons::{BosonConfiguration, CyclePath, DirectBosonSampler};
pub use histogram::Histogram;
