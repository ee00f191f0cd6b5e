//! Ideal Bosons - exact canonical recursion and path-integral Monte Carlo
//!
//! This crate computes partition functions, energies and condensate fractions of
//! N non-interacting bosons in a periodic box or a harmonic trap by recursion
//! over permutation cycles, samples boson configurations and single-particle
//! paths directly with Lévy bridges, and runs a single-bead Metropolis chain
//! for a particle in a quartic double well.

pub mod error;
pub mod systems;
pub mod recursion;
pub mod sampling;
pub mod io;
pub mod runs;

// Re-export commonly used types at crate root
pub use error::{BosonError, Result};
pub use systems::{CycleWeights, DoubleWell, FreeBox, Harmonic1D, Harmonic3D, Potential, PropagatorModel};
pub use recursion::{observables, partition_functions, Observables};
pub use sampling::{BeadChain, BosonConfiguration, CycleDecomposition, DirectBosonSampler, Histogram, RingPath};
pub use io::{ParameterFile, RunConfig};
