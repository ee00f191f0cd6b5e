//! Systems module - single-particle models for the boson calculations.

mod traits;
mod weights;
mod harmonic;
mod free_box;
mod double_well;

pub use traits::{PropagatorModel, Potential};
pub use weights::CycleWeights;
pub use harmonic::{Harmonic3D, Harmonic1D};
pub use free_box::FreeBox;
pub use double_well::DoubleWell;
