//! Single-particle path samplers built directly on the Lévy bridges.

use rand::Rng;

use super::levy::{free_bridge, harmonic_bridge};
use crate::error::{require_positive, BosonError, Result};

/// Open free-particle path of `n_slices` beads.
///
/// The anchor is uniform in [0, box_size) and the path returns to it one slice
/// after the last bead, which is not part of the output.
pub fn free_open_path<R: Rng + ?Sized>(
    n_slices: usize,
    dt: f64,
    box_size: f64,
    rng: &mut R,
) -> Vec<f64> {
    let anchor = rng.gen::<f64>() * box_size;
    let mut beads = free_bridge(anchor, anchor, n_slices, dt, rng);
    beads.truncate(n_slices);
    beads
}

/// Harmonic oscillator worldline sampled by whole-path Lévy moves.
///
/// Each step redraws every bead except bead 0 from the exact harmonic bridge
/// that closes on bead 0, then rotates the ring by a uniform offset so that a
/// new bead becomes the anchor. Bead 0 is distributed as ρ(x, x, β)/Z.
#[derive(Clone, Debug)]
pub struct HarmonicRing {
    pub beads: Vec<f64>,
    pub dtau: f64,
}

impl HarmonicRing {
    pub fn new(start: f64, n_slices: usize, beta: f64) -> Result<Self> {
        require_positive("beta", beta)?;
        if n_slices < 2 {
            return Err(BosonError::InvalidParameter(format!(
                "the harmonic ring needs at least 2 slices, got {n_slices}"
            )));
        }
        Ok(Self {
            beads: vec![start; n_slices],
            dtau: beta / n_slices as f64,
        })
    }

    pub fn anchor(&self) -> f64 {
        self.beads[0]
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.beads.len();
        let anchor = self.anchor();
        let mut path = harmonic_bridge(anchor, anchor, n, self.dtau, rng);
        path.truncate(n);

        let shift = rng.gen_range(0..n);
        path.rotate_left(shift);
        self.beads = path;
    }
}
