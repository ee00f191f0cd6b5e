//! Single-bead Metropolis sampling of a closed imaginary-time path.
//!
//! The path is a ring of M beads with x[M] = x[0]. Its weight in the primitive
//! approximation is Π_k ρ_free(x_k, x_{k+1}; Δτ) · exp(-Δτ V(x_k)), so moving one
//! bead only involves its two neighbours.

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{require_positive, BosonError, Result};
use crate::systems::Potential;

/// A single particle's worldline in an external potential.
#[derive(Clone, Debug)]
pub struct RingPath<P: Potential> {
    /// Positions at each imaginary time slice [0, M-1]
    pub beads: Vec<f64>,
    /// Imaginary time step Δτ = β/M
    pub dtau: f64,
    pub potential: P,
}

impl<P: Potential> RingPath<P> {
    pub fn new(beads: Vec<f64>, beta: f64, potential: P) -> Result<Self> {
        require_positive("beta", beta)?;
        // with a single bead both neighbours are the bead itself
        if beads.len() < 2 {
            return Err(BosonError::InvalidParameter(format!(
                "a ring path needs at least 2 beads, got {}",
                beads.len()
            )));
        }
        let dtau = beta / beads.len() as f64;
        Ok(Self { beads, dtau, potential })
    }

    pub fn n_beads(&self) -> usize {
        self.beads.len()
    }

    /// Ring neighbours of bead k.
    #[inline]
    fn neighbours(&self, k: usize) -> (usize, usize) {
        let m = self.n_beads();
        ((k + m - 1) % m, (k + 1) % m)
    }

    /// Log-weight of bead k sitting at x: two free propagators to its neighbours
    /// and the potential factor.
    fn local_log_weight(&self, k: usize, x: f64) -> f64 {
        let (prev, next) = self.neighbours(k);
        let dx_prev = x - self.beads[prev];
        let dx_next = self.beads[next] - x;
        -(dx_prev * dx_prev + dx_next * dx_next) / (2.0 * self.dtau)
            - self.dtau * self.potential.value(x)
    }

    /// Total Euclidean action in the primitive approximation.
    pub fn total_action(&self) -> f64 {
        (0..self.n_beads())
            .map(|k| {
                let (_, next) = self.neighbours(k);
                let dx = self.beads[next] - self.beads[k];
                0.5 * dx * dx / self.dtau + self.dtau * self.potential.value(self.beads[k])
            })
            .sum()
    }

    /// Move one uniformly chosen bead by a uniform step in [-delta, delta].
    ///
    /// Draws, in order: the bead index, the displacement, the acceptance
    /// uniform. Returns true if the move was accepted.
    pub fn metropolis_move<R: Rng + ?Sized>(&mut self, delta: f64, rng: &mut R) -> bool {
        let uniform = Uniform::new(-1.0, 1.0);

        let k = rng.gen_range(0..self.n_beads());
        let x_old = self.beads[k];
        let x_new = x_old + delta * uniform.sample(rng);

        let ratio = (self.local_log_weight(k, x_new) - self.local_log_weight(k, x_old)).exp();
        let accept = rng.gen::<f64>() < ratio;
        if accept {
            self.beads[k] = x_new;
        }
        accept
    }

    pub fn average_position(&self) -> f64 {
        self.beads.iter().sum::<f64>() / self.n_beads() as f64
    }

    pub fn average_position_squared(&self) -> f64 {
        self.beads.iter().map(|x| x * x).sum::<f64>() / self.n_beads() as f64
    }
}

/// The Markov chain: one ring path plus its step size and acceptance counters.
#[derive(Clone, Debug)]
pub struct BeadChain<P: Potential> {
    pub path: RingPath<P>,
    pub delta: f64,
    pub accepted: u64,
    pub attempted: u64,
}

impl<P: Potential> BeadChain<P> {
    pub fn new(path: RingPath<P>, delta: f64) -> Result<Self> {
        require_positive("delta", delta)?;
        Ok(Self {
            path,
            delta,
            accepted: 0,
            attempted: 0,
        })
    }

    /// One single-bead update.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let accepted = self.path.metropolis_move(self.delta, rng);
        self.attempted += 1;
        if accepted {
            self.accepted += 1;
        }
        accepted
    }

    /// M single-bead updates, one per bead on average.
    pub fn sweep<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..self.path.n_beads() {
            self.step(rng);
        }
        debug!("sweep done, acceptance so far {:.3}", self.acceptance_rate());
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}
