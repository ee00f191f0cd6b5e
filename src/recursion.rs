//! Canonical recursion for the partition function of N ideal bosons.
//!
//! Summing over permutation cycle types gives the forward recurrence
//!
//!   Z_0 = 1,   Z_m = (1/m) Σ_{k=1}^{m} w_k Z_{m-k}
//!
//! where w_k is the weight of a single cycle of length k. Carrying dZ/dβ along
//! in lockstep gives the energy, and Σ_{k=1}^{N} Z_{N-k} / Z_N is the mean
//! occupation of the single-particle ground state.

use crate::error::{BosonError, Result};

/// Partial partition functions Z_0..Z_N for the given cycle weights.
///
/// `weights[k - 1]` is the weight of a cycle of length k. The result has
/// `weights.len() + 1` entries.
pub fn partition_functions(weights: &[f64]) -> Vec<f64> {
    let n = weights.len();
    let mut f_part = Vec::with_capacity(n + 1);
    f_part.push(1.0);

    for m in 1..=n {
        let mut z = 0.0;
        for i in 0..m {
            z += f_part[i] * weights[m - i - 1];
        }
        f_part.push(z / m as f64);
    }

    f_part
}

/// Reject a Z_N that overflowed or vanished.
pub fn check_partition(z_n: f64) -> Result<f64> {
    if z_n.is_finite() && z_n > 0.0 {
        Ok(z_n)
    } else {
        Err(BosonError::NonFinite {
            what: "partition function Z_N",
            value: z_n,
        })
    }
}

/// Thermodynamics of N bosons from one set of cycle weights.
#[derive(Clone, Debug)]
pub struct Observables {
    /// Z_0..Z_N
    pub partition: Vec<f64>,
    /// dZ_0/dβ..dZ_N/dβ
    pub partition_derivative: Vec<f64>,
    /// -dZ_N/dβ / Z_N, measured from the N-particle ground state.
    pub energy: f64,
    /// Σ_{i<N} Z_i
    pub condensate_numerator: f64,
}

impl Observables {
    pub fn n_particles(&self) -> usize {
        self.partition.len() - 1
    }

    /// Z_N
    pub fn partition_function(&self) -> f64 {
        self.partition[self.n_particles()]
    }

    /// Mean occupation of the single-particle ground state, Σ_{i<N} Z_i / Z_N.
    pub fn ground_state_occupation(&self) -> f64 {
        self.condensate_numerator / self.partition_function()
    }

    /// Fraction of the particles in the single-particle ground state.
    pub fn condensate_fraction(&self) -> f64 {
        self.ground_state_occupation() / self.n_particles() as f64
    }

    /// Energy with `zero_point` per particle added back.
    pub fn total_energy(&self, zero_point: f64) -> f64 {
        self.energy + zero_point * self.n_particles() as f64
    }
}

/// Z_m and dZ_m/dβ for m = 0..N, plus the energy and condensate occupation.
pub fn observables(weights: &[f64], derivatives: &[f64]) -> Result<Observables> {
    if weights.len() != derivatives.len() {
        return Err(BosonError::LengthMismatch {
            what: "cycle weights vs derivatives",
            left: weights.len(),
            right: derivatives.len(),
        });
    }
    let n = weights.len();
    if n == 0 {
        return Err(BosonError::InvalidParameter(
            "particle count must be positive".into(),
        ));
    }

    let mut f_part = Vec::with_capacity(n + 1);
    let mut df_part = Vec::with_capacity(n + 1);
    f_part.push(1.0);
    df_part.push(0.0);

    for m in 1..=n {
        let mut z = 0.0;
        let mut dz = 0.0;
        for i in 0..m {
            let k = m - i - 1;
            z += f_part[i] * weights[k];
            dz += f_part[i] * derivatives[k] + df_part[i] * weights[k];
        }
        f_part.push(z / m as f64);
        df_part.push(dz / m as f64);
    }

    check_partition(f_part[n])?;
    let energy = -df_part[n] / f_part[n];
    if !energy.is_finite() {
        return Err(BosonError::NonFinite {
            what: "energy",
            value: energy,
        });
    }
    let condensate_numerator = f_part[..n].iter().sum::<f64>();
    if !condensate_numerator.is_finite() {
        return Err(BosonError::NonFinite {
            what: "condensate numerator",
            value: condensate_numerator,
        });
    }

    Ok(Observables {
        partition: f_part,
        partition_derivative: df_part,
        energy,
        condensate_numerator,
    })
}
