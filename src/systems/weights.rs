//! Cycle weights of one model evaluated at a single inverse temperature.

use log::debug;

use super::traits::PropagatorModel;
use crate::error::{require_positive, BosonError, Result};

/// CycleWeight[1..N] and DerivativeWeight[1..N], stored zero-based:
/// `weights[i]` belongs to a cycle of length `i + 1`.
#[derive(Clone, Debug)]
pub struct CycleWeights {
    pub beta: f64,
    pub weights: Vec<f64>,
    pub derivatives: Vec<f64>,
}

impl CycleWeights {
    pub fn evaluate(model: &dyn PropagatorModel, beta: f64, n_particles: usize) -> Result<Self> {
        require_positive("beta", beta)?;
        if n_particles == 0 {
            return Err(BosonError::InvalidParameter(
                "particle count must be positive".into(),
            ));
        }

        let weights: Vec<f64> = (1..=n_particles)
            .map(|len| model.cycle_weight(beta, len))
            .collect();
        let derivatives: Vec<f64> = (1..=n_particles)
            .map(|len| model.cycle_weight_derivative(beta, len))
            .collect();
        debug!(
            "{} weights at beta = {}: w1 = {:.6e}, wN = {:.6e}",
            model.name(),
            beta,
            weights[0],
            weights[n_particles - 1]
        );

        Ok(Self { beta, weights, derivatives })
    }

    pub fn n_particles(&self) -> usize {
        self.weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::{FreeBox, Harmonic3D};

    #[test]
    fn test_lengths_and_guards() {
        let w = CycleWeights::evaluate(&Harmonic3D, 1.0, 6).unwrap();
        assert_eq!(w.n_particles(), 6);
        assert_eq!(w.derivatives.len(), 6);
        // longer cycles are suppressed towards the ground state weight 1
        assert!(w.weights.windows(2).all(|p| p[1] < p[0]));

        assert!(CycleWeights::evaluate(&Harmonic3D, 0.0, 6).is_err());
        assert!(CycleWeights::evaluate(&Harmonic3D, -1.0, 6).is_err());
        assert!(CycleWeights::evaluate(&Harmonic3D, 1.0, 0).is_err());

        let model = FreeBox::new(2.0, 4).unwrap();
        assert!(CycleWeights::evaluate(&model, 0.5, 4).is_ok());
    }
}
