//! Lévy construction of imaginary-time paths pinned at both ends.
//!
//! Beads are filled in one at a time, each drawn from the exact Gaussian
//! conditional density given the previous bead and the fixed end point. The
//! harmonic variant uses the oscillator propagator (ħ = m = ω = 1), the free
//! variant the free-particle one.
//!
//! Reference: Krauth, W. (2006) "Statistical Mechanics: Algorithms and Computations", ch. 3

use rand::Rng;
use rand_distr::StandardNormal;

/// Path of `n_slices + 1` beads from `start` to `end` under the harmonic propagator.
///
/// For bead i the conditional Gaussian has
///   y1 = coth(dt) + coth((n-i)·dt),  y2 = x_{i-1}/sinh(dt) + end/sinh((n-i)·dt),
///   mean = y2/y1, variance = 1/y1.
pub fn harmonic_bridge<R: Rng + ?Sized>(
    start: f64,
    end: f64,
    n_slices: usize,
    dt: f64,
    rng: &mut R,
) -> Vec<f64> {
    let mut beads = Vec::with_capacity(n_slices + 1);
    beads.push(start);

    let mut prev = start;
    for i in 1..n_slices {
        let rest = (n_slices - i) as f64 * dt;
        let y1 = 1.0 / dt.tanh() + 1.0 / rest.tanh();
        let y2 = prev / dt.sinh() + end / rest.sinh();

        let z: f64 = rng.sample(StandardNormal);
        let x = y2 / y1 + z / y1.sqrt();
        beads.push(x);
        prev = x;
    }

    if n_slices > 0 {
        beads.push(end);
    }
    beads
}

/// Path of `n_slices + 1` beads from `start` to `end` for a free particle.
///
/// With τ = (n-i)·dt left to the end, bead i has mean
/// (τ·x_{i-1} + dt·end)/(τ + dt) and variance 1/(1/τ + 1/dt).
pub fn free_bridge<R: Rng + ?Sized>(
    start: f64,
    end: f64,
    n_slices: usize,
    dt: f64,
    rng: &mut R,
) -> Vec<f64> {
    let mut beads = Vec::with_capacity(n_slices + 1);
    beads.push(start);

    let mut prev = start;
    for i in 1..n_slices {
        let rest = (n_slices - i) as f64 * dt;
        let mean = (rest * prev + dt * end) / (rest + dt);
        let sigma = 1.0 / (1.0 / rest + 1.0 / dt).sqrt();

        let z: f64 = rng.sample(StandardNormal);
        let x = mean + sigma * z;
        beads.push(x);
        prev = x;
    }

    if n_slices > 0 {
        beads.push(end);
    }
    beads
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bridges_are_pinned() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in 1..10 {
            let h = harmonic_bridge(0.3, 0.3, n, 0.2, &mut rng);
            assert_eq!(h.len(), n + 1);
            assert_eq!(h[0], 0.3);
            assert_eq!(h[n], 0.3);

            let f = free_bridge(-1.0, 2.0, n, 0.2, &mut rng);
            assert_eq!(f.len(), n + 1);
            assert_eq!(f[0], -1.0);
            assert_eq!(f[n], 2.0);
        }
    }

    #[test]
    fn test_free_bridge_midpoint_statistics() {
        // midpoint of a free bridge over 2·dt: mean (a+b)/2, variance dt/2
        let mut rng = StdRng::seed_from_u64(23);
        let (a, b, dt) = (0.0, 1.0, 0.5);
        let n = 40_000;
        let mids: Vec<f64> = (0..n).map(|_| free_bridge(a, b, 2, dt, &mut rng)[1]).collect();
        let mean = mids.iter().sum::<f64>() / n as f64;
        let var = mids.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 0.5, epsilon = 0.01);
        assert_relative_eq!(var, 0.25, max_relative = 0.03);
    }

    #[test]
    fn test_harmonic_bridge_midpoint_statistics() {
        // midpoint between two pinned ends at x = 0: variance 1/(2 coth(dt))
        let mut rng = StdRng::seed_from_u64(29);
        let dt: f64 = 0.8;
        let n = 40_000;
        let mids: Vec<f64> = (0..n).map(|_| harmonic_bridge(0.0, 0.0, 2, dt, &mut rng)[1]).collect();
        let mean = mids.iter().sum::<f64>() / n as f64;
        let var = mids.iter().map(|x| x * x).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 0.0, epsilon = 0.01);
        assert_relative_eq!(var, dt.tanh() / 2.0, max_relative = 0.03);
    }
}
