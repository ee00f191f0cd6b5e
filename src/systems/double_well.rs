//! Symmetric quartic double well V(x) = x⁴ - (5/2)x².

use super::traits::Potential;

/// Minima at x = ±√(5)/2, barrier of height 25/16 at the origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleWell;

impl Potential for DoubleWell {
    fn value(&self, x: f64) -> f64 {
        let x2 = x * x;
        x2 * x2 - 2.5 * x2
    }
}
