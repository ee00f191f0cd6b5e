//! Fixed-width position histogram accumulated over a Monte Carlo run.

use crate::error::{require_positive, BosonError, Result};

#[derive(Clone, Debug)]
pub struct Histogram {
    /// Lower edge of the first bucket.
    pub lower: f64,
    /// Bucket width.
    pub width: f64,
    counts: Vec<u64>,
    /// Samples that fell outside [lower, lower + bins·width).
    outside: u64,
}

impl Histogram {
    pub fn new(lower: f64, width: f64, bins: usize) -> Result<Self> {
        require_positive("histogram bucket width", width)?;
        if bins == 0 || !lower.is_finite() {
            return Err(BosonError::InvalidParameter(format!(
                "histogram needs a finite lower edge and at least one bucket, got {lower} and {bins}"
            )));
        }
        Ok(Self {
            lower,
            width,
            counts: vec![0; bins],
            outside: 0,
        })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn upper(&self) -> f64 {
        self.lower + self.width * self.bins() as f64
    }

    pub fn fill(&mut self, x: f64) {
        let offset = (x - self.lower) / self.width;
        if offset >= 0.0 && offset < self.bins() as f64 {
            // offset < bins, but guard against rounding at the upper edge
            let index = (offset.floor() as usize).min(self.bins() - 1);
            self.counts[index] += 1;
        } else {
            self.outside += 1;
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn in_window(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn outside(&self) -> u64 {
        self.outside
    }

    pub fn total(&self) -> u64 {
        self.in_window() + self.outside
    }

    pub fn center(&self, index: usize) -> f64 {
        self.lower + (index as f64 + 0.5) * self.width
    }

    /// Probability density per bucket; Σ density × width = 1 over the window.
    pub fn density(&self) -> Vec<f64> {
        let norm = self.in_window() as f64 * self.width;
        if norm == 0.0 {
            return vec![0.0; self.bins()];
        }
        self.counts.iter().map(|&c| c as f64 / norm).collect()
    }
}
