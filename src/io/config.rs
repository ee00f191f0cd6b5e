//! Run configuration read from a YAML file.
//!
//! Every field is optional; a missing file section falls back to the defaults.
//!
//! ```yaml
//! seed: 12345
//! beta_step: 0.01
//! image_range: 20
//! include_zero_point: true
//! histogram:
//!   lower: -4.0
//!   width: 0.1
//!   bins: 80
//! ```

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{require_positive, BosonError, Result};
use crate::sampling::Histogram;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramConfig {
    pub lower: f64,
    pub width: f64,
    pub bins: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            lower: -4.0,
            width: 0.1,
            bins: 80,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// RNG seed; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Spacing of the inverse-temperature grid in the sweeps.
    pub beta_step: f64,
    /// Half-width of the image/momentum sum in the box; N when absent.
    pub image_range: Option<usize>,
    pub histogram: HistogramConfig,
    /// Report total energies rather than energies above the ground state.
    pub include_zero_point: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            beta_step: 0.01,
            image_range: None,
            histogram: HistogramConfig::default(),
            include_zero_point: true,
        }
    }
}

impl RunConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // an empty document deserializes to unit, not to a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RunConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| BosonError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        info!("read run configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        require_positive("beta_step", self.beta_step)?;
        if self.image_range == Some(0) {
            return Err(BosonError::InvalidParameter(
                "image_range must be at least 1".into(),
            ));
        }
        self.histogram()?;
        Ok(())
    }

    /// Image range for a box of `n_particles` bosons.
    pub fn image_range_for(&self, n_particles: usize) -> usize {
        self.image_range.unwrap_or(n_particles).max(1)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => {
                info!("seeding RNG with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        }
    }

    pub fn histogram(&self) -> Result<Histogram> {
        let h = &self.histogram;
        Histogram::new(h.lower, h.width, h.bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_yaml_str("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.beta_step, 0.01);
        assert!(config.include_zero_point);
        assert_eq!(config.image_range_for(7), 7);

        let h = config.histogram().unwrap();
        assert_eq!(h.bins(), 80);
        assert_eq!(h.lower, -4.0);
    }

    #[test]
    fn test_partial_yaml() {
        let text = "seed: 42\nimage_range: 3\nhistogram:\n  bins: 40\n";
        let config = RunConfig::from_yaml_str(text).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.image_range_for(10), 3);
        assert_eq!(config.histogram.bins, 40);
        assert_eq!(config.histogram.width, 0.1);
    }

    #[test]
    fn test_invalid_yaml_values() {
        assert!(RunConfig::from_yaml_str("beta_step: 0.0\n").is_err());
        assert!(RunConfig::from_yaml_str("image_range: 0\n").is_err());
        assert!(RunConfig::from_yaml_str("histogram:\n  width: -1.0\n").is_err());
        let err = RunConfig::from_yaml_str("colour: blue\n").unwrap_err();
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_file_and_string_agree_on_empty_document() {
        let path = std::env::temp_dir().join(format!("ideal_bosons_empty_{}.yml", std::process::id()));
        std::fs::write(&path, "").unwrap();
        let from_file = RunConfig::from_file(&path);
        std::fs::write(&path, "seed: 3\n").unwrap();
        let seeded = RunConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(from_file.unwrap(), RunConfig::default());
        assert_eq!(seeded.unwrap().seed, Some(3));
        assert_eq!(
            RunConfig::from_file(Path::new("/nonexistent/run.yml"))
                .unwrap_err()
                .exit_code(),
            1
        );
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = RunConfig {
            seed: Some(7),
            ..RunConfig::default()
        };
        let mut first = config.rng();
        let mut second = config.rng();
        let a: Vec<f64> = (0..4).map(|_| first.gen()).collect();
        let b: Vec<f64> = (0..4).map(|_| second.gen()).collect();
        assert_eq!(a, b);
    }
}
