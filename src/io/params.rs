//! Plain-text parameter files: one value per line, fixed line count, the last
//! line left blank.
//!
//! ```text
//! box-sweep        beta_min, beta_max, n_particles, box_size
//! harmonic-sweep   beta_min, beta_max, n_particles
//! harmonic point   beta, n_particles
//! box bosons       beta, n_particles, box_size
//! free path        beta, n_slices, n_iterations, box_size
//! harmonic path    beta, n_slices, n_iterations, starting_point
//! double well      beta, n_slices, n_iterations, delta
//! ```

use log::info;
use std::path::Path;

use crate::error::{require_positive, BosonError, Result};

/// Check the line count and parse every whitespace-separated token.
fn parse_values(text: &str, source: &str, expected_lines: usize) -> Result<Vec<f64>> {
    let found = text.split('\n').count();
    if found != expected_lines {
        return Err(BosonError::LineCount {
            path: source.to_string(),
            expected: expected_lines,
            found,
        });
    }

    let values = text
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| BosonError::Malformed {
                path: source.to_string(),
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != expected_lines - 1 {
        return Err(BosonError::MissingValues {
            path: source.to_string(),
            expected: expected_lines - 1,
            found: values.len(),
        });
    }
    Ok(values)
}

/// A count read from a file of reals: must be a positive integer.
fn count(name: &str, value: f64) -> Result<usize> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 {
        Ok(value as usize)
    } else {
        Err(BosonError::InvalidParameter(format!(
            "{name} must be a positive integer, got {value}"
        )))
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| BosonError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// A parameter file layout with a fixed number of lines.
pub trait ParameterFile: Sized {
    /// Lines in the file, the trailing blank one included.
    const LINES: usize;

    fn from_values(values: &[f64]) -> Result<Self>;

    fn parse(text: &str, source: &str) -> Result<Self> {
        let values = parse_values(text, source, Self::LINES)?;
        Self::from_values(&values)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = read_to_string(path)?;
        let params = Self::parse(&text, &path.display().to_string())?;
        info!("read parameters from {}", path.display());
        Ok(params)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxSweepParams {
    pub beta_min: f64,
    pub beta_max: f64,
    pub n_particles: usize,
    pub box_size: f64,
}

impl ParameterFile for BoxSweepParams {
    const LINES: usize = 5;

    fn from_values(v: &[f64]) -> Result<Self> {
        Ok(Self {
            beta_min: require_positive("beta_min", v[0])?,
            beta_max: require_positive("beta_max", v[1])?,
            n_particles: count("n_particles", v[2])?,
            box_size: require_positive("box size", v[3])?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicSweepParams {
    pub beta_min: f64,
    pub beta_max: f64,
    pub n_particles: usize,
}

impl ParameterFile for HarmonicSweepParams {
    const LINES: usize = 4;

    fn from_values(v: &[f64]) -> Result<Self> {
        Ok(Self {
            beta_min: require_positive("beta_min", v[0])?,
            beta_max: require_positive("beta_max", v[1])?,
            n_particles: count("n_particles", v[2])?,
        })
    }
}

/// Single temperature, harmonic trap; used by the point calculation and the
/// direct boson sampler.
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicPointParams {
    pub beta: f64,
    pub n_particles: usize,
}

impl ParameterFile for HarmonicPointParams {
    const LINES: usize = 3;

    fn from_values(v: &[f64]) -> Result<Self> {
        Ok(Self {
            beta: require_positive("beta", v[0])?,
            n_particles: count("n_particles", v[1])?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxBosonParams {
    pub beta: f64,
    pub n_particles: usize,
    pub box_size: f64,
}

impl ParameterFile for BoxBosonParams {
    const LINES: usize = 4;

    fn from_values(v: &[f64]) -> Result<Self> {
        Ok(Self {
            beta: require_positive("beta", v[0])?,
            n_particles: count("n_particles", v[1])?,
            box_size: require_positive("box size", v[2])?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FreePathParams {
    pub beta: f64,
    pub n_slices: usize,
    pub n_iterations: usize,
    pub box_size: f64,
}

impl ParameterFile for FreePathParams {
    const LINES: usize = 5;

    fn from_values(v: &[f64]) -> Result<Self> {
        Ok(Self {
            beta: require_positive("beta", v[0])?,
            n_slices: count("n_slices", v[1])?,
            n_iterations: count("n_iterations", v[2])?,
            box_size: require_positive("box size", v[3])?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicPathParams {
    pub beta: f64,
    pub n_slices: usize,
    pub n_iterations: usize,
    pub starting_point: f64,
}

impl ParameterFile for HarmonicPathParams {
    const LINES: usize = 5;

    fn from_values(v: &[f64]) -> Result<Self> {
        Ok(Self {
            beta: require_positive("beta", v[0])?,
            n_slices: count("n_slices", v[1])?,
            n_iterations: count("n_iterations", v[2])?,
            starting_point: v[3],
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoubleWellParams {
    pub beta: f64,
    pub n_slices: usize,
    pub n_iterations: usize,
    pub delta: f64,
}

impl ParameterFile for DoubleWellParams {
    const LINES: usize = 5;

    fn from_values(v: &[f64]) -> Result<Self> {
        Ok(Self {
            beta: require_positive("beta", v[0])?,
            n_slices: count("n_slices", v[1])?,
            n_iterations: count("n_iterations", v[2])?,
            delta: require_positive("delta", v[3])?,
        })
    }
}

/// Initial path for a Markov chain: whitespace-separated bead positions.
pub fn parse_initial_path(text: &str, source: &str) -> Result<Vec<f64>> {
    let beads = text
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| BosonError::Malformed {
                path: source.to_string(),
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    if beads.is_empty() {
        return Err(BosonError::InvalidParameter(format!(
            "initial configuration {source} is empty"
        )));
    }
    Ok(beads)
}

pub fn read_initial_path(path: &Path) -> Result<Vec<f64>> {
    let text = read_to_string(path)?;
    let beads = parse_initial_path(&text, &path.display().to_string())?;
    info!("read {} beads from {}", beads.len(), path.display());
    Ok(beads)
}
