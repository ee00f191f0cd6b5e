//! Error type shared by the parameter readers, the samplers and the run drivers.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BosonError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parameter file {path} has {found} lines, expected {expected}")]
    LineCount {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed value {token:?} in {path}")]
    Malformed { path: String, token: String },

    #[error("{path} holds {found} values, expected {expected}")]
    MissingValues {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("length mismatch: {what} ({left} vs {right})")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("{what} is {value}, out of floating-point range")]
    NonFinite { what: &'static str, value: f64 },

    #[error("tower sampling over a total weight of {0}")]
    EmptyTower(f64),

    #[error("tower sampling found no bucket for {value} (total {total})")]
    TowerExhausted { value: f64, total: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BosonError>;

impl BosonError {
    /// Process status reported by the binary for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            BosonError::Open { .. } | BosonError::Io(_) => 1,
            BosonError::LineCount { .. }
            | BosonError::Malformed { .. }
            | BosonError::MissingValues { .. }
            | BosonError::InvalidParameter(_)
            | BosonError::NonFinite { .. }
            | BosonError::Yaml(_) => -1,
            BosonError::LengthMismatch { .. } => -2,
            BosonError::EmptyTower(_) | BosonError::TowerExhausted { .. } => -3,
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BosonError::InvalidParameter(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        let open = BosonError::Open {
            path: "param.dat".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let content = BosonError::LineCount {
            path: "param.dat".into(),
            expected: 5,
            found: 3,
        };
        let size = BosonError::LengthMismatch {
            what: "energies vs fractions",
            left: 2,
            right: 3,
        };
        assert_eq!(open.exit_code(), 1);
        assert_eq!(content.exit_code(), -1);
        assert_eq!(size.exit_code(), -2);
        assert_eq!(BosonError::EmptyTower(0.0).exit_code(), -3);
        let overflow = BosonError::NonFinite {
            what: "Z_N",
            value: f64::INFINITY,
        };
        assert_eq!(overflow.exit_code(), -1);
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("beta", 1.5).is_ok());
        assert!(require_positive("beta", 0.0).is_err());
        assert!(require_positive("beta", -2.0).is_err());
        assert!(require_positive("beta", f64::NAN).is_err());
    }
}
