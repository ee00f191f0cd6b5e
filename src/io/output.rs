//! Plain-text result writers. Columns are separated by four spaces.

use std::io::Write;

use crate::error::{BosonError, Result};
use crate::sampling::Histogram;

const SEPARATOR: &str = "    ";

/// One row per temperature: β, energy, condensate fraction.
pub fn write_observables<W: Write>(
    out: &mut W,
    betas: &[f64],
    energies: &[f64],
    fractions: &[f64],
) -> Result<()> {
    if betas.len() != energies.len() {
        return Err(BosonError::LengthMismatch {
            what: "temperatures and energies",
            left: betas.len(),
            right: energies.len(),
        });
    }
    if betas.len() != fractions.len() {
        return Err(BosonError::LengthMismatch {
            what: "temperatures and condensate fractions",
            left: betas.len(),
            right: fractions.len(),
        });
    }
    for ((beta, energy), fraction) in betas.iter().zip(energies).zip(fractions) {
        writeln!(out, "{beta}{SEPARATOR}{energy}{SEPARATOR}{fraction}")?;
    }
    Ok(())
}

/// Bucket centres and normalized densities.
pub fn write_histogram<W: Write>(out: &mut W, histogram: &Histogram) -> Result<()> {
    for (i, density) in histogram.density().iter().enumerate() {
        writeln!(out, "{}{SEPARATOR}{}", histogram.center(i), density)?;
    }
    Ok(())
}

/// A whole path on one line.
pub fn write_path_row<W: Write>(out: &mut W, beads: &[f64]) -> Result<()> {
    let row = beads
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    writeln!(out, "{row}")?;
    Ok(())
}

/// One value per line.
pub fn write_column<W: Write>(out: &mut W, values: &[f64]) -> Result<()> {
    for x in values {
        writeln!(out, "{x}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observable_rows() {
        let mut buf = Vec::new();
        write_observables(&mut buf, &[2.0, 1.5], &[3.0, 4.5], &[0.5, 0.25]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "2    3    0.5\n1.5    4.5    0.25\n");
    }

    #[test]
    fn test_observable_length_mismatch() {
        let mut buf = Vec::new();
        let err = write_observables(&mut buf, &[1.0, 2.0], &[1.0], &[0.5, 0.5]).unwrap_err();
        assert_eq!(err.exit_code(), -2);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_histogram_and_paths() {
        let mut h = Histogram::new(0.0, 0.5, 2).unwrap();
        h.fill(0.1);
        h.fill(0.7);
        let mut buf = Vec::new();
        write_histogram(&mut buf, &h).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0.25    1\n0.75    1\n");

        let mut buf = Vec::new();
        write_path_row(&mut buf, &[1.0, -0.5, 2.25]).unwrap();
        write_column(&mut buf, &[3.0, 4.0]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1    -0.5    2.25\n3\n4\n");
    }
}
