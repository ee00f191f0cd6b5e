//! Run drivers, one per program variant.
//!
//! Each driver takes parsed parameters, the run configuration, the run's
//! random generator and an output sink. Nothing here touches the filesystem
//! or ends the process; `main` owns both.

use log::{debug, info, warn};
use rand::{Rng, RngCore};
use std::io::Write;

use crate::error::{require_positive, BosonError, Result};
use crate::io::{
    write_column, write_histogram, write_observables, write_path_row, BoxBosonParams,
    BoxSweepParams, DoubleWellParams, FreePathParams, HarmonicPathParams, HarmonicPointParams,
    HarmonicSweepParams, RunConfig,
};
use crate::recursion::observables;
use crate::sampling::{
    free_open_path, BeadChain, BosonConfiguration, DirectBosonSampler, HarmonicRing, Histogram,
    RingPath,
};
use crate::systems::{CycleWeights, DoubleWell, FreeBox, Harmonic3D, PropagatorModel};

/// One temperature of a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepRow {
    pub beta: f64,
    pub energy: f64,
    pub condensate_fraction: f64,
}

/// Inverse temperatures from `beta_max` down to `beta_min` in steps of `step`.
pub fn beta_grid(beta_min: f64, beta_max: f64, step: f64) -> Result<Vec<f64>> {
    require_positive("beta_step", step)?;
    if beta_max < beta_min {
        return Err(BosonError::InvalidParameter(format!(
            "beta_max ({beta_max}) is below beta_min ({beta_min})"
        )));
    }
    // slack so that a grid landing on beta_min keeps its last point
    let n_steps = ((beta_max - beta_min) / step + 1e-9).floor() as usize;
    Ok((0..=n_steps).map(|i| beta_max - i as f64 * step).collect())
}

/// Exact energy and condensate fraction at every β of the grid.
pub fn run_sweep<W: Write>(
    model: &dyn PropagatorModel,
    betas: &[f64],
    n_particles: usize,
    include_zero_point: bool,
    out: &mut W,
) -> Result<Vec<SweepRow>> {
    let zero_point = if include_zero_point {
        model.zero_point_energy()
    } else {
        0.0
    };
    info!(
        "{} sweep: {} particles, {} temperatures",
        model.name(),
        n_particles,
        betas.len()
    );

    let mut energies = Vec::with_capacity(betas.len());
    let mut fractions = Vec::with_capacity(betas.len());
    for (step, &beta) in betas.iter().enumerate() {
        let w = CycleWeights::evaluate(model, beta, n_particles)?;
        let obs = observables(&w.weights, &w.derivatives)?;
        energies.push(obs.total_energy(zero_point));
        fractions.push(obs.condensate_fraction());

        if step % 100 == 0 {
            info!(
                "  beta = {:8.4}: E = {:12.6}, condensate fraction = {:.6}",
                beta,
                energies[step],
                fractions[step]
            );
        }
    }

    write_observables(out, betas, &energies, &fractions)?;

    Ok(betas
        .iter()
        .zip(&energies)
        .zip(&fractions)
        .map(|((&beta, &energy), &condensate_fraction)| SweepRow {
            beta,
            energy,
            condensate_fraction,
        })
        .collect())
}

pub fn run_box_sweep<W: Write>(
    params: &BoxSweepParams,
    config: &RunConfig,
    out: &mut W,
) -> Result<Vec<SweepRow>> {
    let model = FreeBox::new(params.box_size, config.image_range_for(params.n_particles))?;
    info!(
        "box of size {} with image range {}",
        model.size, model.image_range
    );
    let betas = beta_grid(params.beta_min, params.beta_max, config.beta_step)?;
    run_sweep(
        &model,
        &betas,
        params.n_particles,
        config.include_zero_point,
        out,
    )
}

pub fn run_harmonic_sweep<W: Write>(
    params: &HarmonicSweepParams,
    config: &RunConfig,
    out: &mut W,
) -> Result<Vec<SweepRow>> {
    let betas = beta_grid(params.beta_min, params.beta_max, config.beta_step)?;
    run_sweep(
        &Harmonic3D,
        &betas,
        params.n_particles,
        config.include_zero_point,
        out,
    )
}

/// Exact thermodynamics of the 3-D trap at one temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSummary {
    pub beta: f64,
    pub n_particles: usize,
    pub partition_function: f64,
    pub energy: f64,
    pub condensate_fraction: f64,
}

pub fn run_harmonic_point(params: &HarmonicPointParams, config: &RunConfig) -> Result<PointSummary> {
    let model = Harmonic3D;
    let w = CycleWeights::evaluate(&model, params.beta, params.n_particles)?;
    let obs = observables(&w.weights, &w.derivatives)?;
    let zero_point = if config.include_zero_point {
        model.zero_point_energy()
    } else {
        0.0
    };
    Ok(PointSummary {
        beta: params.beta,
        n_particles: params.n_particles,
        partition_function: obs.partition_function(),
        energy: obs.total_energy(zero_point),
        condensate_fraction: obs.condensate_fraction(),
    })
}

/// Draw one configuration and write its coordinates, one per line.
pub fn run_direct_bosons<W: Write>(
    model: &dyn PropagatorModel,
    beta: f64,
    n_particles: usize,
    rng: &mut dyn RngCore,
    out: &mut W,
) -> Result<BosonConfiguration> {
    let sampler = DirectBosonSampler::new(model, beta, n_particles)?;
    let conf = sampler.sample(rng)?;
    for (length, multiplicity) in conf.cycles.iter() {
        info!("  {} cycle(s) of length {}", multiplicity, length);
    }
    write_column(out, &conf.flattened())?;
    Ok(conf)
}

pub fn run_harmonic_bosons<W: Write>(
    params: &HarmonicPointParams,
    rng: &mut dyn RngCore,
    out: &mut W,
) -> Result<BosonConfiguration> {
    run_direct_bosons(&Harmonic3D, params.beta, params.n_particles, rng, out)
}

pub fn run_box_bosons<W: Write>(
    params: &BoxBosonParams,
    config: &RunConfig,
    rng: &mut dyn RngCore,
    out: &mut W,
) -> Result<BosonConfiguration> {
    let model = FreeBox::new(params.box_size, config.image_range_for(params.n_particles))?;
    run_direct_bosons(&model, params.beta, params.n_particles, rng, out)
}

fn progress_interval(n_iterations: usize) -> usize {
    (n_iterations / 10).max(1)
}

/// Independent open free paths, one line of `n_slices` beads per iteration.
pub fn run_free_paths<W: Write, R: Rng + ?Sized>(
    params: &FreePathParams,
    rng: &mut R,
    out: &mut W,
) -> Result<usize> {
    let dt = params.beta / params.n_slices as f64;
    info!(
        "free paths: {} slices of dt = {:.6}, {} iterations in a box of size {}",
        params.n_slices, dt, params.n_iterations, params.box_size
    );
    for iter in 0..params.n_iterations {
        let path = free_open_path(params.n_slices, dt, params.box_size, rng);
        write_path_row(out, &path)?;
        if iter % progress_interval(params.n_iterations) == 0 {
            debug!("  iteration {}", iter);
        }
    }
    Ok(params.n_iterations)
}

fn report_window(histogram: &Histogram) {
    if histogram.outside() > 0 {
        warn!(
            "{} of {} samples fell outside [{}, {})",
            histogram.outside(),
            histogram.total(),
            histogram.lower,
            histogram.upper()
        );
    }
}

/// Harmonic single-particle chain; writes the histogram of the anchor bead.
pub fn run_harmonic_path<W: Write, R: Rng + ?Sized>(
    params: &HarmonicPathParams,
    config: &RunConfig,
    rng: &mut R,
    out: &mut W,
) -> Result<Histogram> {
    let mut ring = HarmonicRing::new(params.starting_point, params.n_slices, params.beta)?;
    let mut histogram = config.histogram()?;
    info!(
        "harmonic path: {} slices, {} iterations, starting at {}",
        params.n_slices, params.n_iterations, params.starting_point
    );

    for iter in 0..params.n_iterations {
        ring.step(rng);
        histogram.fill(ring.anchor());
        if iter % progress_interval(params.n_iterations) == 0 {
            info!("  iteration {:8}: x0 = {:10.6}", iter, ring.anchor());
        }
    }

    report_window(&histogram);
    write_histogram(out, &histogram)?;
    Ok(histogram)
}

/// End state of a double-well run.
#[derive(Clone, Debug)]
pub struct ChainSummary {
    pub histogram: Histogram,
    pub acceptance_rate: f64,
    pub final_path: Vec<f64>,
}

/// Single-bead Metropolis in the double well; writes the histogram of bead 0.
pub fn run_double_well<W: Write, R: Rng + ?Sized>(
    params: &DoubleWellParams,
    initial_path: Vec<f64>,
    config: &RunConfig,
    rng: &mut R,
    out: &mut W,
) -> Result<ChainSummary> {
    if initial_path.len() != params.n_slices {
        return Err(BosonError::LengthMismatch {
            what: "initial configuration vs number of slices",
            left: initial_path.len(),
            right: params.n_slices,
        });
    }
    let path = RingPath::new(initial_path, params.beta, DoubleWell)?;
    let mut chain = BeadChain::new(path, params.delta)?;
    let mut histogram = config.histogram()?;
    info!(
        "double well: {} slices, {} iterations, delta = {}",
        params.n_slices, params.n_iterations, params.delta
    );

    for iter in 0..params.n_iterations {
        chain.step(rng);
        histogram.fill(chain.path.beads[0]);
        if iter % progress_interval(params.n_iterations) == 0 {
            info!(
                "  iteration {:8}: acceptance = {:.2}%",
                iter,
                100.0 * chain.acceptance_rate()
            );
        }
    }

    report_window(&histogram);
    write_histogram(out, &histogram)?;
    Ok(ChainSummary {
        histogram,
        acceptance_rate: chain.acceptance_rate(),
        final_path: chain.path.beads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_beta_grid_is_descending_and_inclusive() {
        let grid = beta_grid(1.0, 2.0, 0.25).unwrap();
        assert_eq!(grid.len(), 5);
        assert_relative_eq!(grid[0], 2.0);
        assert_relative_eq!(grid[4], 1.0, epsilon = 1e-12);

        let grid = beta_grid(0.1, 4.0, 0.01).unwrap();
        assert_eq!(grid.len(), 391);
        assert!(grid.windows(2).all(|w| w[1] < w[0]));

        assert_eq!(beta_grid(1.0, 1.0, 0.1).unwrap(), vec![1.0]);
        assert!(beta_grid(2.0, 1.0, 0.1).is_err());
        assert!(beta_grid(1.0, 2.0, 0.0).is_err());
        assert!(beta_grid(1.0, 2.0, -0.1).is_err());
        assert!(beta_grid(1.0, 2.0, f64::NAN).is_err());
    }

    #[test]
    fn test_sweep_with_unvalidated_zero_step_fails() {
        let params = HarmonicSweepParams {
            beta_min: 1.0,
            beta_max: 2.0,
            n_particles: 3,
        };
        let config = RunConfig {
            beta_step: 0.0,
            ..RunConfig::default()
        };
        let mut buf = Vec::new();
        let err = run_harmonic_sweep(&params, &config, &mut buf).unwrap_err();
        assert_eq!(err.exit_code(), -1);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_sweep_overflow_is_reported_not_written() {
        let params = HarmonicSweepParams {
            beta_min: 0.01,
            beta_max: 0.01,
            n_particles: 1000,
        };
        let mut buf = Vec::new();
        let err = run_harmonic_sweep(&params, &RunConfig::default(), &mut buf).unwrap_err();
        assert!(matches!(err, BosonError::NonFinite { .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_harmonic_sweep_rows() {
        let params = HarmonicSweepParams {
            beta_min: 0.5,
            beta_max: 1.5,
            n_particles: 10,
        };
        let config = RunConfig {
            beta_step: 0.5,
            ..RunConfig::default()
        };
        let mut buf = Vec::new();
        let rows = run_harmonic_sweep(&params, &config, &mut buf).unwrap();

        assert_eq!(rows.len(), 3);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        for row in &rows {
            assert!((0.0..=1.0).contains(&row.condensate_fraction));
            // never below the ground state
            assert!(row.energy > 15.0);
        }
        // colder means fewer excitations and more condensate
        assert!(rows[0].energy < rows[2].energy);
        assert!(rows[0].condensate_fraction > rows[2].condensate_fraction);
    }

    #[test]
    fn test_zero_point_switch() {
        let params = HarmonicPointParams {
            beta: 2.0,
            n_particles: 4,
        };
        let with = run_harmonic_point(&params, &RunConfig::default()).unwrap();
        let without = run_harmonic_point(
            &params,
            &RunConfig {
                include_zero_point: false,
                ..RunConfig::default()
            },
        )
        .unwrap();
        assert_relative_eq!(with.energy - without.energy, 6.0, epsilon = 1e-10);
        assert_eq!(with.partition_function, without.partition_function);
    }

    #[test]
    fn test_box_sweep_fraction_bounds() {
        let params = BoxSweepParams {
            beta_min: 0.5,
            beta_max: 2.0,
            n_particles: 8,
            box_size: 2.0,
        };
        let config = RunConfig {
            beta_step: 0.1,
            ..RunConfig::default()
        };
        let mut buf = Vec::new();
        let rows = run_box_sweep(&params, &config, &mut buf).unwrap();
        assert_eq!(rows.len(), 16);
        for row in rows {
            assert!(row.energy > 0.0);
            assert!((0.0..=1.0).contains(&row.condensate_fraction));
        }
    }

    #[test]
    fn test_box_bosons_output_layout() {
        let params = BoxBosonParams {
            beta: 1.0,
            n_particles: 5,
            box_size: 2.5,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut buf = Vec::new();
        let conf = run_box_bosons(&params, &RunConfig::default(), &mut rng, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3 * (5 + conf.cycles.n_cycles()));
    }

    #[test]
    fn test_double_well_rejects_wrong_initial_length() {
        let params = DoubleWellParams {
            beta: 4.0,
            n_slices: 8,
            n_iterations: 10,
            delta: 0.5,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut buf = Vec::new();
        let err = run_double_well(&params, vec![0.0; 7], &RunConfig::default(), &mut rng, &mut buf)
            .unwrap_err();
        assert_eq!(err.exit_code(), -2);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_harmonic_path_histogram() {
        let params = HarmonicPathParams {
            beta: 2.0,
            n_slices: 8,
            n_iterations: 5_000,
            starting_point: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut buf = Vec::new();
        let h = run_harmonic_path(&params, &RunConfig::default(), &mut rng, &mut buf).unwrap();
        assert_eq!(h.total(), 5_000);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 80);
    }
}
