//! IO module - parameter files, run configuration and result writers.

mod config;
mod output;
mod params;

pub use config::{HistogramConfig, RunConfig};
pub use output::{write_column, write_histogram, write_observables, write_path_row};
pub use params::{
    parse_initial_path, read_initial_path, BoxBosonParams, BoxSweepParams, DoubleWellParams,
    FreePathParams, HarmonicPathParams, HarmonicPointParams, HarmonicSweepParams, ParameterFile,
};
