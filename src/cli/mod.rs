//! Command-line parsing for the sketch-and-fit tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::FitId;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sketchfit", version, about = "Place points, fit regressions and splines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive canvas (the default).
    Tui(TuiArgs),
    /// Fit one algorithm to a point file, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Fit every algorithm to a point file and compare them.
    Compare(CompareArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// List the available algorithms.
    List,
    /// Write a synthetic point file (polynomial plus Gaussian noise).
    Sample(SampleArgs),
}

/// Options for the interactive canvas.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Start with the points from this file (.csv or .json).
    #[arg(long, value_name = "FILE", env = "SKETCHFIT_POINTS")]
    pub points: Option<PathBuf>,

    /// Initial algorithm, e.g. `regression+3` or `spline+1`.
    #[arg(short = 'a', long, env = "SKETCHFIT_ALGORITHM", default_value = "regression+1")]
    pub algorithm: FitId,

    /// Start with N generated sample points instead of an empty canvas.
    #[arg(long, value_name = "N", conflicts_with = "points")]
    pub sample: Option<usize>,

    /// Random seed for `--sample`.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for fitting a single algorithm.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Point file (.csv with x,y columns or a JSON array). Prompts when omitted.
    #[arg(long, value_name = "FILE", env = "SKETCHFIT_POINTS")]
    pub points: Option<PathBuf>,

    /// Algorithm identifier, e.g. `regression+3` or `spline+1`.
    #[arg(short = 'a', long, env = "SKETCHFIT_ALGORITHM")]
    pub algorithm: FitId,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-point residuals to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the curve (model + quality + sampled grid) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,

    /// Grid samples stored in `--export-curve` files.
    #[arg(long, default_value_t = 101)]
    pub grid_points: usize,

    /// Also write a markdown debug bundle under `debug/`.
    #[arg(long)]
    pub debug_bundle: bool,
}

/// Options for comparing every algorithm.
#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Point file (.csv with x,y columns or a JSON array). Prompts when omitted.
    #[arg(long, value_name = "FILE", env = "SKETCHFIT_POINTS")]
    pub points: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Curve JSON file produced by `sketchfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for generating a sample point file.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output file (.csv or .json).
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: PathBuf,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Polynomial coefficients, highest power first (comma-separated).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "0.25,0,-2,1")]
    pub coeffs: Vec<f64>,

    /// Standard deviation of the Gaussian noise.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Smallest x-value.
    #[arg(long, default_value_t = -4.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Largest x-value.
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    pub x_max: f64,
}
