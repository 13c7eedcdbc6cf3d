//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - loads point files (or prompts for one)
//! - fits one algorithm or compares all of them
//! - prints reports/plots
//! - writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{CompareArgs, Command, FitArgs, PlotArgs, SampleArgs, TuiArgs};
use crate::data::{SampleConfig, generate_sample};
use crate::domain::FitConfig;
use crate::error::AppError;
use crate::fit::CATALOG;

pub mod pipeline;

/// Directory debug bundles are written to.
pub const DEBUG_DIR: &str = "debug";

/// Residual rows shown under a fit summary.
const TOP_RESIDUALS: usize = 10;

/// Entry point for the `sketchfit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // Bare `sketchfit` and `sketchfit -a spline+3` open the canvas.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Fit(args) => handle_fit(args),
        Command::Compare(args) => handle_compare(args),
        Command::Plot(args) => handle_plot(args),
        Command::List => handle_list(),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let points_path = resolve_points_path(args.points.as_deref())?;
    let config = fit_config_from_args(&args, points_path);
    let run = pipeline::run_fit(&config)?;
    let out = &run.outcome;

    report_row_errors(&config.points_path, &run.ingest);

    println!(
        "{}",
        crate::report::format_fit_summary(&run.ingest.points, out.fit_id, &out.curve, &out.quality)
    );
    println!("{}", crate::report::format_residuals(&out.residuals, TOP_RESIDUALS));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.ingest.points,
            Some(&out.curve),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::write_residuals_csv(path, &out.residuals, out.fit_id)?;
        println!("Wrote residuals to {}", path.display());
    }
    if let Some(path) = &config.export_curve {
        crate::io::write_curve_json(path, out.fit_id, &out.curve, &run.ingest.points, config.grid_points)?;
        println!("Wrote curve to {}", path.display());
    }
    if config.debug_bundle {
        let path = crate::debug::write_debug_bundle(Path::new(DEBUG_DIR), &run.ingest.points, out.fit_id)?;
        println!("Wrote debug bundle to {}", path.display());
    }

    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let path = resolve_points_path(args.points.as_deref())?;
    let ingest = crate::io::load_points(&path)?;
    report_row_errors(&path, &ingest);

    let cmp = crate::report::compare_all(&ingest.points);
    println!("{}", crate::report::format_comparison(&cmp));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_list() -> Result<(), AppError> {
    for id in CATALOG {
        println!("{:<14} {}", id.to_string(), id.display_name());
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let points = generate_sample(&sample_config_from_args(&args))?;
    crate::io::write_points(&args.output, &points)?;
    println!("Wrote {} points to {}", points.len(), args.output.display());
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

pub fn fit_config_from_args(args: &FitArgs, points_path: PathBuf) -> FitConfig {
    FitConfig {
        points_path,
        fit_id: args.algorithm,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        grid_points: args.grid_points,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
        debug_bundle: args.debug_bundle,
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        count: args.count,
        seed: args.seed,
        coeffs: args.coeffs.clone(),
        noise: args.noise,
        x_min: args.x_min,
        x_max: args.x_max,
    }
}

fn resolve_points_path(arg: Option<&Path>) -> Result<PathBuf, AppError> {
    match arg {
        Some(path) => crate::cli::picker::validate_points_path(path),
        None => crate::cli::picker::prompt_for_points_path(),
    }
}

fn report_row_errors(path: &Path, ingest: &crate::io::IngestedPoints) {
    if ingest.row_errors.is_empty() {
        return;
    }
    eprintln!(
        "Skipped {} of {} row(s) in {}:",
        ingest.row_errors.len(),
        ingest.rows_read,
        path.display()
    );
    for err in ingest.row_errors.iter().take(5) {
        eprintln!("  line {}: {}", err.line, err.message);
    }
}

/// Rewrite argv so `sketchfit` defaults to `sketchfit tui`.
///
/// Rules:
/// - `sketchfit`                      -> `sketchfit tui`
/// - `sketchfit -a spline+3 ...`      -> `sketchfit tui -a spline+3 ...`
/// - `sketchfit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "tui" | "fit" | "compare" | "plot" | "list" | "sample"
    );
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}
