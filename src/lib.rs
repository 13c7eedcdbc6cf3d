//! `sketchfit` library crate.
//!
//! The binary (`sketchfit`) is a thin wrapper around this library so that:
//!
//! - the fitting engine is testable without a terminal
//! - the registry (`fit`) and curve models (`models`) can be embedded elsewhere
//! - the CLI and the TUI share one pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
pub mod view;
