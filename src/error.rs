//! Error types.
//!
//! Two layers:
//! - [`FitError`]: failures raised by the fitting engine (linear algebra,
//!   regression, splines, registry lookup).
//! - [`AppError`]: what the binary reports, carrying a process exit code.

use thiserror::Error;

/// Failures raised while building a fitted curve.
///
/// Some of these are an expected property of the user's data (the caller
/// should simply draw nothing), others are contract violations by the caller.
/// [`FitError::is_recoverable`] draws that line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("dimension mismatch: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("singular matrix: no usable pivot in column {column}")]
    SingularMatrix { column: usize },

    #[error("degenerate spline: {reason}")]
    DegenerateSpline { reason: String },

    #[error("too few points: got {got}, need at least {need}")]
    TooFewPoints { got: usize, need: usize },

    #[error("unknown algorithm '{id}'")]
    UnknownAlgorithm { id: String },

    #[error("invalid degree {got}: must be >= 1")]
    InvalidDegree { got: usize },

    #[error("piecewise function needs one piece per interval: {breakpoints} breakpoints, {pieces} pieces")]
    PieceCountMismatch { breakpoints: usize, pieces: usize },

    #[error("breakpoints must be non-decreasing: {prev} is followed by {next}")]
    UnsortedBreakpoints { prev: f64, next: f64 },
}

impl FitError {
    /// `true` when the error describes the input data rather than a bug in the
    /// caller. Recoverable errors mean "no curve for these points".
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FitError::SingularMatrix { .. }
                | FitError::DegenerateSpline { .. }
                | FitError::TooFewPoints { .. }
        )
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        FitError::DegenerateSpline {
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::UnknownAlgorithm { .. } => 2,
            FitError::TooFewPoints { .. } => 3,
            _ => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
