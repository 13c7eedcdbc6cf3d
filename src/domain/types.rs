//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and rendering
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::models::Curve;

/// A user-placed data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Fitting family.
///
/// The renderer uses the family to decide whether a curve is drawn across
/// the whole window (regression) or only over the data (spline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Regression,
    Spline,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Regression => "regression",
            Family::Spline => "spline",
        }
    }
}

/// Highest supported regression degree.
pub const MAX_REGRESSION_DEGREE: usize = 10;

/// A regression degree in `1..=MAX_REGRESSION_DEGREE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegressionDegree(u8);

impl RegressionDegree {
    /// Returns `None` for degrees outside the catalog.
    pub fn new(degree: usize) -> Option<Self> {
        if (1..=MAX_REGRESSION_DEGREE).contains(&degree) {
            Some(Self(degree as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// Fit identifier: family plus degree.
///
/// The textual form is `"<family>+<degree>"`, e.g. `regression+3` or
/// `spline+1`. Only the catalogued combinations are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FitId {
    Regression(RegressionDegree),
    LinearSpline,
    CubicSpline,
}

impl FitId {
    /// Every declared identifier, regression degrees first.
    pub const ALL: [FitId; 12] = [
        FitId::Regression(RegressionDegree(1)),
        FitId::Regression(RegressionDegree(2)),
        FitId::Regression(RegressionDegree(3)),
        FitId::Regression(RegressionDegree(4)),
        FitId::Regression(RegressionDegree(5)),
        FitId::Regression(RegressionDegree(6)),
        FitId::Regression(RegressionDegree(7)),
        FitId::Regression(RegressionDegree(8)),
        FitId::Regression(RegressionDegree(9)),
        FitId::Regression(RegressionDegree(10)),
        FitId::LinearSpline,
        FitId::CubicSpline,
    ];

    pub fn family(self) -> Family {
        match self {
            FitId::Regression(_) => Family::Regression,
            FitId::LinearSpline | FitId::CubicSpline => Family::Spline,
        }
    }

    pub fn degree(self) -> usize {
        match self {
            FitId::Regression(d) => d.get(),
            FitId::LinearSpline => 1,
            FitId::CubicSpline => 3,
        }
    }

    /// Short human label, as shown in the algorithm picker.
    pub fn label(self) -> &'static str {
        match self {
            FitId::Regression(d) => match d.get() {
                1 => "Linear",
                2 => "Quadratic",
                3 => "Cubic",
                4 => "4th Degree",
                5 => "5th Degree",
                6 => "6th Degree",
                7 => "7th Degree",
                8 => "8th Degree",
                9 => "9th Degree",
                _ => "10th Degree",
            },
            FitId::LinearSpline => "Linear",
            FitId::CubicSpline => "Cubic",
        }
    }

    /// Label including the family, e.g. `Cubic spline`.
    pub fn display_name(self) -> String {
        format!("{} {}", self.label(), self.family().as_str())
    }
}

impl fmt::Display for FitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.family().as_str(), self.degree())
    }
}

impl FromStr for FitId {
    type Err = FitError;

    /// Only the exact canonical text of a declared identifier parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FitId::ALL
            .into_iter()
            .find(|id| id.to_string() == s)
            .ok_or_else(|| FitError::UnknownAlgorithm { id: s.to_string() })
    }
}

impl From<FitId> for String {
    fn from(value: FitId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for FitId {
    type Error = FitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Summary stats about a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Compute stats for a non-empty point set.
pub fn compute_stats(points: &[Point]) -> Option<PointStats> {
    if points.is_empty() {
        return None;
    }
    let mut stats = PointStats {
        n_points: points.len(),
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    for p in points {
        stats.x_min = stats.x_min.min(p.x);
        stats.x_max = stats.x_max.max(p.x);
        stats.y_min = stats.y_min.min(p.y);
        stats.y_max = stats.y_max.max(p.y);
    }
    Some(stats)
}

/// A per-point fitted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointResidual {
    pub point: Point,
    pub y_fit: f64,
    pub residual: f64,
}

/// Fit quality diagnostics.
///
/// `n_scored` can be below `n_points`: spline curves are not defined at the
/// right-most breakpoint, and such points are left out of the sums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub n_points: usize,
    pub n_scored: usize,
    pub sse: f64,
    pub rmse: f64,
    pub max_abs: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus `.env` / environment defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub points_path: PathBuf,
    pub fit_id: FitId,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Number of grid samples stored in exported curve files.
    pub grid_points: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
    pub debug_bundle: bool,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub fit_id: FitId,
    pub model: Curve,
    pub fit_quality: FitQuality,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_id_round_trips_text_form() {
        for text in ["regression+1", "regression+10", "spline+1", "spline+3"] {
            let id: FitId = text.parse().unwrap();
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn fit_id_rejects_undeclared_degrees() {
        for text in ["regression+0", "regression+11", "spline+2", "spline+0", "bezier+1", "regression", "spline+x"] {
            let err = text.parse::<FitId>().unwrap_err();
            assert_eq!(err, FitError::UnknownAlgorithm { id: text.to_string() });
        }
    }

    #[test]
    fn fit_id_rejects_non_canonical_spellings() {
        for text in [
            "regression++3",
            "REGRESSION+03",
            " spline + 1 ",
            "Spline+003",
            "regression+010",
            "regression+ 2",
            "spline+3\n",
            "regression+-1",
        ] {
            let err = text.parse::<FitId>().unwrap_err();
            assert_eq!(err, FitError::UnknownAlgorithm { id: text.to_string() });
        }
    }

    #[test]
    fn fit_id_serializes_as_string() {
        let id = FitId::Regression(RegressionDegree::new(4).unwrap());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"regression+4\"");
        let back: FitId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<FitId>("\"spline+2\"").is_err());
    }

    #[test]
    fn labels_follow_the_picker() {
        assert_eq!(FitId::Regression(RegressionDegree::new(2).unwrap()).label(), "Quadratic");
        assert_eq!(FitId::CubicSpline.display_name(), "Cubic spline");
        assert_eq!(FitId::LinearSpline.family(), Family::Spline);
    }

    #[test]
    fn stats_cover_all_points() {
        let pts = [Point::new(1.0, -2.0), Point::new(-3.0, 4.0)];
        let s = compute_stats(&pts).unwrap();
        assert_eq!((s.x_min, s.x_max, s.y_min, s.y_max), (-3.0, 1.0, -2.0, 4.0));
        assert!(compute_stats(&[]).is_none());
    }
}
