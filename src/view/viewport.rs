//! Viewport: the rectangle of data space currently on screen.
//!
//! Cells are addressed `(col, row)` with row 0 at the top, so y grows upwards
//! while rows grow downwards.

use crate::domain::{Point, compute_stats};

/// Scroll delta to zoom factor: `1 + delta · ZOOM_SCALE`.
pub const ZOOM_SCALE: f64 = 0.0005;

/// Half-width of the default x-range.
const DEFAULT_HALF_WIDTH: f64 = 5.0;

/// Spans outside this band are refused by `zoom`.
const MIN_SPAN: f64 = 1e-9;
const MAX_SPAN: f64 = 1e12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Viewport {
    pub const fn new(x: [f64; 2], y: [f64; 2]) -> Self {
        Self { x, y }
    }

    /// x in `[-5, 5]`, y centred on zero and scaled by `aspect` (height / width).
    pub fn default_for(aspect: f64) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        let half_height = DEFAULT_HALF_WIDTH * aspect;
        Self::new([-DEFAULT_HALF_WIDTH, DEFAULT_HALF_WIDTH], [-half_height, half_height])
    }

    pub fn x_span(&self) -> f64 {
        self.x[1] - self.x[0]
    }

    pub fn y_span(&self) -> f64 {
        self.y[1] - self.y[0]
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x[0] && x <= self.x[1] && y >= self.y[0] && y <= self.y[1]
    }

    /// Shift by fractions of the current span (`fx = 0.1` moves a tenth right).
    pub fn pan(&mut self, fx: f64, fy: f64) {
        let dx = fx * self.x_span();
        let dy = fy * self.y_span();
        self.x = [self.x[0] + dx, self.x[1] + dx];
        self.y = [self.y[0] + dy, self.y[1] + dy];
    }

    /// Shift by a data-space offset.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x = [self.x[0] + dx, self.x[1] + dx];
        self.y = [self.y[0] + dy, self.y[1] + dy];
    }

    /// Scale both spans by `factor`, keeping `about` at the same screen spot.
    ///
    /// `factor > 1` zooms out. Non-positive or non-finite factors, and zooms
    /// that would make a span degenerate, leave the viewport unchanged.
    pub fn zoom(&mut self, factor: f64, about: (f64, f64)) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let new_x = self.x_span() * factor;
        let new_y = self.y_span() * factor;
        let ok = |s: f64| (MIN_SPAN..=MAX_SPAN).contains(&s);
        if !(ok(new_x) && ok(new_y)) {
            return;
        }

        let (cx, cy) = about;
        let x0 = cx - (cx - self.x[0]) * factor;
        let y0 = cy - (cy - self.y[0]) * factor;
        self.x = [x0, x0 + new_x];
        self.y = [y0, y0 + new_y];
    }

    /// Zoom factor for a scroll delta (positive delta zooms out).
    pub fn zoom_factor(delta: f64) -> f64 {
        1.0 + delta * ZOOM_SCALE
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x[0] + self.x[1]) / 2.0, (self.y[0] + self.y[1]) / 2.0)
    }

    /// Padded bounding box of `points`; `None` for an empty set.
    pub fn fit_to(points: &[Point]) -> Option<Self> {
        let stats = compute_stats(points)?;
        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            let pad = if span > 0.0 { span * 0.1 } else { 1.0 };
            [lo - pad, hi + pad]
        };
        Some(Self::new(
            pad(stats.x_min, stats.x_max),
            pad(stats.y_min, stats.y_max),
        ))
    }

    /// Cell containing `(x, y)` on a `cols × rows` grid; `None` when off-screen.
    pub fn to_cell(&self, x: f64, y: f64, cols: u16, rows: u16) -> Option<(u16, u16)> {
        if cols == 0 || rows == 0 || !self.contains(x, y) {
            return None;
        }
        let u = (x - self.x[0]) / self.x_span();
        let v = (self.y[1] - y) / self.y_span();
        let col = (u * f64::from(cols - 1)).round();
        let row = (v * f64::from(rows - 1)).round();
        Some((col as u16, row as u16))
    }

    /// Data coordinates of the centre of cell `(col, row)`.
    pub fn from_cell(&self, col: u16, row: u16, cols: u16, rows: u16) -> (f64, f64) {
        let u = if cols > 1 {
            f64::from(col) / f64::from(cols - 1)
        } else {
            0.5
        };
        let v = if rows > 1 {
            f64::from(row) / f64::from(rows - 1)
        } else {
            0.5
        };
        (self.x[0] + u * self.x_span(), self.y[1] - v * self.y_span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_view_scales_y_by_aspect() {
        let v = Viewport::default_for(0.5);
        assert_eq!(v.x, [-5.0, 5.0]);
        assert_eq!(v.y, [-2.5, 2.5]);
        assert_eq!(Viewport::default_for(f64::NAN).y, [-5.0, 5.0]);
    }

    #[test]
    fn zoom_keeps_the_anchor_fixed() {
        let mut v = Viewport::new([0.0, 10.0], [0.0, 10.0]);
        v.zoom(0.5, (2.0, 8.0));
        assert_eq!(v.x, [1.0, 6.0]);
        assert_eq!(v.y, [4.0, 9.0]);

        // The anchor sits at the same fraction of the window as before.
        assert_relative_eq!((2.0 - v.x[0]) / v.x_span(), 0.2);
        assert_relative_eq!((8.0 - v.y[0]) / v.y_span(), 0.8);
    }

    #[test]
    fn zoom_refuses_bad_factors() {
        let mut v = Viewport::default_for(1.0);
        let before = v;
        v.zoom(0.0, (0.0, 0.0));
        v.zoom(-2.0, (0.0, 0.0));
        v.zoom(f64::INFINITY, (0.0, 0.0));
        v.zoom(1e-12, (0.0, 0.0));
        assert_eq!(v, before);
    }

    #[test]
    fn scroll_delta_maps_to_factor() {
        assert_eq!(Viewport::zoom_factor(0.0), 1.0);
        assert_relative_eq!(Viewport::zoom_factor(100.0), 1.05);
        assert_relative_eq!(Viewport::zoom_factor(-100.0), 0.95);
    }

    #[test]
    fn pan_moves_by_fractions_of_the_span() {
        let mut v = Viewport::new([0.0, 10.0], [-1.0, 1.0]);
        v.pan(0.1, -0.5);
        assert_eq!(v.x, [1.0, 11.0]);
        assert_eq!(v.y, [-2.0, 0.0]);
    }

    #[test]
    fn fit_pads_the_bounding_box() {
        let pts = [Point::new(0.0, 1.0), Point::new(10.0, 1.0)];
        let v = Viewport::fit_to(&pts).unwrap();
        assert_eq!(v.x, [-1.0, 11.0]);
        assert_eq!(v.y, [0.0, 2.0]);
        assert!(Viewport::fit_to(&[]).is_none());
    }

    #[test]
    fn cells_and_coordinates_agree() {
        let v = Viewport::new([0.0, 10.0], [0.0, 4.0]);
        assert_eq!(v.to_cell(0.0, 4.0, 11, 5), Some((0, 0)));
        assert_eq!(v.to_cell(10.0, 0.0, 11, 5), Some((10, 4)));
        assert_eq!(v.to_cell(5.0, 2.0, 11, 5), Some((5, 2)));
        assert_eq!(v.to_cell(11.0, 2.0, 11, 5), None);

        assert_eq!(v.from_cell(5, 2, 11, 5), (5.0, 2.0));
        assert_eq!(v.from_cell(0, 4, 11, 5), (0.0, 0.0));
    }
}
