//! Plotters-powered canvas chart widget for Ratatui.
//!
//! The widget draws the background grid, the axes through the origin, and the
//! fitted curve. Points and the cursor are overlaid cell-by-cell by the caller
//! so they line up exactly with mouse hit-testing.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Family;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct CanvasChart<'a> {
    /// Polyline runs of the fitted curve (already clipped to its domain).
    pub curve: &'a [Vec<(f64, f64)>],
    /// Family of the fitted curve; picks the line colour.
    pub family: Option<Family>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Grid line positions.
    pub x_ticks: &'a [f64],
    pub y_ticks: &'a [f64],
}

pub fn curve_color(family: Family) -> RGBColor {
    match family {
        Family::Regression => RGBColor(0, 255, 255),
        Family::Spline => RGBColor(255, 0, 255),
    }
}

impl<'a> Widget for CanvasChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 4 {
            buf.set_string(
                area.x,
                area.y,
                "Canvas too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            // No label areas: the plotting area must fill `area` exactly so that
            // cell <-> data mapping matches the viewport.
            let mut chart = ChartBuilder::on(&root).margin(0).build_cartesian_2d(x0..x1, y0..y1)?;

            let grid = RGBColor(70, 70, 70);
            let axis = RGBColor(170, 170, 170);

            for &x in self.x_ticks {
                chart.draw_series(LineSeries::new([(x, y0), (x, y1)], &grid))?;
            }
            for &y in self.y_ticks {
                chart.draw_series(LineSeries::new([(x0, y), (x1, y)], &grid))?;
            }

            if (x0..=x1).contains(&0.0) {
                chart.draw_series(LineSeries::new([(0.0, y0), (0.0, y1)], &axis))?;
            }
            if (y0..=y1).contains(&0.0) {
                chart.draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &axis))?;
            }

            if let Some(family) = self.family {
                let color = curve_color(family);
                for run in self.curve {
                    chart.draw_series(LineSeries::new(run.iter().copied(), &color))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
