//! Ratatui-based interactive canvas.
//!
//! The user places, drags and deletes points on a pannable/zoomable canvas;
//! every edit refits the selected algorithm and redraws the curve.
//!
//! - `Move` mode: arrows pan, dragging a point moves it, dragging elsewhere pans
//! - `Point` mode: arrows move a cursor, Enter or a click adds a point
//! - `Delete` mode: arrows move a cursor, Enter or a click deletes the nearest point

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::pipeline::{FitOutcome, fit_points};
use crate::cli::TuiArgs;
use crate::data::{SampleConfig, generate_sample};
use crate::domain::{FitId, Point};
use crate::error::AppError;
use crate::fit::CATALOG;
use crate::view::{Viewport, tick_label, tick_step, tick_values};

mod plotters_chart;

use plotters_chart::CanvasChart;

/// Where `s` saves the canvas when no `--points` file was given.
const DEFAULT_SAVE_PATH: &str = "sketchfit_points.csv";

/// Fraction of the span moved per arrow key in `Move` mode.
const PAN_STEP: f64 = 0.1;
/// Scroll delta applied per `+`/`-` key press.
const KEY_ZOOM_DELTA: f64 = 400.0;
/// Scroll delta applied per mouse wheel notch.
const WHEEL_ZOOM_DELTA: f64 = 100.0;
/// A point is "under" the cursor within this many cells.
const HIT_RADIUS_CELLS: f64 = 1.5;
/// Chart size assumed before the first draw.
const FALLBACK_CHART: (u16, u16) = (60, 20);

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let (points, save_path) = initial_points(&args)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(points, args.algorithm, save_path);
    app.event_loop(&mut terminal)
}

fn initial_points(args: &TuiArgs) -> Result<(Vec<Point>, PathBuf), AppError> {
    if let Some(path) = &args.points {
        let ingest = crate::io::load_points(path)?;
        return Ok((ingest.points, path.clone()));
    }
    let save_path = PathBuf::from(DEFAULT_SAVE_PATH);
    match args.sample {
        Some(count) => {
            let config = SampleConfig {
                count,
                seed: args.seed,
                ..SampleConfig::default()
            };
            Ok((generate_sample(&config)?, save_path))
        }
        None => Ok((Vec::new(), save_path)),
    }
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorMode {
    Move,
    Point,
    Delete,
}

impl CursorMode {
    fn next(self) -> Self {
        match self {
            CursorMode::Move => CursorMode::Point,
            CursorMode::Point => CursorMode::Delete,
            CursorMode::Delete => CursorMode::Move,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CursorMode::Move => "Move",
            CursorMode::Point => "Point",
            CursorMode::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    /// Dragging the point at this index.
    Point(usize),
    /// Panning; the last cell the pointer was on.
    Pan { col: u16, row: u16 },
}

struct App {
    points: Vec<Point>,
    fit_id: FitId,
    fit: Option<FitOutcome>,
    view: Viewport,
    mode: CursorMode,
    cursor: (f64, f64),
    drag: Option<Drag>,
    /// Plot rectangle from the last draw, used for mouse hit-testing.
    chart_area: Rect,
    show_help: bool,
    status: String,
    save_path: PathBuf,
}

impl App {
    fn new(points: Vec<Point>, fit_id: FitId, save_path: PathBuf) -> Self {
        let (cols, rows) = FALLBACK_CHART;
        let view = Viewport::fit_to(&points).unwrap_or_else(|| Viewport::default_for(cell_aspect(cols, rows)));
        let mut app = Self {
            points,
            fit_id,
            fit: None,
            cursor: view.center(),
            view,
            mode: CursorMode::Move,
            drag: None,
            chart_area: Rect::default(),
            show_help: true,
            status: String::new(),
            save_path,
        };
        app.refit();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    needs_redraw = self.handle_mouse(mouse);
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `Ok(true)` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if code == KeyCode::Char('q') {
            return Ok(true);
        }
        if self.show_help {
            // Any key dismisses the help overlay.
            self.show_help = false;
            return Ok(false);
        }

        match code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('m') => {
                self.mode = self.mode.next();
                self.drag = None;
                if !self.view.contains(self.cursor.0, self.cursor.1) {
                    self.cursor = self.view.center();
                }
                self.status = format!("mode: {}", self.mode.label());
            }
            KeyCode::Tab => self.select(self.catalog_offset(1)),
            KeyCode::BackTab => self.select(self.catalog_offset(-1)),
            KeyCode::Char('t') => self.select(self.toggled_family()),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom(-KEY_ZOOM_DELTA, self.view.center()),
            KeyCode::Char('-') | KeyCode::Char('_') => self.zoom(KEY_ZOOM_DELTA, self.view.center()),
            KeyCode::Char('0') => {
                let (cols, rows) = self.chart_dims();
                self.view = Viewport::default_for(cell_aspect(cols, rows));
                self.cursor = self.view.center();
                self.status = "view reset".to_string();
            }
            KeyCode::Char('f') => match Viewport::fit_to(&self.points) {
                Some(view) => {
                    self.view = view;
                    self.cursor = view.center();
                    self.status = "view fitted to points".to_string();
                }
                None => self.status = "No points to fit the view to.".to_string(),
            },
            KeyCode::Char('c') => {
                self.points.clear();
                self.refit();
                self.status = "Cleared all points.".to_string();
            }
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('d') => {
                match crate::debug::write_debug_bundle(Path::new(crate::app::DEBUG_DIR), &self.points, self.fit_id) {
                    Ok(path) => self.status = format!("Wrote debug bundle: {}", path.display()),
                    Err(err) => self.status = format!("Debug write failed: {err}"),
                }
            }
            KeyCode::Left => self.arrow(-1, 0),
            KeyCode::Right => self.arrow(1, 0),
            KeyCode::Up => self.arrow(0, 1),
            KeyCode::Down => self.arrow(0, -1),
            KeyCode::Enter => match self.mode {
                CursorMode::Move => {}
                CursorMode::Point => self.add_point(self.cursor),
                CursorMode::Delete => self.delete_near(self.cursor),
            },
            _ => {}
        }

        Ok(false)
    }

    /// Returns `true` when the screen needs a redraw.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let cell = self.chart_cell(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let delta = if mouse.kind == MouseEventKind::ScrollDown {
                    WHEEL_ZOOM_DELTA
                } else {
                    -WHEEL_ZOOM_DELTA
                };
                let about = cell.map(|(c, r)| self.cell_to_data(c, r)).unwrap_or(self.view.center());
                self.zoom(delta, about);
                true
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.show_help {
                    self.show_help = false;
                    return true;
                }
                let Some((col, row)) = cell else {
                    return false;
                };
                let at = self.cell_to_data(col, row);
                self.cursor = at;
                match self.mode {
                    CursorMode::Move => {
                        self.drag = Some(match self.nearest_point(at) {
                            Some(index) => Drag::Point(index),
                            None => Drag::Pan { col, row },
                        });
                    }
                    CursorMode::Point => self.add_point(at),
                    CursorMode::Delete => self.delete_near(at),
                }
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (Some(drag), Some((col, row))) = (self.drag, cell) else {
                    return false;
                };
                match drag {
                    Drag::Point(index) => {
                        let (x, y) = self.cell_to_data(col, row);
                        if let Some(p) = self.points.get_mut(index) {
                            *p = Point::new(x, y);
                            self.refit();
                        }
                    }
                    Drag::Pan { col: c0, row: r0 } => {
                        let (x0, y0) = self.cell_to_data(c0, r0);
                        let (x1, y1) = self.cell_to_data(col, row);
                        self.view.translate(x0 - x1, y0 - y1);
                        // The grab point stays under the pointer, so the pointer
                        // is still on the same data coordinate.
                        self.drag = Some(Drag::Pan { col, row });
                    }
                }
                true
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag.take().is_some(),
            _ => false,
        }
    }

    fn select(&mut self, fit_id: FitId) {
        self.fit_id = fit_id;
        self.refit();
    }

    fn catalog_offset(&self, step: isize) -> FitId {
        let n = CATALOG.len() as isize;
        let idx = CATALOG.iter().position(|&id| id == self.fit_id).unwrap_or(0) as isize;
        CATALOG[(idx + step).rem_euclid(n) as usize]
    }

    /// First catalog entry of the other family.
    fn toggled_family(&self) -> FitId {
        let family = self.fit_id.family();
        CATALOG
            .iter()
            .copied()
            .find(|id| id.family() != family)
            .unwrap_or(self.fit_id)
    }

    /// Fit the current algorithm to the canvas and update the status line.
    fn refit(&mut self) {
        if self.points.is_empty() {
            self.fit = None;
            self.status = format!("{}: no points yet (m for Point mode, then Enter or click)", self.fit_id);
            return;
        }
        match fit_points(self.fit_id, &self.points) {
            Ok(outcome) => {
                self.status = format!(
                    "{}: n={} rmse={:.4} max|r|={:.4}",
                    self.fit_id, outcome.quality.n_points, outcome.quality.rmse, outcome.quality.max_abs
                );
                self.fit = Some(outcome);
            }
            Err(err) => {
                self.fit = None;
                self.status = err.to_string();
            }
        }
    }

    fn add_point(&mut self, (x, y): (f64, f64)) {
        self.points.push(Point::new(x, y));
        self.refit();
    }

    fn delete_near(&mut self, at: (f64, f64)) {
        match self.nearest_point(at) {
            Some(index) => {
                self.points.remove(index);
                self.refit();
            }
            None => self.status = "No point under the cursor.".to_string(),
        }
    }

    /// Index of the closest point within [`HIT_RADIUS_CELLS`] of `at`.
    fn nearest_point(&self, (x, y): (f64, f64)) -> Option<usize> {
        let (cw, ch) = self.cell_size();
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, ((p.x - x) / cw).abs().max(((p.y - y) / ch).abs())))
            .filter(|&(_, d)| d <= HIT_RADIUS_CELLS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn arrow(&mut self, dx: i32, dy: i32) {
        match self.mode {
            CursorMode::Move => self.view.pan(f64::from(dx) * PAN_STEP, f64::from(dy) * PAN_STEP),
            CursorMode::Point | CursorMode::Delete => {
                let (cw, ch) = self.cell_size();
                let x = (self.cursor.0 + f64::from(dx) * cw).clamp(self.view.x[0], self.view.x[1]);
                let y = (self.cursor.1 + f64::from(dy) * ch).clamp(self.view.y[0], self.view.y[1]);
                self.cursor = (x, y);
            }
        }
    }

    fn zoom(&mut self, delta: f64, about: (f64, f64)) {
        self.view.zoom(Viewport::zoom_factor(delta), about);
        if !self.view.contains(self.cursor.0, self.cursor.1) {
            self.cursor = self.view.center();
        }
    }

    fn save(&mut self) {
        self.status = match crate::io::write_points(&self.save_path, &self.points) {
            Ok(()) => format!("Saved {} points to {}", self.points.len(), self.save_path.display()),
            Err(err) => format!("Save failed: {err}"),
        };
    }

    fn chart_dims(&self) -> (u16, u16) {
        if self.chart_area.width > 1 && self.chart_area.height > 1 {
            (self.chart_area.width, self.chart_area.height)
        } else {
            FALLBACK_CHART
        }
    }

    /// Data-space size of one cell.
    fn cell_size(&self) -> (f64, f64) {
        let (cols, rows) = self.chart_dims();
        (
            self.view.x_span() / f64::from(cols - 1),
            self.view.y_span() / f64::from(rows - 1),
        )
    }

    /// Chart-relative cell for a terminal position, if it is on the chart.
    fn chart_cell(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        let a = self.chart_area;
        let inside = column >= a.x && column < a.x + a.width && row >= a.y && row < a.y + a.height;
        inside.then(|| (column - a.x, row - a.y))
    }

    fn cell_to_data(&self, col: u16, row: u16) -> (f64, f64) {
        let (cols, rows) = self.chart_dims();
        self.view.from_cell(col, row, cols, rows)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_canvas(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if self.show_help {
            draw_help(frame, size);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("sketchfit", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                " | algorithm: {} ({}) | mode: {} | points: {}",
                self.fit_id.display_name(),
                self.fit_id,
                self.mode.label(),
                self.points.len()
            )),
        ]));

        let quality = match &self.fit {
            Some(out) => format!(
                "scored={} sse={:.4} rmse={:.4}",
                out.quality.n_scored, out.quality.sse, out.quality.rmse
            ),
            None => "no curve".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "view: x=[{:.3}, {:.3}] y=[{:.3}, {:.3}] | {quality}",
                self.view.x[0], self.view.x[1], self.view.y[0], self.view.y[1]
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_canvas(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Canvas").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (chart_rect, insets) = chart_layout(inner);
        if self.chart_area.width == 0 {
            // First frame: shape the default view to the real cell aspect.
            if self.points.is_empty() {
                self.view = Viewport::default_for(cell_aspect(chart_rect.width, chart_rect.height));
                self.cursor = self.view.center();
            }
        }
        self.chart_area = chart_rect;

        let x_step = tick_step(self.view.x_span(), usize::from(chart_rect.width / 12).max(2));
        let y_step = tick_step(self.view.y_span(), usize::from(chart_rect.height / 4).max(2));
        let x_ticks = x_step.map(|(s, _)| tick_values(self.view.x, s)).unwrap_or_default();
        let y_ticks = y_step.map(|(s, _)| tick_values(self.view.y, s)).unwrap_or_default();

        let runs = match &self.fit {
            Some(out) => crate::plot::sample_curve(
                &out.curve,
                (self.view.x[0], self.view.x[1]),
                usize::from(chart_rect.width) * 2,
            ),
            None => Vec::new(),
        };

        let widget = CanvasChart {
            curve: &runs,
            family: self.fit.as_ref().map(|out| out.curve.family()),
            x_bounds: self.view.x,
            y_bounds: self.view.y,
            x_ticks: &x_ticks,
            y_ticks: &y_ticks,
        };
        frame.render_widget(widget, chart_rect);

        self.draw_markers(frame, chart_rect);
        if let Some(insets) = insets {
            let x_labels = x_step.map(|(_, e)| label_ticks(&x_ticks, e)).unwrap_or_default();
            let y_labels = y_step.map(|(_, e)| label_ticks(&y_ticks, e)).unwrap_or_default();
            self.draw_axis_ticks(frame, inner, chart_rect, insets, &x_labels, &y_labels);
        }
    }

    /// Points and the cursor, one cell each.
    fn draw_markers(&self, frame: &mut ratatui::Frame<'_>, chart: Rect) {
        let (cols, rows) = (chart.width, chart.height);
        let buf = frame.buffer_mut();

        let point_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        for p in &self.points {
            if let Some((c, r)) = self.view.to_cell(p.x, p.y, cols, rows) {
                buf.set_string(chart.x + c, chart.y + r, "●", point_style);
            }
        }

        let cursor = match self.mode {
            CursorMode::Move => None,
            CursorMode::Point => Some(("+", Color::Yellow)),
            CursorMode::Delete => Some(("x", Color::Red)),
        };
        let Some((symbol, color)) = cursor else {
            return;
        };
        if let Some((c, r)) = self.view.to_cell(self.cursor.0, self.cursor.1, cols, rows) {
            buf.set_string(chart.x + c, chart.y + r, symbol, Style::default().fg(color));
        }
    }

    fn draw_axis_ticks(
        &self,
        frame: &mut ratatui::Frame<'_>,
        inner: Rect,
        chart: Rect,
        insets: AxisInsets,
        x_labels: &[(f64, String)],
        y_labels: &[(f64, String)],
    ) {
        let style = Style::default().fg(Color::Gray);
        let (cols, rows) = (chart.width, chart.height);
        let (_, mid_y) = self.view.center();
        let (mid_x, _) = self.view.center();

        let y = chart.y + chart.height;
        if y < inner.y + inner.height {
            for (value, label) in x_labels {
                let Some((c, _)) = self.view.to_cell(*value, mid_y, cols, rows) else {
                    continue;
                };
                let label_len = label.chars().count() as u16;
                let start = (chart.x + c).saturating_sub(label_len / 2);
                if start + label_len > inner.x + inner.width {
                    continue;
                }
                frame.render_widget(
                    Paragraph::new(label.as_str()).style(style),
                    Rect {
                        x: start,
                        y,
                        width: label_len,
                        height: 1,
                    },
                );
            }
        }

        for (value, label) in y_labels {
            let Some((_, r)) = self.view.to_cell(mid_x, *value, cols, rows) else {
                continue;
            };
            let label_len = label.chars().count() as u16;
            let x = inner.x + insets.left.saturating_sub(1);
            let Some(start) = x.checked_sub(label_len) else {
                continue;
            };
            if start < inner.x {
                continue;
            }
            frame.render_widget(
                Paragraph::new(label.as_str()).style(style),
                Rect {
                    x: start,
                    y: chart.y + r,
                    width: label_len,
                    height: 1,
                },
            );
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "m mode  Tab/S-Tab algorithm  t type  +/- zoom  0 reset  f fit  s save  d debug  ? help  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_help(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("sketchfit", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Line::from("Place points, pick an algorithm, watch the curve follow."),
        Line::from(""),
        Line::from("m          cycle cursor mode (Move / Point / Delete)"),
        Line::from("arrows     pan (Move) or move the cursor (Point, Delete)"),
        Line::from("Enter      add (Point) or delete (Delete) at the cursor"),
        Line::from("mouse      click to add/delete, drag points or the canvas"),
        Line::from("wheel +/-  zoom"),
        Line::from("Tab S-Tab  next / previous algorithm"),
        Line::from("t          toggle regression / spline"),
        Line::from("0 f        reset view, fit view to points"),
        Line::from("c s d      clear points, save points, debug bundle"),
        Line::from("?  q       this help, quit"),
        Line::from(""),
        Line::from(Span::styled("press any key to start", Style::default().fg(Color::Gray))),
    ];

    let width = area.width.min(64);
    let height = area.height.min(lines.len() as u16 + 2);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, rect);
    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(p, rect);
}

/// Height/width of the chart in data units per unit of x, with cells ~2:1.
fn cell_aspect(cols: u16, rows: u16) -> f64 {
    if cols == 0 {
        return 1.0;
    }
    2.0 * f64::from(rows) / f64::from(cols)
}

fn label_ticks(values: &[f64], exp: i32) -> Vec<(f64, String)> {
    values
        .iter()
        .filter_map(|&v| tick_label(v, exp).map(|label| (v, label)))
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets { left: 8, bottom: 1 };

    if inner.width <= insets.left + 10 || inner.height <= insets.bottom + 4 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y,
        width: inner.width - insets.left,
        height: inner.height - insets.bottom,
    };

    (rect, Some(insets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(points: Vec<Point>, fit_id: &str) -> App {
        let mut app = App::new(points, fit_id.parse().unwrap(), PathBuf::from("unused.csv"));
        app.show_help = false;
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn help_is_shown_first_and_any_key_closes_it() {
        let mut app = App::new(Vec::new(), FitId::CubicSpline, PathBuf::from("unused.csv"));
        assert!(app.show_help);
        assert!(!app.handle_key(KeyCode::Char('m')).unwrap());
        assert!(!app.show_help);
        // The dismissing key is not applied.
        assert_eq!(app.mode, CursorMode::Move);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn tab_cycles_the_catalog_and_t_toggles_family() {
        let mut app = app(Vec::new(), "regression+1");
        app.handle_key(KeyCode::Tab).unwrap();
        assert_eq!(app.fit_id.to_string(), "regression+2");
        app.handle_key(KeyCode::BackTab).unwrap();
        app.handle_key(KeyCode::BackTab).unwrap();
        assert_eq!(app.fit_id, FitId::CubicSpline);
        app.handle_key(KeyCode::Char('t')).unwrap();
        assert_eq!(app.fit_id.to_string(), "regression+1");
        app.handle_key(KeyCode::Char('t')).unwrap();
        assert_eq!(app.fit_id, FitId::LinearSpline);
    }

    #[test]
    fn point_mode_adds_at_cursor_and_refits() {
        let mut app = app(Vec::new(), "regression+1");
        assert!(app.fit.is_none());
        app.handle_key(KeyCode::Char('m')).unwrap();
        assert_eq!(app.mode, CursorMode::Point);

        app.cursor = (0.0, 0.0);
        app.handle_key(KeyCode::Enter).unwrap();
        app.cursor = (2.0, 4.0);
        app.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(app.points.len(), 2);
        let fit = app.fit.as_ref().unwrap();
        assert!((fit.curve.evaluate(1.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn absent_fit_reports_the_reason() {
        let mut app = app(vec![Point::new(3.0, 3.0)], "spline+3");
        assert!(app.fit.is_none());
        assert!(app.status.contains("Cubic spline"));
        app.handle_key(KeyCode::Char('t')).unwrap();
        assert!(app.fit.is_none(), "one point is too few for a line");
    }

    #[test]
    fn delete_mode_removes_only_nearby_points() {
        let mut app = app(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)], "spline+1");
        app.view = Viewport::new([-5.0, 5.0], [-5.0, 5.0]);
        app.handle_key(KeyCode::Char('m')).unwrap();
        app.handle_key(KeyCode::Char('m')).unwrap();
        assert_eq!(app.mode, CursorMode::Delete);

        app.cursor = (1.05, 0.95);
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.points, vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);

        app.cursor = (4.0, 4.0);
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.points.len(), 2);
        assert_eq!(app.status, "No point under the cursor.");
    }

    #[test]
    fn arrows_pan_in_move_mode_and_move_the_cursor_otherwise() {
        let mut app = app(Vec::new(), "regression+1");
        app.view = Viewport::new([0.0, 10.0], [0.0, 10.0]);
        app.handle_key(KeyCode::Right).unwrap();
        assert_eq!(app.view.x, [1.0, 11.0]);

        app.handle_key(KeyCode::Char('m')).unwrap();
        let before = app.cursor;
        app.handle_key(KeyCode::Up).unwrap();
        assert_eq!(app.view.x, [1.0, 11.0]);
        assert!(app.cursor.1 > before.1);
    }

    #[test]
    fn zoom_keys_scale_about_the_centre() {
        let mut app = app(Vec::new(), "regression+1");
        app.view = Viewport::new([-5.0, 5.0], [-5.0, 5.0]);
        app.handle_key(KeyCode::Char('+')).unwrap();
        assert!((app.view.x_span() - 8.0).abs() < 1e-12);
        app.handle_key(KeyCode::Char('-')).unwrap();
        assert!((app.view.x_span() - 9.6).abs() < 1e-12);
        assert!(app.view.center().0.abs() < 1e-12);
    }

    #[test]
    fn mouse_click_adds_and_drag_moves_points() {
        let mut app = app(Vec::new(), "regression+1");
        app.view = Viewport::new([0.0, 10.0], [0.0, 10.0]);
        app.chart_area = Rect::new(10, 5, 11, 11);

        app.mode = CursorMode::Point;
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5)));
        assert_eq!(app.points, vec![Point::new(2.0, 10.0)]);
        // Clicks off the chart do nothing.
        assert!(!app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0)));

        app.mode = CursorMode::Move;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5));
        assert_eq!(app.drag, Some(Drag::Point(0)));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 15, 10));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 15, 10));
        assert_eq!(app.points, vec![Point::new(5.0, 5.0)]);
        assert_eq!(app.drag, None);
    }

    #[test]
    fn dragging_empty_canvas_pans() {
        let mut app = app(Vec::new(), "regression+1");
        app.view = Viewport::new([0.0, 10.0], [0.0, 10.0]);
        app.chart_area = Rect::new(0, 0, 11, 11);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 5));
        assert_eq!(app.view.x, [2.0, 12.0]);
        assert_eq!(app.view.y, [0.0, 10.0]);
    }

    #[test]
    fn scroll_zooms_about_the_pointer() {
        let mut app = app(Vec::new(), "regression+1");
        app.view = Viewport::new([0.0, 10.0], [0.0, 10.0]);
        app.chart_area = Rect::new(0, 0, 11, 11);

        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 10));
        assert!((app.view.x_span() - 10.5).abs() < 1e-12);
        // The pointer sat on (0, 0), which stays put.
        assert!(app.view.x[0].abs() < 1e-12 && app.view.y[0].abs() < 1e-12);

        app.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 10));
        assert!((app.view.x_span() - 10.5 * 0.95).abs() < 1e-12);
    }

    #[test]
    fn clear_and_fit_view() {
        let mut app = app(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)], "regression+1");
        app.view = Viewport::new([-1.0, 1.0], [-1.0, 1.0]);
        app.handle_key(KeyCode::Char('f')).unwrap();
        assert_eq!(app.view.x, [-1.0, 11.0]);

        app.handle_key(KeyCode::Char('c')).unwrap();
        assert!(app.points.is_empty());
        assert!(app.fit.is_none());
        app.handle_key(KeyCode::Char('f')).unwrap();
        assert_eq!(app.status, "No points to fit the view to.");
    }

    #[test]
    fn tick_labels_skip_the_origin() {
        let labels = label_ticks(&[-2.0, 0.0, 2.0], 0);
        assert_eq!(labels, vec![(-2.0, "-2".to_string()), (2.0, "2".to_string())]);
    }
}
