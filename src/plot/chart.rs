//! Plotters figure: observations as markers, fitted series as a line, with legend.
//!
//! `draw_figure` is backend-agnostic so the same figure is drawn into an SVG
//! file and into the terminal viewer (via `plotters-ratatui-backend`). Only the
//! `Theme` differs between the two.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::domain::{FitParameters, FittedSeries, Observation};
use crate::error::AppError;
use crate::plot::{Bounds, DATA_LABEL, TITLE, X_LABEL, Y_LABEL, ensure_aligned, fitted_line};

/// Render-ready series and bounds.
///
/// All data prep happens here, outside any backend, so drawing stays a pure
/// function of this struct.
#[derive(Debug, Clone)]
pub struct Figure {
    pub points: Vec<(f64, f64)>,
    pub line: Vec<(f64, f64)>,
    pub bounds: Bounds,
    pub line_label: String,
}

impl Figure {
    pub fn new(
        observations: &[Observation],
        fitted: &FittedSeries,
        params: &FitParameters,
    ) -> Result<Self, AppError> {
        ensure_aligned(observations, fitted)?;

        let bounds = Bounds::from_series(observations, fitted);
        if !bounds.is_drawable() {
            return Err(AppError::render(format!(
                "Cannot draw axes x={:?} y={:?}: the data range exceeds what f64 can represent.",
                bounds.x, bounds.y
            )));
        }

        Ok(Self {
            points: observations
                .iter()
                .filter(|o| o.x.is_finite() && o.y.is_finite())
                .map(|o| (o.x, o.y))
                .collect(),
            line: fitted_line(observations, fitted)
                .into_iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect(),
            bounds,
            line_label: params.equation_label(),
        })
    }
}

/// How observation markers are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle(u32),
    /// Single cell; used in terminals where circle radii don't map cleanly.
    Pixel,
}

/// Backend-specific styling.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Option<RGBColor>,
    pub foreground: RGBColor,
    pub point_color: RGBColor,
    pub line_color: RGBColor,
    pub marker: Marker,
    pub title: bool,
    pub caption_size: f64,
    pub label_size: f64,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

impl Theme {
    /// White page, for image files.
    pub fn document() -> Self {
        Self {
            background: Some(WHITE),
            foreground: BLACK,
            point_color: RGBColor(31, 119, 180),
            line_color: RED,
            marker: Marker::Circle(4),
            title: true,
            caption_size: 28.0,
            label_size: 16.0,
            margin: 20,
            x_label_area: 50,
            y_label_area: 70,
        }
    }

    /// High-contrast palette on the terminal's own background.
    pub fn terminal() -> Self {
        Self {
            background: None,
            foreground: WHITE,
            point_color: RGBColor(0, 255, 255),
            line_color: RED,
            marker: Marker::Pixel,
            // The enclosing block already carries the title.
            title: false,
            caption_size: 10.0,
            label_size: 10.0,
            margin: 1,
            x_label_area: 3,
            y_label_area: 8,
        }
    }
}

/// Draw the figure onto any Plotters drawing area.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    // Plotters loops forever on infinite or empty ranges.
    if !figure.bounds.is_drawable() {
        return Err(DrawingAreaErrorKind::LayoutError);
    }

    if let Some(bg) = theme.background {
        root.fill(&bg)?;
    }
    let [x0, x1] = figure.bounds.x;
    let [y0, y1] = figure.bounds.y;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(theme.margin)
        .set_label_area_size(LabelAreaPosition::Left, theme.y_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, theme.x_label_area);
    if theme.title {
        builder.caption(TITLE, ("sans-serif", theme.caption_size).into_font().color(&theme.foreground));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    let label_style = ("sans-serif", theme.label_size).into_font().color(&theme.foreground);
    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .x_labels(6)
        .y_labels(6)
        .label_style(label_style.clone())
        .axis_desc_style(label_style.clone())
        .axis_style(&theme.foreground)
        .light_line_style(&theme.foreground.mix(0.08))
        .bold_line_style(&theme.foreground.mix(0.2))
        .draw()?;

    let point_color = theme.point_color;
    match theme.marker {
        Marker::Circle(radius) => chart.draw_series(
            figure
                .points
                .iter()
                .map(|&p| Circle::new(p, radius, point_color.filled())),
        )?,
        Marker::Pixel => chart.draw_series(figure.points.iter().map(|&p| Pixel::new(p, point_color)))?,
    }
    .label(DATA_LABEL)
    .legend(move |(x, y)| Rectangle::new([(x + 6, y - 3), (x + 12, y + 3)], point_color.filled()));

    let line_color = theme.line_color;
    chart
        .draw_series(LineSeries::new(figure.line.iter().copied(), line_color.stroke_width(2)))?
        .label(figure.line_label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2)));

    let mut labels = chart.configure_series_labels();
    labels
        .label_font(label_style)
        .border_style(&theme.foreground.mix(0.3))
        .position(SeriesLabelPosition::UpperLeft);
    if let Some(bg) = theme.background {
        labels.background_style(&bg.mix(0.8));
    }
    labels.draw()?;

    root.present()?;
    Ok(())
}

/// Write the figure to an SVG file of `width` x `height` pixels.
pub fn render_chart_file(
    path: &Path,
    width: u32,
    height: u32,
    observations: &[Observation],
    fitted: &FittedSeries,
    params: &FitParameters,
) -> Result<(), AppError> {
    let figure = Figure::new(observations, fitted, params)?;
    tracing::debug!(x = ?figure.bounds.x, y = ?figure.bounds.y, "chart bounds");

    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    draw_figure(&root, &figure, &Theme::document())
        .map_err(|e| AppError::render(format!("Failed to render chart '{}': {e}", path.display())))?;

    tracing::info!(output = %path.display(), width, height, "wrote chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate;

    #[test]
    fn figure_collects_points_line_and_label() {
        let obs = [Observation::new(2.0, 1.0), Observation::new(1.0, 3.0)];
        let params = FitParameters::new(2.0, -1.0);
        let fitted = evaluate(&obs, &params);

        let fig = Figure::new(&obs, &fitted, &params).unwrap();
        assert_eq!(fig.points, vec![(2.0, 1.0), (1.0, 3.0)]);
        assert_eq!(fig.line, vec![(1.0, 1.0), (2.0, 3.0)]);
        assert_eq!(fig.line_label, "y = 2x + -1");
    }

    #[test]
    fn svg_contains_labels_and_legend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let obs = [
            Observation::new(1.0, 2.1),
            Observation::new(2.0, 3.9),
            Observation::new(3.0, 6.2),
        ];
        let params = FitParameters::new(2.0, 0.0);
        let fitted = evaluate(&obs, &params);

        render_chart_file(&path, 640, 480, &obs, &fitted, &params).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(TITLE));
        assert!(svg.contains(X_LABEL));
        assert!(svg.contains(Y_LABEL));
        assert!(svg.contains("y = 2x + 0"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn svg_render_rejects_range_wider_than_f64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.svg");
        let obs = [Observation::new(-1e308, 0.0), Observation::new(1e308, 0.0)];
        let params = FitParameters::new(0.0, 0.0);
        let fitted = evaluate(&obs, &params);

        let err = render_chart_file(&path, 320, 240, &obs, &fitted, &params).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RENDER);
        assert!(err.to_string().contains("Cannot draw axes"));
    }

    #[test]
    fn draw_figure_refuses_undrawable_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        let figure = Figure {
            points: vec![(0.0, 0.0)],
            line: Vec::new(),
            bounds: Bounds { x: [f64::NEG_INFINITY, f64::INFINITY], y: [1.0, 1.0] },
            line_label: String::new(),
        };
        let root = SVGBackend::new(&path, (320, 240)).into_drawing_area();
        assert!(matches!(
            draw_figure(&root, &figure, &Theme::document()),
            Err(DrawingAreaErrorKind::LayoutError)
        ));
    }

    #[test]
    fn svg_renders_equal_large_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.svg");
        let obs = [Observation::new(1e20, 1e20), Observation::new(1e20, 1e20)];
        let params = FitParameters::new(1.0, 0.0);
        let fitted = evaluate(&obs, &params);

        render_chart_file(&path, 320, 240, &obs, &fitted, &params).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<circle"));
    }

    #[test]
    fn svg_render_rejects_misaligned_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.svg");
        let obs = [Observation::new(1.0, 2.0)];
        let err = render_chart_file(&path, 320, 240, &obs, &FittedSeries::default(), &FitParameters::new(1.0, 0.0))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RENDER);
    }
}
