//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a pipe
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observations: `o`
//! - fitted line: `-`

use crate::domain::{FitParameters, FittedSeries, Observation};
use crate::error::AppError;
use crate::plot::{Bounds, DATA_LABEL, TITLE, ensure_aligned, fitted_line};

/// Render observations and their fitted line into a `width` x `height` grid.
pub fn render_ascii_plot(
    observations: &[Observation],
    fitted: &FittedSeries,
    params: &FitParameters,
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    ensure_aligned(observations, fitted)?;

    let width = width.max(10);
    let height = height.max(5);
    let bounds = Bounds::from_series(observations, fitted);
    let [x_min, x_max] = bounds.x;
    let [y_min, y_max] = bounds.y;

    let mut grid = vec![vec![' '; width]; height];

    // Line first so observations overlay it.
    draw_polyline(&mut grid, &fitted_line(observations, fitted), &bounds);

    for o in observations.iter().filter(|o| o.x.is_finite() && o.y.is_finite()) {
        let x = map_x(o.x, x_min, x_max, width);
        let y = map_y(o.y, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{TITLE}: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!("o {DATA_LABEL}  - {}\n", params.equation_label()));

    Ok(out)
}

/// Position of `v` in `[lo, hi]` as a fraction. Halving first keeps the span
/// finite when `hi - lo` exceeds f64::MAX.
fn unit(v: f64, lo: f64, hi: f64) -> f64 {
    ((v * 0.5 - lo * 0.5) / (hi * 0.5 - lo * 0.5)).clamp(0.0, 1.0)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = unit(x, x_min, x_max);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = unit(y, y_min, y_max);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], vertices: &[(f64, f64)], bounds: &Bounds) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in vertices.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        let gx = map_x(x, bounds.x[0], bounds.x[1], width);
        let gy = map_y(y, bounds.y[0], bounds.y[1], height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, gx, gy, '-'),
            None => grid[gy][gx] = '-',
        }
        prev = Some((gx, gy));
    }
}

/// Integer line drawing (Bresenham).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
