//! Plotters-powered fit chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`,
//! sharing `plot::chart::draw_figure` with the SVG renderer.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::chart::{Figure, Theme, draw_figure};

/// Render-only chart; all series and bounds are computed before `render()`.
pub struct FitPlottersChart<'a> {
    pub figure: &'a Figure,
    pub theme: Theme,
}

impl<'a> Widget for FitPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let figure = self.figure;
        let theme = self.theme;
        let widget = widget_fn(move |root| {
            draw_figure(&root, figure, &theme)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
