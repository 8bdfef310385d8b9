use crate::core::{Interval, ScaleKind, make_scale};
use crate::error::ChartResult;
use crate::layers::{DEFAULT_SERIES_COLOR, DEFAULT_SPAN_FILL, Layer};
use crate::render::{Color, DrawContext};

/// Highlighted brush selection over the x domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushLayer {
    pub x_domain: Interval,
    pub selection: Option<Interval>,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
}

impl BrushLayer {
    #[must_use]
    pub fn new(x_domain: Interval, selection: Option<Interval>) -> Self {
        Self {
            x_domain,
            selection,
            stroke: Some(DEFAULT_SERIES_COLOR),
            fill: Some(DEFAULT_SPAN_FILL),
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Option<Color>) -> Self {
        self.stroke = stroke;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }
}

impl Layer for BrushLayer {
    fn name(&self) -> &'static str {
        "brush"
    }

    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()> {
        // Crisp 1px edges on integer coordinates.
        context.translate(0.5, 0.5);

        let Some(selection) = self.selection else {
            return Ok(());
        };
        if self.x_domain.is_degenerate() {
            return Ok(());
        }

        let x_scale =
            make_scale(ScaleKind::Linear, self.x_domain, Interval::new(0.0, width)).rounded();
        let left = x_scale.apply(selection.min);
        let right = x_scale.apply(selection.max);

        context.begin_path();
        context.rect(left, -1.0, right - left, height + 2.0);

        if let Some(stroke) = self.stroke {
            context.set_line_width(1.0);
            context.set_stroke_style(stroke);
            context.stroke()?;
        }
        if let Some(fill) = self.fill {
            context.set_fill_style(fill);
            context.fill()?;
        }
        Ok(())
    }
}
