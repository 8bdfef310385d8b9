use crate::core::{Interval, ScaleKind, make_scale};
use crate::error::ChartResult;
use crate::layers::{DEFAULT_SERIES_COLOR, Layer};
use crate::render::{Color, DrawContext};

/// Vertical marker at the hovered x value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverLayer {
    pub x_domain: Interval,
    pub hover: Option<f64>,
    pub color: Color,
}

impl HoverLayer {
    #[must_use]
    pub fn new(x_domain: Interval, hover: Option<f64>) -> Self {
        Self {
            x_domain,
            hover,
            color: DEFAULT_SERIES_COLOR,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Layer for HoverLayer {
    fn name(&self) -> &'static str {
        "hover"
    }

    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()> {
        let Some(hover) = self.hover else {
            return Ok(());
        };
        if self.x_domain.is_degenerate() || !self.x_domain.normalized().contains(hover) {
            return Ok(());
        }

        let x_scale =
            make_scale(ScaleKind::Linear, self.x_domain, Interval::new(0.0, width)).rounded();
        let x = x_scale.apply(hover) + 0.5;

        context.begin_path();
        context.move_to(x, 0.0);
        context.line_to(x, height);
        context.set_line_width(1.0);
        context.set_stroke_style(self.color);
        context.stroke()
    }
}
