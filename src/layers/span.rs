use crate::core::{DataSnapshot, Interval, ScaleKind, SpanDatum, find_span_index_bounds, make_scale};
use crate::error::ChartResult;
use crate::layers::{DEFAULT_SPAN_FILL, Layer};
use crate::render::{Color, DrawContext};

/// Bands for interval records, optionally outlined.
///
/// Rectangles overshoot the top and bottom edges by one pixel so that a
/// border only shows on the left and right.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanLayer {
    pub data: DataSnapshot<SpanDatum>,
    pub x_domain: Interval,
    pub fill_color: Option<Color>,
    pub border_color: Option<Color>,
}

impl SpanLayer {
    #[must_use]
    pub fn new(data: DataSnapshot<SpanDatum>, x_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            fill_color: Some(DEFAULT_SPAN_FILL),
            border_color: None,
        }
    }

    #[must_use]
    pub fn with_fill_color(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    #[must_use]
    pub fn with_border_color(mut self, color: Option<Color>) -> Self {
        self.border_color = color;
        self
    }
}

impl Layer for SpanLayer {
    fn name(&self) -> &'static str {
        "span"
    }

    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()> {
        // A zero-width domain shows nothing.
        if self.x_domain.is_degenerate() {
            return Ok(());
        }
        let data = self.data.as_slice();
        let bounds = find_span_index_bounds(data, self.x_domain);
        if bounds.is_empty() {
            return Ok(());
        }

        let x_scale =
            make_scale(ScaleKind::Linear, self.x_domain, Interval::new(0.0, width)).rounded();

        context.set_line_width(1.0);
        if let Some(border) = self.border_color {
            context.set_stroke_style(border);
        }

        for datum in &data[bounds.indices()] {
            let left = x_scale.apply(datum.min_x_value);
            let right = x_scale.apply(datum.max_x_value);
            let span_width = right - left;
            context.begin_path();
            context.rect(
                left,
                -1.0,
                if span_width <= 0.0 { 1.0 } else { span_width },
                height + 2.0,
            );

            if let Some(fill) = datum.color.or(self.fill_color) {
                context.set_fill_style(fill);
                context.fill()?;
            }
            if self.border_color.is_some() {
                context.stroke()?;
            }
        }
        Ok(())
    }
}
