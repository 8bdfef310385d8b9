use crate::core::{
    DataSnapshot, Interval, ScaleKind, TimeSpanDatum, find_span_index_bounds, make_scale,
};
use crate::error::ChartResult;
use crate::layers::{DEFAULT_SPAN_FILL, Layer};
use crate::render::{Color, DrawContext};

/// Full-height bands, one per visible time span.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpanLayer {
    pub data: DataSnapshot<TimeSpanDatum>,
    pub x_domain: Interval,
    /// Fill for records without their own color.
    pub default_color: Color,
}

impl TimeSpanLayer {
    #[must_use]
    pub fn new(data: DataSnapshot<TimeSpanDatum>, x_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            default_color: DEFAULT_SPAN_FILL,
        }
    }

    #[must_use]
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }
}

impl Layer for TimeSpanLayer {
    fn name(&self) -> &'static str {
        "time-span"
    }

    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()> {
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

        for datum in &data[bounds.indices()] {
            let left = x_scale.apply(datum.time_span.min);
            let right = x_scale.apply(datum.time_span.max);
            context.begin_path();
            context.rect(left, 0.0, (right - left).max(1.0), height);
            context.set_fill_style(datum.color.unwrap_or(self.default_color));
            context.fill()?;
        }
        Ok(())
    }
}
