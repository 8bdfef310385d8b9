use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    DataPoint, DataSnapshot, Interval, ScaleKind, find_visible_index_bounds, make_scale,
};
use crate::error::ChartResult;
use crate::layers::{DEFAULT_SERIES_COLOR, Layer};
use crate::render::{Color, DrawContext};

fn default_radius() -> f64 {
    3.0
}

fn default_fill() -> Option<Color> {
    Some(DEFAULT_SERIES_COLOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    #[serde(default = "default_fill")]
    pub fill: Option<Color>,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            fill: default_fill(),
            stroke: None,
            radius: default_radius(),
        }
    }
}

/// Scatter of circles, one per visible sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLayer {
    pub data: DataSnapshot<DataPoint>,
    pub x_domain: Interval,
    pub y_domain: Interval,
    pub y_scale_kind: ScaleKind,
    pub style: PointStyle,
}

impl PointLayer {
    #[must_use]
    pub fn new(data: DataSnapshot<DataPoint>, x_domain: Interval, y_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            y_domain,
            y_scale_kind: ScaleKind::Linear,
            style: PointStyle::default(),
        }
    }

    #[must_use]
    pub fn with_y_scale_kind(mut self, kind: ScaleKind) -> Self {
        self.y_scale_kind = kind;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: PointStyle) -> Self {
        self.style = style;
        self
    }
}

impl Layer for PointLayer {
    fn name(&self) -> &'static str {
        "point"
    }

    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()> {
        let data = self.data.as_slice();
        // A lone sample or a zero-width domain draws nothing.
        if data.len() < 2 || self.x_domain.is_degenerate() {
            return Ok(());
        }

        let bounds = find_visible_index_bounds(data, self.x_domain);
        if bounds.is_empty() {
            return Ok(());
        }
        trace!(
            layer = self.name(),
            first_index = bounds.first_index,
            last_index = bounds.last_index,
            "visible bounds"
        );

        // Unrounded so that points glide smoothly while panning.
        let x_scale = make_scale(ScaleKind::Linear, self.x_domain, Interval::new(0.0, width));
        let y_scale = make_scale(self.y_scale_kind, self.y_domain, Interval::new(height, 0.0));
        let radius = self.style.radius;

        context.begin_path();
        for point in &data[bounds.indices()] {
            let x = x_scale.apply(point.timestamp);
            let y = y_scale.apply(point.value);
            context.move_to(x + radius, y);
            context.arc(x, y, radius, 0.0, TAU);
        }

        if let Some(stroke) = self.style.stroke {
            context.set_stroke_style(stroke);
            context.stroke()?;
        }
        if let Some(fill) = self.style.fill {
            context.set_fill_style(fill);
            context.fill()?;
        }
        Ok(())
    }
}
