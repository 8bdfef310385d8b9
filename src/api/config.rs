use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{BucketDatum, DataPoint, DataSnapshot, Interval, SpanDatum, TimeSpanDatum};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionCapture, InteractionConfig};
use crate::layers::{
    BrushLayer, BucketedLineLayer, DEFAULT_AXIS_COLOR, DEFAULT_SERIES_COLOR, DEFAULT_SPAN_FILL,
    HoverLayer, PointLayer, PointStyle, SpanLayer, TimeSpanLayer, XAxisLayer,
};
use crate::render::{CanvasSurface, Color, DrawContext, FontSpec};

fn default_pixel_ratio() -> f64 {
    1.0
}

fn default_series_color() -> Color {
    DEFAULT_SERIES_COLOR
}

fn default_span_fill() -> Color {
    DEFAULT_SPAN_FILL
}

fn default_axis_color() -> Color {
    DEFAULT_AXIS_COLOR
}

fn default_point_radius() -> f64 {
    3.0
}

/// Default colors and fonts handed to layers built through the theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerTheme {
    #[serde(default = "default_series_color")]
    pub series_color: Color,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(default = "default_span_fill")]
    pub span_fill: Color,
    #[serde(default)]
    pub span_border: Option<Color>,
    #[serde(default = "default_series_color")]
    pub brush_stroke: Color,
    #[serde(default = "default_span_fill")]
    pub brush_fill: Color,
    #[serde(default = "default_axis_color")]
    pub axis_color: Color,
    #[serde(default)]
    pub axis_font: FontSpec,
    #[serde(default = "default_series_color")]
    pub hover_color: Color,
}

impl Default for LayerTheme {
    fn default() -> Self {
        Self {
            series_color: default_series_color(),
            point_radius: default_point_radius(),
            span_fill: default_span_fill(),
            span_border: None,
            brush_stroke: default_series_color(),
            brush_fill: default_span_fill(),
            axis_color: default_axis_color(),
            axis_font: FontSpec::default(),
            hover_color: default_series_color(),
        }
    }
}

impl LayerTheme {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.series_color,
            self.span_fill,
            self.brush_stroke,
            self.brush_fill,
            self.axis_color,
            self.hover_color,
        ] {
            color.validate()?;
        }
        if let Some(border) = self.span_border {
            border.validate()?;
        }
        if !self.point_radius.is_finite() || self.point_radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "point radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.axis_font.size_px.is_finite() || self.axis_font.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn point_layer(
        &self,
        data: DataSnapshot<DataPoint>,
        x_domain: Interval,
        y_domain: Interval,
    ) -> PointLayer {
        PointLayer::new(data, x_domain, y_domain).with_style(PointStyle {
            fill: Some(self.series_color),
            stroke: None,
            radius: self.point_radius,
        })
    }

    #[must_use]
    pub fn bucketed_line_layer(
        &self,
        data: DataSnapshot<BucketDatum>,
        x_domain: Interval,
        y_domain: Interval,
    ) -> BucketedLineLayer {
        BucketedLineLayer::new(data, x_domain, y_domain).with_color(self.series_color)
    }

    #[must_use]
    pub fn time_span_layer(
        &self,
        data: DataSnapshot<TimeSpanDatum>,
        x_domain: Interval,
    ) -> TimeSpanLayer {
        TimeSpanLayer::new(data, x_domain).with_default_color(self.span_fill)
    }

    #[must_use]
    pub fn span_layer(&self, data: DataSnapshot<SpanDatum>, x_domain: Interval) -> SpanLayer {
        SpanLayer::new(data, x_domain)
            .with_fill_color(Some(self.span_fill))
            .with_border_color(self.span_border)
    }

    #[must_use]
    pub fn brush_layer(&self, x_domain: Interval, selection: Option<Interval>) -> BrushLayer {
        BrushLayer::new(x_domain, selection)
            .with_stroke(Some(self.brush_stroke))
            .with_fill(Some(self.brush_fill))
    }

    #[must_use]
    pub fn x_axis_layer(&self, x_domain: Interval) -> XAxisLayer {
        XAxisLayer::new(x_domain)
            .with_color(self.axis_color)
            .with_font(self.axis_font.clone())
    }

    #[must_use]
    pub fn hover_layer(&self, x_domain: Interval, hover: Option<f64>) -> HoverLayer {
        HoverLayer::new(x_domain, hover).with_color(self.hover_color)
    }
}

/// Host-facing chart configuration.
///
/// Serializable so hosts can persist and load chart setup as JSON; every
/// field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub theme: LayerTheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: default_pixel_ratio(),
            interaction: InteractionConfig::default(),
            theme: LayerTheme::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: LayerTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "pixel ratio must be finite and > 0, got {}",
                self.pixel_ratio
            )));
        }
        self.interaction.validate()?;
        self.theme.validate()
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejecting chart config");
            return Err(err);
        }
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }

    /// Surface over `context` at the configured pixel ratio.
    pub fn build_surface<C: DrawContext>(&self, context: C) -> ChartResult<CanvasSurface<C>> {
        CanvasSurface::new(context, self.pixel_ratio)
    }

    #[must_use]
    pub fn interaction_capture(&self) -> InteractionCapture {
        InteractionCapture::new(self.interaction)
    }
}
