//! Render layers: pure functions of their props and the surface size.
//!
//! Each layer draws into a context prepared by
//! [`CanvasSurface::reset_canvas`](crate::render::CanvasSurface::reset_canvas)
//! and returns early, drawing nothing, when its input has nothing visible.

mod brush;
mod bucketed_line;
mod hover;
mod point;
mod span;
mod time_span;
mod x_axis;

pub use brush::BrushLayer;
pub use bucketed_line::BucketedLineLayer;
pub use hover::HoverLayer;
pub use point::{PointLayer, PointStyle};
pub use span::SpanLayer;
pub use time_span::TimeSpanLayer;
pub use x_axis::XAxisLayer;

use crate::error::ChartResult;
use crate::render::{Color, DrawContext};

/// Opaque series color used by point and bucketed-line layers.
pub const DEFAULT_SERIES_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.7);
/// Translucent fill used by span, time-span and brush layers.
pub const DEFAULT_SPAN_FILL: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);
/// `#444`, the axis text and gridline color.
pub const DEFAULT_AXIS_COLOR: Color = Color::rgb(68.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0);

/// One canvas layer of a chart.
pub trait Layer {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Draws the layer into a `width` x `height` logical-pixel area.
    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()>;
}
