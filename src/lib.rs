//! layered-chart: headless render core for layered time-series charts.
//!
//! Each chart is a stack of independent layers (points, bucketed lines,
//! spans, brush, axis, hover), each drawing onto its own
//! [`CanvasSurface`](render::CanvasSurface). A layer binary-searches its
//! sorted data for the visible index range, maps domain values to pixels with
//! a [`Scale`](core::Scale) and issues immediate-mode calls against a
//! [`DrawContext`](render::DrawContext).
//!
//! Drawing backends: [`RecordingContext`](render::RecordingContext) for
//! headless use and tests, and a Cairo/Pango context behind the
//! `cairo-backend` feature.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layers;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, LayerHost};
pub use error::{ChartError, ChartResult};
