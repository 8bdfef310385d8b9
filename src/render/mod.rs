mod context;
mod primitives;
mod surface;

pub use context::{DrawCommand, DrawContext, RecordingContext};
pub use primitives::{Color, FontSpec, TextAlign, TextBaseline};
pub use surface::{CanvasSurface, SubscriptionId, SurfaceFrame};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContext, CairoDrawStats};
