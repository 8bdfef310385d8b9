pub mod scale;
pub mod ticks;
pub mod types;
pub mod visible_range;

pub use scale::{Scale, ScaleKind, make_scale};
pub use ticks::{ComputedTicks, MAX_TICKS, TickFormat, TickFormatter, Ticks, compute_ticks};
pub use types::{
    BucketBounds, BucketDatum, DataPoint, DataSnapshot, Interval, SpanDatum, SurfaceSize,
    TimeSpanDatum,
};
pub use visible_range::{
    BoundsKind, IndexBounds, PointKey, SpanKeys, find_span_index_bounds,
    find_visible_index_bounds,
};
