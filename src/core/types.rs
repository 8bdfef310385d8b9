use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Closed numeric range used for both x (time) and y (value) domains.
///
/// Callers keep `min <= max`; `normalized` repairs reversed input.
/// `{ "start": .., "end": .. }` is accepted as an alias on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    #[serde(alias = "start")]
    pub min: f64,
    #[serde(alias = "end")]
    pub max: f64,
}

impl Interval {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self::new(self.max, self.min)
        }
    }

    /// Shifts both ends by `delta` domain units.
    #[must_use]
    pub fn panned(self, delta: f64) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }

    /// Scales the span by `factor` around `focus`.
    ///
    /// `factor > 1.0` zooms out, `0.0 < factor < 1.0` zooms in. `focus` keeps
    /// its relative position inside the interval.
    #[must_use]
    pub fn zoomed(self, factor: f64, focus: f64) -> Self {
        Self::new(
            focus - (focus - self.min) * factor,
            focus + (self.max - focus) * factor,
        )
    }
}

/// One sample of a series. Sequences are sorted ascending by `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: f64,
    pub value: f64,
}

impl DataPoint {
    #[must_use]
    pub const fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Interval-valued record, e.g. an event duration. Sorted by `min_x_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanDatum {
    pub min_x_value: f64,
    pub max_x_value: f64,
    #[serde(default)]
    pub color: Option<Color>,
}

impl SpanDatum {
    #[must_use]
    pub const fn new(min_x_value: f64, max_x_value: f64) -> Self {
        Self {
            min_x_value,
            max_x_value,
            color: None,
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Time span with an optional per-record fill. Sorted by `time_span.min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpanDatum {
    pub time_span: Interval,
    #[serde(default)]
    pub color: Option<Color>,
}

impl TimeSpanDatum {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            time_span: Interval::new(min, max),
            color: None,
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Min/max envelope of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketBounds {
    pub start_time: f64,
    pub end_time: f64,
    pub min_value: f64,
    pub max_value: f64,
}

/// Pre-aggregated bucket of raw samples, sorted by `bounds.start_time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketDatum {
    pub bounds: BucketBounds,
    pub earliest_point: DataPoint,
    pub latest_point: DataPoint,
}

impl BucketDatum {
    /// Builds a bucket whose time bounds follow its boundary samples.
    #[must_use]
    pub fn from_samples(
        earliest_point: DataPoint,
        latest_point: DataPoint,
        min_value: f64,
        max_value: f64,
    ) -> Self {
        Self {
            bounds: BucketBounds {
                start_time: earliest_point.timestamp,
                end_time: latest_point.timestamp,
                min_value,
                max_value,
            },
            earliest_point,
            latest_point,
        }
    }
}

/// Immutable data snapshot shared between the host and a layer.
///
/// Equality is identity: two snapshots are equal only when they share the
/// same allocation. Replacing the snapshot is therefore the change signal for
/// render gating, and comparing never walks the data.
#[derive(Debug)]
pub struct DataSnapshot<T>(Arc<[T]>);

impl<T> DataSnapshot<T> {
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self(Arc::from(data))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Clone for DataSnapshot<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for DataSnapshot<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> PartialEq for DataSnapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Deref for DataSnapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for DataSnapshot<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

/// Logical (CSS pixel) size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
