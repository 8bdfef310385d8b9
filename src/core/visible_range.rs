//! Binary search for the slice of a sorted dataset that intersects a domain.
//!
//! All functions assume the input is sorted ascending by the searched key(s).
//! Unsorted input is a precondition violation: results are unspecified but
//! never out of bounds.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::{BucketDatum, DataPoint, Interval, SpanDatum, TimeSpanDatum};

/// How `last_index` of an [`IndexBounds`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsKind {
    /// `first_index..=last_index` (point data).
    Inclusive,
    /// `first_index..last_index` (interval data).
    Exclusive,
}

/// Result of a visible-range search.
///
/// `first_index == last_index` means there is nothing to draw, whatever the
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBounds {
    pub first_index: usize,
    pub last_index: usize,
    pub kind: BoundsKind,
}

impl IndexBounds {
    #[must_use]
    pub const fn empty(kind: BoundsKind) -> Self {
        Self {
            first_index: 0,
            last_index: 0,
            kind,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.first_index == self.last_index
    }

    /// Indices to visit; empty when [`IndexBounds::is_empty`] holds.
    #[must_use]
    pub fn indices(self) -> Range<usize> {
        if self.is_empty() {
            return self.first_index..self.first_index;
        }
        match self.kind {
            BoundsKind::Inclusive => self.first_index..self.last_index + 1,
            BoundsKind::Exclusive => self.first_index..self.last_index,
        }
    }

    /// Number of records in [`IndexBounds::indices`].
    #[must_use]
    pub fn len(self) -> usize {
        self.indices().len()
    }
}

/// Record with a single x key.
pub trait PointKey {
    fn x_key(&self) -> f64;
}

/// Record covering an x interval `[start_key, end_key]`.
pub trait SpanKeys {
    fn start_key(&self) -> f64;
    fn end_key(&self) -> f64;
}

impl PointKey for DataPoint {
    fn x_key(&self) -> f64 {
        self.timestamp
    }
}

impl SpanKeys for SpanDatum {
    fn start_key(&self) -> f64 {
        self.min_x_value
    }

    fn end_key(&self) -> f64 {
        self.max_x_value
    }
}

impl SpanKeys for TimeSpanDatum {
    fn start_key(&self) -> f64 {
        self.time_span.min
    }

    fn end_key(&self) -> f64 {
        self.time_span.max
    }
}

impl SpanKeys for BucketDatum {
    fn start_key(&self) -> f64 {
        self.bounds.start_time
    }

    fn end_key(&self) -> f64 {
        self.bounds.end_time
    }
}

/// Visible bounds for point records keyed by [`PointKey`].
#[must_use]
pub fn find_visible_index_bounds<T: PointKey>(data: &[T], domain: Interval) -> IndexBounds {
    visible_index_bounds_by(data, domain, T::x_key)
}

/// Visible bounds for interval records keyed by [`SpanKeys`].
#[must_use]
pub fn find_span_index_bounds<T: SpanKeys>(data: &[T], domain: Interval) -> IndexBounds {
    span_index_bounds_by(data, domain, T::start_key, T::end_key)
}

/// Inclusive bounds covering every record whose key lies in `domain`, plus at
/// most one neighbour on each side so that shapes crossing the viewport edge
/// stay connected.
///
/// If the domain lies entirely outside the data the result collapses onto the
/// nearer edge (`first_index == last_index`).
pub fn visible_index_bounds_by<T, K>(data: &[T], domain: Interval, key: K) -> IndexBounds
where
    K: Fn(&T) -> f64,
{
    if data.is_empty() {
        return IndexBounds::empty(BoundsKind::Inclusive);
    }

    let below = data.partition_point(|record| key(record) < domain.min);
    let through = data.partition_point(|record| key(record) <= domain.max);
    let last = data.len() - 1;

    IndexBounds {
        first_index: below.saturating_sub(1).min(last),
        last_index: through.min(last),
        kind: BoundsKind::Inclusive,
    }
}

/// Half-open bounds over interval records: from the first record ending at or
/// after `domain.min` to one past the last record starting at or before
/// `domain.max`. Records straddling either edge are included.
///
/// Both key sequences must be ascending.
pub fn span_index_bounds_by<T, S, E>(
    data: &[T],
    domain: Interval,
    start_key: S,
    end_key: E,
) -> IndexBounds
where
    S: Fn(&T) -> f64,
    E: Fn(&T) -> f64,
{
    if data.is_empty() {
        return IndexBounds::empty(BoundsKind::Exclusive);
    }

    let first_index = data.partition_point(|record| end_key(record) < domain.min);
    let last_index = data.partition_point(|record| start_key(record) <= domain.max);

    IndexBounds {
        first_index,
        last_index: last_index.max(first_index),
        kind: BoundsKind::Exclusive,
    }
}
