use tracing::trace;

use crate::core::{
    BucketDatum, DataSnapshot, Interval, Scale, ScaleKind, find_span_index_bounds, make_scale,
};
use crate::error::ChartResult;
use crate::layers::{DEFAULT_SERIES_COLOR, Layer};
use crate::render::{Color, DrawContext};

/// Pixel geometry of one bucket. `y` values grow upwards from the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BucketGeometry {
    earliest_y: f64,
    latest_y: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BucketGeometry {
    fn compute(datum: &BucketDatum, x_scale: Scale, y_scale: Scale) -> Self {
        let earliest_x = x_scale.apply(datum.earliest_point.timestamp).ceil();
        let latest_x = x_scale.apply(datum.latest_point.timestamp).floor();

        // At least one pixel wide, so a bucket spanning several values
        // always covers a column.
        let (x1, x2) = if latest_x - earliest_x < 1.0 {
            (earliest_x, earliest_x + 1.0)
        } else {
            (earliest_x, latest_x)
        };

        Self {
            earliest_y: y_scale.apply(datum.earliest_point.value).floor(),
            latest_y: y_scale.apply(datum.latest_point.value).floor(),
            x1,
            x2,
            y1: y_scale.apply(datum.bounds.min_value).floor(),
            y2: y_scale.apply(datum.bounds.max_value).floor(),
        }
    }

    fn width(self) -> f64 {
        self.x2 - self.x1
    }

    fn height(self) -> f64 {
        self.y2 - self.y1
    }

    fn has_bar(self) -> bool {
        self.width() >= 1.0 && self.height() >= 1.0
    }
}

/// Per-pass memo of bucket geometry, indexed from the first visible bucket.
struct GeometryCache<'a> {
    data: &'a [BucketDatum],
    first_index: usize,
    x_scale: Scale,
    y_scale: Scale,
    slots: Vec<Option<BucketGeometry>>,
}

impl<'a> GeometryCache<'a> {
    fn new(
        data: &'a [BucketDatum],
        first_index: usize,
        last_index: usize,
        x_scale: Scale,
        y_scale: Scale,
    ) -> Self {
        Self {
            data,
            first_index,
            x_scale,
            y_scale,
            slots: vec![None; last_index - first_index],
        }
    }

    fn get(&mut self, index: usize) -> BucketGeometry {
        let slot = &mut self.slots[index - self.first_index];
        *slot.get_or_insert_with(|| {
            BucketGeometry::compute(&self.data[index], self.x_scale, self.y_scale)
        })
    }
}

/// Downsampled line: one min/max bar per bucket, joined by lines from each
/// bucket's latest sample to the next bucket's earliest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedLineLayer {
    pub data: DataSnapshot<BucketDatum>,
    pub x_domain: Interval,
    pub y_domain: Interval,
    pub y_scale_kind: ScaleKind,
    pub color: Color,
}

impl BucketedLineLayer {
    #[must_use]
    pub fn new(data: DataSnapshot<BucketDatum>, x_domain: Interval, y_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            y_domain,
            y_scale_kind: ScaleKind::Linear,
            color: DEFAULT_SERIES_COLOR,
        }
    }

    #[must_use]
    pub fn with_y_scale_kind(mut self, kind: ScaleKind) -> Self {
        self.y_scale_kind = kind;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Layer for BucketedLineLayer {
    fn name(&self) -> &'static str {
        "bucketed-line"
    }

    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()> {
        let data = self.data.as_slice();
        if data.len() < 2 || self.x_domain.is_degenerate() {
            return Ok(());
        }

        let bounds = find_span_index_bounds(data, self.x_domain);
        if bounds.is_empty() {
            return Ok(());
        }
        trace!(
            layer = self.name(),
            first_index = bounds.first_index,
            last_index = bounds.last_index,
            "visible bounds"
        );

        // Rounding here would flicker while panning.
        let x_scale = make_scale(ScaleKind::Linear, self.x_domain, Interval::new(0.0, width));
        let y_scale = make_scale(self.y_scale_kind, self.y_domain, Interval::new(0.0, height));
        let mut cache = GeometryCache::new(
            data,
            bounds.first_index,
            bounds.last_index,
            x_scale,
            y_scale,
        );

        context.begin_path();
        for index in bounds.indices() {
            let bucket = cache.get(index);
            if bucket.has_bar() {
                context.rect(
                    bucket.x1,
                    height - bucket.y2,
                    bucket.width(),
                    bucket.height(),
                );
            }
        }
        context.set_fill_style(self.color);
        context.fill()?;

        context.begin_path();
        let first = cache.get(bounds.first_index);
        context.move_to(first.x2, height - first.latest_y);
        for index in bounds.first_index + 1..bounds.last_index {
            let previous = cache.get(index - 1);
            let current = cache.get(index);
            let touching = current.x1 <= previous.x2 && (current.has_bar() || previous.has_bar());
            if touching {
                context.move_to(current.x1, height - current.earliest_y);
            } else {
                context.line_to(current.x1, height - current.earliest_y);
            }
            if current.has_bar() {
                context.move_to(current.x2, height - current.latest_y);
            }
        }
        context.set_stroke_style(self.color);
        context.stroke()?;
        Ok(())
    }
}
