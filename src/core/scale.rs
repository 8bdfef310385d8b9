use serde::{Deserialize, Serialize};

use crate::core::Interval;

const LOG_EPSILON: f64 = 1e-12;

/// Mapping family of a [`Scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleKind {
    #[default]
    Linear,
    /// Linear mapping over millisecond timestamps with calendar-aware ticks.
    Time,
    Log10,
}

/// Stateless domain-to-pixel transform, rebuilt on every render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: Interval,
    range: Interval,
    round: bool,
}

impl Scale {
    #[must_use]
    pub fn new(kind: ScaleKind, domain: Interval, range: Interval) -> Self {
        Self {
            kind,
            domain,
            range,
            round: false,
        }
    }

    #[must_use]
    pub fn linear(domain: Interval, range: Interval) -> Self {
        Self::new(ScaleKind::Linear, domain, range)
    }

    #[must_use]
    pub fn time(domain: Interval, range: Interval) -> Self {
        Self::new(ScaleKind::Time, domain, range)
    }

    #[must_use]
    pub fn log10(domain: Interval, range: Interval) -> Self {
        Self::new(ScaleKind::Log10, domain, range)
    }

    /// Rounds every mapped value to the nearest pixel (half-up).
    ///
    /// Rounding does not round consistently in one direction as the domain
    /// moves, so it flickers under pan/zoom. Use it for static elements only.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> Interval {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> Interval {
        self.range
    }

    #[must_use]
    pub fn is_rounded(self) -> bool {
        self.round
    }

    /// Maps a domain value to a pixel coordinate.
    ///
    /// A degenerate domain maps every value to the middle of the range.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let (start, end) = self.transformed_domain();
        let span = end - start;
        let t = if span == 0.0 {
            0.5
        } else {
            (self.transform(value) - start) / span
        };
        let pixel = self.range.min + t * self.range.span();
        if self.round { round_half_up(pixel) } else { pixel }
    }

    /// Maps a pixel coordinate back to a domain value.
    ///
    /// A degenerate range maps every pixel to the middle of the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (start, end) = self.transformed_domain();
        let range_span = self.range.span();
        let t = if range_span == 0.0 {
            0.5
        } else {
            (pixel - self.range.min) / range_span
        };
        self.untransform(start + t * (end - start))
    }

    fn transformed_domain(self) -> (f64, f64) {
        (self.transform(self.domain.min), self.transform(self.domain.max))
    }

    fn transform(self, value: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear | ScaleKind::Time => value,
            ScaleKind::Log10 => value.max(LOG_EPSILON).log10(),
        }
    }

    fn untransform(self, value: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear | ScaleKind::Time => value,
            ScaleKind::Log10 => 10f64.powf(value),
        }
    }
}

/// Builds the scale a layer uses for one render pass.
#[must_use]
pub fn make_scale(kind: ScaleKind, domain: Interval, pixel_range: Interval) -> Scale {
    Scale::new(kind, domain, pixel_range)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_up_for_negative_values() {
        let scale = Scale::linear(Interval::new(0.0, 10.0), Interval::new(-10.0, 0.0)).rounded();
        assert_eq!(scale.apply(4.5), -5.0);
        assert_eq!(scale.apply(3.5), -6.0);
    }

    #[test]
    fn log_scale_maps_decades_evenly() {
        let scale = Scale::log10(Interval::new(1.0, 1000.0), Interval::new(0.0, 300.0));
        assert!((scale.apply(10.0) - 100.0).abs() < 1e-9);
        assert!((scale.invert(200.0) - 100.0).abs() < 1e-9);
    }
}
