//! Tick positions and label formatting for linear, time and log scales.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Scale, ScaleKind};

pub const DEFAULT_TICK_COUNT: usize = 5;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// Upper bound on the ticks any scale generates, whatever count is requested.
pub const MAX_TICKS: usize = 4_096;

// Nice steps can yield up to ~sqrt(2) ticks per requested tick.
const MAX_REQUESTED_TICKS: usize = MAX_TICKS / 2;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Requested ticks: a target count or explicit values used verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ticks {
    Count(usize),
    Values(Vec<f64>),
}

pub type TickFormatFn = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Requested label format.
#[derive(Clone, Default)]
pub enum TickFormat {
    /// The scale's natural formatter.
    #[default]
    Auto,
    Decimal {
        precision: usize,
    },
    /// `strftime` pattern applied to millisecond timestamps in UTC.
    TimePattern(String),
    Custom(TickFormatFn),
}

impl TickFormat {
    pub fn custom(format: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(format))
    }
}

impl fmt::Debug for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Decimal { precision } => f
                .debug_struct("Decimal")
                .field("precision", precision)
                .finish(),
            Self::TimePattern(pattern) => f.debug_tuple("TimePattern").field(pattern).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for TickFormat {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Auto, Self::Auto) => true,
            (Self::Decimal { precision: a }, Self::Decimal { precision: b }) => a == b,
            (Self::TimePattern(a), Self::TimePattern(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Clone)]
enum ResolvedFormat {
    Decimal { precision: usize },
    Shortest,
    TimeMultiScale,
    TimePattern(String),
    Custom(TickFormatFn),
}

/// Formatter resolved for one computed tick set.
#[derive(Clone)]
pub struct TickFormatter {
    resolved: ResolvedFormat,
}

impl TickFormatter {
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match &self.resolved {
            ResolvedFormat::Decimal { precision } => format!("{value:.precision$}"),
            ResolvedFormat::Shortest => format_shortest(value),
            ResolvedFormat::TimeMultiScale => format_time_multi_scale(value),
            ResolvedFormat::TimePattern(pattern) => format_time_pattern(value, pattern),
            ResolvedFormat::Custom(format) => format(value),
        }
    }
}

impl fmt::Debug for TickFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match &self.resolved {
            ResolvedFormat::Decimal { precision } => {
                return f
                    .debug_struct("TickFormatter")
                    .field("precision", precision)
                    .finish();
            }
            ResolvedFormat::Shortest => "shortest",
            ResolvedFormat::TimeMultiScale => "time-multi-scale",
            ResolvedFormat::TimePattern(_) => "time-pattern",
            ResolvedFormat::Custom(_) => "custom",
        };
        f.debug_tuple("TickFormatter").field(&name).finish()
    }
}

/// Tick positions plus the formatter for their labels.
#[derive(Debug, Clone)]
pub struct ComputedTicks {
    pub ticks: SmallVec<[f64; 8]>,
    pub format: TickFormatter,
}

impl ComputedTicks {
    /// Formatted label for every tick, in tick order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.ticks.iter().map(|&tick| self.format.format(tick)).collect()
    }
}

/// Computes ticks for `scale`'s domain.
///
/// Explicit values are used verbatim; a count (default
/// [`DEFAULT_TICK_COUNT`]) asks the scale for "nice" values near that count.
/// A degenerate domain yields at most one tick and a non-finite domain none.
#[must_use]
pub fn compute_ticks(
    scale: &Scale,
    ticks: Option<&Ticks>,
    format: Option<&TickFormat>,
) -> ComputedTicks {
    let domain = scale.domain();
    let count = match ticks {
        Some(Ticks::Count(count)) => (*count).min(MAX_REQUESTED_TICKS),
        _ => DEFAULT_TICK_COUNT,
    };

    let values: SmallVec<[f64; 8]> = match ticks {
        Some(Ticks::Values(values)) => values.iter().copied().collect(),
        _ if !domain.is_finite() => SmallVec::new(),
        _ => match scale.kind() {
            ScaleKind::Linear => linear_ticks(domain.min, domain.max, count),
            ScaleKind::Time => time_ticks(domain.min, domain.max, count),
            ScaleKind::Log10 => log_ticks(domain.min, domain.max, count),
        },
    };

    let resolved = match format.unwrap_or(&TickFormat::Auto) {
        TickFormat::Auto => match scale.kind() {
            ScaleKind::Linear => {
                let step = tick_step(domain.min, domain.max, count);
                if step.is_finite() && step > 0.0 {
                    ResolvedFormat::Decimal {
                        precision: precision_fixed(step),
                    }
                } else {
                    ResolvedFormat::Shortest
                }
            }
            ScaleKind::Time => ResolvedFormat::TimeMultiScale,
            ScaleKind::Log10 => ResolvedFormat::Shortest,
        },
        TickFormat::Decimal { precision } => ResolvedFormat::Decimal {
            precision: *precision,
        },
        TickFormat::TimePattern(pattern) => ResolvedFormat::TimePattern(pattern.clone()),
        TickFormat::Custom(format) => ResolvedFormat::Custom(Arc::clone(format)),
    };

    ComputedTicks {
        ticks: values,
        format: TickFormatter { resolved },
    }
}

/// Nice 1/2/5 x 10^k ticks covering `[start, stop]`, in domain order.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> SmallVec<[f64; 8]> {
    let mut ticks = SmallVec::new();
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let increment = tick_increment(lo, hi, count.min(MAX_REQUESTED_TICKS));
    if increment == 0.0 || !increment.is_finite() {
        return ticks;
    }

    if increment > 0.0 {
        let first = (lo / increment).ceil() as i64;
        let last = (hi / increment).floor() as i64;
        ticks.extend((first..=last).take(MAX_TICKS).map(|i| i as f64 * increment));
    } else {
        let inverse = -increment;
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        ticks.extend((first..=last).take(MAX_TICKS).map(|i| i as f64 / inverse));
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Positive step between nice ticks; negative values encode `1 / step` so
/// sub-unit steps stay exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Absolute nice step for `count` ticks over `[start, stop]`.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw == 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let base = 10f64.powf(raw.log10().floor());
    let error = raw / base;
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    base * factor
}

fn precision_fixed(step: f64) -> usize {
    let exponent = step.abs().log10().floor();
    if exponent >= 0.0 { 0 } else { (-exponent) as usize }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

const TIME_INTERVALS: [(TimeUnit, u32, f64); 17] = [
    (TimeUnit::Second, 1, SECOND_MS),
    (TimeUnit::Second, 5, 5.0 * SECOND_MS),
    (TimeUnit::Second, 15, 15.0 * SECOND_MS),
    (TimeUnit::Second, 30, 30.0 * SECOND_MS),
    (TimeUnit::Minute, 1, MINUTE_MS),
    (TimeUnit::Minute, 5, 5.0 * MINUTE_MS),
    (TimeUnit::Minute, 15, 15.0 * MINUTE_MS),
    (TimeUnit::Minute, 30, 30.0 * MINUTE_MS),
    (TimeUnit::Hour, 1, HOUR_MS),
    (TimeUnit::Hour, 3, 3.0 * HOUR_MS),
    (TimeUnit::Hour, 6, 6.0 * HOUR_MS),
    (TimeUnit::Hour, 12, 12.0 * HOUR_MS),
    (TimeUnit::Day, 1, DAY_MS),
    (TimeUnit::Day, 2, 2.0 * DAY_MS),
    (TimeUnit::Week, 1, WEEK_MS),
    (TimeUnit::Month, 1, MONTH_MS),
    (TimeUnit::Month, 3, 3.0 * MONTH_MS),
];

/// Calendar-aligned ticks over millisecond timestamps (UTC).
#[must_use]
pub fn time_ticks(start: f64, stop: f64, count: usize) -> SmallVec<[f64; 8]> {
    let mut ticks = SmallVec::new();
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let count = count.min(MAX_REQUESTED_TICKS);
    let target = (hi - lo) / count as f64;
    let index = TIME_INTERVALS.partition_point(|&(_, _, duration)| duration <= target);

    let (unit, step) = if index == TIME_INTERVALS.len() {
        let years = tick_step(lo / YEAR_MS, hi / YEAR_MS, count).round().max(1.0);
        (TimeUnit::Year, years as u32)
    } else if index == 0 {
        let mut sub_second = linear_ticks(lo, hi, count);
        if reverse {
            sub_second.reverse();
        }
        return sub_second;
    } else {
        let (below_unit, below_step, below_duration) = TIME_INTERVALS[index - 1];
        let (above_unit, above_step, above_duration) = TIME_INTERVALS[index];
        if target / below_duration < above_duration / target {
            (below_unit, below_step)
        } else {
            (above_unit, above_step)
        }
    };

    ticks = calendar_ticks(lo, hi, unit, step);
    if reverse {
        ticks.reverse();
    }
    ticks
}

fn calendar_ticks(lo: f64, hi: f64, unit: TimeUnit, step: u32) -> SmallVec<[f64; 8]> {
    let mut ticks = SmallVec::new();
    let step = step.max(1);

    match unit {
        TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour => {
            let unit_ms = match unit {
                TimeUnit::Second => SECOND_MS,
                TimeUnit::Minute => MINUTE_MS,
                _ => HOUR_MS,
            };
            let step_ms = unit_ms * f64::from(step);
            let mut tick = (lo / step_ms).ceil() * step_ms;
            while tick <= hi && ticks.len() < MAX_TICKS {
                ticks.push(tick);
                tick += step_ms;
            }
        }
        TimeUnit::Day | TimeUnit::Week => {
            let Some(mut day) = utc_from_millis(lo).map(|dt| dt.date_naive()) else {
                return ticks;
            };
            if unit == TimeUnit::Week {
                let offset = day.weekday().num_days_from_sunday();
                day -= Duration::days(i64::from(offset));
            }
            let stride = if unit == TimeUnit::Week { 7 } else { 1 };
            while ticks.len() < MAX_TICKS {
                let millis = naive_date_millis(day);
                if millis > hi {
                    break;
                }
                let on_step = unit == TimeUnit::Week || (day.day() - 1) % step == 0;
                if millis >= lo && on_step {
                    ticks.push(millis);
                }
                day += Duration::days(stride);
            }
        }
        TimeUnit::Month => {
            let Some(dt) = utc_from_millis(lo) else {
                return ticks;
            };
            let (mut year, mut month0) = (dt.year(), dt.month0());
            while ticks.len() < MAX_TICKS {
                let Some(first) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
                    break;
                };
                let millis = naive_date_millis(first);
                if millis > hi {
                    break;
                }
                if millis >= lo && month0 % step == 0 {
                    ticks.push(millis);
                }
                month0 += 1;
                if month0 == 12 {
                    month0 = 0;
                    year += 1;
                }
            }
        }
        TimeUnit::Year => {
            let Some(dt) = utc_from_millis(lo) else {
                return ticks;
            };
            let mut year = dt.year();
            let step = i32::try_from(step).unwrap_or(i32::MAX);
            while ticks.len() < MAX_TICKS {
                let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
                    break;
                };
                let millis = naive_date_millis(first);
                if millis > hi {
                    break;
                }
                if millis >= lo && year.rem_euclid(step) == 0 {
                    ticks.push(millis);
                }
                year += 1;
            }
        }
    }

    ticks
}

/// Decade ticks, densified with 2x and 5x multiples when decades are scarce.
#[must_use]
pub fn log_ticks(start: f64, stop: f64, count: usize) -> SmallVec<[f64; 8]> {
    let mut ticks = SmallVec::new();
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let (lo, hi) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    if hi <= 0.0 {
        return ticks;
    }
    let lo = lo.max(f64::MIN_POSITIVE);
    let first_decade = lo.log10().floor() as i32;
    let last_decade = hi.log10().ceil() as i32;
    let multiples: &[f64] = if ((last_decade - first_decade) as usize) < count {
        &[1.0, 2.0, 5.0]
    } else {
        &[1.0]
    };

    for decade in first_decade..=last_decade {
        let base = 10f64.powi(decade);
        for multiple in multiples {
            let value = base * multiple;
            if value >= lo && value <= hi {
                ticks.push(value);
            }
        }
    }

    if start > stop {
        ticks.reverse();
    }
    ticks
}

fn utc_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.floor() as i64)
}

fn naive_date_millis(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis() as f64)
        .unwrap_or(f64::INFINITY)
}

fn format_shortest(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Picks the coarsest calendar field that is non-zero, like a multi-scale
/// axis: `.123`, `:45`, `03:30`, `03 PM`, `Tue 05`, `Jan 07`, `February`, `2024`.
fn format_time_multi_scale(millis: f64) -> String {
    let Some(dt) = utc_from_millis(millis.round()) else {
        return format_shortest(millis);
    };

    let pattern = if dt.timestamp_subsec_millis() != 0 {
        "%.3f"
    } else if dt.second() != 0 {
        ":%S"
    } else if dt.minute() != 0 {
        "%I:%M"
    } else if dt.hour() != 0 {
        "%I %p"
    } else if dt.day() != 1 {
        if dt.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if dt.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    dt.format(pattern).to_string()
}

fn format_time_pattern(millis: f64, pattern: &str) -> String {
    let Some(dt) = utc_from_millis(millis.round()) else {
        return format_shortest(millis);
    };
    let mut out = String::new();
    if write!(out, "{}", dt.format(pattern)).is_err() {
        return format_shortest(millis);
    }
    out
}
