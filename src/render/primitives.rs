use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serializes as a CSS string and parses `#rgb`, `#rrggbb`, `rgb(..)` and
/// `rgba(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a 0..=1 alpha.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// CSS `rgba(r, g, b, a)` form with 8-bit channels.
    #[must_use]
    pub fn to_css(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            self.alpha
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let text = input.trim();
        let color = if let Some(hex) = text.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(body) = function_body(text, "rgba") {
            parse_channels(body, true)
        } else if let Some(body) = function_body(text, "rgb") {
            parse_channels(body, false)
        } else {
            None
        };

        let color =
            color.ok_or_else(|| ChartError::InvalidData(format!("unsupported color `{input}`")))?;
        color.validate()?;
        Ok(color)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digit = |index: usize| u8::from_str_radix(hex.get(index..=index)?, 16).ok();
    let pair = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgba8(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
            1.0,
        )),
        6 => Some(Color::from_rgba8(pair(0)?, pair(2)?, pair(4)?, 1.0)),
        _ => None,
    }
}

fn function_body<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_channels(body: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |part: &str| {
        let value: f64 = part.parse().ok()?;
        (0.0..=255.0).contains(&value).then_some(value / 255.0)
    };
    let alpha = if with_alpha {
        parts[3].parse().ok()?
    } else {
        1.0
    };
    Some(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

/// Horizontal anchor of `fill_text` relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor of `fill_text` relative to its y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Font shorthand in CSS order, e.g. `12px sans-serif`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontSpec {
    pub size_px: f64,
    pub family: String,
}

impl FontSpec {
    #[must_use]
    pub fn new(size_px: f64, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(12.0, "sans-serif")
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

impl FromStr for FontSpec {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidData(format!("unsupported font `{input}`"));
        let (size, family) = input.trim().split_once(char::is_whitespace).ok_or_else(invalid)?;
        let size_px: f64 = size
            .strip_suffix("px")
            .and_then(|value| value.parse().ok())
            .ok_or_else(invalid)?;
        let family = family.trim();
        if !size_px.is_finite() || size_px <= 0.0 || family.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(size_px, family))
    }
}

impl TryFrom<String> for FontSpec {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<FontSpec> for String {
    fn from(font: FontSpec) -> Self {
        font.to_string()
    }
}
