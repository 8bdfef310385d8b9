//! Pointer capture: turns raw pointer events into domain-level intents.
//!
//! The capture never mutates domains itself. The host's store folds the
//! emitted [`Intent`]s into new props (see [`Interval::panned`] and
//! [`Interval::zoomed`]).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Interval, Scale};
use crate::error::{ChartError, ChartResult};

/// Keyboard modifiers held when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// Modifier that turns a drag into a brush selection instead of a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushModifier {
    #[default]
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl BrushModifier {
    #[must_use]
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Shift => modifiers.shift,
            Self::Ctrl => modifiers.ctrl,
            Self::Alt => modifiers.alt,
            Self::Meta => modifiers.meta,
        }
    }
}

fn default_drag_threshold_px() -> f64 {
    2.0
}

fn default_zoom_speed() -> f64 {
    0.001
}

/// Tuning for pointer gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Horizontal travel (logical px) before a press becomes a drag.
    #[serde(default = "default_drag_threshold_px")]
    pub drag_threshold_px: f64,
    /// Wheel zoom factor is `exp(delta_y * zoom_speed)`.
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f64,
    #[serde(default)]
    pub brush_modifier: BrushModifier,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: default_drag_threshold_px(),
            zoom_speed: default_zoom_speed(),
            brush_modifier: BrushModifier::default(),
        }
    }
}

impl InteractionConfig {
    pub fn validate(self) -> ChartResult<()> {
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            return Err(ChartError::InvalidData(
                "drag threshold must be finite and >= 0".to_owned(),
            ));
        }
        if !self.zoom_speed.is_finite() || self.zoom_speed <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom speed must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Raw pointer input in logical pixels relative to the chart's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64, modifiers: Modifiers },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
    Wheel { x: f64, delta_y: f64 },
}

/// Domain-level request for the host's store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Hovered domain value, or `None` once the pointer leaves.
    Hover(Option<f64>),
    /// Shift the x domain by `delta` domain units.
    Pan { delta: f64 },
    /// Scale the x domain span by `factor` around `focus`.
    Zoom { factor: f64, focus: f64 },
    /// New brush selection, or `None` to clear it.
    Brush(Option<Interval>),
}

pub type Intents = SmallVec<[Intent; 2]>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Pressed { origin_x: f64, brush: bool },
    Panning { last_x: f64 },
    Brushing { origin_x: f64 },
}

/// Stateful pointer-gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionCapture {
    config: InteractionConfig,
    gesture: Gesture,
}

impl Default for InteractionCapture {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl InteractionCapture {
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            gesture: Gesture::Idle,
        }
    }

    #[must_use]
    pub fn config(&self) -> InteractionConfig {
        self.config
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }

    /// Whether a press or drag is in progress.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Feeds one event; `x_domain` and `width` describe the chart as it is
    /// currently drawn. A zero or invalid width yields no intents.
    pub fn handle(&mut self, event: PointerEvent, x_domain: Interval, width: f64) -> Intents {
        let mut intents = Intents::new();
        if !width.is_finite() || width <= 0.0 || !x_domain.is_finite() {
            return intents;
        }
        let scale = Scale::linear(x_domain, Interval::new(0.0, width));

        match event {
            PointerEvent::Down { x, modifiers, .. } => {
                self.gesture = Gesture::Pressed {
                    origin_x: x,
                    brush: self.config.brush_modifier.is_held(modifiers),
                };
            }
            PointerEvent::Move { x, .. } => match self.gesture {
                Gesture::Idle => intents.push(Intent::Hover(Some(scale.invert(x)))),
                Gesture::Pressed { origin_x, brush } => {
                    if (x - origin_x).abs() > self.config.drag_threshold_px {
                        if brush {
                            self.gesture = Gesture::Brushing { origin_x };
                            intents.push(brush_intent(scale, origin_x, x));
                        } else {
                            self.gesture = Gesture::Panning { last_x: x };
                            intents.push(pan_intent(scale, origin_x, x));
                        }
                    }
                }
                Gesture::Panning { last_x } => {
                    self.gesture = Gesture::Panning { last_x: x };
                    intents.push(pan_intent(scale, last_x, x));
                }
                Gesture::Brushing { origin_x } => intents.push(brush_intent(scale, origin_x, x)),
            },
            PointerEvent::Up { x, .. } => {
                match self.gesture {
                    Gesture::Idle => {}
                    Gesture::Pressed { .. } => intents.push(Intent::Brush(None)),
                    Gesture::Panning { last_x } => {
                        if x != last_x {
                            intents.push(pan_intent(scale, last_x, x));
                        }
                    }
                    Gesture::Brushing { origin_x } => {
                        intents.push(brush_intent(scale, origin_x, x));
                    }
                }
                self.gesture = Gesture::Idle;
            }
            PointerEvent::Leave => {
                self.gesture = Gesture::Idle;
                intents.push(Intent::Hover(None));
            }
            PointerEvent::Wheel { x, delta_y } => {
                if delta_y != 0.0 && delta_y.is_finite() {
                    intents.push(Intent::Zoom {
                        factor: (delta_y * self.config.zoom_speed).exp(),
                        focus: scale.invert(x),
                    });
                }
            }
        }

        trace!(?event, intents = intents.len(), "pointer event captured");
        intents
    }
}

fn pan_intent(scale: Scale, from_x: f64, to_x: f64) -> Intent {
    Intent::Pan {
        delta: scale.invert(from_x) - scale.invert(to_x),
    }
}

fn brush_intent(scale: Scale, origin_x: f64, x: f64) -> Intent {
    Intent::Brush(Some(
        Interval::new(scale.invert(origin_x), scale.invert(x)).normalized(),
    ))
}
