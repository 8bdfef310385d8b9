use approx::assert_relative_eq;
use layered_chart::core::{Interval, Scale};
use layered_chart::interaction::{
    BrushModifier, Intent, InteractionCapture, InteractionConfig, Modifiers, PointerEvent,
};

const DOMAIN: Interval = Interval::new(0.0, 100.0);
const WIDTH: f64 = 200.0;

fn down(x: f64, modifiers: Modifiers) -> PointerEvent {
    PointerEvent::Down { x, y: 10.0, modifiers }
}

fn move_to(x: f64) -> PointerEvent {
    PointerEvent::Move { x, y: 10.0 }
}

fn up(x: f64) -> PointerEvent {
    PointerEvent::Up { x, y: 10.0 }
}

#[test]
fn idle_move_reports_hovered_domain_value() {
    let mut capture = InteractionCapture::default();
    let intents = capture.handle(move_to(50.0), DOMAIN, WIDTH);
    assert_eq!(intents.as_slice(), &[Intent::Hover(Some(25.0))]);
}

#[test]
fn drag_beyond_threshold_pans_incrementally() {
    let mut capture = InteractionCapture::default();
    assert!(capture.handle(down(100.0, Modifiers::NONE), DOMAIN, WIDTH).is_empty());
    assert!(capture.handle(move_to(101.0), DOMAIN, WIDTH).is_empty());
    assert!(capture.is_gesture_active());

    let intents = capture.handle(move_to(120.0), DOMAIN, WIDTH);
    assert_eq!(intents.as_slice(), &[Intent::Pan { delta: -10.0 }]);

    let intents = capture.handle(move_to(130.0), DOMAIN, WIDTH);
    assert_eq!(intents.as_slice(), &[Intent::Pan { delta: -5.0 }]);

    assert!(capture.handle(up(130.0), DOMAIN, WIDTH).is_empty());
    assert!(!capture.is_gesture_active());
}

#[test]
fn release_after_pan_flushes_remaining_travel() {
    let mut capture = InteractionCapture::default();
    capture.handle(down(100.0, Modifiers::NONE), DOMAIN, WIDTH);
    capture.handle(move_to(110.0), DOMAIN, WIDTH);
    let intents = capture.handle(up(90.0), DOMAIN, WIDTH);
    assert_eq!(intents.as_slice(), &[Intent::Pan { delta: 10.0 }]);
}

#[test]
fn click_without_drag_clears_brush() {
    let mut capture = InteractionCapture::default();
    capture.handle(down(10.0, Modifiers::NONE), DOMAIN, WIDTH);
    let intents = capture.handle(up(11.0), DOMAIN, WIDTH);
    assert_eq!(intents.as_slice(), &[Intent::Brush(None)]);
}

#[test]
fn modifier_drag_brushes_normalized_selection() {
    let mut capture = InteractionCapture::default();
    capture.handle(down(40.0, Modifiers::SHIFT), DOMAIN, WIDTH);

    let intents = capture.handle(move_to(20.0), DOMAIN, WIDTH);
    assert_eq!(
        intents.as_slice(),
        &[Intent::Brush(Some(Interval::new(10.0, 20.0)))]
    );

    let intents = capture.handle(up(10.0), DOMAIN, WIDTH);
    assert_eq!(
        intents.as_slice(),
        &[Intent::Brush(Some(Interval::new(5.0, 20.0)))]
    );
}

#[test]
fn configured_brush_modifier_is_respected() {
    let config = InteractionConfig {
        brush_modifier: BrushModifier::Ctrl,
        ..InteractionConfig::default()
    };
    let mut capture = InteractionCapture::new(config);
    capture.handle(down(40.0, Modifiers::SHIFT), DOMAIN, WIDTH);
    let intents = capture.handle(move_to(60.0), DOMAIN, WIDTH);
    assert!(matches!(intents.as_slice(), [Intent::Pan { .. }]));
}

#[test]
fn wheel_zoom_keeps_focus_under_pointer() {
    let mut capture = InteractionCapture::default();
    let intents = capture.handle(
        PointerEvent::Wheel {
            x: 150.0,
            delta_y: 100.0,
        },
        DOMAIN,
        WIDTH,
    );
    let [Intent::Zoom { factor, focus }] = intents.as_slice() else {
        panic!("expected a single zoom intent, got {intents:?}");
    };
    assert_relative_eq!(*factor, 0.1f64.exp());
    assert_relative_eq!(*focus, 75.0);

    let zoomed = DOMAIN.zoomed(*factor, *focus);
    let scale = Scale::linear(zoomed, Interval::new(0.0, WIDTH));
    assert_relative_eq!(scale.invert(150.0), 75.0, epsilon = 1e-9);
}

#[test]
fn zero_wheel_delta_is_ignored() {
    let mut capture = InteractionCapture::default();
    let intents = capture.handle(PointerEvent::Wheel { x: 10.0, delta_y: 0.0 }, DOMAIN, WIDTH);
    assert!(intents.is_empty());
}

#[test]
fn leave_clears_hover_and_cancels_gesture() {
    let mut capture = InteractionCapture::default();
    capture.handle(down(100.0, Modifiers::NONE), DOMAIN, WIDTH);
    capture.handle(move_to(150.0), DOMAIN, WIDTH);

    let intents = capture.handle(PointerEvent::Leave, DOMAIN, WIDTH);
    assert_eq!(intents.as_slice(), &[Intent::Hover(None)]);
    assert!(!capture.is_gesture_active());

    let intents = capture.handle(move_to(20.0), DOMAIN, WIDTH);
    assert_eq!(intents.as_slice(), &[Intent::Hover(Some(10.0))]);
}

#[test]
fn zero_width_produces_no_intents() {
    let mut capture = InteractionCapture::default();
    assert!(capture.handle(move_to(10.0), DOMAIN, 0.0).is_empty());
    assert!(capture.handle(PointerEvent::Leave, DOMAIN, f64::NAN).is_empty());
    assert!(
        capture
            .handle(PointerEvent::Wheel { x: 1.0, delta_y: 5.0 }, DOMAIN, -3.0)
            .is_empty()
    );
}

#[test]
fn invalid_interaction_config_is_rejected() {
    let config = InteractionConfig {
        zoom_speed: 0.0,
        ..InteractionConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(InteractionConfig::default().validate().is_ok());
}
