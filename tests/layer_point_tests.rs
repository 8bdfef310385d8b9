use std::f64::consts::TAU;

use layered_chart::core::{DataPoint, DataSnapshot, Interval, ScaleKind};
use layered_chart::layers::{DEFAULT_SERIES_COLOR, Layer, PointLayer, PointStyle};
use layered_chart::render::{Color, DrawCommand, RecordingContext};

fn scenario_layer() -> PointLayer {
    let data = DataSnapshot::new(vec![
        DataPoint::new(0.0, 0.0),
        DataPoint::new(10.0, 10.0),
        DataPoint::new(20.0, 5.0),
    ]);
    PointLayer::new(data, Interval::new(0.0, 20.0), Interval::new(0.0, 10.0))
}

fn render(layer: &PointLayer, width: f64, height: f64) -> Vec<DrawCommand> {
    let mut context = RecordingContext::new();
    layer.render(width, height, &mut context).expect("render");
    context.take_commands()
}

#[test]
fn draws_one_circle_per_visible_point() {
    let commands = render(&scenario_layer(), 100.0, 50.0);
    assert_eq!(
        commands,
        vec![
            DrawCommand::BeginPath,
            DrawCommand::MoveTo { x: 3.0, y: 50.0 },
            DrawCommand::Arc {
                x: 0.0,
                y: 50.0,
                radius: 3.0,
                start_angle: 0.0,
                end_angle: TAU,
            },
            DrawCommand::MoveTo { x: 53.0, y: 0.0 },
            DrawCommand::Arc {
                x: 50.0,
                y: 0.0,
                radius: 3.0,
                start_angle: 0.0,
                end_angle: TAU,
            },
            DrawCommand::MoveTo { x: 103.0, y: 25.0 },
            DrawCommand::Arc {
                x: 100.0,
                y: 25.0,
                radius: 3.0,
                start_angle: 0.0,
                end_angle: TAU,
            },
            DrawCommand::SetFillStyle(DEFAULT_SERIES_COLOR),
            DrawCommand::Fill,
        ]
    );
}

#[test]
fn empty_and_single_point_data_draw_nothing() {
    for data in [vec![], vec![DataPoint::new(5.0, 5.0)]] {
        let layer = PointLayer::new(
            DataSnapshot::new(data),
            Interval::new(0.0, 10.0),
            Interval::new(0.0, 10.0),
        );
        assert!(render(&layer, 100.0, 50.0).is_empty());
    }
}

#[test]
fn domain_outside_data_draws_nothing() {
    let mut layer = scenario_layer();
    layer.x_domain = Interval::new(100.0, 200.0);
    assert!(render(&layer, 100.0, 50.0).is_empty());
}

#[test]
fn stroke_is_painted_before_fill() {
    let stroke = Color::rgb(1.0, 0.0, 0.0);
    let layer = scenario_layer().with_style(PointStyle {
        stroke: Some(stroke),
        ..PointStyle::default()
    });
    let commands = render(&layer, 100.0, 50.0);
    let tail = &commands[commands.len() - 4..];
    assert_eq!(
        tail,
        &[
            DrawCommand::SetStrokeStyle(stroke),
            DrawCommand::Stroke,
            DrawCommand::SetFillStyle(DEFAULT_SERIES_COLOR),
            DrawCommand::Fill,
        ]
    );
}

#[test]
fn no_fill_and_no_stroke_only_builds_path() {
    let layer = scenario_layer().with_style(PointStyle {
        fill: None,
        stroke: None,
        radius: 2.0,
    });
    let commands = render(&layer, 100.0, 50.0);
    assert!(!commands.contains(&DrawCommand::Fill));
    assert!(!commands.contains(&DrawCommand::Stroke));
}

#[test]
fn log_y_scale_spaces_decades_evenly() {
    let data = DataSnapshot::new(vec![
        DataPoint::new(0.0, 1.0),
        DataPoint::new(1.0, 10.0),
        DataPoint::new(2.0, 100.0),
    ]);
    let layer = PointLayer::new(data, Interval::new(0.0, 2.0), Interval::new(1.0, 100.0))
        .with_y_scale_kind(ScaleKind::Log10);
    let commands = render(&layer, 200.0, 100.0);
    let centers: Vec<f64> = commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Arc { y, .. } => Some(*y),
            _ => None,
        })
        .collect();
    assert_eq!(centers.len(), 3);
    assert!((centers[0] - 100.0).abs() < 1e-9);
    assert!((centers[1] - 50.0).abs() < 1e-9);
    assert!(centers[2].abs() < 1e-9);
}

#[test]
fn rendering_is_idempotent() {
    let layer = scenario_layer();
    assert_eq!(render(&layer, 100.0, 50.0), render(&layer, 100.0, 50.0));
}

#[test]
fn zero_width_domain_draws_nothing() {
    let mut layer = scenario_layer();
    layer.x_domain = Interval::new(10.0, 10.0);
    assert!(render(&layer, 100.0, 100.0).is_empty());
}
