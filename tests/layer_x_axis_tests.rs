use layered_chart::core::{Interval, ScaleKind, TickFormat, Ticks};
use layered_chart::layers::{DEFAULT_AXIS_COLOR, Layer, XAxisLayer};
use layered_chart::render::{DrawCommand, FontSpec, RecordingContext, TextAlign, TextBaseline};

const JAN_1_2024_MS: f64 = 1_704_067_200_000.0;
const DAY_MS: f64 = 86_400_000.0;

fn render(layer: &XAxisLayer, width: f64, height: f64) -> Vec<DrawCommand> {
    let mut context = RecordingContext::new();
    layer.render(width, height, &mut context).expect("render");
    context.take_commands()
}

fn labels(commands: &[DrawCommand]) -> Vec<(String, f64, f64)> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect()
}

#[test]
fn linear_axis_draws_label_and_gridline_per_tick() {
    let layer = XAxisLayer::new(Interval::new(0.0, 100.0)).with_scale_kind(ScaleKind::Linear);
    let commands = render(&layer, 500.0, 30.0);

    assert_eq!(
        &commands[..5],
        &[
            DrawCommand::BeginPath,
            DrawCommand::SetTextAlign(TextAlign::Left),
            DrawCommand::SetTextBaseline(TextBaseline::Top),
            DrawCommand::SetFillStyle(DEFAULT_AXIS_COLOR),
            DrawCommand::SetFont(FontSpec::default()),
        ]
    );
    assert_eq!(
        &commands[5..8],
        &[
            DrawCommand::FillText {
                text: "0".to_owned(),
                x: 6.0,
                y: 4.0,
            },
            DrawCommand::MoveTo { x: 0.0, y: 0.0 },
            DrawCommand::LineTo { x: 0.0, y: 30.0 },
        ]
    );
    let texts = labels(&commands);
    assert_eq!(texts.len(), 6);
    assert_eq!(texts[5], ("100".to_owned(), 506.0, 4.0));
    assert_eq!(
        &commands[commands.len() - 2..],
        &[
            DrawCommand::SetStrokeStyle(DEFAULT_AXIS_COLOR),
            DrawCommand::Stroke,
        ]
    );
}

#[test]
fn time_axis_labels_are_uppercased() {
    let layer = XAxisLayer::new(Interval::new(JAN_1_2024_MS, JAN_1_2024_MS + 7.0 * DAY_MS));
    let texts: Vec<String> = labels(&render(&layer, 700.0, 30.0))
        .into_iter()
        .map(|(text, _, _)| text)
        .collect();
    assert_eq!(texts[0], "2024");
    assert_eq!(texts[1], "TUE 02");
    assert_eq!(texts[6], "JAN 07");
}

#[test]
fn custom_ticks_and_format_are_honoured() {
    let layer = XAxisLayer::new(Interval::new(0.0, 10.0))
        .with_scale_kind(ScaleKind::Linear)
        .with_ticks(Ticks::Values(vec![2.5, 7.5]))
        .with_tick_format(TickFormat::custom(|value| format!("{value}ms")));
    let texts = labels(&render(&layer, 100.0, 20.0));
    assert_eq!(
        texts,
        vec![("2.5MS".to_owned(), 31.0, 4.0), ("7.5MS".to_owned(), 81.0, 4.0)]
    );
}

#[test]
fn degenerate_domain_draws_at_most_one_tick() {
    let layer = XAxisLayer::new(Interval::new(50.0, 50.0)).with_scale_kind(ScaleKind::Linear);
    let commands = render(&layer, 100.0, 20.0);
    assert!(labels(&commands).len() <= 1);
}

#[test]
fn rendering_is_idempotent() {
    let layer = XAxisLayer::new(Interval::new(0.0, 3_600_000.0));
    assert_eq!(render(&layer, 400.0, 20.0), render(&layer, 400.0, 20.0));
}
