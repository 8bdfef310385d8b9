use layered_chart::LayerHost;
use layered_chart::core::{DataPoint, DataSnapshot, Interval};
use layered_chart::layers::{BrushLayer, PointLayer};
use layered_chart::render::{CanvasSurface, DrawCommand, RecordingContext};

fn brush_host(pixel_ratio: f64) -> LayerHost<BrushLayer, RecordingContext> {
    let surface = CanvasSurface::new(RecordingContext::new(), pixel_ratio).expect("surface");
    LayerHost::new(BrushLayer::new(Interval::new(0.0, 10.0), None), surface)
}

fn take_commands<L>(host: &mut LayerHost<L, RecordingContext>) -> Vec<DrawCommand>
where
    L: layered_chart::layers::Layer + PartialEq,
{
    host.surface_mut().context_mut().take_commands()
}

#[test]
fn first_resize_reallocates_and_renders() {
    let mut host = brush_host(2.0);
    assert!(host.resize(100.0, 50.0).expect("resize"));
    assert_eq!(
        take_commands(&mut host),
        vec![
            DrawCommand::ResizeBacking {
                width_px: 200,
                height_px: 100,
            },
            DrawCommand::ResetTransform,
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 100.0,
            },
            DrawCommand::Scale { x: 2.0, y: 2.0 },
            DrawCommand::Translate { x: 0.5, y: 0.5 },
        ]
    );
}

#[test]
fn unchanged_size_does_not_render() {
    let mut host = brush_host(1.0);
    host.resize(100.0, 50.0).expect("resize");
    take_commands(&mut host);

    assert!(!host.resize(100.0, 50.0).expect("resize"));
    assert!(take_commands(&mut host).is_empty());
    assert_eq!(host.render_stats().rendered, 1);
}

#[test]
fn invalid_size_is_rejected_without_drawing() {
    let mut host = brush_host(1.0);
    assert!(host.resize(-1.0, 50.0).is_err());
    assert!(take_commands(&mut host).is_empty());
}

#[test]
fn equal_props_are_skipped_once_rendered() {
    let mut host = brush_host(1.0);
    host.resize(100.0, 50.0).expect("resize");
    take_commands(&mut host);

    let same = *host.layer();
    assert!(!host.set_layer(same).expect("set layer"));
    assert!(take_commands(&mut host).is_empty());

    let selected = BrushLayer::new(Interval::new(0.0, 10.0), Some(Interval::new(2.0, 4.0)));
    assert!(host.set_layer(selected).expect("set layer"));
    let commands = take_commands(&mut host);
    assert_eq!(commands.first(), Some(&DrawCommand::ResetTransform));
    assert!(commands.contains(&DrawCommand::Fill));

    let stats = host.render_stats();
    assert_eq!(stats.rendered, 2);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn props_before_first_render_are_never_skipped() {
    let mut host = brush_host(1.0);
    let same = *host.layer();
    assert!(host.set_layer(same).expect("set layer"));
    assert_eq!(host.render_stats().skipped, 0);
}

#[test]
fn snapshots_compare_by_identity() {
    let points = vec![DataPoint::new(0.0, 1.0), DataPoint::new(5.0, 2.0)];
    let snapshot = DataSnapshot::new(points.clone());
    let domain = Interval::new(0.0, 10.0);
    let surface = CanvasSurface::new(RecordingContext::new(), 1.0).expect("surface");
    let mut host = LayerHost::new(PointLayer::new(snapshot.clone(), domain, domain), surface);
    host.resize(100.0, 100.0).expect("resize");

    let cloned = PointLayer::new(snapshot, domain, domain);
    assert!(!host.set_layer(cloned).expect("set layer"));

    let rebuilt = PointLayer::new(DataSnapshot::new(points), domain, domain);
    assert!(host.set_layer(rebuilt).expect("set layer"));
    assert_eq!(host.render_stats().rendered, 2);
}

#[test]
fn pixel_ratio_change_redraws_at_new_resolution() {
    let mut host = brush_host(1.0);
    host.resize(100.0, 50.0).expect("resize");
    take_commands(&mut host);

    host.set_pixel_ratio(2.0).expect("pixel ratio");
    let commands = take_commands(&mut host);
    assert_eq!(
        commands[0],
        DrawCommand::ResizeBacking {
            width_px: 200,
            height_px: 100,
        }
    );
    assert!(commands.contains(&DrawCommand::Scale { x: 2.0, y: 2.0 }));
    assert_eq!(host.surface().backing_size(), (200, 100));

    host.set_pixel_ratio(2.0).expect("pixel ratio");
    assert!(take_commands(&mut host).is_empty());
    assert!(host.set_pixel_ratio(0.0).is_err());
}

#[test]
fn into_parts_returns_layer_and_surface() {
    let mut host = brush_host(1.0);
    host.resize(40.0, 20.0).expect("resize");
    let (layer, surface) = host.into_parts();
    assert_eq!(layer.selection, None);
    assert_eq!(surface.into_context().backing_size(), (40, 20));
}
