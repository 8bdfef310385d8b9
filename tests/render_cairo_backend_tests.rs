#![cfg(feature = "cairo-backend")]

use layered_chart::LayerHost;
use layered_chart::core::{Interval, ScaleKind, SpanDatum};
use layered_chart::layers::{SpanLayer, XAxisLayer};
use layered_chart::render::{CairoContext, CanvasSurface, DrawContext};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[test]
fn cairo_context_reports_backend_name() {
    let context = CairoContext::new(10, 10).expect("context");
    assert_eq!(context.backend_name(), "cairo+pango+pangocairo");
}

#[test]
fn axis_layer_draws_labels_through_pango() {
    let context = CairoContext::new(1, 1).expect("context");
    let surface = CanvasSurface::new(context, 2.0).expect("surface");
    let layer = XAxisLayer::new(Interval::new(0.0, 100.0)).with_scale_kind(ScaleKind::Linear);
    let mut host = LayerHost::new(layer, surface);
    host.resize(400.0, 40.0).expect("resize");

    let (_, surface) = host.into_parts();
    let context = surface.into_context();
    assert_eq!(context.surface().width(), 800);
    assert_eq!(context.surface().height(), 80);

    let stats = context.stats();
    assert!(stats.texts >= 2);
    assert_eq!(stats.strokes, 1);
}

#[test]
fn rendered_frame_encodes_as_png() {
    let context = CairoContext::new(1, 1).expect("context");
    let surface = CanvasSurface::new(context, 1.0).expect("surface");
    let spans = vec![SpanDatum::new(10.0, 30.0), SpanDatum::new(50.0, 60.0)];
    let layer = SpanLayer::new(spans.into(), Interval::new(0.0, 100.0));
    let mut host = LayerHost::new(layer, surface);
    host.resize(200.0, 50.0).expect("resize");

    let (_, surface) = host.into_parts();
    let mut context = surface.into_context();
    assert_eq!(context.stats().fills, 2);

    let png = context.to_png_bytes().expect("png");
    assert!(png.starts_with(&PNG_SIGNATURE));

    context.resize_backing(20, 20).expect("resize backing");
    assert_eq!(context.surface().width(), 20);
    assert_eq!(context.take_stats().fills, 2);
    assert_eq!(context.stats().fills, 0);
}
