use layered_chart::core::{DataPoint, DataSnapshot, Interval, find_visible_index_bounds};
use layered_chart::layers::{Layer, PointLayer};
use layered_chart::render::{DrawCommand, RecordingContext};
use proptest::prelude::*;

fn sorted_points() -> impl Strategy<Value = Vec<DataPoint>> {
    prop::collection::vec((0.0f64..1_000.0, -100.0f64..100.0), 0..200).prop_map(|mut raw| {
        raw.sort_by(|a, b| a.0.total_cmp(&b.0));
        raw.into_iter()
            .map(|(timestamp, value)| DataPoint::new(timestamp, value))
            .collect()
    })
}

proptest! {
    #[test]
    fn point_render_is_pure(
        points in sorted_points(),
        start in -100.0f64..900.0,
        span in 1.0f64..500.0,
    ) {
        let domain = Interval::new(start, start + span);
        let layer = PointLayer::new(
            DataSnapshot::new(points.clone()),
            domain,
            Interval::new(-100.0, 100.0),
        );

        let mut first = RecordingContext::new();
        layer.render(320.0, 200.0, &mut first).expect("render");
        let mut second = RecordingContext::new();
        layer.render(320.0, 200.0, &mut second).expect("render");
        prop_assert_eq!(first.commands(), second.commands());

        let arcs = first.count_where(|command| matches!(command, DrawCommand::Arc { .. }));
        let expected = if points.len() < 2 {
            0
        } else {
            find_visible_index_bounds(&points, domain).len()
        };
        prop_assert_eq!(arcs, expected);
    }
}
