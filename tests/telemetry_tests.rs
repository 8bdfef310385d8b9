use layered_chart::telemetry::{init_default_tracing, init_tracing_with_filter};

#[test]
fn tracing_init_follows_feature_flag() {
    let first = init_default_tracing();
    if cfg!(feature = "telemetry") {
        assert!(first);
        assert!(!init_tracing_with_filter("layered_chart=trace"));
    } else {
        assert!(!first);
    }
}
