use canopy_core::config::ObservabilityConfig;
use canopy_observability::{correlation_span, init_tracing, init_tracing_with_filter};

#[test]
fn repeated_initialization_is_harmless() {
    let config = ObservabilityConfig {
        log_level: "debug".to_string(),
        json: true,
    };
    init_tracing(&config);
    init_tracing(&config);
    init_tracing_with_filter("canopy_store=trace");

    let span = correlation_span!(4usize);
    let _guard = span.enter();
    tracing::info!(groups = 1, "emitted under an installed subscriber");
}
