use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialise human-readable `OrderFeed` logging at `INFO` unless overridden by `RUST_LOG`.
///
/// eg/ `RUST_LOG=orderfeed=debug` logs every simulated order & closed volume bucket.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(env_filter(LevelFilter::INFO))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init()
}

/// Initialise JSON `OrderFeed` logging (one flattened object per event).
pub fn init_json_logging() {
    tracing_subscriber::registry()
        .with(env_filter(LevelFilter::INFO))
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
        .init()
}

fn env_filter(default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy()
}
