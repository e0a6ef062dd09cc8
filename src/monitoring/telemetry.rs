//! Logging setup shared by the binaries.
//!
//! Log lines go to stderr so stdout carries only the JSON result. Verbosity is
//! taken from `RUST_LOG`, e.g. `polymarket_normalizer=debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact(),
    );

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = subscriber.try_init();
}
