//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "hero-roster";

/// Installs the global tracing subscriber.
///
/// Filtering comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level` (default `"info"`). Events go to stderr. When
/// `config.trace_file` is set, spans are additionally exported as JSON lines
/// to that file through OpenTelemetry.
///
/// Idempotent: only the first call in a process installs a subscriber, and a
/// failure to install never reaches the caller.
///
/// # Example
///
/// ```rust
/// use hero_roster::observability::init_tracing;
/// use hero_roster::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let otel_layer = config.trace_file.as_ref().map(|path| {
        let provider = tracer::create_tracer_provider(path.clone(), SERVICE_NAME);
        let tracer = provider.tracer(SERVICE_NAME);
        let _ = opentelemetry::global::set_tracer_provider(provider);
        OpenTelemetryLayer::new(tracer)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(otel_layer);

    if subscriber.try_init().is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
