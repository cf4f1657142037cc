use std::sync::OnceLock;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _};

static TELEMETRY_INIT: OnceLock<()> = OnceLock::new();

/// Builds the subscriber. `RUST_LOG` wins over `log_level` when set.
pub fn get_subscriber(log_level: &str) -> impl Subscriber + Send + Sync {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = base_filter(rust_log.as_deref(), log_level)
        .add_directive("h2=warn".parse().expect("well-formed"))
        .add_directive("hyper_util=warn".parse().expect("well-formed"))
        .add_directive("reqwest=warn".parse().expect("well-formed"))
        .add_directive("alloy_transport_http=warn".parse().expect("well-formed"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::Registry::default()
        .with(filter)
        .with(fmt_layer)
}

/// A blank or unparseable `RUST_LOG` falls back to `log_level`.
fn base_filter(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(log_level))
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    TELEMETRY_INIT
        .set(())
        .expect("global tracing subscriber already set");
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}
