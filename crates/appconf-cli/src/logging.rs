use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Initialize tracing with the specified verbosity level and output format.
///
/// Logs go to stderr so that command output on stdout stays machine-readable.
/// `RUST_LOG` overrides the verbosity flags when set.
///
/// # Arguments
/// * `json` - If true, output logs in JSON format; otherwise, use human-readable format.
/// * `verbose` - Verbosity level: 0 for WARN, 1 for DEBUG, 2+ for TRACE.
pub fn init_tracing(json: bool, verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("appconf_store={},appconf={}", level, level)));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .init();
    }
    else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
