use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber on stderr.
///
/// The level defaults to `warn` (`info` with `--verbose`); `RUST_LOG` overrides
/// it. `STORMTYPE_LOG_FORMAT=json` switches to one JSON object per event.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::INFO } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let use_json = std::env::var("STORMTYPE_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}
