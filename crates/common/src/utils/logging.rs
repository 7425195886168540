use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter applied when `RUST_LOG` is unset: everything at `info`, with the
/// workspace crates and the request-trace layer called out explicitly so a
/// narrower `RUST_LOG` can still dial them up one at a time.
const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,service=info,server=info";

/// Install the tracing subscriber shared by the three service binaries.
/// Compact single-line output on stdout so container setups that hide
/// stderr still show logs.
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}
