//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initialize the logging system from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level
///
/// `RUST_LOG` still takes precedence when it is set. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Parse a textual level such as `"debug"` or `"WARN"`
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.parse().ok()
}
