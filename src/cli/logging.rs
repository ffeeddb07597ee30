//! Diagnostic logging setup
//!
//! User-facing status goes through the presenter. Diagnostics (device name,
//! stream parameters, stream errors) go through `tracing` to stderr, at
//! `warn` unless `MIC_CAPTURE_LOG` names another level.

use std::env;

use tracing_subscriber::filter::LevelFilter;

/// Environment variable holding the log level
pub const LOG_ENV: &str = "MIC_CAPTURE_LOG";

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    // Fails only when a global subscriber is already installed
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Level named by `value`, falling back to `warn`
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::WARN)
}
