use tracing_subscriber::{fmt, EnvFilter};
use wellmerge_core::config::LogLevel;

/// Install the global subscriber. Call once, before anything logs. CloudWatch stamps every line itself, so
/// timestamps and colours are left out.
pub fn init(level: LogLevel) {
    let filter = match level {
        LogLevel::Info => EnvFilter::new("info"),
        LogLevel::Debug => EnvFilter::new("debug"),
        LogLevel::Unset => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"))
        }
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}
