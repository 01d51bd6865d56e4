//! Process-wide logging setup shared by the Souk binaries.

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize structured logging from the environment.
///
/// `RUST_LOG` selects the filter (default `info`); `LOG_FORMAT=pretty` switches
/// from JSON lines to human-readable output. Safe to call more than once.
pub fn init() {
    let format = LogFormat::from_lookup(|key| std::env::var(key).ok());
    tracing::init(format);
}
