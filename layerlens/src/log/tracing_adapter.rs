//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger implementation that delegates to the `tracing` crate.
///
/// Events are emitted under the `layerlens` target so they can be filtered
/// with `RUST_LOG=layerlens=debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing logger adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "layerlens", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "layerlens", "{}", args),
            LogLevel::Info => tracing::info!(target: "layerlens", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "layerlens", "{}", args),
            LogLevel::Error => tracing::error!(target: "layerlens", "{}", args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingLogger>();
    }

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: events are dropped, nothing panics.
        let logger: Box<dyn Logger> = Box::new(TracingLogger::new());
        logger.warn(format_args!("layer {} skipped", "co2"));
    }
}
