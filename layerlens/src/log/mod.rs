//! Diagnostic channel used by the reconciler and its collaborators.
//!
//! Components never call `tracing` directly. They hold an `Arc<dyn Logger>`
//! and report through it, so tests can capture diagnostics and the CLI can
//! route them to `tracing` subscribers.
//!
//! - `Logger` trait: the interface every component logs through
//! - `TracingLogger`: production adapter that delegates to the `tracing` crate
//! - `NoOpLogger`: discards everything
//! - `MemoryLogger`: keeps every record in memory for assertions
//!
//! ```
//! use layerlens::log::{Logger, MemoryLogger, LogLevel};
//! use layerlens::log_warn;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_warn!(logger, "no handler registered for layer type '{}'", "vector");
//! assert!(logger.contains(LogLevel::Warn, "vector"));
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
