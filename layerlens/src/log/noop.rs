//! Logger that drops every diagnostic.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Default logger of a [`MapView`](crate::view::MapView) built without
/// [`with_logger`](crate::view::MapView::with_logger).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
