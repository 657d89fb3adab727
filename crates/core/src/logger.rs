//! Logger injection.
//!
//! Components never reach for a process-wide logger. Each one is handed a [`SharedLogger`]
//! at construction and defaults to [`NoopLogger`]. [`TracingLogger`] forwards to `tracing`,
//! which the binary wires to a subscriber.

use std::fmt;
use std::sync::Arc;

pub use tracing::Level;

/// Sink for diagnostic messages from the engine.
pub trait GameLogger: fmt::Debug + Send + Sync {
    /// Record one message. `scope` names the emitting component (e.g. `"match"`).
    fn log(&self, level: Level, scope: &'static str, args: fmt::Arguments<'_>);

    /// Cheap pre-check so callers can skip building expensive messages.
    fn enabled(&self, _level: Level) -> bool {
        true
    }
}

/// Shared handle passed into constructors
pub type SharedLogger = Arc<dyn GameLogger>;

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl GameLogger for NoopLogger {
    fn log(&self, _level: Level, _scope: &'static str, _args: fmt::Arguments<'_>) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }
}

/// Forwards to the `tracing` macros under the `tetris_versus` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl GameLogger for TracingLogger {
    fn log(&self, level: Level, scope: &'static str, args: fmt::Arguments<'_>) {
        match level {
            Level::ERROR => tracing::error!(target: "tetris_versus", scope, "{}", args),
            Level::WARN => tracing::warn!(target: "tetris_versus", scope, "{}", args),
            Level::INFO => tracing::info!(target: "tetris_versus", scope, "{}", args),
            Level::DEBUG => tracing::debug!(target: "tetris_versus", scope, "{}", args),
            Level::TRACE => tracing::trace!(target: "tetris_versus", scope, "{}", args),
        }
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::ERROR => tracing::enabled!(target: "tetris_versus", Level::ERROR),
            Level::WARN => tracing::enabled!(target: "tetris_versus", Level::WARN),
            Level::INFO => tracing::enabled!(target: "tetris_versus", Level::INFO),
            Level::DEBUG => tracing::enabled!(target: "tetris_versus", Level::DEBUG),
            Level::TRACE => tracing::enabled!(target: "tetris_versus", Level::TRACE),
        }
    }
}

/// Default logger handle
pub fn noop() -> SharedLogger {
    Arc::new(NoopLogger)
}

/// Logger handle backed by `tracing`
pub fn tracing_logger() -> SharedLogger {
    Arc::new(TracingLogger)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Collects messages for assertions
    #[derive(Debug, Default)]
    pub struct MemoryLogger {
        pub lines: Mutex<Vec<(Level, &'static str, String)>>,
    }

    impl GameLogger for MemoryLogger {
        fn log(&self, level: Level, scope: &'static str, args: fmt::Arguments<'_>) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((level, scope, args.to_string()));
            }
        }
    }
}
