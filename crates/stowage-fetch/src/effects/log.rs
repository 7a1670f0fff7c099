use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::Level;

/// Leveled logging collaborator.
///
/// The library never writes to a global logger directly; callers pick a
/// sink. [`TracingSink`] is the usual choice.
pub trait LogSink: Send + Sync {
    fn debug(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
}

/// Forwards to the `tracing` macros under the `stowage_fetch` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn debug(&self, args: fmt::Arguments<'_>) { tracing::debug!(target: "stowage_fetch", "{}", args); }

    fn info(&self, args: fmt::Arguments<'_>) { tracing::info!(target: "stowage_fetch", "{}", args); }

    fn warn(&self, args: fmt::Arguments<'_>) { tracing::warn!(target: "stowage_fetch", "{}", args); }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn debug(&self, _args: fmt::Arguments<'_>) {}

    fn info(&self, _args: fmt::Arguments<'_>) {}

    fn warn(&self, _args: fmt::Arguments<'_>) {}
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether any record at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }

    fn push(&self, level: Level, args: fmt::Arguments<'_>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, args.to_string()));
    }
}

impl LogSink for MemorySink {
    fn debug(&self, args: fmt::Arguments<'_>) { self.push(Level::DEBUG, args); }

    fn info(&self, args: fmt::Arguments<'_>) { self.push(Level::INFO, args); }

    fn warn(&self, args: fmt::Arguments<'_>) { self.push(Level::WARN, args); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_levels() {
        let sink = MemorySink::new();
        sink.info(format_args!("downloading {}", "https://example.com/a"));
        sink.debug(format_args!("local file: length {}", 3));

        assert!(sink.contains(Level::INFO, "downloading https://example.com/a"));
        assert!(sink.contains(Level::DEBUG, "length 3"));
        assert!(!sink.contains(Level::WARN, "downloading"));
        assert_eq!(sink.records().len(), 2);
    }
}
