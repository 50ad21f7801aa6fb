//! Diagnostic sink handed to each component at construction.
//!
//! Components never reach for a global logger; the binary decides where
//! messages go by choosing the sink.

/// Receiver for low-severity diagnostics emitted by the core.
pub trait Diagnostics {
    fn debug(&self, message: &str);

    fn warn(&self, message: &str) {
        self.debug(message);
    }
}

/// Sink that drops every message. Default for library callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn debug(&self, _message: &str) {}
}

/// Sink that forwards messages as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "superpowers_codex", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "superpowers_codex", "{}", message);
    }
}
