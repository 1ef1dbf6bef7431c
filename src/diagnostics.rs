//! Diagnostic reporting for conversions.
//!
//! Converters never fail on domain-expected gaps (unsupported types, missing
//! optional fields, legacy features with no STIX equivalent). They report
//! them to a [`DiagnosticSink`] and carry on.

use std::fmt;
use std::sync::Mutex;

/// Severity of a conversion diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single (severity, message) pair emitted during conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Destination for conversion diagnostics.
///
/// Implementations must be safe for concurrent append so that independent
/// observables can be converted in parallel against one sink.
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic
    fn emit(&self, severity: Severity, message: String);

    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(Severity::Info, message.into());
    }

    fn warn(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(Severity::Warning, message.into());
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(Severity::Error, message.into());
    }
}

/// Forward a diagnostic to the `tracing` subscriber at the matching level
fn trace_diagnostic(severity: Severity, message: &str) {
    match severity {
        Severity::Info => tracing::info!("{}", message),
        Severity::Warning => tracing::warn!("{}", message),
        Severity::Error => tracing::error!("{}", message),
    }
}

/// Sink that only logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, severity: Severity, message: String) {
        trace_diagnostic(severity, &message);
    }
}

/// Sink that keeps every diagnostic in memory (and logs it as well).
///
/// Used by the CLI to print a summary and by tests to assert on what a
/// conversion reported.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all diagnostics recorded so far, in emission order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of recorded diagnostics with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Total number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain all recorded diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, severity: Severity, message: String) {
        trace_diagnostic(severity, &message);
        let diagnostic = Diagnostic { severity, message };
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_counts_by_severity() {
        let sink = CollectingSink::new();
        sink.warn("first");
        sink.error("second");
        sink.warn("third");

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.count(Severity::Warning), 2);
        assert_eq!(sink.count(Severity::Error), 1);
        assert_eq!(sink.count(Severity::Info), 0);
    }

    #[test]
    fn test_collecting_sink_take_drains() {
        let sink = CollectingSink::new();
        sink.info("hello");

        let drained = sink.take();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].message, "hello");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic {
            severity: Severity::Error,
            message: "windows-registry-key is required to have a key property".to_string(),
        };
        assert_eq!(
            d.to_string(),
            "[error] windows-registry-key is required to have a key property"
        );
    }
}
