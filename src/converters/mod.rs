//! Type-specific converters from CybOX objects to STIX 2.0 objects.
//!
//! Every supported legacy payload implements [`ObjectConverter`]. The
//! dispatcher selects the implementation with a single exhaustive match over
//! [`crate::legacy::ObjectProperties`].

pub mod address;
pub mod domain_name;
pub mod file;
pub mod mutex;
pub mod network_connection;
pub mod process;
pub mod registry_key;
pub mod uri;

pub use process::{convert_windows_process, convert_windows_service};

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::normalized::NormalizedObject;
use crate::vocab::Vocabularies;

/// Shared state for converting one observable.
///
/// Holds the vocabulary tables and the sink diagnostics are reported to.
pub struct ConversionContext<'a> {
    vocabularies: &'a Vocabularies,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> ConversionContext<'a> {
    pub fn new(vocabularies: &'a Vocabularies, sink: &'a dyn DiagnosticSink) -> Self {
        Self { vocabularies, sink }
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        self.vocabularies
    }

    pub fn info(&self, message: impl Into<String>) {
        self.sink.emit(Severity::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.sink.emit(Severity::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.sink.emit(Severity::Error, message.into());
    }
}

/// Conversion of one legacy payload into a normalized object.
///
/// An empty result means the payload produced nothing worth emitting; the
/// dispatcher reports it and leaves the container untouched.
pub trait ObjectConverter {
    fn convert(&self, ctx: &ConversionContext<'_>) -> NormalizedObject;
}

/// Value of an optional attribute that is both present and non-empty
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("a".to_string())), Some("a"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }
}
