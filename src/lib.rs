//! # Elevator: CybOX to STIX 2.0 observable conversion
//!
//! Elevator converts observables written against the legacy CybOX object
//! model into STIX 2.0 cyber-observable objects.
//!
//! ## Features
//!
//! - **Type dispatch**: address, URI, file, Windows registry key, process
//!   (with Windows process and service extensions), domain name, mutex and
//!   network connection objects each have a dedicated converter
//! - **Lenient conversion**: unsupported types and legacy-only features are
//!   reported as diagnostics, never as errors
//! - **Vocabulary mapping**: controlled-vocabulary values are translated
//!   through overridable tables, passing unknown values through unchanged
//! - **Batch I/O**: read CybOX JSON, write NDJSON or JSON arrays
//!
//! ## Example
//!
//! ```
//! use elevator::{CollectingSink, Elevator, NormalizedContainer, Observable};
//!
//! let json = r#"{
//!     "id": "example:Observable-1",
//!     "object": {"properties": {
//!         "xsi:type": "WinRegistryKeyObj:WindowsRegistryKeyObjectType",
//!         "hive": "HKEY_LOCAL_MACHINE",
//!         "key": "SOFTWARE\\Foo"
//!     }}
//! }"#;
//!
//! let sink = CollectingSink::new();
//! let observables = Observable::parse_document(json, &sink).unwrap();
//! let mut container = NormalizedContainer::new();
//!
//! Elevator::default().convert_observable(&observables[0], &mut container, &sink);
//!
//! let object = container.object().unwrap();
//! assert_eq!(object.object_type(), Some("windows-registry-key"));
//! assert_eq!(object.get("key").unwrap(), "HKEY_LOCAL_MACHINE\\SOFTWARE\\Foo");
//! ```

pub mod config;
pub mod converters;
pub mod diagnostics;
pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod legacy;
pub mod normalized;
pub mod serialization;
pub mod vocab;

// Re-export key types
pub use config::{ElevatorConfig, OutputConfig, OutputFormat};
pub use converters::{ConversionContext, ObjectConverter};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity, TracingSink};
pub use dispatcher::{BatchReport, Elevator};
pub use error::ElevatorError;
pub use legacy::{ObjectProperties, Observable};
pub use normalized::{NormalizedContainer, NormalizedObject, OBJECT_INDEX};
pub use serialization::{write_containers, JsonArrayWriter, NdjsonWriter};
pub use vocab::{map_vocabs_to_label, Vocabularies, VocabularyKind, VocabularyTable};
