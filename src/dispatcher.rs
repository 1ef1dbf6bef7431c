//! Object dispatcher: routes a legacy observable to its converter and
//! assembles the container.
//!
//! Unsupported object types and conversions that yield nothing are
//! reported to the diagnostic sink and signalled by a `None` result; they
//! are never errors.

use uuid::Uuid;

use crate::converters::{ConversionContext, ObjectConverter};
use crate::diagnostics::DiagnosticSink;
use crate::legacy::{ObjectProperties, Observable};
use crate::normalized::{NormalizedContainer, NormalizedObject};
use crate::vocab::Vocabularies;

/// Default `type` of containers created for batch conversion
pub const DEFAULT_CONTAINER_TYPE: &str = "observed-data";

/// Converts CybOX observables into STIX 2.0 objects.
///
/// # Example
/// ```
/// use elevator::{CollectingSink, Elevator, NormalizedContainer, Observable};
/// use elevator::legacy::{Mutex, ObjectProperties};
///
/// let elevator = Elevator::default();
/// let sink = CollectingSink::new();
/// let observable = Observable::new(ObjectProperties::Mutex(Mutex {
///     name: Some("Global\\evil".to_string()),
///     ..Mutex::default()
/// }));
///
/// let mut container = NormalizedContainer::new();
/// let converted = elevator.convert_observable(&observable, &mut container, &sink);
/// assert!(converted.is_some());
/// assert_eq!(container.object().unwrap().object_type(), Some("mutex"));
/// ```
#[derive(Debug, Clone)]
pub struct Elevator {
    vocabularies: Vocabularies,
    container_type: String,
}

impl Elevator {
    pub fn new(vocabularies: Vocabularies) -> Self {
        Self {
            vocabularies,
            container_type: DEFAULT_CONTAINER_TYPE.to_string(),
        }
    }

    /// Set the `type` of containers created by [`Elevator::convert_batch`]
    pub fn with_container_type(mut self, container_type: impl Into<String>) -> Self {
        self.container_type = container_type.into();
        self
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    pub fn container_type(&self) -> &str {
        &self.container_type
    }

    /// Convert one properties payload.
    ///
    /// # Returns
    /// * `Some(object)` - the converter produced a non-empty object
    /// * `None` - the type is unsupported or the conversion yielded nothing;
    ///   a warning has been emitted
    pub fn convert_properties(
        &self,
        properties: &ObjectProperties,
        sink: &dyn DiagnosticSink,
    ) -> Option<NormalizedObject> {
        let ctx = ConversionContext::new(&self.vocabularies, sink);

        let object = match properties {
            ObjectProperties::Address(address) => address.convert(&ctx),
            ObjectProperties::Uri(uri) => uri.convert(&ctx),
            ObjectProperties::File(file) => file.convert(&ctx),
            ObjectProperties::WindowsRegistryKey(key) => key.convert(&ctx),
            ObjectProperties::Process(process) => process.convert(&ctx),
            ObjectProperties::DomainName(domain) => domain.convert(&ctx),
            ObjectProperties::Mutex(mutex) => mutex.convert(&ctx),
            ObjectProperties::NetworkConnection(connection) => connection.convert(&ctx),
            ObjectProperties::Unsupported { xsi_type } => {
                ctx.warn(format!("{} not handled yet", xsi_type));
                return None;
            }
        };

        if object.is_empty() {
            ctx.warn(format!("{} didn't yield any STIX 2.0 object", properties));
            return None;
        }

        Some(object)
    }

    /// Convert an observable into `container`.
    ///
    /// On success the converted object is stored at `container.objects["0"]`
    /// and the container is returned. Otherwise the container is left
    /// untouched and `None` is returned.
    pub fn convert_observable<'c>(
        &self,
        observable: &Observable,
        container: &'c mut NormalizedContainer,
        sink: &dyn DiagnosticSink,
    ) -> Option<&'c mut NormalizedContainer> {
        let object = self.convert_properties(observable.properties(), sink)?;
        container.set_object(object);
        Some(container)
    }

    /// Convert a batch of observables, each into a fresh container with a
    /// generated `<type>--<uuid>` id.
    ///
    /// Observables that yield nothing are counted as skipped and produce no
    /// container.
    pub fn convert_batch(&self, observables: &[Observable], sink: &dyn DiagnosticSink) -> BatchReport {
        let mut report = BatchReport::default();

        for observable in observables {
            let id = format!("{}--{}", self.container_type, Uuid::new_v4());
            let mut container = NormalizedContainer::with_identity(&self.container_type, id);

            if self.convert_observable(observable, &mut container, sink).is_some() {
                report.converted += 1;
                report.containers.push(container);
            } else {
                tracing::debug!(
                    "Skipped observable {}",
                    observable.id.as_deref().unwrap_or("<no id>")
                );
                report.skipped += 1;
            }
        }

        tracing::info!(
            "Converted {} of {} observables",
            report.converted,
            observables.len()
        );

        report
    }
}

impl Default for Elevator {
    fn default() -> Self {
        Self::new(Vocabularies::builtin())
    }
}

/// Outcome of [`Elevator::convert_batch`]
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One container per converted observable, in input order
    pub containers: Vec<NormalizedContainer>,
    pub converted: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, Severity};
    use crate::legacy::{Address, DomainName, NetworkConnection, Uri};
    use serde_json::json;

    fn observable(properties: ObjectProperties) -> Observable {
        Observable::new(properties)
    }

    #[test]
    fn test_convert_observable_populates_container() {
        let elevator = Elevator::default();
        let sink = CollectingSink::new();
        let obs = observable(ObjectProperties::Uri(Uri {
            value: "http://example.com".to_string(),
        }));

        let mut container = NormalizedContainer::new();
        let result = elevator.convert_observable(&obs, &mut container, &sink);

        assert!(result.is_some());
        assert_eq!(
            container.to_json().unwrap(),
            json!({"objects": {"0": {"type": "url-object", "value": "http://example.com"}}})
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unsupported_type() {
        let elevator = Elevator::default();
        let sink = CollectingSink::new();
        let obs = observable(ObjectProperties::Unsupported {
            xsi_type: "EmailMessageObjectType".to_string(),
        });

        let mut container = NormalizedContainer::new();
        assert!(elevator.convert_observable(&obs, &mut container, &sink).is_none());
        assert!(container.objects.is_none());

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("EmailMessageObjectType"));
    }

    #[test]
    fn test_network_connection_yields_nothing() {
        let elevator = Elevator::default();
        let sink = CollectingSink::new();
        let obs = observable(ObjectProperties::NetworkConnection(NetworkConnection::default()));

        let mut container = NormalizedContainer::new();
        assert!(elevator.convert_observable(&obs, &mut container, &sink).is_none());
        assert!(container.objects.is_none());

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("NetworkConnectionObjectType"));
    }

    #[test]
    fn test_unsupported_address_category() {
        let elevator = Elevator::default();
        let sink = CollectingSink::new();
        let obs = observable(ObjectProperties::Address(Address {
            category: Some("e-mail".to_string()),
            address_value: "someone@example.com".to_string(),
        }));

        let mut container = NormalizedContainer::new();
        assert!(elevator.convert_observable(&obs, &mut container, &sink).is_none());
        assert_eq!(sink.count(Severity::Warning), 2);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let elevator = Elevator::default();
        let sink = CollectingSink::new();
        let obs = observable(ObjectProperties::DomainName(DomainName {
            value: Some("example.com".to_string()),
        }));

        let mut first = NormalizedContainer::new();
        let mut second = NormalizedContainer::new();
        elevator.convert_observable(&obs, &mut first, &sink);
        elevator.convert_observable(&obs, &mut second, &sink);

        assert_eq!(first, second);
        assert_eq!(first.objects.as_ref().unwrap().keys().collect::<Vec<_>>(), vec!["0"]);
    }

    #[test]
    fn test_convert_batch() {
        let elevator = Elevator::default().with_container_type("observed-data");
        let sink = CollectingSink::new();
        let observables = vec![
            observable(ObjectProperties::DomainName(DomainName {
                value: Some("example.com".to_string()),
            })),
            observable(ObjectProperties::NetworkConnection(NetworkConnection::default())),
            observable(ObjectProperties::Uri(Uri {
                value: "http://example.com".to_string(),
            })),
        ];

        let report = elevator.convert_batch(&observables, &sink);

        assert_eq!(report.converted, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.containers.len(), 2);

        let first = &report.containers[0];
        assert_eq!(first.properties.get("type"), Some(&json!("observed-data")));
        let id = first.properties.get("id").and_then(|v| v.as_str()).unwrap();
        assert!(id.starts_with("observed-data--"));
        assert_eq!(
            report.containers[1].object().and_then(|o| o.object_type()),
            Some("url-object")
        );
    }
}
