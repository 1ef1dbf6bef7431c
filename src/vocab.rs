//! Controlled-vocabulary tables and the vocabulary mapper.
//!
//! A miss is not an error: unmapped legacy values pass through unchanged so
//! that vocabularies can grow without breaking conversion.

use std::collections::HashMap;
use std::fmt;

/// Identifies one of the vocabulary tables consulted by the converters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabularyKind {
    ServiceStartType,
    ServiceType,
    ServiceStatus,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 3] = [
        VocabularyKind::ServiceStartType,
        VocabularyKind::ServiceType,
        VocabularyKind::ServiceStatus,
    ];

    /// Name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            VocabularyKind::ServiceStartType => "service_start_type",
            VocabularyKind::ServiceType => "service_type",
            VocabularyKind::ServiceStatus => "service_status",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read-only mapping from legacy enumerated values to STIX labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyTable {
    entries: HashMap<String, String>,
}

impl VocabularyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(|s| s.as_str())
    }

    /// Add or replace an entry
    pub fn insert(&mut self, value: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(value.into(), label.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by legacy value
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }
}

/// Map a legacy vocabulary value to its label, or return it unchanged
pub fn map_vocabs_to_label(value: &str, table: &VocabularyTable) -> String {
    table.get(value).unwrap_or(value).to_string()
}

/// CybOX `ServiceModeEnum` to STIX `windows-service-start-type`
pub fn service_start_type() -> VocabularyTable {
    VocabularyTable::from_pairs([
        ("SERVICE_AUTO_START", "SERVICE_AUTO_START"),
        ("SERVICE_BOOT_START", "SERVICE_BOOT_START"),
        ("SERVICE_DEMAND_START", "SERVICE_DEMAND_START"),
        ("SERVICE_DISABLED", "SERVICE_DISABLED"),
        ("SERVICE_SYSTEM_START", "SERVICE_SYSTEM_ALERT"),
    ])
}

/// CybOX `ServiceType` to STIX `windows-service-type`
pub fn service_type() -> VocabularyTable {
    VocabularyTable::from_pairs([
        ("SERVICE_KERNEL_DRIVER", "SERVICE_KERNEL_DRIVER"),
        ("SERVICE_FILE_SYSTEM_DRIVER", "SERVICE_FILE_SYSTEM_DRIVER"),
        ("SERVICE_WIN32_OWN_PROCESS", "SERVICE_WIN32_OWN_PROCESS"),
        ("SERVICE_WIN32_SHARE_PROCESS", "SERVICE_WIN32_SHARE_PROCESS"),
    ])
}

/// CybOX `ServiceStatusEnum` to STIX `windows-service-status`
pub fn service_status() -> VocabularyTable {
    VocabularyTable::from_pairs([
        ("SERVICE_CONTINUE_PENDING", "SERVICE_CONTINUE_PENDING"),
        ("SERVICE_PAUSE_PENDING", "SERVICE_PAUSE_PENDING"),
        ("SERVICE_PAUSED", "SERVICE_PAUSED"),
        ("SERVICE_RUNNING", "SERVICE_RUNNING"),
        ("SERVICE_START_PENDING", "SERVICE_START_PENDING"),
        ("SERVICE_STOP_PENDING", "SERVICE_STOP_PENDING"),
        ("SERVICE_STOPPED", "SERVICE_STOPPED"),
    ])
}

/// The full set of vocabulary tables used during conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabularies {
    pub service_start_type: VocabularyTable,
    pub service_type: VocabularyTable,
    pub service_status: VocabularyTable,
}

impl Vocabularies {
    /// Built-in tables
    pub fn builtin() -> Self {
        Self {
            service_start_type: service_start_type(),
            service_type: service_type(),
            service_status: service_status(),
        }
    }

    pub fn table(&self, kind: VocabularyKind) -> &VocabularyTable {
        match kind {
            VocabularyKind::ServiceStartType => &self.service_start_type,
            VocabularyKind::ServiceType => &self.service_type,
            VocabularyKind::ServiceStatus => &self.service_status,
        }
    }

    pub fn table_mut(&mut self, kind: VocabularyKind) -> &mut VocabularyTable {
        match kind {
            VocabularyKind::ServiceStartType => &mut self.service_start_type,
            VocabularyKind::ServiceType => &mut self.service_type,
            VocabularyKind::ServiceStatus => &mut self.service_status,
        }
    }

    /// Map `value` through the table for `kind`
    pub fn map(&self, kind: VocabularyKind, value: &str) -> String {
        map_vocabs_to_label(value, self.table(kind))
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_hit() {
        let table = service_start_type();
        assert_eq!(
            map_vocabs_to_label("SERVICE_SYSTEM_START", &table),
            "SERVICE_SYSTEM_ALERT"
        );
    }

    #[test]
    fn test_map_miss_returns_value() {
        let table = service_start_type();
        assert_eq!(map_vocabs_to_label("SOMETHING_NEW", &table), "SOMETHING_NEW");
        assert_eq!(map_vocabs_to_label("", &VocabularyTable::new()), "");
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in VocabularyKind::ALL {
            assert_eq!(VocabularyKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(VocabularyKind::from_name("hash_name"), None);
    }

    #[test]
    fn test_table_override() {
        let mut vocabs = Vocabularies::builtin();
        vocabs
            .table_mut(VocabularyKind::ServiceStatus)
            .insert("SERVICE_RUNNING", "running");

        assert_eq!(vocabs.map(VocabularyKind::ServiceStatus, "SERVICE_RUNNING"), "running");
        assert_eq!(
            vocabs.map(VocabularyKind::ServiceStatus, "SERVICE_PAUSED"),
            "SERVICE_PAUSED"
        );
    }
}
