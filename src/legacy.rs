//! Legacy CybOX object model.
//!
//! These types are the read-only input of the converters. They deserialize
//! from CybOX JSON, where each object's properties payload is tagged by its
//! `xsi:type` (optionally namespace-prefixed, e.g.
//! `AddressObj:AddressObjectType`).
//!
//! Optional attributes are modelled as `Option<T>`: `None` means the
//! attribute is absent from the payload, `Some` with an empty value means it
//! is present but empty. Converters check the two conditions separately.
//!
//! Scalar attributes accept either a bare value or CybOX's wrapped form
//! (`{"value": ..., "condition": ...}`).

use std::fmt;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::Result;

pub const ADDRESS_TYPE: &str = "AddressObjectType";
pub const URI_TYPE: &str = "URIObjectType";
pub const FILE_TYPE: &str = "FileObjectType";
pub const WINDOWS_REGISTRY_KEY_TYPE: &str = "WindowsRegistryKeyObjectType";
pub const PROCESS_TYPE: &str = "ProcessObjectType";
pub const WINDOWS_PROCESS_TYPE: &str = "WindowsProcessObjectType";
pub const WINDOWS_SERVICE_TYPE: &str = "WindowsServiceObjectType";
pub const DOMAIN_NAME_TYPE: &str = "DomainNameObjectType";
pub const MUTEX_TYPE: &str = "MutexObjectType";
pub const NETWORK_CONNECTION_TYPE: &str = "NetworkConnectionObjectType";

/// CybOX subclasses of the file object, converted as plain files
pub const FILE_SUBTYPES: [&str; 6] = [
    "WindowsFileObjectType",
    "WindowsExecutableFileObjectType",
    "UnixFileObjectType",
    "ArchiveFileObjectType",
    "PDFFileObjectType",
    "ImageFileObjectType",
];
pub const UNIX_PROCESS_TYPE: &str = "UnixProcessObjectType";
pub const WINDOWS_MUTEX_TYPE: &str = "WindowsMutexObjectType";

/// A CybOX observable: an optional id wrapping exactly one object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observable {
    #[serde(default)]
    pub id: Option<String>,
    pub object: LegacyObject,
}

/// The object inside an observable, carrying the typed properties payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyObject {
    #[serde(default)]
    pub id: Option<String>,
    pub properties: ObjectProperties,
}

impl Observable {
    /// Wrap a properties payload in an observable without ids
    pub fn new(properties: ObjectProperties) -> Self {
        Self {
            id: None,
            object: LegacyObject {
                id: None,
                properties,
            },
        }
    }

    pub fn properties(&self) -> &ObjectProperties {
        &self.object.properties
    }

    /// Parse a CybOX JSON document into its observables.
    ///
    /// Accepts a single observable, an array of observables, or a package
    /// object with an `observables` member (either an array, or CybOX's
    /// nested `{"observables": [...]}` form).
    ///
    /// Observables that cannot be read are reported to `sink` and left out;
    /// see [`Observable::from_document`].
    ///
    /// # Errors
    /// Returns an error only if the document is not JSON.
    pub fn parse_document(
        contents: &str,
        sink: &dyn DiagnosticSink,
    ) -> Result<Vec<Observable>> {
        let document: JsonValue = serde_json::from_str(contents)?;
        Ok(Self::from_document(document, sink))
    }

    /// Read every observable of an already parsed document.
    ///
    /// Each observable is read on its own. References (`idref`) and
    /// compositions carry no object and are skipped with a warning; a
    /// malformed observable is skipped with an error. The rest of the
    /// document is still returned.
    pub fn from_document(document: JsonValue, sink: &dyn DiagnosticSink) -> Vec<Observable> {
        let items = match document {
            JsonValue::Array(items) => items,
            JsonValue::Object(mut map) => match map.remove("observables") {
                Some(JsonValue::Array(items)) => items,
                Some(JsonValue::Object(mut nested)) => match nested.remove("observables") {
                    Some(JsonValue::Array(items)) => items,
                    _ => Vec::new(),
                },
                Some(_) | None => vec![JsonValue::Object(map)],
            },
            other => vec![other],
        };

        let mut observables = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let label = item
                .get("id")
                .and_then(JsonValue::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index));

            if item.get("object").is_none() {
                if item.get("idref").is_some() {
                    sink.emit(
                        Severity::Warning,
                        format!("observable {}: idref references not handled yet", label),
                    );
                    continue;
                }
                if item.get("observable_composition").is_some() {
                    sink.emit(
                        Severity::Warning,
                        format!("observable {}: observable_composition not handled yet", label),
                    );
                    continue;
                }
            }

            match serde_json::from_value::<Observable>(item) {
                Ok(observable) => observables.push(observable),
                Err(e) => sink.emit(
                    Severity::Error,
                    format!("observable {} could not be read: {}", label, e),
                ),
            }
        }
        observables
    }
}

/// Concrete properties payload of a legacy object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperties {
    Address(Address),
    Uri(Uri),
    File(File),
    WindowsRegistryKey(WindowsRegistryKey),
    /// Plain, Windows and Windows service processes; the Windows variants
    /// fill the extension slots on [`Process`]
    Process(Process),
    DomainName(DomainName),
    Mutex(Mutex),
    NetworkConnection(NetworkConnection),
    /// Any object type without a converter
    Unsupported { xsi_type: String },
}

impl ObjectProperties {
    /// The CybOX `xsi:type` this payload was read as
    pub fn xsi_type(&self) -> &str {
        match self {
            ObjectProperties::Address(_) => ADDRESS_TYPE,
            ObjectProperties::Uri(_) => URI_TYPE,
            ObjectProperties::File(file) => file.subtype.as_deref().unwrap_or(FILE_TYPE),
            ObjectProperties::WindowsRegistryKey(_) => WINDOWS_REGISTRY_KEY_TYPE,
            ObjectProperties::Process(process) => match (&process.subtype, &process.windows) {
                (Some(subtype), _) => subtype.as_str(),
                (None, Some(windows)) if windows.service.is_some() => WINDOWS_SERVICE_TYPE,
                (None, Some(_)) => WINDOWS_PROCESS_TYPE,
                (None, None) => PROCESS_TYPE,
            },
            ObjectProperties::DomainName(_) => DOMAIN_NAME_TYPE,
            ObjectProperties::Mutex(mutex) => mutex.subtype.as_deref().unwrap_or(MUTEX_TYPE),
            ObjectProperties::NetworkConnection(_) => NETWORK_CONNECTION_TYPE,
            ObjectProperties::Unsupported { xsi_type } => xsi_type,
        }
    }
}

impl fmt::Display for ObjectProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsi_type())
    }
}

impl<'de> Deserialize<'de> for ObjectProperties {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        let tag = value
            .get("xsi:type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| de::Error::missing_field("xsi:type"))?;

        // Drop the namespace prefix, e.g. "FileObj:FileObjectType"
        let xsi_type = tag.rsplit(':').next().unwrap_or(tag).to_string();

        properties_from_payload(xsi_type, value).map_err(de::Error::custom)
    }
}

fn properties_from_payload(
    xsi_type: String,
    value: JsonValue,
) -> std::result::Result<ObjectProperties, serde_json::Error> {
    let properties = match xsi_type.as_str() {
        ADDRESS_TYPE => ObjectProperties::Address(serde_json::from_value(value)?),
        URI_TYPE => ObjectProperties::Uri(serde_json::from_value(value)?),
        FILE_TYPE => ObjectProperties::File(serde_json::from_value(value)?),
        subtype if FILE_SUBTYPES.contains(&subtype) => {
            let mut file: File = serde_json::from_value(value)?;
            file.subtype = Some(xsi_type);
            ObjectProperties::File(file)
        }
        WINDOWS_REGISTRY_KEY_TYPE => {
            ObjectProperties::WindowsRegistryKey(serde_json::from_value(value)?)
        }
        PROCESS_TYPE => ObjectProperties::Process(serde_json::from_value(value)?),
        UNIX_PROCESS_TYPE => {
            let mut process: Process = serde_json::from_value(value)?;
            process.subtype = Some(xsi_type);
            ObjectProperties::Process(process)
        }
        WINDOWS_PROCESS_TYPE => {
            let mut process: Process = serde_json::from_value(value.clone())?;
            process.windows = Some(serde_json::from_value(value)?);
            ObjectProperties::Process(process)
        }
        WINDOWS_SERVICE_TYPE => {
            let mut process: Process = serde_json::from_value(value.clone())?;
            let mut windows: WindowsProcess = serde_json::from_value(value.clone())?;
            windows.service = Some(serde_json::from_value(value)?);
            process.windows = Some(windows);
            ObjectProperties::Process(process)
        }
        DOMAIN_NAME_TYPE => ObjectProperties::DomainName(serde_json::from_value(value)?),
        MUTEX_TYPE => ObjectProperties::Mutex(serde_json::from_value(value)?),
        WINDOWS_MUTEX_TYPE => {
            let mut mutex: Mutex = serde_json::from_value(value)?;
            mutex.subtype = Some(xsi_type);
            ObjectProperties::Mutex(mutex)
        }
        NETWORK_CONNECTION_TYPE => {
            ObjectProperties::NetworkConnection(serde_json::from_value(value)?)
        }
        _ => ObjectProperties::Unsupported { xsi_type },
    };

    Ok(properties)
}

/// Unwrap CybOX's `{"value": ...}` form and render scalars as text
fn scalar_text(value: JsonValue) -> std::result::Result<Option<String>, String> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) => Ok(Some(s)),
        JsonValue::Number(n) => Ok(Some(n.to_string())),
        JsonValue::Bool(b) => Ok(Some(b.to_string())),
        JsonValue::Object(mut map) => match map.remove("value") {
            Some(inner) => scalar_text(inner),
            None => Err("expected a scalar or an object with a 'value' member".to_string()),
        },
        JsonValue::Array(_) => Err("expected a scalar, found a list".to_string()),
    }
}

fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        Some(value) => scalar_text(value).map_err(de::Error::custom),
        None => Ok(None),
    }
}

fn required_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_text(deserializer)?.ok_or_else(|| de::Error::custom("value must not be null"))
}

fn optional_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match optional_text(deserializer)? {
        Some(text) => text
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid integer '{}': {}", text, e))),
        None => Ok(None),
    }
}

fn optional_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match optional_text(deserializer)? {
        Some(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(de::Error::custom(format!("invalid boolean '{}'", text))),
        },
        None => Ok(None),
    }
}

fn optional_text_list<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(JsonValue::Array(items)) => items,
        Some(single) => vec![single],
    };

    let mut texts = Vec::with_capacity(items.len());
    for item in items {
        if let Some(text) = scalar_text(item).map_err(de::Error::custom)? {
            texts.push(text);
        }
    }
    Ok(Some(texts))
}

/// Address object: a category discriminator plus the address itself
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "optional_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "required_text")]
    pub address_value: String,
}

impl Address {
    pub const CAT_IPV4: &'static str = "ipv4-addr";
    pub const CAT_IPV6: &'static str = "ipv6-addr";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Uri {
    #[serde(deserialize_with = "required_text")]
    pub value: String,
}

/// File size as recorded in CybOX: either one value or a window of values
#[derive(Debug, Clone, PartialEq)]
pub enum FileSize {
    Exact(u64),
    Window(Vec<u64>),
}

impl<'de> Deserialize<'de> for FileSize {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        fn to_u64(value: JsonValue) -> std::result::Result<u64, String> {
            let text = scalar_text(value)?.ok_or_else(|| "file size is null".to_string())?;
            text.trim()
                .parse::<u64>()
                .map_err(|e| format!("invalid file size '{}': {}", text, e))
        }

        let value = JsonValue::deserialize(deserializer)?;
        let value = match value {
            JsonValue::Object(mut map) if map.contains_key("value") => {
                map.remove("value").unwrap_or(JsonValue::Null)
            }
            other => other,
        };

        match value {
            JsonValue::Array(items) => items
                .into_iter()
                .map(to_u64)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(FileSize::Window)
                .map_err(de::Error::custom),
            scalar => to_u64(scalar).map(FileSize::Exact).map_err(de::Error::custom),
        }
    }
}

/// One hash entry of a file object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hash {
    #[serde(rename = "type", default, deserialize_with = "optional_text")]
    pub hash_type: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub simple_hash_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct File {
    #[serde(default, deserialize_with = "optional_text")]
    pub file_name: Option<String>,
    #[serde(default, rename = "size_in_bytes")]
    pub size: Option<FileSize>,
    #[serde(default)]
    pub hashes: Option<Vec<Hash>>,
    #[serde(default, deserialize_with = "optional_text")]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub full_path: Option<String>,
    /// Subclass type name (e.g. `WindowsFileObjectType`) when read as one
    #[serde(skip)]
    pub subtype: Option<String>,
}

/// One value entry under a registry key
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegistryValue {
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub data: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub datatype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WindowsRegistryKey {
    #[serde(default, deserialize_with = "optional_text")]
    pub hive: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub key: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<RegistryValue>>,
}

/// Process object with optional Windows extension slot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Process {
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_u64")]
    pub pid: Option<u64>,
    #[serde(default, deserialize_with = "optional_text")]
    pub creation_time: Option<String>,
    /// Present when the object is a Windows process (or service)
    #[serde(skip)]
    pub windows: Option<WindowsProcess>,
    /// Set for `UnixProcessObjectType`
    #[serde(skip)]
    pub subtype: Option<String>,
}

/// Windows-specific process attributes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WindowsProcess {
    #[serde(default)]
    pub handle_list: Option<Vec<JsonValue>>,
    #[serde(default, deserialize_with = "optional_bool")]
    pub aslr_enabled: Option<bool>,
    #[serde(default, deserialize_with = "optional_bool")]
    pub dep_enabled: Option<bool>,
    #[serde(default, deserialize_with = "optional_text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub security_type: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub window_title: Option<String>,
    #[serde(default)]
    pub startup_info: Option<JsonValue>,
    /// Present when the object is a Windows service
    #[serde(skip)]
    pub service: Option<WindowsService>,
}

/// Windows service attributes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WindowsService {
    #[serde(default, deserialize_with = "optional_text")]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text_list")]
    pub description_list: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_text")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub startup_command_line: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub start_type: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub service_status: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub service_dll: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DomainName {
    #[serde(default, deserialize_with = "optional_text")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Mutex {
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    /// Set for `WindowsMutexObjectType`
    #[serde(skip)]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NetworkConnection {
    #[serde(default, deserialize_with = "optional_text")]
    pub layer3_protocol: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub layer4_protocol: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub layer7_protocol: Option<String>,
    #[serde(default)]
    pub source_socket_address: Option<JsonValue>,
    #[serde(default)]
    pub destination_socket_address: Option<JsonValue>,
}
