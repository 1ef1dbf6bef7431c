use serde_json::Value;

use super::{non_empty, ConversionContext, ObjectConverter};
use crate::legacy::{RegistryValue, WindowsRegistryKey};
use crate::normalized::NormalizedObject;

pub const WINDOWS_REGISTRY_KEY: &str = "windows-registry-key";

const KEY_SEPARATOR: &str = "\\";

impl WindowsRegistryKey {
    /// Full key path: hive and key joined by a backslash, or whichever of the
    /// two is present. `None` when neither is.
    pub fn full_key(&self) -> Option<String> {
        let parts: Vec<&str> = [non_empty(&self.hive), non_empty(&self.key)]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(KEY_SEPARATOR))
        }
    }
}

fn convert_registry_value(value: &RegistryValue) -> Value {
    let mut converted = NormalizedObject::empty();
    converted.insert_opt("data", non_empty(&value.data));
    converted.insert_opt("name", non_empty(&value.name));
    converted.insert_opt("data_type", non_empty(&value.datatype));
    converted.into_value()
}

impl ObjectConverter for WindowsRegistryKey {
    fn convert(&self, ctx: &ConversionContext<'_>) -> NormalizedObject {
        let mut object = NormalizedObject::new(WINDOWS_REGISTRY_KEY);

        match self.full_key() {
            Some(key) => object.insert("key", key),
            None => ctx.error("windows-registry-key is required to have a key property"),
        }

        if let Some(values) = self.values.as_ref().filter(|v| !v.is_empty()) {
            let converted: Vec<Value> = values.iter().map(convert_registry_value).collect();
            object.insert("values", converted);
        }

        object
    }
}
