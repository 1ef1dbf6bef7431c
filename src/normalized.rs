//! Normalized (STIX 2.0) output types.
//!
//! A [`NormalizedObject`] is an ordered JSON mapping carrying a `type`
//! discriminator. A [`NormalizedContainer`] is the caller-owned object
//! (typically an `observed-data` object) that receives converted objects
//! under its `objects` key.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Index under which the single converted object is stored.
///
/// One legacy observable yields at most one normalized object.
pub const OBJECT_INDEX: &str = "0";

/// An ordered mapping of STIX property names to JSON values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedObject {
    properties: Map<String, Value>,
}

impl NormalizedObject {
    /// Create an object carrying only its `type` discriminator
    pub fn new(object_type: &str) -> Self {
        let mut object = Self::empty();
        object.insert("type", object_type);
        object
    }

    /// An object with no properties at all, not even `type`
    pub fn empty() -> Self {
        Self {
            properties: Map::new(),
        }
    }

    /// Set a property, replacing any previous value
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    /// Set a property only when `value` is `Some`
    pub fn insert_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Attach a nested object under `key`
    pub fn insert_object(&mut self, key: &str, object: NormalizedObject) {
        self.properties
            .insert(key.to_string(), Value::Object(object.properties));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// The `type` discriminator, if set
    pub fn object_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Property names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.properties.keys()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.properties)
    }
}

impl From<NormalizedObject> for Value {
    fn from(object: NormalizedObject) -> Self {
        object.into_value()
    }
}

/// Caller-supplied container that receives converted objects.
///
/// Arbitrary container properties (`type`, `id`, ...) are kept in order and
/// serialized alongside `objects`. `objects` stays absent until a conversion
/// produces a non-empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedContainer {
    #[serde(flatten)]
    pub properties: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<IndexMap<String, NormalizedObject>>,
}

impl NormalizedContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container with `type` and `id` properties
    pub fn with_identity(container_type: &str, id: impl Into<String>) -> Self {
        let mut container = Self::new();
        container
            .properties
            .insert("type".to_string(), Value::String(container_type.to_string()));
        container
            .properties
            .insert("id".to_string(), Value::String(id.into()));
        container
    }

    /// Store `object` as the container's only entry at [`OBJECT_INDEX`]
    pub fn set_object(&mut self, object: NormalizedObject) {
        let mut objects = IndexMap::new();
        objects.insert(OBJECT_INDEX.to_string(), object);
        self.objects = Some(objects);
    }

    /// The converted object at [`OBJECT_INDEX`], if any
    pub fn object(&self) -> Option<&NormalizedObject> {
        self.objects.as_ref().and_then(|o| o.get(OBJECT_INDEX))
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_preserves_insertion_order() {
        let mut object = NormalizedObject::new("file-object");
        object.insert("size", 42);
        object.insert("file_name", "a.exe");

        let keys: Vec<&String> = object.keys().collect();
        assert_eq!(keys, vec!["type", "size", "file_name"]);
        assert_eq!(object.object_type(), Some("file-object"));
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut object = NormalizedObject::new("mutex");
        object.insert_opt::<String>("name", None);
        assert_eq!(object.len(), 1);
        assert!(!object.contains_key("name"));
    }

    #[test]
    fn test_container_serialization() {
        let mut container = NormalizedContainer::with_identity("observed-data", "observed-data--1");
        assert_eq!(
            container.to_json().unwrap(),
            json!({"type": "observed-data", "id": "observed-data--1"})
        );

        let mut object = NormalizedObject::new("mutex");
        object.insert("name", "foo");
        container.set_object(object);

        assert_eq!(
            container.to_json().unwrap(),
            json!({
                "type": "observed-data",
                "id": "observed-data--1",
                "objects": {"0": {"type": "mutex", "name": "foo"}}
            })
        );
    }
}
