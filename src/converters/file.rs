use serde_json::{Map, Value};

use super::{non_empty, ConversionContext, ObjectConverter};
use crate::fields::{convert_file_size, convert_hash_type, ConvertedSize};
use crate::legacy::File;
use crate::normalized::NormalizedObject;

pub const FILE_OBJECT: &str = "file-object";

const SIZE_WINDOW_WARNING: &str =
    "file size window not allowed in top level observable, using first value";

impl ObjectConverter for File {
    fn convert(&self, ctx: &ConversionContext<'_>) -> NormalizedObject {
        let mut object = NormalizedObject::new(FILE_OBJECT);

        if let Some(size) = &self.size {
            match convert_file_size(size) {
                ConvertedSize::Exact(value) => object.insert("size", value),
                ConvertedSize::FromWindow(first) => {
                    ctx.warn(SIZE_WINDOW_WARNING);
                    object.insert("size", first);
                }
                ConvertedSize::EmptyWindow => ctx.warn(SIZE_WINDOW_WARNING),
            }
        }

        if let Some(hashes) = self.hashes.as_ref().filter(|h| !h.is_empty()) {
            let mut converted = Map::new();
            for hash in hashes {
                match (non_empty(&hash.hash_type), non_empty(&hash.simple_hash_value)) {
                    (Some(hash_type), Some(value)) => {
                        converted.insert(convert_hash_type(hash_type), Value::from(value));
                    }
                    _ => ctx.warn("file hash without a type or value skipped"),
                }
            }
            if !converted.is_empty() {
                object.insert("hashes", Value::Object(converted));
            }
        }

        object.insert_opt("file_name", non_empty(&self.file_name));

        // TODO: associate file_path/full_path with a directory object once
        // containing-directory references are emitted.
        if self.file_path.is_some() || self.full_path.is_some() {
            tracing::debug!("file path properties are not converted");
        }

        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::test_support::convert_collecting;
    use crate::diagnostics::Severity;
    use crate::legacy::{FileSize, Hash};
    use serde_json::json;

    fn hash(hash_type: &str, value: &str) -> Hash {
        Hash {
            hash_type: Some(hash_type.to_string()),
            simple_hash_value: Some(value.to_string()),
        }
    }

    fn full_file() -> File {
        File {
            file_name: Some("evil.exe".to_string()),
            size: Some(FileSize::Exact(42)),
            hashes: Some(vec![
                hash("MD5", "d41d8cd98f00b204e9800998ecf8427e"),
                hash("SHA1", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            ]),
            file_path: None,
            full_path: None,
            subtype: None,
        }
    }

    #[test]
    fn test_full_file() {
        let (object, sink) = convert_collecting(&full_file());

        assert_eq!(
            object.into_value(),
            json!({
                "type": "file-object",
                "size": 42,
                "hashes": {
                    "md5": "d41d8cd98f00b204e9800998ecf8427e",
                    "sha1": "da39a3ee5e6b4b0d3255bfef95601890afd80709"
                },
                "file_name": "evil.exe"
            })
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_size_window_uses_first_value() {
        let file = File {
            size: Some(FileSize::Window(vec![10, 20])),
            ..File::default()
        };
        let (object, sink) = convert_collecting(&file);

        assert_eq!(object.get("size"), Some(&json!(10)));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_empty_size_window() {
        let file = File {
            size: Some(FileSize::Window(vec![])),
            ..File::default()
        };
        let (object, sink) = convert_collecting(&file);

        assert!(!object.contains_key("size"));
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_omitted_fields_are_absent() {
        let mut without_name = full_file();
        without_name.file_name = None;
        let (object, _) = convert_collecting(&without_name);
        let keys: Vec<&String> = object.keys().collect();
        assert_eq!(keys, vec!["type", "size", "hashes"]);

        let mut without_hashes = full_file();
        without_hashes.hashes = None;
        let (object, _) = convert_collecting(&without_hashes);
        assert!(!object.contains_key("hashes"));
        assert_eq!(object.len(), 3);

        let mut without_size = full_file();
        without_size.size = None;
        let (object, _) = convert_collecting(&without_size);
        assert!(!object.contains_key("size"));
        assert_eq!(object.len(), 3);
    }

    #[test]
    fn test_empty_file_keeps_type() {
        let (object, sink) = convert_collecting(&File::default());
        assert_eq!(object.into_value(), json!({"type": "file-object"}));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_incomplete_hash_skipped() {
        let file = File {
            hashes: Some(vec![
                Hash {
                    hash_type: None,
                    simple_hash_value: Some("abc".to_string()),
                },
                hash("SHA256", "e3b0c442"),
            ]),
            ..File::default()
        };
        let (object, sink) = convert_collecting(&file);

        assert_eq!(object.get("hashes"), Some(&json!({"sha256": "e3b0c442"})));
        assert_eq!(sink.count(Severity::Warning), 1);
    }
}
