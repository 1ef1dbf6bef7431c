//! Primitive field converters.
//!
//! Small functions turning one legacy property into its STIX form.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::legacy::FileSize;

/// Convert a CybOX timestamp into a STIX timestamp (UTC, millisecond
/// precision, `Z` suffix).
///
/// RFC 3339 input is shifted to UTC; input without an offset is taken as
/// UTC. Returns `None` if the text is not a recognizable timestamp.
///
/// # Example
/// ```
/// use elevator::fields::convert_timestamp;
///
/// assert_eq!(
///     convert_timestamp("2016-04-06T22:03:00+02:00").as_deref(),
///     Some("2016-04-06T20:03:00.000Z")
/// );
/// ```
pub fn convert_timestamp(value: &str) -> Option<String> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(
            parsed
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        );
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| {
            naive
                .and_utc()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        })
}

/// Hash algorithm names are keyed in lower case (`MD5` -> `md5`)
pub fn convert_hash_type(hash_type: &str) -> String {
    hash_type.trim().to_lowercase()
}

/// Result of converting a legacy file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertedSize {
    /// A single size value
    Exact(u64),
    /// A window was given; the first value is used
    FromWindow(u64),
    /// An empty window; nothing usable
    EmptyWindow,
}

pub fn convert_file_size(size: &FileSize) -> ConvertedSize {
    match size {
        FileSize::Exact(value) => ConvertedSize::Exact(*value),
        FileSize::Window(values) => match values.first() {
            Some(first) => ConvertedSize::FromWindow(*first),
            None => ConvertedSize::EmptyWindow,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_timestamp_rfc3339() {
        assert_eq!(
            convert_timestamp("2016-04-06T20:03:00Z").as_deref(),
            Some("2016-04-06T20:03:00.000Z")
        );
        assert_eq!(
            convert_timestamp("2016-04-06T20:03:00.123456-05:00").as_deref(),
            Some("2016-04-07T01:03:00.123Z")
        );
    }

    #[test]
    fn test_convert_timestamp_naive_is_utc() {
        assert_eq!(
            convert_timestamp("2016-04-06T20:03:00").as_deref(),
            Some("2016-04-06T20:03:00.000Z")
        );
        assert_eq!(
            convert_timestamp("2016-04-06 20:03:00.5").as_deref(),
            Some("2016-04-06T20:03:00.500Z")
        );
    }

    #[test]
    fn test_convert_timestamp_invalid() {
        assert_eq!(convert_timestamp("yesterday"), None);
        assert_eq!(convert_timestamp(""), None);
    }

    #[test]
    fn test_convert_hash_type() {
        assert_eq!(convert_hash_type("SHA256"), "sha256");
        assert_eq!(convert_hash_type("Md5"), "md5");
    }

    #[test]
    fn test_convert_file_size() {
        assert_eq!(convert_file_size(&FileSize::Exact(42)), ConvertedSize::Exact(42));
        assert_eq!(
            convert_file_size(&FileSize::Window(vec![10, 20])),
            ConvertedSize::FromWindow(10)
        );
        assert_eq!(
            convert_file_size(&FileSize::Window(vec![])),
            ConvertedSize::EmptyWindow
        );
    }
}
