use super::{non_empty, ConversionContext, ObjectConverter};
use crate::legacy::DomainName;
use crate::normalized::NormalizedObject;

pub const DOMAIN_NAME: &str = "domain-name";

impl ObjectConverter for DomainName {
    fn convert(&self, _ctx: &ConversionContext<'_>) -> NormalizedObject {
        let mut object = NormalizedObject::new(DOMAIN_NAME);
        object.insert_opt("value", non_empty(&self.value));

        // resolves_to_refs, description and extended properties are not
        // converted yet
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::test_support::convert_collecting;
    use serde_json::json;

    #[test]
    fn test_domain_name() {
        let domain = DomainName {
            value: Some("example.com".to_string()),
        };
        let (object, sink) = convert_collecting(&domain);

        assert_eq!(
            object.into_value(),
            json!({"type": "domain-name", "value": "example.com"})
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_domain_name_without_value() {
        let (object, _) = convert_collecting(&DomainName::default());
        assert_eq!(object.into_value(), json!({"type": "domain-name"}));
    }
}
