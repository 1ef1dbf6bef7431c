use super::{ConversionContext, ObjectConverter};
use crate::legacy::Address;
use crate::normalized::NormalizedObject;

pub const IPV4_ADDRESS_OBJECT: &str = "ipv4-address-object";
pub const IPV6_ADDRESS_OBJECT: &str = "ipv6-address-object";

impl ObjectConverter for Address {
    fn convert(&self, ctx: &ConversionContext<'_>) -> NormalizedObject {
        let object_type = match self.category.as_deref() {
            Some(Address::CAT_IPV4) => IPV4_ADDRESS_OBJECT,
            Some(Address::CAT_IPV6) => IPV6_ADDRESS_OBJECT,
            Some(other) => {
                ctx.warn(format!("address category '{}' not handled yet", other));
                return NormalizedObject::empty();
            }
            None => {
                ctx.warn("address without a category not handled yet");
                return NormalizedObject::empty();
            }
        };

        let mut object = NormalizedObject::new(object_type);
        object.insert("value", self.address_value.as_str());
        object
    }
}
