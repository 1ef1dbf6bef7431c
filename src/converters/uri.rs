use super::{ConversionContext, ObjectConverter};
use crate::legacy::Uri;
use crate::normalized::NormalizedObject;

pub const URL_OBJECT: &str = "url-object";

impl ObjectConverter for Uri {
    fn convert(&self, _ctx: &ConversionContext<'_>) -> NormalizedObject {
        let mut object = NormalizedObject::new(URL_OBJECT);
        object.insert("value", self.value.as_str());
        object
    }
}
