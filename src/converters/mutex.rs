use super::{non_empty, ConversionContext, ObjectConverter};
use crate::legacy::Mutex;
use crate::normalized::NormalizedObject;

pub const MUTEX: &str = "mutex";

impl ObjectConverter for Mutex {
    fn convert(&self, _ctx: &ConversionContext<'_>) -> NormalizedObject {
        let mut object = NormalizedObject::new(MUTEX);
        object.insert_opt("name", non_empty(&self.name));
        object
    }
}
