use super::{ConversionContext, ObjectConverter};
use crate::legacy::NetworkConnection;
use crate::normalized::NormalizedObject;

/// The STIX 2.0 network-traffic object is not settled yet, so connections
/// convert to nothing and the dispatcher reports them as unconverted.
impl ObjectConverter for NetworkConnection {
    fn convert(&self, _ctx: &ConversionContext<'_>) -> NormalizedObject {
        NormalizedObject::empty()
    }
}
