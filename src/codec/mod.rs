// KVStore — Value Codec
//
// Tagged binary encoding for the seven scalar types. A record is a single
// tag byte followed by the value's payload. Records are what the secure
// backend persists, since its storage only accepts opaque bytes.

mod record;
mod value;

pub use record::{decode, encode, peek_type};
pub(crate) use value::Scalar;
pub use value::{ScalarType, ScalarValue};
