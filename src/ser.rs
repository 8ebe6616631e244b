//! Serde support, so a tag tree can be handed to any serde data format.
//!
//! Arrays and lists become sequences and compounds become maps in their
//! stored order. The NBT types of numbers are kept as far as the target
//! format can tell them apart.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::{Payload, Tag, TagType};

impl Serialize for Payload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Payload::End => serializer.serialize_unit(),
            Payload::Byte(v) => serializer.serialize_i8(*v),
            Payload::Short(v) => serializer.serialize_i16(*v),
            Payload::Int(v) => serializer.serialize_i32(*v),
            Payload::Long(v) => serializer.serialize_i64(*v),
            Payload::Float(v) => serializer.serialize_f32(*v),
            Payload::Double(v) => serializer.serialize_f64(*v),
            Payload::String(v) => serializer.serialize_str(v),
            Payload::ByteArray(v) => v.serialize(serializer),
            Payload::IntArray(v) => v.serialize(serializer),
            Payload::LongArray(v) => v.serialize(serializer),
            Payload::List(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Payload::Compound(children) => {
                let children: Vec<&Tag> = children
                    .iter()
                    .filter(|c| c.type_id() != TagType::End)
                    .collect();
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for child in children {
                    map.serialize_entry(child.name(), child.payload())?;
                }
                map.end()
            }
        }
    }
}

/// A tag serializes as a map with its name as the only key.
impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name(), self.payload())?;
        map.end()
    }
}
