//! `Arbitrary` implementations for fuzzing, behind the `arbitrary1` feature.

use std::convert::TryFrom;

use arbitrary::{Arbitrary, Result, Unstructured};

use crate::{Payload, Tag, TagType};

impl<'a> Arbitrary<'a> for TagType {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let id = u.int_in_range(0..=12u8)?;
        TagType::try_from(id).map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

/// A payload of the given type. Lists pick one element type and stick to it.
fn payload_of(u: &mut Unstructured, tag_type: TagType) -> Result<Payload> {
    Ok(match tag_type {
        TagType::End => return Err(arbitrary::Error::IncorrectFormat),
        TagType::Byte => Payload::Byte(u.arbitrary()?),
        TagType::Short => Payload::Short(u.arbitrary()?),
        TagType::Int => Payload::Int(u.arbitrary()?),
        TagType::Long => Payload::Long(u.arbitrary()?),
        TagType::Float => Payload::Float(u.arbitrary()?),
        TagType::Double => Payload::Double(u.arbitrary()?),
        TagType::ByteArray => Payload::ByteArray(u.arbitrary()?),
        TagType::String => Payload::String(u.arbitrary()?),
        TagType::IntArray => Payload::IntArray(u.arbitrary()?),
        TagType::LongArray => Payload::LongArray(u.arbitrary()?),
        TagType::Compound => Payload::Compound(u.arbitrary()?),
        TagType::List => {
            let element = match u.arbitrary::<TagType>()? {
                TagType::End => return Ok(Payload::List(Vec::new())),
                t => t,
            };
            let len = u.arbitrary_len::<Payload>()?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(payload_of(u, element)?);
            }
            Payload::List(items)
        }
    })
}

impl<'a> Arbitrary<'a> for Payload {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let tag_type = match u.arbitrary::<TagType>()? {
            TagType::End => TagType::Compound,
            t => t,
        };
        payload_of(u, tag_type)
    }
}

impl<'a> Arbitrary<'a> for Tag {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let name: String = u.arbitrary()?;
        Ok(Tag::new(name, u.arbitrary::<Payload>()?))
    }
}
