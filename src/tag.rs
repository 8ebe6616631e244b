use std::io::{Read, Write};

use crate::codec::{self, ReadNbt, Res, WriteNbt};
use crate::error::{Error, Op, Result};
use crate::{Payload, TagType};

/// A named payload, the unit the binary format is made of.
///
/// The empty name is used for a nameless tag, which is what the game writes
/// for the root compound of its files. The End tag has an empty name and the
/// [`Payload::End`] payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: String,
    payload: Payload,
}

impl Tag {
    pub fn new(name: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// The tag that terminates a compound.
    pub fn end() -> Self {
        Self {
            name: String::new(),
            payload: Payload::End,
        }
    }

    pub fn byte(name: impl Into<String>, v: i8) -> Self {
        Self::new(name, Payload::Byte(v))
    }

    pub fn short(name: impl Into<String>, v: i16) -> Self {
        Self::new(name, Payload::Short(v))
    }

    pub fn int(name: impl Into<String>, v: i32) -> Self {
        Self::new(name, Payload::Int(v))
    }

    pub fn long(name: impl Into<String>, v: i64) -> Self {
        Self::new(name, Payload::Long(v))
    }

    pub fn float(name: impl Into<String>, v: f32) -> Self {
        Self::new(name, Payload::Float(v))
    }

    pub fn double(name: impl Into<String>, v: f64) -> Self {
        Self::new(name, Payload::Double(v))
    }

    pub fn byte_array(name: impl Into<String>, v: Vec<i8>) -> Self {
        Self::new(name, Payload::ByteArray(v))
    }

    pub fn string(name: impl Into<String>, v: impl Into<String>) -> Self {
        Self::new(name, Payload::String(v.into()))
    }

    pub fn list(name: impl Into<String>, items: Vec<Payload>) -> Self {
        Self::new(name, Payload::List(items))
    }

    pub fn compound(name: impl Into<String>, children: Vec<Tag>) -> Self {
        Self::new(name, Payload::Compound(children))
    }

    pub fn int_array(name: impl Into<String>, v: Vec<i32>) -> Self {
        Self::new(name, Payload::IntArray(v))
    }

    pub fn long_array(name: impl Into<String>, v: Vec<i64>) -> Self {
        Self::new(name, Payload::LongArray(v))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub fn type_id(&self) -> TagType {
        self.payload.type_id()
    }

    /// Write the type byte, then for anything but End the name and payload.
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.write(writer).map_err(Error::with_op(Op::Encode))
    }

    /// Read the type byte, then for anything but End the name and payload.
    pub fn decode<R: Read>(reader: &mut R) -> Result<Tag> {
        let tag = Tag::read(reader, 0).map_err(Error::with_op(Op::Decode))?;
        log::trace!("decoded {} tag {:?}", tag.type_id(), tag.name);
        Ok(tag)
    }

    pub(crate) fn write<W: Write + ?Sized>(&self, w: &mut W) -> Res<()> {
        let tag_type = self.type_id();
        codec::write_tag_type(w, tag_type)?;
        if tag_type != TagType::End {
            w.write_size_prefixed_str(&self.name)?;
            self.payload.write(w)?;
        }
        Ok(())
    }

    pub(crate) fn read<R: Read>(r: &mut R, depth: usize) -> Res<Tag> {
        let tag_type = codec::read_tag_type(r)?;
        if tag_type == TagType::End {
            return Ok(Tag::end());
        }

        let name = r.read_size_prefixed_str()?;
        let payload = Payload::read(r, tag_type, depth)?;
        Ok(Tag { name, payload })
    }
}
