use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::{self, ReadNbt, Res, WriteNbt, MAX_DEPTH};
use crate::error::{Error, ErrorKind, Op, Result};
use crate::{fmt, Format, Tag, TagType};

/// The value part of a tag. Every NBT type has a variant here, lists and
/// compounds own their children.
///
/// A `List` stores no element type of its own. It is the type of the first
/// element, or `End` for an empty list, and every element must share it.
///
/// A `Compound` holds only its real children. The `End` tag that terminates
/// a compound on the wire is consumed when decoding and written again when
/// encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The payload of an End tag. Only valid as the whole of an End tag.
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Payload>),
    Compound(Vec<Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// Create the empty payload of a type: zero for numbers, empty for strings and
/// collections. `End` has no payload and fails with
/// [`ErrorKind::InvalidTagType`].
pub fn new_payload(tag_type: TagType) -> Result<Payload> {
    Payload::empty(tag_type).map_err(Error::with_op(Op::New))
}

impl Payload {
    pub(crate) fn empty(tag_type: TagType) -> Res<Payload> {
        Ok(match tag_type {
            TagType::End => return Err(ErrorKind::InvalidTagType(TagType::End.into())),
            TagType::Byte => Payload::Byte(0),
            TagType::Short => Payload::Short(0),
            TagType::Int => Payload::Int(0),
            TagType::Long => Payload::Long(0),
            TagType::Float => Payload::Float(0.0),
            TagType::Double => Payload::Double(0.0),
            TagType::ByteArray => Payload::ByteArray(Vec::new()),
            TagType::String => Payload::String(String::new()),
            TagType::List => Payload::List(Vec::new()),
            TagType::Compound => Payload::Compound(Vec::new()),
            TagType::IntArray => Payload::IntArray(Vec::new()),
            TagType::LongArray => Payload::LongArray(Vec::new()),
        })
    }

    pub fn type_id(&self) -> TagType {
        match self {
            Payload::End => TagType::End,
            Payload::Byte(_) => TagType::Byte,
            Payload::Short(_) => TagType::Short,
            Payload::Int(_) => TagType::Int,
            Payload::Long(_) => TagType::Long,
            Payload::Float(_) => TagType::Float,
            Payload::Double(_) => TagType::Double,
            Payload::ByteArray(_) => TagType::ByteArray,
            Payload::String(_) => TagType::String,
            Payload::List(_) => TagType::List,
            Payload::Compound(_) => TagType::Compound,
            Payload::IntArray(_) => TagType::IntArray,
            Payload::LongArray(_) => TagType::LongArray,
        }
    }

    /// The element type of a list: the type of its first element, or `End`
    /// when empty. `None` for anything that is not a list.
    pub fn element_type(&self) -> Option<TagType> {
        match self {
            Payload::List(items) => Some(items.first().map_or(TagType::End, Payload::type_id)),
            _ => None,
        }
    }

    /// Write just the payload, without a type byte or name.
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.write(writer).map_err(Error::with_op(Op::Encode))
    }

    /// Read a payload of the given type, without a type byte or name.
    pub fn decode<R: Read>(reader: &mut R, tag_type: TagType) -> Result<Payload> {
        Payload::read(reader, tag_type, 0).map_err(Error::with_op(Op::Decode))
    }

    /// Render as SNBT. Unlike [`crate::stringify_with`] there is no root
    /// name handling, this is the payload alone.
    pub fn stringify(&self, format: &Format) -> String {
        let mut out = String::new();
        fmt::snbt::payload(&mut out, self, format, 0);
        out
    }

    /// Render as JSON.
    pub fn json(&self, format: &Format) -> String {
        let mut out = String::new();
        fmt::json::payload(&mut out, self, format, 0);
        out
    }

    pub(crate) fn write<W: Write + ?Sized>(&self, w: &mut W) -> Res<()> {
        match self {
            Payload::End => {}
            Payload::Byte(v) => w.write_i8(*v)?,
            Payload::Short(v) => w.write_i16::<BigEndian>(*v)?,
            Payload::Int(v) => w.write_i32::<BigEndian>(*v)?,
            Payload::Long(v) => w.write_i64::<BigEndian>(*v)?,
            Payload::Float(v) => w.write_f32::<BigEndian>(*v)?,
            Payload::Double(v) => w.write_f64::<BigEndian>(*v)?,
            Payload::ByteArray(vs) => {
                w.write_len(vs.len())?;
                let bytes: Vec<u8> = vs.iter().map(|&b| b as u8).collect();
                w.write_all(&bytes)?;
            }
            Payload::String(s) => w.write_size_prefixed_str(s)?,
            Payload::List(items) => {
                let element = self.element_type().unwrap_or(TagType::End);
                if element == TagType::End && !items.is_empty() {
                    return Err(ErrorKind::InvalidTagType(TagType::End.into()));
                }
                if let Some(odd) = items.iter().find(|p| p.type_id() != element) {
                    return Err(ErrorKind::InvalidTagType(odd.type_id().into()));
                }

                codec::write_tag_type(w, element)?;
                w.write_len(items.len())?;
                for item in items {
                    item.write(w)?;
                }
            }
            Payload::Compound(children) => {
                for child in children.iter().filter(|c| c.type_id() != TagType::End) {
                    child.write(w)?;
                }
                codec::write_tag_type(w, TagType::End)?;
            }
            Payload::IntArray(vs) => {
                w.write_len(vs.len())?;
                for v in vs {
                    w.write_i32::<BigEndian>(*v)?;
                }
            }
            Payload::LongArray(vs) => {
                w.write_len(vs.len())?;
                for v in vs {
                    w.write_i64::<BigEndian>(*v)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn read<R: Read>(r: &mut R, tag_type: TagType, depth: usize) -> Res<Payload> {
        if depth > MAX_DEPTH {
            return Err(ErrorKind::invalid_data("nbt nested too deeply"));
        }

        Ok(match tag_type {
            TagType::End => Payload::End,
            TagType::Byte => Payload::Byte(r.read_i8()?),
            TagType::Short => Payload::Short(r.read_i16::<BigEndian>()?),
            TagType::Int => Payload::Int(r.read_i32::<BigEndian>()?),
            TagType::Long => Payload::Long(r.read_i64::<BigEndian>()?),
            TagType::Float => Payload::Float(r.read_f32::<BigEndian>()?),
            TagType::Double => Payload::Double(r.read_f64::<BigEndian>()?),
            TagType::ByteArray => {
                let len = r.read_len()?;
                let bytes = r.read_bytes(len)?;
                Payload::ByteArray(bytes.into_iter().map(|b| b as i8).collect())
            }
            TagType::String => Payload::String(r.read_size_prefixed_str()?),
            TagType::List => {
                let element = codec::read_tag_type(r)?;
                let len = r.read_len()?;
                if element == TagType::End && len > 0 {
                    return Err(ErrorKind::InvalidTagType(TagType::End.into()));
                }

                let mut items = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    items.push(Payload::read(r, element, depth + 1)?);
                }
                Payload::List(items)
            }
            TagType::Compound => {
                let mut children = Vec::new();
                loop {
                    let child = Tag::read(r, depth + 1)?;
                    if child.type_id() == TagType::End {
                        break;
                    }
                    children.push(child);
                }
                Payload::Compound(children)
            }
            TagType::IntArray => {
                let len = r.read_len()?;
                Payload::IntArray(r.read_vec(len, |r| Ok(r.read_i32::<BigEndian>()?))?)
            }
            TagType::LongArray => {
                let len = r.read_len()?;
                Payload::LongArray(r.read_vec(len, |r| Ok(r.read_i64::<BigEndian>()?))?)
            }
        })
    }

    /// Look up a direct child of a compound by name.
    pub fn get(&self, name: &str) -> Option<&Payload> {
        match self {
            Payload::Compound(children) => children
                .iter()
                .find(|c| c.name() == name)
                .map(Tag::payload),
            _ => None,
        }
    }

    /// The number of elements in an array, list or compound.
    pub fn len(&self) -> Option<usize> {
        match self {
            Payload::ByteArray(v) => Some(v.len()),
            Payload::IntArray(v) => Some(v.len()),
            Payload::LongArray(v) => Some(v.len()),
            Payload::List(v) => Some(v.len()),
            Payload::Compound(v) => Some(v.len()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Payload::Byte(v) => Some(v as i64),
            Payload::Short(v) => Some(v as i64),
            Payload::Int(v) => Some(v as i64),
            Payload::Long(v) => Some(v),
            Payload::Float(v) => Some(v as i64),
            Payload::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Payload::Byte(v) => Some(v as f64),
            Payload::Short(v) => Some(v as f64),
            Payload::Int(v) => Some(v as f64),
            Payload::Long(v) => Some(v as f64),
            Payload::Float(v) => Some(v as f64),
            Payload::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::String(v) => Some(v),
            _ => None,
        }
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Payload {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(Vec<i64>, LongArray);
from!(Vec<Tag>, Compound);

impl From<bool> for Payload {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}
