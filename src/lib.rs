//! nbtkit reads and writes NBT data from *Minecraft: Java Edition* as an owned
//! tree of tags. The same tree can be
//!
//! * encoded to and decoded from the binary NBT format ([`encode`], [`decode`]),
//! * rendered as stringified NBT (SNBT) in default, compact or pretty layout
//!   ([`stringify`], [`compact_stringify`], [`pretty_stringify`]),
//! * parsed back from SNBT ([`parse`]), and
//! * rendered as JSON ([`json`], [`compact_json`], [`pretty_json`]).
//!
//! Compression is not handled here. Most files the game writes are GZip or
//! Zlib compressed, so wrap the reader in a decoder first.
//!
//! # Quick example
//!
//! ```
//! use nbtkit::{Payload, Tag};
//!
//! let tag = Tag::compound(
//!     "hello world",
//!     vec![Tag::string("name", "Bananrama"), Tag::int("count", 3)],
//! );
//!
//! let mut bytes = vec![];
//! nbtkit::encode(&mut bytes, &tag).unwrap();
//! let decoded = nbtkit::decode(bytes.as_slice()).unwrap();
//! assert_eq!(decoded, tag);
//!
//! assert_eq!(
//!     nbtkit::stringify(&tag),
//!     r#"{"hello world": {count: 3, name: "Bananrama"}}"#
//! );
//!
//! let parsed = nbtkit::parse(r#"{count: 3, name: "Bananrama"}"#).unwrap();
//! assert_eq!(parsed.payload().get("count"), Some(&Payload::Int(3)));
//! ```
//!
//! # Compound ordering
//!
//! Decoding and parsing keep children in the order they appear. The text
//! renderers sort the children of every compound by their rendered form, so
//! output is stable regardless of how the tree was built.

use std::io::{Read, Write};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

pub mod error;
pub mod snbt;

mod codec;
mod fmt;
mod payload;
mod ser;
mod tag;

#[cfg(feature = "arbitrary1")]
mod arb;

#[cfg(test)]
mod test;

pub use error::{Error, ErrorKind, Op, Result};
pub use fmt::Format;
pub use payload::{new_payload, Payload};
pub use tag::Tag;

/// The type of an NBT tag. This does not carry the value or the name of the
/// data.
#[derive(Serialize, Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum TagType {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other payloads, all of the same type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl std::fmt::Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl TagType {
    /// Write this type as its single identifier byte.
    pub fn encode<W: Write>(self, writer: &mut W) -> Result<()> {
        codec::write_tag_type(writer, self).map_err(Error::with_op(Op::Encode))
    }

    /// Read a single identifier byte. Unknown bytes fail with
    /// [`ErrorKind::InvalidTagType`].
    pub fn decode<R: Read>(reader: &mut R) -> Result<TagType> {
        codec::read_tag_type(reader).map_err(Error::with_op(Op::Decode))
    }
}

/// Encode a single tag, including its type byte and name, to the writer.
pub fn encode<W: Write>(mut writer: W, tag: &Tag) -> Result<()> {
    tag.encode(&mut writer)
}

/// Decode a single tag from the reader. Reading stops after the tag, so any
/// trailing data is left in the reader.
pub fn decode<R: Read>(mut reader: R) -> Result<Tag> {
    Tag::decode(&mut reader)
}

/// Decode a single tag and require it to be a compound. This is the shape of
/// every NBT file the game writes.
pub fn decode_compound<R: Read>(reader: R) -> Result<Tag> {
    let tag = decode(reader)?;
    match tag.type_id() {
        TagType::Compound => Ok(tag),
        found => Err(Error::new(
            Op::Decode,
            ErrorKind::DecodeMismatch {
                expected: TagType::Compound,
                found,
            },
        )),
    }
}

/// Render as SNBT on a single line, with a space after colons and commas.
pub fn stringify(tag: &Tag) -> String {
    stringify_with(tag, &Format::DEFAULT)
}

/// Render as SNBT with no insignificant whitespace at all.
pub fn compact_stringify(tag: &Tag) -> String {
    stringify_with(tag, &Format::COMPACT)
}

/// Render as SNBT with each child on its own line, nested by `indent`.
pub fn pretty_stringify(tag: &Tag, indent: &str) -> String {
    stringify_with(tag, &Format::pretty(indent))
}

/// Render as SNBT using an explicit layout.
pub fn stringify_with(tag: &Tag, format: &Format) -> String {
    fmt::snbt::root(tag, format)
}

/// Render as JSON on a single line.
pub fn json(tag: &Tag) -> String {
    json_with(tag, &Format::DEFAULT)
}

/// Render as JSON with no insignificant whitespace.
pub fn compact_json(tag: &Tag) -> String {
    json_with(tag, &Format::COMPACT)
}

/// Render as JSON with each child on its own line, nested by `indent`.
pub fn pretty_json(tag: &Tag, indent: &str) -> String {
    json_with(tag, &Format::pretty(indent))
}

/// Render as JSON using an explicit layout.
pub fn json_with(tag: &Tag, format: &Format) -> String {
    fmt::json::root(tag, format)
}

/// Parse SNBT text into a tag. A leading `name:` before the root payload
/// becomes the name of the returned tag, otherwise the tag is nameless.
pub fn parse(text: &str) -> Result<Tag> {
    snbt::parse(text)
}
