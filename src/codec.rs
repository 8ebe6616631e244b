//! Primitive pieces of the binary format: type bytes, lengths and
//! size-prefixed strings. Everything is big-endian.

use std::convert::{TryFrom, TryInto};
use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::ErrorKind;
use crate::TagType;

pub(crate) type Res<T> = std::result::Result<T, ErrorKind>;

/// Compounds and lists nested deeper than this are rejected rather than
/// risking the stack.
pub(crate) const MAX_DEPTH: usize = 512;

/// Announced lengths are never trusted for a single up-front allocation. At
/// most this many elements are reserved before data actually arrives.
const PREALLOC_LIMIT: usize = 4096;

pub(crate) fn write_tag_type<W: Write + ?Sized>(writer: &mut W, tag: TagType) -> Res<()> {
    writer.write_u8(tag.into())?;
    Ok(())
}

pub(crate) fn read_tag_type<R: Read + ?Sized>(reader: &mut R) -> Res<TagType> {
    let tag = reader.read_u8()?;
    TagType::try_from(tag).map_err(|_| ErrorKind::InvalidTagType(tag))
}

pub(crate) trait WriteNbt: Write {
    fn write_size_prefixed_str(&mut self, s: &str) -> Res<()> {
        let s = cesu8::to_java_cesu8(s);
        let len: u16 = s
            .len()
            .try_into()
            .map_err(|_| ErrorKind::invalid_input("string longer than 65535 bytes"))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(&s)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Res<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| ErrorKind::invalid_input("len too large"))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write + ?Sized {}

pub(crate) trait ReadNbt: Read {
    fn read_size_prefixed_str(&mut self) -> Res<String> {
        let len = self.read_u16::<BigEndian>()? as usize;
        let buf = self.read_bytes(len)?;

        match cesu8::from_java_cesu8(&buf) {
            Ok(s) => Ok(s.into_owned()),
            // Plain UTF-8 from other writers is accepted as well.
            Err(_) => String::from_utf8(buf).map_err(|e| {
                ErrorKind::invalid_data(format!(
                    "invalid nbt string: nonunicode: {}",
                    String::from_utf8_lossy(e.as_bytes())
                ))
            }),
        }
    }

    /// Read the int32 length in front of arrays and lists.
    fn read_len(&mut self) -> Res<usize> {
        let len = self.read_i32::<BigEndian>()?;
        len.try_into()
            .map_err(|_| ErrorKind::invalid_data(format!("negative length: {}", len)))
    }

    fn read_bytes(&mut self, len: usize) -> Res<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        Read::take(&mut *self, len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        Ok(buf)
    }

    fn read_vec<T>(&mut self, len: usize, mut read: impl FnMut(&mut Self) -> Res<T>) -> Res<Vec<T>>
    where
        Self: Sized,
    {
        let mut out = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            out.push(read(self)?);
        }
        Ok(out)
    }
}

impl<T> ReadNbt for T where T: Read + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_length_is_bounded() {
        let long = "a".repeat(u16::MAX as usize + 1);
        let mut out = vec![];
        let err = out.write_size_prefixed_str(&long).unwrap_err();
        assert!(matches!(err, ErrorKind::Io(e) if e.kind() == std::io::ErrorKind::InvalidInput));

        let max = "a".repeat(u16::MAX as usize);
        out.write_size_prefixed_str(&max).unwrap();
        assert_eq!(&out[..2], &[0xff, 0xff]);
    }

    #[test]
    fn short_string_read_is_eof() {
        let data = [0u8, 5, b'a', b'b'];
        let err = (&data[..]).read_size_prefixed_str().unwrap_err();
        assert!(matches!(err, ErrorKind::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn huge_length_does_not_allocate_up_front() {
        let data = [0x7fu8, 0xff, 0xff, 0xff];
        let mut input = &data[..];
        let len = input.read_len().unwrap();
        assert_eq!(len, i32::MAX as usize);
        assert!(input.read_bytes(len).is_err());
    }

    #[test]
    fn negative_length_is_invalid() {
        let data = (-1i32).to_be_bytes();
        let err = (&data[..]).read_len().unwrap_err();
        assert!(matches!(err, ErrorKind::Io(e) if e.kind() == std::io::ErrorKind::InvalidData));
    }

    #[test]
    fn plain_utf8_is_accepted() {
        // U+1F600 as 4-byte UTF-8, which CESU-8 would encode as surrogates.
        let s = "\u{1F600}";
        let mut data = vec![0, s.len() as u8];
        data.extend_from_slice(s.as_bytes());
        assert_eq!((&data[..]).read_size_prefixed_str().unwrap(), s);
    }
}
