//! Parsing of stringified NBT (SNBT), the text form the game uses in
//! commands, e.g. `{Name: "Steve", Health: 20.0f, Pos: [0.5d, 64.0d, 0.5d]}`.
//!
//! Parsing runs in two stages. The [`Tokenizer`] marks every structural
//! character in a set of bitmaps, masks out anything inside quoted strings
//! and squeezes out insignificant whitespace. The parser then walks the
//! remaining tokens, taking the text of each value from between two
//! consecutive tokens.
//!
//! Value types follow from their text:
//!
//! | Text | Type |
//! |------|------|
//! | `1b`, `-3B`, `true`, `false` | Byte |
//! | `1s` | Short |
//! | `1` | Int |
//! | `1L` | Long |
//! | `1.5f`, `2e3F` | Float |
//! | `1.5`, `2e3`, `1d` | Double |
//! | `"text"`, `'text'` | String |
//! | `[B; 1b, 2b]`, `[I; 1, 2]`, `[L; 1L, 2L]` | ByteArray, IntArray, LongArray |
//! | `[a, b]` | List |
//! | `{name: value}` | Compound |
//!
//! Strings must be quoted. Names may be bare if they avoid the characters
//! `` !"#$%&'()*,/:;<=>?@[\]^`{|}~`` and whitespace.

use crate::error::{Error, Op, Result};
use crate::{Payload, Tag};

pub mod bits;
mod literal;
mod parser;
mod tokenizer;

pub use tokenizer::{Token, Tokenizer, TOKEN_CHARS};

/// Characters that cannot appear in a bare name.
pub(crate) const NAME_SPECIALS: &str = " !\"#$%&'()*,/:;<=>?@[\\]^`{|}~";

/// Parse SNBT text into a tag. See [`crate::parse`].
pub fn parse(text: &str) -> Result<Tag> {
    parser::Parser::new(text)
        .parse_root()
        .map_err(Error::with_op(Op::Parse))
}

/// Parse SNBT text holding a single nameless value.
pub fn parse_payload(text: &str) -> Result<Payload> {
    let tag = parse(text)?;
    if !tag.name().is_empty() {
        return Err(Error::new(
            Op::Parse,
            crate::ErrorKind::snbt(0, "expected a value without a name"),
        ));
    }
    Ok(tag.into_payload())
}
