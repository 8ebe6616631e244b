//! Bitmap tokenizer for SNBT.
//!
//! Every byte of the input owns one bit in a set of bitmaps, one bitmap per
//! token character. Quoted strings are found in a first pass and their bytes
//! are masked out of every other bitmap, so a `,` inside a string is never a
//! token. A compacted copy of the input then drops all whitespace outside
//! strings, which leaves significant bytes contiguous: the text of any value
//! is exactly the bytes between two consecutive tokens.
//!
//! ```
//! use nbtkit::snbt::Tokenizer;
//!
//! let mut tokens = Tokenizer::new(r#"{ a: "x, y" }"#).compact();
//! assert_eq!(tokens.input(), br#"{a:"x, y"}"#);
//!
//! let found: Vec<_> = std::iter::from_fn(|| tokens.next_token(&[], &[b'"']))
//!     .map(|t| (t.ch as char, t.index))
//!     .collect();
//! assert_eq!(found, vec![('{', 0), (':', 2), ('}', 9)]);
//! ```

use super::bits::{popcount, remove_rightmost, rightmost_index, smear_rightmost};

/// The token characters, in bitmap order. Both quote kinds are recorded
/// under `"`, and every whitespace character under ` `.
pub const TOKEN_CHARS: [u8; 9] = [b'"', b' ', b'{', b'}', b'[', b']', b',', b':', b';'];

const QUOTE: usize = 0;
const SPACE: usize = 1;

/// A token character and its byte offset in the tokenizer's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub ch: u8,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    input: Vec<u8>,
    token_bitmaps: [Vec<u64>; 9],
    string_mask: Vec<u64>,
    value_mask: Vec<u64>,
    /// Per class, the words before this one hold no live tokens.
    cursors: [usize; 9],
    prev: Option<Token>,
    curr: Option<Token>,
}

fn class_of(ch: u8) -> Option<usize> {
    match ch {
        b'\'' => Some(QUOTE),
        b'\t' | b'\n' | b'\r' | 0x0c => Some(SPACE),
        _ => TOKEN_CHARS.iter().position(|&c| c == ch),
    }
}

fn word_count(len: usize) -> usize {
    (len + 63) / 64
}

/// Bits of word `j` that correspond to real input bytes.
fn valid_bits(len: usize, j: usize) -> u64 {
    let end = len - j * 64;
    if end >= 64 {
        u64::MAX
    } else {
        (1u64 << end) - 1
    }
}

impl Tokenizer {
    pub fn new(input: impl Into<Vec<u8>>) -> Tokenizer {
        let input = input.into();
        let words = word_count(input.len());
        let mut token_bitmaps: [Vec<u64>; 9] = Default::default();
        for bitmap in token_bitmaps.iter_mut() {
            *bitmap = vec![0; words];
        }

        let mut in_single = false;
        let mut in_double = false;
        let mut backslashes = 0usize;

        for (i, &b) in input.iter().enumerate() {
            let escaped = (in_single || in_double) && backslashes % 2 == 1;
            let class = match b {
                b'"' if in_single || escaped => None,
                b'\'' if in_double || escaped => None,
                b'"' => {
                    in_double = !in_double;
                    Some(QUOTE)
                }
                b'\'' => {
                    in_single = !in_single;
                    Some(QUOTE)
                }
                _ => class_of(b),
            };
            if let Some(class) = class {
                token_bitmaps[class][i / 64] |= 1 << (i % 64);
            }
            backslashes = if b == b'\\' { backslashes + 1 } else { 0 };
        }

        Tokenizer::with_bitmaps(input, token_bitmaps)
    }

    /// Derive the string and value masks and remove masked bits from every
    /// bitmap but the quotes.
    fn with_bitmaps(input: Vec<u8>, mut token_bitmaps: [Vec<u64>; 9]) -> Tokenizer {
        let len = input.len();
        let words = word_count(len);
        let mut string_mask = vec![0; words];
        let mut value_mask = vec![0; words];
        let mut inside = false;

        for j in 0..words {
            let quotes = token_bitmaps[QUOTE][j];
            let odd = popcount(quotes) % 2 == 1;

            // Bit i ends up as the parity of quotes at or above i.
            let mut mask = 0u64;
            let mut x = quotes;
            while x != 0 {
                mask ^= smear_rightmost(x);
                x = remove_rightmost(x);
            }
            // Now the parity of quotes below i, which is whether byte i sits
            // inside a string that opened earlier in this word.
            if odd {
                mask = !mask;
            }
            if inside {
                mask = !mask;
            }
            inside ^= odd;

            let mask = (mask | quotes) & valid_bits(len, j);
            string_mask[j] = mask;
            for bitmap in token_bitmaps.iter_mut().skip(1) {
                bitmap[j] &= !mask;
            }
            value_mask[j] = !token_bitmaps[SPACE][j] & valid_bits(len, j);
        }

        Tokenizer {
            input,
            token_bitmaps,
            string_mask,
            value_mask,
            cursors: [0; 9],
            prev: None,
            curr: None,
        }
    }

    /// Build a tokenizer over the input with all whitespace outside strings
    /// removed. Token positions are carried over to their new offsets.
    pub fn compact(mut self) -> Tokenizer {
        let len = self.input.len();
        let mut input = Vec::with_capacity(len);
        let mut token_bitmaps: [Vec<u64>; 9] = Default::default();
        for bitmap in token_bitmaps.iter_mut() {
            *bitmap = vec![0; word_count(len)];
        }

        let mut next = self.next_token(&[], &[b' ']);
        for j in 0..self.value_mask.len() {
            let mut word = self.value_mask[j];
            while word != 0 {
                let i = j * 64 + rightmost_index(word) as usize;
                word = remove_rightmost(word);

                let at = input.len();
                input.push(self.input[i]);

                if let Some(token) = next.filter(|t| t.index == i) {
                    if let Some(class) = class_of(token.ch) {
                        token_bitmaps[class][at / 64] |= 1 << (at % 64);
                    }
                    next = self.next_token(&[], &[b' ']);
                }
            }
        }

        let words = word_count(input.len());
        for bitmap in token_bitmaps.iter_mut() {
            bitmap.truncate(words);
        }
        log::debug!("snbt: compacted {} bytes to {}", len, input.len());

        Tokenizer::with_bitmaps(input, token_bitmaps)
    }

    /// Find the token with the lowest index among the allowed characters,
    /// clear its bit and return it. Tokens of denied characters stay in place
    /// for later calls. An empty `allow` allows every token character. `None`
    /// once no such token remains.
    pub fn next_token(&mut self, allow: &[u8], deny: &[u8]) -> Option<Token> {
        let classes: Vec<usize> = (0..TOKEN_CHARS.len())
            .filter(|&c| allow.is_empty() || allow.contains(&TOKEN_CHARS[c]))
            .filter(|&c| !deny.contains(&TOKEN_CHARS[c]))
            .collect();
        let start = classes.iter().map(|&c| self.cursors[c]).min()?;

        for j in start..self.value_mask.len() {
            let best = classes
                .iter()
                .filter(|&&c| self.token_bitmaps[c][j] != 0)
                .map(|&c| (rightmost_index(self.token_bitmaps[c][j]), c))
                .min();

            if let Some((bit, class)) = best {
                let bitmap = &mut self.token_bitmaps[class];
                bitmap[j] &= !(1u64 << bit);
                let cursor = &mut self.cursors[class];
                while *cursor < bitmap.len() && bitmap[*cursor] == 0 {
                    *cursor += 1;
                }

                let index = j * 64 + bit as usize;
                let ch = if class == QUOTE || class == SPACE {
                    self.input[index]
                } else {
                    TOKEN_CHARS[class]
                };
                return Some(Token { ch, index });
            }
        }
        None
    }

    /// Step to the next token, remembering the current one as previous.
    pub fn advance(&mut self, allow: &[u8], deny: &[u8]) -> Option<Token> {
        self.prev = self.curr;
        self.curr = self.next_token(allow, deny);
        self.curr
    }

    pub fn prev(&self) -> Option<Token> {
        self.prev
    }

    pub fn curr(&self) -> Option<Token> {
        self.curr
    }

    /// The bytes between the previous and current tokens, exclusive. Runs to
    /// the end of input when there is no current token.
    pub fn slice(&self) -> &[u8] {
        let start = self.prev.map_or(0, |t| t.index + 1);
        let end = self.curr.map_or(self.input.len(), |t| t.index);
        self.input.get(start..end).unwrap_or(&[])
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn token_bitmap(&self, ch: u8) -> Option<&[u64]> {
        class_of(ch).map(|c| self.token_bitmaps[c].as_slice())
    }

    pub fn string_mask(&self) -> &[u64] {
        &self.string_mask
    }

    pub fn value_mask(&self) -> &[u64] {
        &self.value_mask
    }
}
