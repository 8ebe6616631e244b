use super::tokenizer::{Token, Tokenizer};
use super::{literal, NAME_SPECIALS};
use crate::codec::{Res, MAX_DEPTH};
use crate::error::ErrorKind;
use crate::{Payload, Tag};

/// Quotes and whitespace only matter to the tokenizer itself, the parser
/// works on structural tokens.
const SKIP: &[u8] = b"\" ";

/// Recursive descent over the tokens of compacted SNBT text.
///
/// Each method that parses a value is entered with the current token
/// being the first token at or after the value's first byte, and returns
/// with the current token being the first token after the value along with
/// the offset just past the value.
pub(crate) struct Parser {
    tokens: Tokenizer,
    depth: usize,
}

impl Parser {
    pub fn new(text: &str) -> Parser {
        let tokens = Tokenizer::new(text).compact();
        Parser { tokens, depth: 0 }
    }

    pub fn parse_root(mut self) -> Res<Tag> {
        let len = self.tokens.input().len();
        if len == 0 {
            return Err(ErrorKind::snbt(0, "empty input"));
        }

        let (name, start) = match self.tokens.advance(&[], SKIP) {
            Some(t) if t.ch == b':' && t.index > 0 => {
                let name = self.name(t.index)?;
                self.tokens.advance(&[], SKIP);
                (name, t.index + 1)
            }
            _ => (String::new(), 0),
        };

        let (payload, end) = self.value(start)?;
        if let Some(t) = self.tokens.curr() {
            return Err(ErrorKind::snbt(t.index, "unexpected token after value"));
        }
        if end != len {
            return Err(ErrorKind::snbt(end, "unexpected characters after value"));
        }

        Ok(Tag::new(name, payload))
    }

    fn value(&mut self, start: usize) -> Res<(Payload, usize)> {
        let input = self.tokens.input();
        let open = input.get(start).copied();
        let array = match (input.get(start + 1), input.get(start + 2)) {
            (Some(&kind @ (b'B' | b'I' | b'L')), Some(b';')) => Some(kind),
            _ => None,
        };

        match open {
            None => Err(ErrorKind::snbt(start, "expected value")),
            Some(b'{') => self.compound(start),
            Some(b'[') => match array {
                Some(kind) => self.array(start, kind),
                None => self.list(start),
            },
            Some(_) => self.scalar(start),
        }
    }

    fn scalar(&mut self, start: usize) -> Res<(Payload, usize)> {
        let end = self
            .tokens
            .curr()
            .map_or(self.tokens.input().len(), |t| t.index);
        if end <= start {
            return Err(ErrorKind::snbt(start, "expected value"));
        }

        let text = self.text(start, end)?;
        let payload = literal::scalar(text).map_err(|msg| ErrorKind::snbt(start, msg))?;
        Ok((payload, end))
    }

    fn compound(&mut self, start: usize) -> Res<(Payload, usize)> {
        self.expect_current(b'{', start)?;
        self.enter(start)?;

        let mut children = Vec::new();
        let mut token = self.next_required()?;
        if !(token.ch == b'}' && token.index == start + 1) {
            loop {
                if token.ch != b':' {
                    return Err(ErrorKind::snbt(token.index, "expected ':' after name"));
                }
                let name = self.name(token.index)?;

                self.tokens.advance(&[], SKIP);
                let (payload, end) = self.value(token.index + 1)?;
                children.push(Tag::new(name, payload));

                let after = self.terminator(end)?;
                match after.ch {
                    b',' => token = self.next_required()?,
                    b'}' => break,
                    _ => return Err(ErrorKind::snbt(after.index, "expected ',' or '}'")),
                }
            }
        }

        let end = self.leave()?;
        Ok((Payload::Compound(children), end))
    }

    fn list(&mut self, start: usize) -> Res<(Payload, usize)> {
        self.expect_current(b'[', start)?;
        self.enter(start)?;

        let mut items: Vec<Payload> = Vec::new();
        let token = self.next_required()?;
        if !(token.ch == b']' && token.index == start + 1) {
            let mut item_start = start + 1;
            loop {
                let (payload, end) = self.value(item_start)?;
                if let Some(first) = items.first() {
                    if first.type_id() != payload.type_id() {
                        return Err(ErrorKind::snbt(
                            item_start,
                            format!(
                                "list of {} cannot hold {}",
                                first.type_id(),
                                payload.type_id()
                            ),
                        ));
                    }
                }
                items.push(payload);

                let after = self.terminator(end)?;
                match after.ch {
                    b',' => {
                        item_start = after.index + 1;
                        self.tokens.advance(&[], SKIP);
                    }
                    b']' => break,
                    _ => return Err(ErrorKind::snbt(after.index, "expected ',' or ']'")),
                }
            }
        }

        let end = self.leave()?;
        Ok((Payload::List(items), end))
    }

    fn array(&mut self, start: usize, kind: u8) -> Res<(Payload, usize)> {
        self.expect_current(b'[', start)?;
        let semicolon = self.next_required()?;
        if semicolon.ch != b';' || semicolon.index != start + 2 {
            return Err(ErrorKind::snbt(semicolon.index, "expected ';' after array type"));
        }

        let mut payload = match kind {
            b'B' => Payload::ByteArray(Vec::new()),
            b'I' => Payload::IntArray(Vec::new()),
            _ => Payload::LongArray(Vec::new()),
        };

        let mut token = self.next_required()?;
        if !(token.ch == b']' && token.index == start + 3) {
            loop {
                let at = self.tokens.prev().map_or(start, |t| t.index + 1);
                let text = std::str::from_utf8(self.tokens.slice())
                    .map_err(|_| ErrorKind::snbt(at, "invalid utf-8"))?;
                let pushed = match &mut payload {
                    Payload::ByteArray(v) => literal::byte_element(text).map(|b| v.push(b)),
                    Payload::IntArray(v) => literal::int_element(text).map(|i| v.push(i)),
                    Payload::LongArray(v) => literal::long_element(text).map(|l| v.push(l)),
                    _ => Ok(()),
                };
                pushed.map_err(|msg| ErrorKind::snbt(at, msg))?;

                match token.ch {
                    b',' => token = self.next_required()?,
                    b']' => break,
                    _ => return Err(ErrorKind::snbt(token.index, "expected ',' or ']'")),
                }
            }
        }

        let end = token.index + 1;
        self.tokens.advance(&[], SKIP);
        Ok((payload, end))
    }

    /// Parse the name between the previous token and the `:` at `colon`.
    fn name(&self, colon: usize) -> Res<String> {
        let at = self.tokens.prev().map_or(0, |t| t.index + 1);
        let text = self.text(at, colon)?;
        if text.starts_with('"') || text.starts_with('\'') {
            return literal::unquote(text).map_err(|msg| ErrorKind::snbt(at, msg));
        }

        if text.is_empty() {
            return Err(ErrorKind::snbt(at, "expected name"));
        }
        if let Some(c) = text.chars().find(|&c| NAME_SPECIALS.contains(c)) {
            return Err(ErrorKind::snbt(at, format!("'{}' in unquoted name", c)));
        }
        Ok(text.to_owned())
    }

    fn text(&self, start: usize, end: usize) -> Res<&str> {
        let bytes = self
            .tokens
            .input()
            .get(start..end)
            .ok_or_else(|| ErrorKind::snbt(start, "expected value"))?;
        std::str::from_utf8(bytes).map_err(|_| ErrorKind::snbt(start, "invalid utf-8"))
    }

    fn expect_current(&self, ch: u8, index: usize) -> Res<()> {
        match self.tokens.curr() {
            Some(t) if t.ch == ch && t.index == index => Ok(()),
            _ => Err(ErrorKind::snbt(index, format!("expected '{}'", ch as char))),
        }
    }

    fn next_required(&mut self) -> Res<Token> {
        let from = self.tokens.curr().map_or(0, |t| t.index);
        self.tokens
            .advance(&[], SKIP)
            .ok_or_else(|| ErrorKind::snbt(from, "unexpected end of input"))
    }

    /// The token that must directly follow a value ending at `end`.
    fn terminator(&self, end: usize) -> Res<Token> {
        match self.tokens.curr() {
            Some(t) if t.index == end => Ok(t),
            Some(_) => Err(ErrorKind::snbt(end, "unexpected characters after value")),
            None => Err(ErrorKind::snbt(end, "unexpected end of input")),
        }
    }

    fn enter(&mut self, at: usize) -> Res<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ErrorKind::snbt(at, "nested too deeply"));
        }
        Ok(())
    }

    /// Step past the closing bracket of a compound or list, returning the
    /// offset after it. The end of input may follow directly, so running out
    /// of tokens here is fine.
    fn leave(&mut self) -> Res<usize> {
        self.depth -= 1;
        let close = self
            .tokens
            .curr()
            .ok_or_else(|| ErrorKind::snbt(self.tokens.input().len(), "unexpected end of input"))?;
        self.tokens.advance(&[], SKIP);
        Ok(close.index + 1)
    }
}
