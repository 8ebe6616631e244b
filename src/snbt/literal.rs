//! Recognisers for the text of a single SNBT value: numbers with their type
//! suffixes, quoted strings and booleans.

use std::str::FromStr;

use nom::{
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, terminated, tuple},
    IResult,
};

use crate::Payload;

type Parsed<T> = std::result::Result<T, String>;

// -?\d+
fn integer(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(char('-')), digit1))(input)
}

// -?\d+(\.\d+)?([Ee][+-]?\d+)?
fn decimal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        integer,
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

/// The numeric part of `input` if the whole of it is `number` followed by
/// one of the `suffix` characters.
fn suffixed<'a>(
    number: fn(&'a str) -> IResult<&'a str, &'a str>,
    suffix: &'static str,
    input: &'a str,
) -> Option<&'a str> {
    all_consuming(terminated(number, one_of(suffix)))(input)
        .ok()
        .map(|(_, n)| n)
}

fn bare_integer(input: &str) -> Option<&str> {
    all_consuming(integer)(input).ok().map(|(_, n)| n)
}

fn double(input: &str) -> Option<&str> {
    all_consuming(terminated(decimal, opt(one_of("dD"))))(input)
        .ok()
        .map(|(_, n)| n)
}

fn number<T: FromStr>(text: &str, kind: &str) -> Parsed<T> {
    text.parse()
        .map_err(|_| format!("{} out of range: {}", kind, text))
}

fn finite<T: FromStr + Into<f64> + Copy>(text: &str, kind: &str) -> Parsed<T> {
    let v: T = number(text, kind)?;
    if v.into().is_finite() {
        Ok(v)
    } else {
        Err(format!("{} out of range: {}", kind, text))
    }
}

/// Parse the complete text of a non-collection value. Numbers are tried in
/// the order Byte, Short, Int, Long, Float, Double, so a plain integer is an
/// Int and a Double without suffix needs a fraction or an exponent.
pub(crate) fn scalar(text: &str) -> Parsed<Payload> {
    if text.starts_with('"') || text.starts_with('\'') {
        return unquote(text).map(Payload::String);
    }

    match text {
        "true" => return Ok(Payload::Byte(1)),
        "false" => return Ok(Payload::Byte(0)),
        _ => {}
    }

    if let Some(n) = suffixed(integer, "bB", text) {
        number(n, "byte").map(Payload::Byte)
    } else if let Some(n) = suffixed(integer, "sS", text) {
        number(n, "short").map(Payload::Short)
    } else if let Some(n) = bare_integer(text) {
        number(n, "int").map(Payload::Int)
    } else if let Some(n) = suffixed(integer, "lL", text) {
        number(n, "long").map(Payload::Long)
    } else if let Some(n) = suffixed(decimal, "fF", text) {
        finite(n, "float").map(Payload::Float)
    } else if let Some(n) = double(text) {
        finite(n, "double").map(Payload::Double)
    } else {
        Err(format!("invalid value: {}", text))
    }
}

pub(crate) fn byte_element(text: &str) -> Parsed<i8> {
    let n = suffixed(integer, "bB", text).ok_or_else(|| format!("invalid byte: {}", text))?;
    number(n, "byte")
}

pub(crate) fn int_element(text: &str) -> Parsed<i32> {
    let n = bare_integer(text).ok_or_else(|| format!("invalid int: {}", text))?;
    number(n, "int")
}

pub(crate) fn long_element(text: &str) -> Parsed<i64> {
    let n = suffixed(integer, "lL", text).ok_or_else(|| format!("invalid long: {}", text))?;
    number(n, "long")
}

/// Remove the quotes around a single or double quoted string and resolve its
/// escapes.
pub(crate) fn unquote(text: &str) -> Parsed<String> {
    let quote = match text.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(format!("expected quoted string: {}", text)),
    };
    if text.len() < 2 || !text.ends_with(quote) {
        return Err(format!("unterminated string: {}", text));
    }

    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == quote {
            return Err(format!("unescaped quote in string: {}", text));
        }
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('/') => out.push('/'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let c = Some(&hex)
                    .filter(|h| h.len() == 4 && h.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid unicode escape: \\u{}", hex))?;
                out.push(c);
            }
            Some(other) => return Err(format!("invalid escape: \\{}", other)),
            None => return Err(format!("unterminated string: {}", text)),
        }
    }
    Ok(out)
}
