use std::fmt::Write;

use super::{format_f32, format_f64, push_int, Dialect, Format};
use crate::snbt::NAME_SPECIALS;
use crate::{Payload, Tag, TagType};

pub(crate) struct Snbt;

pub(crate) fn root(tag: &Tag, f: &Format) -> String {
    super::root::<Snbt>(tag, f)
}

pub(crate) fn payload(out: &mut String, p: &Payload, f: &Format, depth: usize) {
    super::payload::<Snbt>(out, p, f, depth)
}

impl Dialect for Snbt {
    fn key(out: &mut String, name: &str) {
        if needs_quotes(name) {
            write_quoted(out, name);
        } else {
            out.push_str(name);
        }
    }

    fn scalar(out: &mut String, p: &Payload) {
        match p {
            Payload::Byte(v) => {
                push_int(out, *v);
                out.push('b');
            }
            Payload::Short(v) => {
                push_int(out, *v);
                out.push('s');
            }
            Payload::Int(v) => push_int(out, *v),
            Payload::Long(v) => {
                push_int(out, *v);
                out.push('L');
            }
            Payload::Float(v) => {
                out.push_str(&format_f32(*v));
                out.push('f');
            }
            Payload::Double(v) => {
                out.push_str(&format_f64(*v));
                out.push('d');
            }
            Payload::String(s) => write_quoted(out, s),
            _ => {}
        }
    }

    fn array_prefix(array: TagType) -> &'static str {
        match array {
            TagType::ByteArray => "B;",
            TagType::IntArray => "I;",
            _ => "L;",
        }
    }

    fn element_suffix(array: TagType) -> &'static str {
        match array {
            TagType::ByteArray => "b",
            TagType::IntArray => "",
            _ => "L",
        }
    }
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty()
        || name
            .chars()
            .any(|c| NAME_SPECIALS.contains(c) || c.is_whitespace() || c.is_control())
}

/// Write a quoted string. Double quotes are used unless the string contains
/// a double quote and no single quote, in which case single quotes save the
/// escaping.
pub(crate) fn write_quoted(out: &mut String, v: &str) {
    let quote = if v.contains('"') && !v.contains('\'') {
        '\''
    } else {
        '"'
    };

    out.push(quote);
    for c in v.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(s: &str) -> String {
        let mut out = String::new();
        write_quoted(&mut out, s);
        out
    }

    #[test]
    fn quote_choice() {
        assert_eq!(quoted("plain"), r#""plain""#);
        assert_eq!(quoted(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(quoted("it's"), r#""it's""#);
        assert_eq!(quoted(r#""'Test"#), r#""\"'Test""#);
        assert_eq!(quoted(""), r#""""#);
    }

    #[test]
    fn escapes() {
        assert_eq!(quoted("a\\b"), r#""a\\b""#);
        assert_eq!(quoted("line\nbreak\ttab"), r#""line\nbreak\ttab""#);
        assert_eq!(quoted("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn bare_names() {
        assert!(!needs_quotes("Name"));
        assert!(!needs_quotes("snake_case-1.2+3"));
        assert!(!needs_quotes("日本語"));
        assert!(needs_quotes("minecraft:the_end"));
        assert!(needs_quotes("Hello World"));
        assert!(needs_quotes("tab\there"));
        assert!(needs_quotes(""));
    }
}
