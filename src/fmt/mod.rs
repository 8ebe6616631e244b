//! Text renderers. SNBT and JSON share the same shape: compounds sorted by
//! the rendered form of their children, lists in order, typed arrays inline.
//! What differs between them is captured by [`Dialect`].

use std::borrow::Cow;

use crate::{Payload, Tag, TagType};

pub(crate) mod json;
pub(crate) mod snbt;

/// Layout parameters for [`crate::stringify_with`] and [`crate::json_with`].
///
/// `space` is written after every colon and comma. When `indent` is
/// non-empty every child of a compound or list goes on its own line,
/// indented by `indent` once per level of nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub space: Cow<'static, str>,
    pub indent: Cow<'static, str>,
}

impl Format {
    /// Single line with a space after colons and commas.
    pub const DEFAULT: Format = Format {
        space: Cow::Borrowed(" "),
        indent: Cow::Borrowed(""),
    };

    /// No insignificant whitespace.
    pub const COMPACT: Format = Format {
        space: Cow::Borrowed(""),
        indent: Cow::Borrowed(""),
    };

    pub fn pretty(indent: &str) -> Format {
        Format {
            space: Cow::Borrowed(" "),
            indent: Cow::Owned(indent.to_owned()),
        }
    }

    fn is_pretty(&self) -> bool {
        !self.indent.is_empty()
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::DEFAULT
    }
}

pub(crate) trait Dialect {
    /// Write the name of a compound child.
    fn key(out: &mut String, name: &str);

    /// Write anything that is not a collection.
    fn scalar(out: &mut String, payload: &Payload);

    /// Written after the `[` of a typed array.
    fn array_prefix(array: TagType) -> &'static str;

    /// Written after every element of a typed array.
    fn element_suffix(array: TagType) -> &'static str;
}

pub(crate) fn root<D: Dialect>(tag: &Tag, f: &Format) -> String {
    let mut out = String::new();
    if tag.type_id() == TagType::End {
        return out;
    }

    if tag.name().is_empty() {
        payload::<D>(&mut out, tag.payload(), f, 0);
    } else {
        let mut entry = String::new();
        write_entry::<D>(&mut entry, tag, f, 1);
        container(&mut out, '{', '}', &[entry], f, 0);
    }
    out
}

pub(crate) fn payload<D: Dialect>(out: &mut String, p: &Payload, f: &Format, depth: usize) {
    match p {
        Payload::Compound(children) => {
            let mut entries: Vec<String> = children
                .iter()
                .filter(|c| c.type_id() != TagType::End)
                .map(|c| {
                    let mut entry = String::new();
                    write_entry::<D>(&mut entry, c, f, depth + 1);
                    entry
                })
                .collect();
            entries.sort();
            container(out, '{', '}', &entries, f, depth);
        }
        Payload::List(items) => {
            let entries: Vec<String> = items
                .iter()
                .map(|item| {
                    let mut entry = String::new();
                    payload::<D>(&mut entry, item, f, depth + 1);
                    entry
                })
                .collect();
            container(out, '[', ']', &entries, f, depth);
        }
        Payload::ByteArray(vs) => array::<D, _>(out, TagType::ByteArray, vs, f),
        Payload::IntArray(vs) => array::<D, _>(out, TagType::IntArray, vs, f),
        Payload::LongArray(vs) => array::<D, _>(out, TagType::LongArray, vs, f),
        _ => D::scalar(out, p),
    }
}

fn write_entry<D: Dialect>(out: &mut String, tag: &Tag, f: &Format, depth: usize) {
    D::key(out, tag.name());
    out.push(':');
    out.push_str(&f.space);
    payload::<D>(out, tag.payload(), f, depth);
}

fn container(out: &mut String, open: char, close: char, entries: &[String], f: &Format, depth: usize) {
    out.push(open);
    if entries.is_empty() {
        out.push(close);
        return;
    }

    if f.is_pretty() {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('\n');
            push_indent(out, f, depth + 1);
            out.push_str(entry);
        }
        out.push('\n');
        push_indent(out, f, depth);
    } else {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
                out.push_str(&f.space);
            }
            out.push_str(entry);
        }
    }
    out.push(close);
}

fn push_indent(out: &mut String, f: &Format, depth: usize) {
    for _ in 0..depth {
        out.push_str(&f.indent);
    }
}

fn array<D: Dialect, T: itoa::Integer + Copy>(out: &mut String, ty: TagType, vs: &[T], f: &Format) {
    out.push('[');
    let prefix = D::array_prefix(ty);
    out.push_str(prefix);
    if !prefix.is_empty() && !vs.is_empty() {
        out.push_str(&f.space);
    }

    let suffix = D::element_suffix(ty);
    let mut buffer = itoa::Buffer::new();
    for (i, v) in vs.iter().enumerate() {
        if i > 0 {
            out.push(',');
            out.push_str(&f.space);
        }
        out.push_str(buffer.format(*v));
        out.push_str(suffix);
    }
    out.push(']');
}

pub(crate) fn push_int<T: itoa::Integer>(out: &mut String, v: T) {
    let mut buffer = itoa::Buffer::new();
    out.push_str(buffer.format(v));
}

/// Format the way `%g` does with shortest precision: the fewest digits that
/// read back to the same value, in exponent form when the decimal exponent
/// is below -4 or at least 6.
pub(crate) fn format_f32(v: f32) -> String {
    if !v.is_finite() {
        return non_finite(v.is_nan(), v.is_sign_positive());
    }
    let mut buffer = ryu::Buffer::new();
    shortest_g(buffer.format_finite(v))
}

pub(crate) fn format_f64(v: f64) -> String {
    if !v.is_finite() {
        return non_finite(v.is_nan(), v.is_sign_positive());
    }
    let mut buffer = ryu::Buffer::new();
    shortest_g(buffer.format_finite(v))
}

fn non_finite(nan: bool, positive: bool) -> String {
    match (nan, positive) {
        (true, _) => "NaN",
        (false, true) => "+Inf",
        (false, false) => "-Inf",
    }
    .to_owned()
}

/// Reshape ryu output such as `1234567.8`, `1e-7` or `-0.0` into `%g`
/// layout.
fn shortest_g(repr: &str) -> String {
    let (negative, repr) = match repr.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, repr),
    };
    let (mantissa, exp) = match repr.split_once(|c| c == 'e' || c == 'E') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (repr, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits: Vec<u8> = int.bytes().chain(frac.bytes()).collect();
    // Position of the decimal point relative to the start of `digits`.
    let mut point = int.len() as i32 + exp;

    let leading = digits.iter().take_while(|&&d| d == b'0').count();
    digits.drain(..leading);
    point -= leading as i32;
    while digits.last() == Some(&b'0') {
        digits.pop();
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if digits.is_empty() {
        out.push('0');
        return out;
    }

    let exp = point - 1;
    if exp < -4 || exp >= 6 {
        out.push(digits[0] as char);
        if digits.len() > 1 {
            out.push('.');
            out.extend(digits[1..].iter().map(|&d| d as char));
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        if exp.abs() < 10 {
            out.push('0');
        }
        push_int(&mut out, exp.abs());
    } else if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.extend(digits.iter().map(|&d| d as char));
    } else if point as usize >= digits.len() {
        out.extend(digits.iter().map(|&d| d as char));
        out.extend(std::iter::repeat('0').take(point as usize - digits.len()));
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        out.extend(whole.iter().map(|&d| d as char));
        out.push('.');
        out.extend(fraction.iter().map(|&d| d as char));
    }
    out
}
