use super::{format_f32, format_f64, push_int, Dialect, Format};
use crate::{Payload, Tag, TagType};

pub(crate) struct Json;

pub(crate) fn root(tag: &Tag, f: &Format) -> String {
    super::root::<Json>(tag, f)
}

pub(crate) fn payload(out: &mut String, p: &Payload, f: &Format, depth: usize) {
    super::payload::<Json>(out, p, f, depth)
}

fn write_str(out: &mut String, s: &str) {
    out.push_str(&serde_json::to_string(s).unwrap_or_default());
}

impl Dialect for Json {
    fn key(out: &mut String, name: &str) {
        write_str(out, name);
    }

    fn scalar(out: &mut String, p: &Payload) {
        match p {
            Payload::Byte(v) => push_int(out, *v),
            Payload::Short(v) => push_int(out, *v),
            Payload::Int(v) => push_int(out, *v),
            Payload::Long(v) => push_int(out, *v),
            // JSON has no representation of NaN or the infinities.
            Payload::Float(v) if !v.is_finite() => out.push_str("null"),
            Payload::Double(v) if !v.is_finite() => out.push_str("null"),
            Payload::Float(v) => out.push_str(&format_f32(*v)),
            Payload::Double(v) => out.push_str(&format_f64(*v)),
            Payload::String(s) => write_str(out, s),
            _ => {}
        }
    }

    fn array_prefix(_: TagType) -> &'static str {
        ""
    }

    fn element_suffix(_: TagType) -> &'static str {
        ""
    }
}
