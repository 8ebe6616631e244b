use crate::{compact_json, decode, json, json_with, pretty_json, Format, Payload, Tag};

use super::builder::Builder;

#[test]
fn minimal() {
    let input = Builder::new()
        .start_compound("")
        .start_compound("Hello World")
        .string("Name", "Steve")
        .end_compound()
        .end_compound()
        .build();
    let tag = decode(input.as_slice()).unwrap();

    assert_eq!(json(&tag), r#"{"Hello World": {"Name": "Steve"}}"#);
    assert_eq!(compact_json(&tag), r#"{"Hello World":{"Name":"Steve"}}"#);
}

#[test]
fn numbers_have_no_suffix() {
    let tag = Tag::compound(
        "",
        vec![
            Tag::byte("a", 1),
            Tag::short("b", -2),
            Tag::int("c", 3),
            Tag::long("d", i64::MAX),
            Tag::float("e", 1234567.8),
            Tag::double("f", 0.5),
        ],
    );
    assert_eq!(
        json(&tag),
        r#"{"a": 1, "b": -2, "c": 3, "d": 9223372036854775807, "e": 1.2345678e+06, "f": 0.5}"#
    );
}

#[test]
fn arrays_are_plain() {
    let tag = Tag::compound(
        "",
        vec![
            Tag::byte_array("b", vec![0, 1]),
            Tag::int_array("i", vec![]),
            Tag::long_array("l", vec![5]),
            Tag::list("s", vec![Payload::String("x".into())]),
        ],
    );
    assert_eq!(json(&tag), r#"{"b": [0, 1], "i": [], "l": [5], "s": ["x"]}"#);
}

#[test]
fn strings_are_escaped() {
    let tag = Tag::compound(
        "",
        vec![
            Tag::string("quote", "\"'Test"),
            Tag::string("control", "a\u{1}\n"),
            Tag::string("cjk", "日本語"),
        ],
    );
    assert_eq!(
        json(&tag),
        r#"{"cjk": "日本語", "control": "a\u0001\n", "quote": "\"'Test"}"#
    );
}

#[test]
fn non_finite_is_null() {
    let tag = Tag::list("", vec![Payload::Double(f64::NAN), Payload::Double(1.0)]);
    assert_eq!(json(&tag), "[null, 1]");
}

#[test]
fn root_handling() {
    assert_eq!(json(&Tag::int("", 5)), "5");
    assert_eq!(json(&Tag::int("x y", 5)), r#"{"x y": 5}"#);
    assert_eq!(json(&Tag::end()), "");
}

#[test]
fn pretty() {
    let tag = Tag::compound(
        "",
        vec![
            Tag::compound("b", vec![Tag::int("c", 1)]),
            Tag::int_array("a", vec![1, 2]),
        ],
    );
    assert_eq!(
        pretty_json(&tag, "    "),
        "{\n    \"a\": [1, 2],\n    \"b\": {\n        \"c\": 1\n    }\n}"
    );
}

#[test]
fn output_is_valid_json() {
    let tag = Tag::compound(
        "",
        vec![
            Tag::string("s", "line\nbreak \\ \"q\""),
            Tag::list(
                "l",
                vec![
                    Payload::Compound(vec![Tag::double("d", 1e-7)]),
                    Payload::Compound(vec![]),
                ],
            ),
            Tag::long_array("a", vec![i64::MIN]),
        ],
    );

    for format in [Format::DEFAULT, Format::COMPACT, Format::pretty("  ")] {
        let text = json_with(&tag, &format);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["s"], "line\nbreak \\ \"q\"");
        assert_eq!(value["l"][0]["d"], 1e-7);
        assert_eq!(value["a"][0], i64::MIN);
    }
}
