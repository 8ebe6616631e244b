use std::io::{Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use super::builder::Builder;
use crate::error::{ErrorKind, Op};
use crate::{decode, decode_compound, encode, Payload, Tag, TagType};

fn encoded(tag: &Tag) -> Vec<u8> {
    let mut bytes = vec![];
    encode(&mut bytes, tag).unwrap();
    bytes
}

fn hello_world() -> Vec<u8> {
    Builder::new()
        .start_compound("")
        .start_compound("Hello World")
        .string("Name", "Steve")
        .end_compound()
        .end_compound()
        .build()
}

#[test]
fn minimal_bytes() {
    let mut expected = vec![0x0a, 0, 0, 0x0a, 0, 0x0b];
    expected.extend_from_slice(b"Hello World");
    expected.extend_from_slice(&[0x08, 0, 4]);
    expected.extend_from_slice(b"Name");
    expected.extend_from_slice(&[0, 5]);
    expected.extend_from_slice(b"Steve");
    expected.extend_from_slice(&[0, 0]);
    assert_eq!(hello_world(), expected);

    let tag = decode(expected.as_slice()).unwrap();
    assert_eq!(
        tag,
        Tag::compound(
            "",
            vec![Tag::compound("Hello World", vec![Tag::string("Name", "Steve")])]
        )
    );
    assert_eq!(encoded(&tag), expected);
}

#[test]
fn float_bytes() {
    let tag = Tag::float("Float", 1234567.8);
    let bytes = encoded(&tag);

    let mut expected = vec![0x05, 0, 5];
    expected.extend_from_slice(b"Float");
    expected.extend_from_slice(&[0x49, 0x96, 0xb4, 0x3e]);
    assert_eq!(bytes, expected);
    assert_eq!(decode(bytes.as_slice()).unwrap(), tag);
}

#[test]
fn every_type_round_trips() {
    let tag = Tag::compound(
        "root",
        vec![
            Tag::byte("byte", i8::MIN),
            Tag::short("short", i16::MAX),
            Tag::int("int", i32::MIN),
            Tag::long("long", i64::MAX),
            Tag::float("float", f32::MIN_POSITIVE),
            Tag::double("double", -1e300),
            Tag::byte_array("bytes", vec![-1, 0, 1]),
            Tag::string("string", "Hello"),
            Tag::list("list", vec![Payload::Short(1), Payload::Short(2)]),
            Tag::compound("compound", vec![Tag::string("String", "World")]),
            Tag::int_array("ints", vec![i32::MAX, i32::MIN]),
            Tag::long_array("longs", vec![i64::MAX, i64::MIN]),
        ],
    );

    let bytes = encoded(&tag);
    assert_eq!(decode(bytes.as_slice()).unwrap(), tag);
}

#[test]
fn builder_and_encoder_agree() {
    let built = Builder::new()
        .start_compound("")
        .short("a", 7)
        .byte_array("b", &[1, 2])
        .int_array("c", &[3])
        .long_array("d", &[])
        .start_list("e", TagType::Int, 2)
        .int_payload(1)
        .int_payload(2)
        .double("f", 0.25)
        .end_compound()
        .build();

    let tag = Tag::compound(
        "",
        vec![
            Tag::short("a", 7),
            Tag::byte_array("b", vec![1, 2]),
            Tag::int_array("c", vec![3]),
            Tag::long_array("d", vec![]),
            Tag::list("e", vec![Payload::Int(1), Payload::Int(2)]),
            Tag::double("f", 0.25),
        ],
    );

    assert_eq!(decode(built.as_slice()).unwrap(), tag);
    assert_eq!(encoded(&tag), built);
}

#[test]
fn compound_keeps_wire_order() {
    let input = Builder::new()
        .start_compound("")
        .int("z", 1)
        .int("a", 2)
        .int("m", 3)
        .end_compound()
        .build();

    let tag = decode(input.as_slice()).unwrap();
    let names: Vec<_> = match tag.payload() {
        Payload::Compound(children) => children.iter().map(Tag::name).collect(),
        p => panic!("expected compound, got {:?}", p),
    };
    assert_eq!(names, ["z", "a", "m"]);
}

#[test]
fn explicit_end_children_are_not_written() {
    let with_end = Tag::compound("", vec![Tag::int("a", 1), Tag::end()]);
    let without = Tag::compound("", vec![Tag::int("a", 1)]);
    assert_eq!(encoded(&with_end), encoded(&without));
}

#[test]
fn end_tag_is_a_single_byte() {
    assert_eq!(encoded(&Tag::end()), [0]);
    assert_eq!(decode([0u8].as_slice()).unwrap(), Tag::end());
}

#[test]
fn empty_list_of_end() {
    let input = Builder::new()
        .start_list("empty", TagType::End, 0)
        .build();

    let tag = decode(input.as_slice()).unwrap();
    assert_eq!(tag, Tag::list("empty", vec![]));
    assert_eq!(tag.payload().element_type(), Some(TagType::End));
    assert_eq!(encoded(&tag), input);
}

#[test]
fn empty_list_of_other_type_reencodes_as_end() {
    let input = Builder::new()
        .start_list("empty", TagType::Int, 0)
        .build();

    let tag = decode(input.as_slice()).unwrap();
    assert_eq!(tag, Tag::list("empty", vec![]));

    let expected = Builder::new()
        .start_list("empty", TagType::End, 0)
        .build();
    assert_eq!(encoded(&tag), expected);
}

#[test]
fn list_elements_share_declared_type() {
    let input = Builder::new()
        .start_list("", TagType::Compound, 2)
        .int("a", 1)
        .end_compound()
        .end_compound()
        .build();

    let tag = decode(input.as_slice()).unwrap();
    match tag.payload() {
        Payload::List(items) => {
            assert_eq!(items.len(), 2);
            assert!(items.iter().all(|p| p.type_id() == TagType::Compound));
        }
        p => panic!("expected list, got {:?}", p),
    }
}

#[test]
fn length_fields_match_element_counts() {
    let tag = Tag::compound(
        "",
        vec![
            Tag::byte_array("b", vec![1; 3]),
            Tag::int_array("i", vec![1; 5]),
            Tag::long_array("l", vec![1; 7]),
            Tag::list("s", vec![Payload::Byte(0); 9]),
        ],
    );
    let bytes = encoded(&tag);

    // Skip the root type byte and empty name, then each child's type byte and
    // one-character name.
    let len_at = |offset: usize| {
        i32::from_be_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    };
    let b = 3 + 4;
    assert_eq!(len_at(b), 3);
    let i = b + 4 + 3 + 4;
    assert_eq!(len_at(i), 5);
    let l = i + 4 + 5 * 4 + 4;
    assert_eq!(len_at(l), 7);
    let s = l + 4 + 7 * 8 + 4 + 1;
    assert_eq!(len_at(s), 9);
}

#[test]
fn modified_utf8_strings() {
    let input = Builder::new()
        .start_compound("")
        .string("nul", "a\0b")
        .string("emoji", "🎉")
        .string("cjk", "日本語")
        .end_compound()
        .build();

    // Java's modified UTF-8 encodes NUL as two bytes and astral characters
    // as surrogate pairs.
    assert!(input.windows(2).any(|w| w == [0xc0, 0x80]));
    assert!(!input.windows(4).any(|w| w == "🎉".as_bytes()));

    let tag = decode(input.as_slice()).unwrap();
    assert_eq!(tag.payload().get("nul"), Some(&Payload::String("a\0b".into())));
    assert_eq!(tag.payload().get("emoji"), Some(&Payload::String("🎉".into())));
    assert_eq!(tag.payload().get("cjk"), Some(&Payload::String("日本語".into())));
    assert_eq!(encoded(&tag), input);
}

#[test]
fn gzip_magic_is_not_a_tag() {
    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(&hello_world()).unwrap();
    let compressed = gz.finish().unwrap();
    assert_eq!(compressed[0], 0x1f);

    let err = decode(compressed.as_slice()).unwrap_err();
    assert_eq!(err.op(), Op::Decode);
    assert!(matches!(err.kind(), ErrorKind::InvalidTagType(0x1f)));

    let mut raw = vec![];
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut raw)
        .unwrap();
    let tag = decode(raw.as_slice()).unwrap();
    assert_eq!(
        crate::compact_stringify(&tag),
        r#"{"Hello World":{Name:"Steve"}}"#
    );
}

#[test]
fn decoding_straight_from_a_gzip_reader() {
    let mut gz = GzEncoder::new(Vec::new(), Compression::fast());
    gz.write_all(&hello_world()).unwrap();
    let compressed = gz.finish().unwrap();

    let tag = decode(GzDecoder::new(compressed.as_slice())).unwrap();
    assert_eq!(tag.payload().len(), Some(1));
}

#[test]
fn decode_compound_checks_root() {
    assert!(decode_compound(hello_world().as_slice()).is_ok());

    let input = Builder::new().int("x", 1).build();
    let err = decode_compound(input.as_slice()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::DecodeMismatch {
            expected: TagType::Compound,
            found: TagType::Int
        }
    ));
}

#[test]
fn trailing_data_is_left_in_reader() {
    let mut input = Builder::new().byte("a", 1).build();
    input.extend_from_slice(&Builder::new().byte("b", 2).build());

    let mut reader = input.as_slice();
    assert_eq!(decode(&mut reader).unwrap(), Tag::byte("a", 1));
    assert_eq!(decode(&mut reader).unwrap(), Tag::byte("b", 2));
    assert!(reader.is_empty());
}

#[test]
fn truncated_input_is_eof() {
    let input = hello_world();
    for end in 0..input.len() {
        let err = decode(&input[..end]).unwrap_err();
        match err.kind() {
            ErrorKind::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            e => panic!("cut at {}: unexpected error {:?}", end, e),
        }
    }
}

#[test]
fn unknown_tag_inside_compound() {
    let input = Builder::new()
        .start_compound("")
        .raw_bytes(&[13, 0, 0])
        .end_compound()
        .build();

    assert!(matches!(
        decode(input.as_slice()).unwrap_err().kind(),
        ErrorKind::InvalidTagType(13)
    ));
}

#[test]
fn negative_array_length() {
    let input = Builder::new()
        .tag(TagType::IntArray)
        .name("a")
        .int_payload(-1)
        .build();

    match decode(input.as_slice()).unwrap_err().kind() {
        ErrorKind::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn mixed_list_is_an_encode_error() {
    let tag = Tag::list("", vec![Payload::Int(1), Payload::String("2".into())]);
    let err = encode(&mut vec![], &tag).unwrap_err();
    assert_eq!(err.op(), Op::Encode);
    assert!(err.is_invalid_tag_type());
}

#[test]
fn overlong_string_is_an_encode_error() {
    let tag = Tag::string("", "x".repeat(70_000));
    let err = encode(&mut vec![], &tag).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[test]
fn sixteen_levels_of_nesting() {
    let mut tag = Tag::int("leaf", 1);
    for depth in 0..16 {
        tag = if depth % 2 == 0 {
            Tag::compound(format!("c{}", depth), vec![tag])
        } else {
            Tag::list(format!("l{}", depth), vec![Payload::Compound(vec![tag])])
        };
    }

    let bytes = encoded(&tag);
    assert_eq!(decode(bytes.as_slice()).unwrap(), tag);
}

#[test]
fn tag_type_codec() {
    let mut out = vec![];
    TagType::LongArray.encode(&mut out).unwrap();
    assert_eq!(out, [12]);
    assert_eq!(TagType::decode(&mut out.as_slice()).unwrap(), TagType::LongArray);

    let err = TagType::decode(&mut [200u8].as_slice()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidTagType(200)));
}
