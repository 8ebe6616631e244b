#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(tag) = nbtkit::decode(data) {
        let _ = nbtkit::stringify(&tag);
        let _ = nbtkit::json(&tag);

        let mut bytes = vec![];
        if nbtkit::encode(&mut bytes, &tag).is_ok() {
            let again = nbtkit::decode(bytes.as_slice()).unwrap();
            let mut rewritten = vec![];
            nbtkit::encode(&mut rewritten, &again).unwrap();
            assert_eq!(bytes, rewritten);
        }
    }
});
