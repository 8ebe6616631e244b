#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Ok(tag) = nbtkit::parse(text) {
        let snbt = nbtkit::stringify(&tag);
        let again = nbtkit::parse(&snbt).unwrap();
        assert_eq!(nbtkit::stringify(&again), snbt);
    }
});
