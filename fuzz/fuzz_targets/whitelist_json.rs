#![no_main]
use libfuzzer_sys::fuzz_target;
use zsanitize::Whitelist;

fuzz_target!(|data: &[u8]| {
    if let Ok(whitelist) = Whitelist::from_json_slice(data) {
        if let Ok(json) = whitelist.to_json() {
            assert_eq!(Whitelist::from_json_str(&json).ok(), Some(whitelist));
        }
    }
});
