#![no_main]
use libfuzzer_sys::fuzz_target;
use zsanitize::{Disposition, Whitelist};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let whitelist = Whitelist::new()
            .with_strip_whitespace(true)
            .with_element("b", Vec::<String>::new())
            .with_element("i", ["class"]);
        if let Ok(once) = zsanitize::sanitize_fragment_str(s, &whitelist, Disposition::Unwrap) {
            // output of a sanitize pass is already clean
            let twice = zsanitize::sanitize_fragment_str(&once, &whitelist, Disposition::Unwrap);
            assert!(twice.is_ok());
        }
    }
});
