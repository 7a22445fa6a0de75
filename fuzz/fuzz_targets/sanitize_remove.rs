#![no_main]
use libfuzzer_sys::fuzz_target;
use zsanitize::{Disposition, Whitelist};

fuzz_target!(|data: &[u8]| {
    let whitelist = Whitelist::new()
        .with_strip_comments(true)
        .with_element("p", Vec::<String>::new())
        .with_element("a", ["href"]);
    let _ = zsanitize::sanitize_reader(data, &whitelist, Disposition::Remove, Default::default());
});
