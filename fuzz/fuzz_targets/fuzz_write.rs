#![no_main]

use libfuzzer_sys::fuzz_target;
use png_text::{test_utils::minimal_png, PngText};

fuzz_target!(|data: &[u8]| {
    // Split the input into a keyword and a value and try every setter
    let text = String::from_utf8_lossy(data);
    let (key, value) = text.split_once('=').unwrap_or((&*text, ""));

    let mut png = PngText::from_bytes(&minimal_png()).expect("fixture parses");

    if png.set_text(key, value).is_ok() {
        assert_eq!(png.get_text(key).as_deref(), Some(value));
    }
    if png.set_international_text(key, value).is_ok() {
        let got = png.get_international_text(key).expect("valid UTF-8");
        assert_eq!(got.as_deref(), Some(value));
    }

    let bytes = png.to_bytes().expect("in-memory write");
    let reloaded = PngText::from_bytes(&bytes).expect("output parses");
    assert_eq!(reloaded, png);
});
