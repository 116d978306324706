#![no_main]

use libfuzzer_sys::fuzz_target;
use png_text::{LoadOptions, PngText};

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary input should NEVER panic, only return errors
    for options in [LoadOptions::new(), LoadOptions::tolerant()] {
        if let Ok(png) = PngText::from_reader_with(data, &options) {
            // Reads should be safe on any chunk contents
            let _ = png.get_text("Comment");
            let _ = png.get_international_text("Title");
            let _ = png.text_entries();

            // Anything that parsed strictly must save back unchanged
            if let Ok(bytes) = png.to_bytes() {
                if options.truncation_policy() == png_text::Truncation::Error {
                    assert_eq!(bytes.as_slice(), data);
                }
            }
        }
    }
});
