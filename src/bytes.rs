//! Byte and character-set helpers shared by the text codecs

use crate::error::{Error, Result};

/// Position of the first null byte
pub(crate) fn find_nul(data: &[u8]) -> Option<usize> {
    data.iter().position(|&b| b == 0)
}

/// Position of the last null byte
pub(crate) fn rfind_nul(data: &[u8]) -> Option<usize> {
    data.iter().rposition(|&b| b == 0)
}

/// Latin-1 bytes map one-to-one onto U+0000..=U+00FF, so decoding cannot fail
pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode text as Latin-1, rejecting characters above U+00FF
pub(crate) fn latin1_encode(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                Error::Encoding(format!(
                    "character {:?} (U+{:04X}) is not representable in Latin-1",
                    c,
                    u32::from(c)
                ))
            })
        })
        .collect()
}

/// Case-insensitive keyword comparison using full Unicode lowercasing
pub(crate) fn keys_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
