//! `tEXt` and `iTXt` payload codecs
//!
//! `tEXt` layout: `keyword \0 text`, both Latin-1.
//!
//! `iTXt` layout: `keyword \0 compression_flag compression_method language_tag \0
//! translated_keyword \0 text`, keyword Latin-1 and text UTF-8. This crate writes
//! uncompressed `iTXt` with empty language tag and translated keyword. On read the
//! text is everything after the last null byte; the middle fields are ignored.

use crate::{
    bytes::{find_nul, latin1_decode, latin1_encode, rfind_nul},
    chunk::{checked_length, Chunk, ChunkType},
    error::{Error, Result},
};

/// Maximum keyword length in bytes
pub const MAX_KEYWORD_LEN: usize = 79;

/// Which text chunk an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// `tEXt`
    Latin1,
    /// `iTXt`
    International,
}

impl TextKind {
    pub fn chunk_type(self) -> ChunkType {
        match self {
            TextKind::Latin1 => ChunkType::TEXT,
            TextKind::International => ChunkType::ITXT,
        }
    }

    /// Decode a chunk of this kind
    pub fn decode(self, chunk: &Chunk) -> Result<TextEntry> {
        match self {
            TextKind::Latin1 => decode_text(chunk),
            TextKind::International => decode_international_text(chunk),
        }
    }

    /// Encode a keyword/text pair as a chunk of this kind
    pub fn encode(self, keyword: &str, text: &str) -> Result<Chunk> {
        match self {
            TextKind::Latin1 => encode_text(keyword, text),
            TextKind::International => encode_international_text(keyword, text),
        }
    }
}

/// A decoded keyword/text pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub kind: TextKind,
    pub keyword: String,
    pub text: String,
}

/// Decode a `tEXt` chunk: split at the first null byte
pub fn decode_text(chunk: &Chunk) -> Result<TextEntry> {
    let data = chunk.data();
    let sep = find_nul(data).ok_or(Error::MissingSeparator {
        chunk_type: chunk.chunk_type(),
    })?;

    Ok(TextEntry {
        kind: TextKind::Latin1,
        keyword: latin1_decode(&data[..sep]),
        text: latin1_decode(&data[sep + 1..]),
    })
}

/// Decode an `iTXt` chunk: keyword before the first null, text after the last
pub fn decode_international_text(chunk: &Chunk) -> Result<TextEntry> {
    let data = chunk.data();
    let missing = || Error::MissingSeparator {
        chunk_type: chunk.chunk_type(),
    };
    let key_end = find_nul(data).ok_or_else(missing)?;
    let text_start = rfind_nul(data).ok_or_else(missing)? + 1;

    let keyword = latin1_decode(&data[..key_end]);
    let text = std::str::from_utf8(&data[text_start..])
        .map_err(|e| {
            Error::Encoding(format!("iTXt text for {:?} is not valid UTF-8: {}", keyword, e))
        })?
        .to_string();

    Ok(TextEntry {
        kind: TextKind::International,
        keyword,
        text,
    })
}

/// Encode a `tEXt` chunk
pub fn encode_text(keyword: &str, text: &str) -> Result<Chunk> {
    let key_bytes = encode_keyword(keyword)?;
    let text_bytes = latin1_encode(text)?;

    // Text may contain NUL: decoding splits at the first one only
    let mut chunk_data = Vec::with_capacity(key_bytes.len() + 1 + text_bytes.len());
    chunk_data.extend_from_slice(&key_bytes);
    chunk_data.push(0);
    chunk_data.extend_from_slice(&text_bytes);
    checked_length(chunk_data.len())?;

    Ok(Chunk::new(ChunkType::TEXT, chunk_data))
}

/// Encode an uncompressed `iTXt` chunk
pub fn encode_international_text(keyword: &str, text: &str) -> Result<Chunk> {
    let key_bytes = encode_keyword(keyword)?;
    if text.contains('\0') {
        return Err(Error::Encoding("iTXt text must not contain NUL".into()));
    }

    let mut chunk_data = Vec::with_capacity(key_bytes.len() + 5 + text.len());

    // Keyword
    chunk_data.extend_from_slice(&key_bytes);
    chunk_data.push(0);

    // Compression flag (0 = uncompressed)
    chunk_data.push(0);

    // Compression method (0 = none)
    chunk_data.push(0);

    // Language tag (empty, null-terminated)
    chunk_data.push(0);

    // Translated keyword (empty, null-terminated)
    chunk_data.push(0);

    chunk_data.extend_from_slice(text.as_bytes());
    checked_length(chunk_data.len())?;

    Ok(Chunk::new(ChunkType::ITXT, chunk_data))
}

fn encode_keyword(keyword: &str) -> Result<Vec<u8>> {
    let bytes = latin1_encode(keyword)?;
    if bytes.is_empty() || bytes.len() > MAX_KEYWORD_LEN {
        return Err(Error::InvalidKeyword(format!(
            "{:?} must be 1-{} bytes, got {}",
            keyword,
            MAX_KEYWORD_LEN,
            bytes.len()
        )));
    }
    if find_nul(&bytes).is_some() {
        return Err(Error::InvalidKeyword(format!(
            "{:?} contains a NUL byte",
            keyword
        )));
    }
    Ok(bytes)
}
