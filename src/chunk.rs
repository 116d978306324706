//! PNG chunk records

use crate::error::{Error, Result};
use std::fmt;

/// PNG signature
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Largest chunk length the PNG format allows (2^31-1)
pub const MAX_CHUNK_LENGTH: u32 = 0x7FFF_FFFF;

/// Four-byte ASCII chunk type tag
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    pub const IHDR: Self = Self(*b"IHDR");
    pub const IDAT: Self = Self(*b"IDAT");
    pub const IEND: Self = Self(*b"IEND");
    /// Latin-1 text
    pub const TEXT: Self = Self(*b"tEXt");
    /// International (UTF-8) text
    pub const ITXT: Self = Self(*b"iTXt");

    /// Raw tag bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Critical chunks have bit 5 of the first byte clear (uppercase letter)
    pub fn is_critical(&self) -> bool {
        self.0[0] & 0x20 == 0
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if (32..=126).contains(&b) { b as char } else { '.' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({})", self)
    }
}

/// A single chunk as stored in the file
///
/// The length field is not stored separately: load reads exactly the declared
/// number of data bytes, so it always equals `data.len()`.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: ChunkType,
    data: Vec<u8>,
    crc: u32,
}

impl Chunk {
    /// Build a new chunk, computing its CRC over type and data
    pub fn new(chunk_type: ChunkType, data: Vec<u8>) -> Self {
        let crc = calculate_crc(&chunk_type, &data);
        Self {
            chunk_type,
            data,
            crc,
        }
    }

    /// Wrap a chunk read from a stream, keeping its stored CRC untouched
    pub fn from_parts(chunk_type: ChunkType, data: Vec<u8>, crc: u32) -> Self {
        Self {
            chunk_type,
            data,
            crc,
        }
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length field as written to the stream
    ///
    /// Saturates at `u32::MAX`; writing such a chunk fails with
    /// [`Error::DataTooLarge`].
    pub fn length(&self) -> u32 {
        u32::try_from(self.data.len()).unwrap_or(u32::MAX)
    }

    /// CRC as stored (never recomputed for chunks that were read)
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// CRC-32 of the current type and data
    pub fn computed_crc(&self) -> u32 {
        calculate_crc(&self.chunk_type, &self.data)
    }

    /// Whether the stored CRC matches the chunk contents
    pub fn has_valid_crc(&self) -> bool {
        self.crc == self.computed_crc()
    }

    pub fn is_type(&self, chunk_type: ChunkType) -> bool {
        self.chunk_type == chunk_type
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("chunk_type", &self.chunk_type)
            .field("length", &self.data.len())
            .field("crc", &format_args!("{:#010x}", self.crc))
            .finish()
    }
}

/// Calculate CRC32 for a PNG chunk (covers type and data, not length)
pub fn calculate_crc(chunk_type: &ChunkType, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type.as_bytes());
    hasher.update(data);
    hasher.finalize()
}

/// Convert a data length to the chunk length field, enforcing the PNG maximum
pub fn checked_length(len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&length| length <= MAX_CHUNK_LENGTH)
        .ok_or(Error::DataTooLarge {
            size: len,
            max: MAX_CHUNK_LENGTH as usize,
        })
}

/// Detect a PNG file from its first bytes
pub fn detect(header: &[u8]) -> bool {
    header.len() >= 8 && &header[0..8] == PNG_SIGNATURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc_known_values() {
        // IEND with no data has a fixed CRC
        assert_eq!(calculate_crc(&ChunkType::IEND, &[]), 0xAE426082);

        // 1x1 RGB IHDR
        let ihdr = [
            0x00, 0x00, 0x00, 0x01, // Width: 1
            0x00, 0x00, 0x00, 0x01, // Height: 1
            0x08, // Bit depth: 8
            0x02, // Color type: RGB
            0x00, // Compression: deflate
            0x00, // Filter: adaptive
            0x00, // Interlace: none
        ];
        assert_eq!(calculate_crc(&ChunkType::IHDR, &ihdr), 0x907753DE);
    }

    #[test]
    fn test_new_chunk_has_valid_crc() {
        let chunk = Chunk::new(ChunkType::TEXT, b"Author\0Jane".to_vec());
        assert_eq!(chunk.length(), 11);
        assert!(chunk.has_valid_crc());

        let stale = Chunk::from_parts(ChunkType::TEXT, b"Author\0Jane".to_vec(), 0);
        assert!(!stale.has_valid_crc());
        assert_eq!(stale.crc(), 0);
    }

    #[test]
    fn test_checked_length_limit() {
        assert_eq!(checked_length(0).unwrap(), 0);
        assert_eq!(checked_length(0x7FFF_FFFF).unwrap(), MAX_CHUNK_LENGTH);
        assert!(matches!(
            checked_length(0x8000_0000),
            Err(Error::DataTooLarge {
                size: 0x8000_0000,
                ..
            })
        ));
    }

    #[test]
    fn test_chunk_type_display() {
        assert_eq!(ChunkType::ITXT.to_string(), "iTXt");
        assert_eq!(ChunkType([0x00, b'A', b'B', 0xFF]).to_string(), ".AB.");
        assert!(ChunkType::IEND.is_critical());
        assert!(!ChunkType::TEXT.is_critical());
    }

    #[test]
    fn test_detect() {
        assert!(detect(b"\x89PNG\r\n\x1a\n\0\0\0\0"));
        assert!(!detect(b"\x89PNG"));
        assert!(!detect(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0]));
    }
}
