//! Test utilities for building synthetic PNG streams.
//!
//! Instead of binary fixture files, tests assemble small PNGs from chunks:
//!
//! ```
//! use png_text::test_utils::*;
//!
//! let png = png_with_chunks(&[chunk_bytes(b"tEXt", b"Author\0Jane")]);
//! assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
//! ```

use crate::chunk::{calculate_crc, ChunkType, PNG_SIGNATURE};

/// IHDR payload for a 1x1 8-bit RGB image
pub const IHDR_1X1_RGB: [u8; 13] = [
    0x00, 0x00, 0x00, 0x01, // Width: 1
    0x00, 0x00, 0x00, 0x01, // Height: 1
    0x08, // Bit depth: 8
    0x02, // Color type: RGB
    0x00, // Compression: deflate
    0x00, // Filter: adaptive
    0x00, // Interlace: none
];

/// Serialize one chunk (length, type, data, CRC) with a correct CRC
pub fn chunk_bytes(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    let crc = calculate_crc(&ChunkType(*chunk_type), data);
    out.extend_from_slice(&crc.to_be_bytes());
    out
}

/// Signature + IHDR + the given chunks + IEND
pub fn png_with_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend_from_slice(&chunk_bytes(b"IHDR", &IHDR_1X1_RGB));
    for chunk in chunks {
        data.extend_from_slice(chunk);
    }
    data.extend_from_slice(&chunk_bytes(b"IEND", &[]));
    data
}

/// Minimal valid PNG: signature + IHDR + IEND
pub fn minimal_png() -> Vec<u8> {
    png_with_chunks(&[])
}
