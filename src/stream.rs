//! PNG chunk stream reader and writer
//!
//! Converts between a byte stream and an ordered list of [`Chunk`]s. Every chunk
//! is kept exactly as read, including its stored CRC, so a load followed by a
//! save reproduces the input byte for byte.

use crate::{
    chunk::{checked_length, Chunk, ChunkType, MAX_CHUNK_LENGTH, PNG_SIGNATURE},
    error::{Error, Result},
    options::{LoadOptions, Truncation},
};
use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};
use std::io::{ErrorKind, Read, Write};

/// Read the signature and every chunk until end of stream
pub fn read_chunks<R: Read>(source: &mut R, options: &LoadOptions) -> Result<Vec<Chunk>> {
    log::trace!("Checking PNG signature");
    let mut sig = [0u8; 8];
    if read_full(source, &mut sig)? < sig.len() || &sig != PNG_SIGNATURE {
        return Err(Error::BadSignature);
    }

    let mut chunks = Vec::new();
    let mut offset = PNG_SIGNATURE.len() as u64;

    loop {
        match read_chunk(source, offset) {
            Ok(Some(chunk)) => {
                log::trace!(
                    "Read {} chunk at offset {} ({} bytes)",
                    chunk.chunk_type(),
                    offset,
                    chunk.length()
                );
                offset += 12 + chunk.length() as u64; // length + type + data + CRC
                chunks.push(chunk);
            }
            Ok(None) => break,
            Err(err @ Error::TruncatedChunk { .. })
                if options.truncation == Truncation::KeepParsed =>
            {
                log::warn!("{}; keeping {} chunks parsed so far", err, chunks.len());
                break;
            }
            Err(err) => return Err(err),
        }
    }

    if chunks.last().map(|c| c.chunk_type()) != Some(ChunkType::IEND) {
        log::debug!("PNG stream does not end with an IEND chunk");
    }

    Ok(chunks)
}

/// Read one chunk, or `None` on a clean end of stream at a chunk boundary
fn read_chunk<R: Read>(source: &mut R, offset: u64) -> Result<Option<Chunk>> {
    let mut len_buf = [0u8; 4];
    match read_full(source, &mut len_buf)? {
        0 => return Ok(None),
        4 => {}
        n => return Err(truncated(offset, format!("length field has only {} bytes", n))),
    }
    let chunk_len = BigEndian::read_u32(&len_buf);

    let mut chunk_type = [0u8; 4];
    source
        .read_exact(&mut chunk_type)
        .map_err(|e| eof_as_truncated(e, offset, "missing chunk type"))?;
    let chunk_type = ChunkType(chunk_type);

    // Validate chunk length to prevent allocation attacks
    if chunk_len > MAX_CHUNK_LENGTH {
        return Err(Error::ChunkTooLarge {
            offset,
            length: chunk_len,
        });
    }

    // Read through take() so a bogus length cannot reserve memory up front
    let mut data = Vec::new();
    source
        .by_ref()
        .take(chunk_len as u64)
        .read_to_end(&mut data)?;
    if data.len() < chunk_len as usize {
        return Err(truncated(
            offset,
            format!(
                "{} declares {} data bytes but only {} remain",
                chunk_type,
                chunk_len,
                data.len()
            ),
        ));
    }

    let crc = source
        .read_u32::<BigEndian>()
        .map_err(|e| eof_as_truncated(e, offset, "missing CRC"))?;

    Ok(Some(Chunk::from_parts(chunk_type, data, crc)))
}

/// Write the signature followed by every chunk, verbatim
pub fn write_chunks<W: Write>(writer: &mut W, chunks: &[Chunk]) -> Result<()> {
    writer.write_all(PNG_SIGNATURE)?;
    for chunk in chunks {
        write_chunk(writer, chunk)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a single chunk with its stored length and CRC
///
/// Chunks longer than 2^31-1 bytes are rejected before anything is written.
pub fn write_chunk<W: Write>(writer: &mut W, chunk: &Chunk) -> Result<()> {
    // Write length
    writer.write_u32::<BigEndian>(checked_length(chunk.data().len())?)?;

    // Write type
    writer.write_all(chunk.chunk_type().as_bytes())?;

    // Write data
    writer.write_all(chunk.data())?;

    // Write stored CRC
    writer.write_u32::<BigEndian>(chunk.crc())?;

    Ok(())
}

/// Fill `buf` as far as the stream allows, returning the number of bytes read
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

fn truncated(offset: u64, reason: String) -> Error {
    Error::TruncatedChunk { offset, reason }
}

fn eof_as_truncated(err: std::io::Error, offset: u64, reason: &str) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        truncated(offset, reason.to_string())
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{chunk_bytes, minimal_png, IHDR_1X1_RGB};
    use std::io::Cursor;

    #[test]
    fn test_png_minimal_parse() {
        let data = minimal_png();
        let chunks = read_chunks(&mut Cursor::new(&data), &LoadOptions::default()).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_type(), ChunkType::IHDR);
        assert_eq!(chunks[0].data(), &IHDR_1X1_RGB);
        assert_eq!(chunks[0].crc(), 0x907753DE);
        assert_eq!(chunks[1].chunk_type(), ChunkType::IEND);
        assert_eq!(chunks[1].length(), 0);
    }

    #[test]
    fn test_png_invalid_signature() {
        let data = vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let result = read_chunks(&mut Cursor::new(data), &LoadOptions::default());
        assert!(matches!(result, Err(Error::BadSignature)));

        let short = b"\x89PNG".to_vec();
        let result = read_chunks(&mut Cursor::new(short), &LoadOptions::default());
        assert!(matches!(result, Err(Error::BadSignature)));
    }

    #[test]
    fn test_signature_only_is_empty() {
        let chunks =
            read_chunks(&mut Cursor::new(PNG_SIGNATURE.to_vec()), &LoadOptions::default())
                .unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_stored_crc_is_preserved() {
        // Deliberately wrong CRC must survive the round trip
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&[0, 0, 0, 3]);
        data.extend_from_slice(b"abCd");
        data.extend_from_slice(b"xyz");
        data.extend_from_slice(&0xDEADBEEF_u32.to_be_bytes());

        let chunks = read_chunks(&mut Cursor::new(&data), &LoadOptions::default()).unwrap();
        assert_eq!(chunks[0].crc(), 0xDEADBEEF);
        assert!(!chunks[0].has_valid_crc());

        let mut out = Vec::new();
        write_chunks(&mut out, &chunks).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_truncated_data_fails_by_default() {
        let mut data = minimal_png();
        // Chunk claiming 100 bytes with only 3 present
        data.extend_from_slice(&100u32.to_be_bytes());
        data.extend_from_slice(b"tEXt");
        data.extend_from_slice(b"abc");

        let result = read_chunks(&mut Cursor::new(&data), &LoadOptions::default());
        match result {
            Err(Error::TruncatedChunk { offset, .. }) => {
                assert_eq!(offset, (8 + 25 + 12) as u64)
            }
            other => panic!("expected TruncatedChunk, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_keep_parsed() {
        let mut data = minimal_png();
        data.extend_from_slice(&[0, 0]); // partial length field

        let options = LoadOptions::tolerant();
        let chunks = read_chunks(&mut Cursor::new(&data), &options).unwrap();
        assert_eq!(chunks.len(), 2);

        let strict = read_chunks(&mut Cursor::new(&data), &LoadOptions::default());
        assert!(matches!(strict, Err(Error::TruncatedChunk { .. })));
    }

    #[test]
    fn test_missing_crc_is_truncation() {
        let mut data = PNG_SIGNATURE.to_vec();
        let full = chunk_bytes(b"IEND", &[]);
        data.extend_from_slice(&full[..10]);

        let result = read_chunks(&mut Cursor::new(&data), &LoadOptions::default());
        assert!(matches!(result, Err(Error::TruncatedChunk { .. })));
    }

    #[test]
    fn test_chunk_too_large() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&0x8000_0000_u32.to_be_bytes());
        data.extend_from_slice(b"IDAT");

        let result = read_chunks(&mut Cursor::new(&data), &LoadOptions::tolerant());
        assert!(matches!(
            result,
            Err(Error::ChunkTooLarge {
                offset: 8,
                length: 0x8000_0000
            })
        ));
    }

    #[test]
    fn test_chunks_after_iend_are_kept() {
        let mut data = minimal_png();
        data.extend_from_slice(&chunk_bytes(b"teSt", b"after"));

        let chunks = read_chunks(&mut Cursor::new(&data), &LoadOptions::default()).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].data(), b"after");
    }

    #[test]
    fn test_write_chunk_layout() {
        let chunk = Chunk::new(ChunkType::TEXT, b"hello".to_vec());
        let mut output = Vec::new();
        write_chunk(&mut output, &chunk).unwrap();

        assert_eq!(output.len(), 17);
        assert_eq!(&output[0..4], &[0, 0, 0, 5]);
        assert_eq!(&output[4..8], b"tEXt");
        assert_eq!(&output[8..13], b"hello");
        assert_eq!(&output[13..17], &chunk.crc().to_be_bytes());
    }
}
