//! Error types for png-text

use crate::chunk::ChunkType;
use std::io;

/// Result type for png-text operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, editing or writing PNG text chunks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream does not start with the PNG signature
    #[error("Not a PNG file: bad signature")]
    BadSignature,

    /// The stream ended inside a chunk
    #[error("Truncated chunk at offset {offset}: {reason}")]
    TruncatedChunk { offset: u64, reason: String },

    /// Declared chunk length exceeds the PNG maximum of 2^31-1
    #[error("Chunk length too large at offset {offset}: {length}")]
    ChunkTooLarge { offset: u64, length: u32 },

    /// Chunk data exceeds the PNG maximum of 2^31-1 bytes
    #[error("Data too large: {size} bytes (max: {max})")]
    DataTooLarge { size: usize, max: usize },

    /// A text chunk has no null separator after its keyword
    #[error("{chunk_type} chunk has no keyword separator")]
    MissingSeparator { chunk_type: ChunkType },

    /// Text cannot be encoded or decoded in the chunk's character set
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Keyword is empty or longer than 79 bytes
    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),
}
