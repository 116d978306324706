//! Chunk-level PNG reading and writing for text metadata.
//!
//! This crate parses a PNG file into its raw chunks, lets you read and write
//! key/value text stored in `tEXt` (Latin-1) and `iTXt` (UTF-8) chunks, and
//! writes the chunk list back out. Pixel data is never decoded.
//!
//! # Design Principles
//!
//! - **Passthrough**: chunks you don't touch are written back byte for byte,
//!   including their stored CRC
//! - **Explicit errors**: "not found", malformed chunks and I/O failures are
//!   distinct outcomes
//! - **Atomic edits**: a setter replaces at most one chunk and leaves the list
//!   unchanged if the new value cannot be encoded
//!
//! # Quick Start
//!
//! ```no_run
//! use png_text::PngText;
//!
//! # fn main() -> png_text::Result<()> {
//! let mut png = PngText::open("image.png")?;
//!
//! // Read metadata (keywords match case-insensitively)
//! if let Some(comment) = png.get_text("comment") {
//!     println!("Comment: {}", comment);
//! }
//!
//! // Modify and write
//! png.set_text("Author", "Jane")?;
//! png.set_international_text("Title", "\u{65e5}\u{672c}\u{8a9e}")?;
//! png.write_to("output.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Streams
//!
//! Any `Read`/`Write` works, including in-memory buffers:
//!
//! ```no_run
//! use png_text::PngText;
//! use std::io::Cursor;
//!
//! # fn main() -> png_text::Result<()> {
//! # let bytes: Vec<u8> = Vec::new();
//! let mut png = PngText::from_reader(Cursor::new(bytes))?;
//! png.set_text("Software", "png-text")?;
//!
//! let mut output = Vec::new();
//! png.save(&mut output)?;
//! # Ok(())
//! # }
//! ```

mod bytes;
pub mod chunk;
mod error;
mod image;
mod options;
pub mod stream;
pub mod text;

pub use chunk::{detect, Chunk, ChunkType, MAX_CHUNK_LENGTH, PNG_SIGNATURE};
pub use error::{Error, Result};
pub use image::PngText;
pub use options::{LoadOptions, Truncation};
pub use text::{TextEntry, TextKind, MAX_KEYWORD_LEN};

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
