//! In-memory PNG chunk list with text metadata access
//!
//! This module provides [`PngText`], which owns the parsed chunk sequence of one
//! PNG file and offers key/value access to its `tEXt` and `iTXt` chunks.

use crate::{
    bytes::{find_nul, keys_match, latin1_decode},
    chunk::Chunk,
    error::{Error, Result},
    options::LoadOptions,
    stream::{read_chunks, write_chunks},
    text::{TextEntry, TextKind},
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A parsed PNG file, held as an ordered list of raw chunks
///
/// Chunks that are not touched by a setter are written back exactly as read.
/// Mutation needs `&mut self`; share an instance across threads only behind
/// external synchronization such as a `Mutex`.
///
/// # Example
///
/// ```no_run
/// use png_text::PngText;
///
/// # fn main() -> png_text::Result<()> {
/// let mut png = PngText::open("image.png")?;
///
/// if let Some(author) = png.get_text("Author") {
///     println!("Author: {}", author);
/// }
///
/// png.set_text("Author", "Jane")?;
/// png.set_international_text("Title", "\u{65e5}\u{672c}\u{8a9e}")?;
/// png.write_to("output.png")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PngText {
    chunks: Vec<Chunk>,
}

impl PngText {
    /// Load a PNG from a reader with default options
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Self::from_reader_with(source, &LoadOptions::default())
    }

    /// Load a PNG from a reader with the given options
    pub fn from_reader_with<R: Read>(mut source: R, options: &LoadOptions) -> Result<Self> {
        let chunks = read_chunks(&mut source, options)?;
        Ok(Self { chunks })
    }

    /// Load a PNG from an in-memory buffer
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(data)
    }

    /// Wrap an existing chunk sequence
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Open a PNG file from a path
    ///
    /// The file is closed before this returns, whether or not parsing succeeds.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &LoadOptions::default())
    }

    /// Open a PNG file from a path with the given options
    pub fn open_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader_with(BufReader::new(file), options)
    }

    /// Write the signature and all chunks to a writer
    pub fn save<W: Write>(&self, mut writer: W) -> Result<()> {
        write_chunks(&mut writer, &self.chunks)
    }

    /// Write to a new file (created or truncated)
    ///
    /// On error the destination may be left partially written.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.save(BufWriter::new(file))
    }

    /// Serialize into a byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.save(&mut out)?;
        Ok(out)
    }

    /// The chunk sequence in file order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    /// Get the value of the first `tEXt` chunk whose keyword matches, ignoring case
    pub fn get_text(&self, key: &str) -> Option<String> {
        // find() only matches chunks with a separator, and Latin-1 decoding is total
        let data = self.chunks[self.find(TextKind::Latin1, key)?].data();
        let sep = find_nul(data)?;
        Some(latin1_decode(&data[sep + 1..]))
    }

    /// Replace the first matching `tEXt` chunk, or add one before the trailer
    pub fn set_text(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(TextKind::Latin1, key, value)
    }

    /// Get the value of the first `iTXt` chunk whose keyword matches, ignoring case
    ///
    /// Returns [`Error::Encoding`] if the matching chunk's text is not valid UTF-8.
    pub fn get_international_text(&self, key: &str) -> Result<Option<String>> {
        self.get(TextKind::International, key)
    }

    /// Replace the first matching `iTXt` chunk, or add one before the trailer
    pub fn set_international_text(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(TextKind::International, key, value)
    }

    /// Remove the first matching `tEXt` chunk; returns whether one was removed
    pub fn remove_text(&mut self, key: &str) -> bool {
        self.remove(TextKind::Latin1, key)
    }

    /// Remove the first matching `iTXt` chunk; returns whether one was removed
    pub fn remove_international_text(&mut self, key: &str) -> bool {
        self.remove(TextKind::International, key)
    }

    /// All `tEXt` and `iTXt` entries in file order
    ///
    /// Chunks without a keyword separator are skipped; invalid UTF-8 is an error.
    pub fn text_entries(&self) -> Result<Vec<TextEntry>> {
        let mut entries = Vec::new();
        for chunk in &self.chunks {
            let kind = [TextKind::Latin1, TextKind::International]
                .into_iter()
                .find(|k| chunk.is_type(k.chunk_type()));
            let Some(kind) = kind else {
                continue;
            };
            match kind.decode(chunk) {
                Ok(entry) => entries.push(entry),
                Err(Error::MissingSeparator { chunk_type }) => {
                    log::debug!("Skipping {} chunk with no keyword separator", chunk_type);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(entries)
    }

    /// Insert a chunk immediately before the final chunk (conventionally IEND)
    ///
    /// With fewer than two chunks there is no trailer to protect, so the chunk
    /// is appended.
    pub fn insert_before_trailer(&mut self, chunk: Chunk) {
        if self.chunks.len() < 2 {
            self.chunks.push(chunk);
        } else {
            let index = self.chunks.len() - 1;
            self.chunks.insert(index, chunk);
        }
    }

    fn get(&self, kind: TextKind, key: &str) -> Result<Option<String>> {
        match self.find(kind, key) {
            Some(index) => Ok(Some(kind.decode(&self.chunks[index])?.text)),
            None => Ok(None),
        }
    }

    fn set(&mut self, kind: TextKind, key: &str, value: &str) -> Result<()> {
        // Encode first so a rejected value leaves the chunk list untouched
        let chunk = kind.encode(key, value)?;

        if let Some(index) = self.find(kind, key) {
            log::debug!("Replacing {} chunk {:?} at index {}", kind.chunk_type(), key, index);
            self.chunks.remove(index);
        } else {
            log::debug!("Adding {} chunk {:?}", kind.chunk_type(), key);
        }

        self.insert_before_trailer(chunk);
        Ok(())
    }

    fn remove(&mut self, kind: TextKind, key: &str) -> bool {
        match self.find(kind, key) {
            Some(index) => {
                self.chunks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Index of the first chunk of `kind` whose keyword matches
    ///
    /// Only the keyword is compared, so a chunk whose text fails to decode can
    /// still be found and replaced, and never hides a later match.
    fn find(&self, kind: TextKind, key: &str) -> Option<usize> {
        self.chunks.iter().position(|chunk| {
            if !chunk.is_type(kind.chunk_type()) {
                return false;
            }
            match find_nul(chunk.data()) {
                Some(sep) => keys_match(&latin1_decode(&chunk.data()[..sep]), key),
                None => {
                    log::debug!(
                        "Skipping {} chunk with no keyword separator",
                        chunk.chunk_type()
                    );
                    false
                }
            }
        })
    }
}
