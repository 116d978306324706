//! Load options

/// What to do when the stream ends inside a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Truncation {
    /// Fail the whole load with [`Error::TruncatedChunk`](crate::Error::TruncatedChunk) (default)
    #[default]
    Error,
    /// Stop reading and keep the chunks parsed so far
    KeepParsed,
}

/// Options controlling how a PNG stream is loaded
///
/// # Example
///
/// ```no_run
/// use png_text::{LoadOptions, PngText, Truncation};
///
/// # fn main() -> png_text::Result<()> {
/// let options = LoadOptions::new().truncation(Truncation::KeepParsed);
/// let png = PngText::open_with("damaged.png", &options)?;
/// println!("{} chunks recovered", png.chunks().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub(crate) truncation: Truncation,
}

impl LoadOptions {
    /// Create options with default behavior (truncated streams are an error)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the truncation policy
    pub fn truncation(mut self, policy: Truncation) -> Self {
        self.truncation = policy;
        self
    }

    /// Shorthand for `truncation(Truncation::KeepParsed)`
    pub fn tolerant() -> Self {
        Self::new().truncation(Truncation::KeepParsed)
    }

    pub fn truncation_policy(&self) -> Truncation {
        self.truncation
    }
}
