//! Splitting session driver - Splitter and Split.
//!
//! This module implements the sequencing half of the splitter: producing
//! chunks one at a time, carrying the remainder between them, and enforcing
//! the single-active-chunk discipline. It provides two types:
//!
//! - [`Splitter`] - Configures and starts splitting sessions
//! - [`Split`] - A running session over a [`std::io::Read`] source
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use splitrs::{SplitConfig, Splitter};
//!
//! let splitter = Splitter::new(SplitConfig::new(4)?);
//! let mut split = splitter.split(Cursor::new(b"hello world".to_vec()));
//!
//! while let Some(mut chunk) = split.next_chunk()? {
//!     let mut payload = Vec::new();
//!     while let Some(slice) = chunk.pull()? {
//!         payload.extend_from_slice(&slice);
//!     }
//!     println!("chunk {}: {} bytes", chunk.index(), payload.len());
//! }
//! # Ok::<(), splitrs::SplitError>(())
//! ```

use std::io::Read;

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::config::SplitConfig;
use crate::error::SplitError;

/// Starts splitting sessions from a configuration.
///
/// `Splitter` is the high-level entry point. It holds a [`SplitConfig`] and
/// turns a byte source into a sequence of fixed-size chunks, either lazily
/// over a reader ([`Splitter::split`]) or eagerly over an in-memory buffer
/// ([`Splitter::split_bytes`]).
///
/// # Example
///
/// ```
/// use splitrs::{SplitConfig, Splitter};
///
/// let splitter = Splitter::new(SplitConfig::new(4)?);
/// let chunks = splitter.split_bytes(&b"hello world"[..]);
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(&chunks[0][..], b"hell");
/// # Ok::<(), splitrs::SplitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    /// Creates a new splitter with the given configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::{SplitConfig, Splitter};
    ///
    /// let splitter = Splitter::new(SplitConfig::new(1024)?);
    /// # Ok::<(), splitrs::SplitError>(())
    /// ```
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this splitter was built with.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Starts a splitting session over a reader.
    ///
    /// The session produces [`Chunk`]s one at a time via
    /// [`Split::next_chunk`]; each chunk must be drained to end-of-data
    /// before the next one is produced.
    pub fn split<R: Read>(self, reader: R) -> Split<R> {
        Split::new(reader, self.config)
    }

    /// Splits an in-memory buffer into fixed-size chunks.
    ///
    /// Chunks are zero-copy [`Bytes`] slices of the input. Every chunk except
    /// possibly the last is exactly `chunk_size` bytes; an empty input yields
    /// exactly one empty chunk, so the result always has
    /// `max(1, data.len().div_ceil(chunk_size))` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::{SplitConfig, Splitter};
    ///
    /// let splitter = Splitter::new(SplitConfig::new(10)?);
    /// let chunks = splitter.split_bytes(&b"abc"[..]);
    /// assert_eq!(chunks.len(), 1);
    /// assert_eq!(&chunks[0][..], b"abc");
    /// # Ok::<(), splitrs::SplitError>(())
    /// ```
    pub fn split_bytes(&self, data: impl Into<Bytes>) -> Vec<Bytes> {
        let data: Bytes = data.into();
        let chunk_size = self.config.chunk_size();

        if data.is_empty() {
            return vec![Bytes::new()];
        }

        let mut chunks = Vec::with_capacity(data.len().div_ceil(chunk_size));
        let mut start = 0;
        while start < data.len() {
            let end = (start + chunk_size).min(data.len());
            chunks.push(data.slice(start..end));
            start = end;
        }
        chunks
    }
}

/// A running splitting session over a reader.
///
/// `Split` owns the source and the sequencing state carried between chunks:
/// the remainder (bytes the previous chunk read past its boundary) and the
/// exhaustion flag. Each [`Split::next_chunk`] call hands out a [`Chunk`]
/// that borrows the session mutably, so at most one chunk can read from the
/// source at a time; a chunk that was dropped without reaching end-of-data
/// poisons the session with [`SplitError::PrematureAdvance`].
pub struct Split<R> {
    pub(crate) reader: R,
    pub(crate) config: SplitConfig,
    /// Bytes the previous chunk read past its budget, owed to the next one.
    pub(crate) remainder: Option<Bytes>,
    /// The source reported end-of-data during some chunk's pull.
    pub(crate) exhausted: bool,
    /// Set while a produced chunk has not yet signaled end-of-data.
    pub(crate) awaiting_drain: bool,
    next_index: u64,
}

impl<R> Split<R> {
    fn new(reader: R, config: SplitConfig) -> Self {
        Self {
            reader,
            config,
            remainder: None,
            exhausted: false,
            awaiting_drain: false,
            next_index: 0,
        }
    }

    /// Returns the configuration of this session.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Returns the number of chunks produced so far.
    pub fn chunks_produced(&self) -> u64 {
        self.next_index
    }

    /// Returns true once the source has reported end-of-data.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Consumes the session and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Produces the next chunk, or `Ok(None)` when the sequence is complete.
    ///
    /// The new chunk is primed with the remainder the previous chunk read
    /// past its boundary, if any. The sequence is complete once a chunk
    /// finished with the source exhausted and no remainder left; an empty
    /// source still produces exactly one (empty) chunk.
    ///
    /// # Errors
    ///
    /// - [`SplitError::PrematureAdvance`] if the previous chunk has not
    ///   signaled end-of-data. The session stays in this state - skipping
    ///   bytes silently is never an option, so an abandoned chunk is fatal.
    /// - [`SplitError::InvalidConfig`] / [`SplitError::InvalidChunkSize`] if
    ///   the configuration is invalid (checked once, before the first chunk).
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'_, R>>, SplitError> {
        if self.next_index == 0 {
            self.config.validate()?;
        }

        if self.awaiting_drain {
            return Err(SplitError::PrematureAdvance {
                index: self.next_index - 1,
            });
        }

        if self.exhausted && self.remainder.is_none() {
            return Ok(None);
        }

        let index = self.next_index;
        self.next_index += 1;
        self.awaiting_drain = true;
        Ok(Some(Chunk::new(self, index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SplitError;
    use std::io::Cursor;

    fn splitter(chunk_size: usize) -> Splitter {
        Splitter::new(SplitConfig::new(chunk_size).unwrap())
    }

    #[test]
    fn test_split_bytes_empty() {
        let chunks = splitter(4).split_bytes(&b""[..]);
        assert_eq!(chunks.len(), 1, "empty input yields one empty chunk");
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn test_split_bytes_exact_multiple() {
        let chunks = splitter(4).split_bytes(&b"abcdefgh"[..]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[0][..], b"abcd");
        assert_eq!(&chunks[1][..], b"efgh");
    }

    #[test]
    fn test_split_bytes_tail() {
        let chunks = splitter(4).split_bytes(&b"abcdefghij"[..]);
        assert_eq!(chunks.len(), 3);
        assert_eq!(&chunks[2][..], b"ij");
    }

    #[test]
    fn test_split_bytes_zero_copy() {
        let original = Bytes::from_static(b"hello world, zero copy test data");
        let chunks = splitter(8).split_bytes(original.clone());

        for chunk in &chunks {
            assert!(
                chunk.as_ptr() >= original.as_ptr()
                    && (chunk.as_ptr() as usize + chunk.len())
                        <= (original.as_ptr() as usize + original.len()),
                "chunk must be a slice of the original Bytes"
            );
        }
    }

    #[test]
    fn test_premature_advance() {
        let mut split = splitter(2).split(Cursor::new(b"abcdef".to_vec()));

        let chunk = split.next_chunk().unwrap().unwrap();
        drop(chunk); // abandoned before end-of-data

        assert!(matches!(
            split.next_chunk(),
            Err(SplitError::PrematureAdvance { index: 0 })
        ));
        // The session stays poisoned.
        assert!(matches!(
            split.next_chunk(),
            Err(SplitError::PrematureAdvance { index: 0 })
        ));
    }

    #[test]
    fn test_advance_after_drain() {
        let mut split = splitter(2).split(Cursor::new(b"abcdef".to_vec()));

        let mut chunk = split.next_chunk().unwrap().unwrap();
        chunk.drain().unwrap();
        drop(chunk);

        let chunk = split.next_chunk().unwrap().unwrap();
        assert_eq!(chunk.index(), 1);
    }

    #[test]
    fn test_sequence_ends_after_exhaustion() {
        let mut split = splitter(10).split(Cursor::new(b"abc".to_vec()));

        let mut chunk = split.next_chunk().unwrap().unwrap();
        assert_eq!(chunk.drain().unwrap(), 3);
        drop(chunk);

        assert!(split.next_chunk().unwrap().is_none());
        assert!(split.next_chunk().unwrap().is_none(), "stays ended");
        assert_eq!(split.chunks_produced(), 1);
        assert!(split.is_exhausted());
    }

    #[test]
    fn test_invalid_read_size_surfaces_at_session_start() {
        let config = SplitConfig::new(4).unwrap().with_read_size(0);
        let mut split = Splitter::new(config).split(Cursor::new(b"abc".to_vec()));
        assert!(matches!(
            split.next_chunk(),
            Err(SplitError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_chunk_indices_are_sequential() {
        let mut split = splitter(1).split(Cursor::new(b"abc".to_vec()));
        let mut seen = Vec::new();
        while let Some(mut chunk) = split.next_chunk().unwrap() {
            chunk.drain().unwrap();
            seen.push(chunk.index());
        }
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_into_inner_returns_reader() {
        let mut split = splitter(10).split(Cursor::new(b"abc".to_vec()));
        split.next_chunk().unwrap().unwrap().drain().unwrap();
        let cursor = split.into_inner();
        assert_eq!(cursor.position(), 3);
    }
}
