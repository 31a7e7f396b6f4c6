//! Async session driver - AsyncSplit and AsyncChunk.
//!
//! The same boundary state machine as the sync [`crate::Split`], with the
//! pull as the single suspension point: a pull waits until the source reports
//! data or end-of-data, and the mutable borrow held by the active chunk
//! guarantees at most one outstanding pull per session.

use std::future::poll_fn;
use std::pin::Pin;

use bytes::Bytes;
use futures_io::AsyncRead;

use crate::config::SplitConfig;
use crate::error::SplitError;

/// Creates an async splitting session over an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. Tokio readers
/// work through `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use splitrs::{split_async, SplitConfig};
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let mut split = split_async(file.compat(), SplitConfig::new(17 * 1024)?);
/// ```
///
/// # Example
///
/// ```ignore
/// use futures_io::AsyncRead;
/// use splitrs::{split_async, SplitConfig};
///
/// async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), splitrs::SplitError> {
///     let mut split = split_async(reader, SplitConfig::new(1024)?);
///     while let Some(mut chunk) = split.next_chunk().await? {
///         while let Some(slice) = chunk.pull().await? {
///             println!("chunk {} slice {} bytes", chunk.index(), slice.len());
///         }
///     }
///     Ok(())
/// }
/// ```
pub fn split_async<R: AsyncRead + Unpin>(reader: R, config: SplitConfig) -> AsyncSplit<R> {
    AsyncSplit {
        reader,
        config,
        remainder: None,
        exhausted: false,
        awaiting_drain: false,
        next_index: 0,
    }
}

/// A running async splitting session.
///
/// The async counterpart of [`crate::Split`]: owns the source and the
/// sequencing state carried between chunks, and hands out [`AsyncChunk`]s one
/// at a time.
pub struct AsyncSplit<R> {
    reader: R,
    config: SplitConfig,
    remainder: Option<Bytes>,
    exhausted: bool,
    awaiting_drain: bool,
    next_index: u64,
}

impl<R: AsyncRead + Unpin> AsyncSplit<R> {
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
    /// Same contract as [`crate::Split::next_chunk`]: fails with
    /// [`SplitError::PrematureAdvance`] if the previous chunk was abandoned
    /// before end-of-data, ends once a chunk finished with the source
    /// exhausted and no remainder left.
    pub async fn next_chunk(&mut self) -> Result<Option<AsyncChunk<'_, R>>, SplitError> {
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
        Ok(Some(AsyncChunk {
            split: self,
            index,
            delivered: 0,
            finished: false,
        }))
    }
}

/// A bounded async sub-reader delivering at most `chunk_size` bytes.
///
/// Produced by [`AsyncSplit::next_chunk`]; borrows the session mutably while
/// alive. [`AsyncChunk::pull`] suspends while the source has no data ready
/// and resumes when it reports data or end-of-data.
pub struct AsyncChunk<'a, R> {
    split: &'a mut AsyncSplit<R>,
    index: u64,
    delivered: usize,
    finished: bool,
}

impl<R> AsyncChunk<'_, R> {
    /// Returns this chunk's 0-based position in the split sequence.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the number of bytes this chunk has emitted so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Returns the byte budget shared by every chunk of this session.
    pub fn chunk_size(&self) -> usize {
        self.split.config.chunk_size()
    }

    /// Returns true once this chunk has signaled end-of-data.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.finished = true;
        self.split.awaiting_drain = false;
    }

    fn absorb(&mut self, mut slice: Bytes) -> Bytes {
        let budget = self.split.config.chunk_size() - self.delivered;
        if slice.len() >= budget {
            let tail = slice.split_off(budget);
            if !tail.is_empty() {
                self.split.remainder = Some(tail);
            }
            self.delivered += slice.len();
            self.finish();
        } else {
            self.delivered += slice.len();
        }
        slice
    }
}

impl<R: AsyncRead + Unpin> AsyncChunk<'_, R> {
    /// Pulls the next slice of this chunk, or `Ok(None)` at end-of-data.
    ///
    /// Suspends while the source has no data ready. `Ok(None)` is terminal;
    /// the source is never touched again once the chunk finished.
    pub async fn pull(&mut self) -> Result<Option<Bytes>, SplitError> {
        if self.finished {
            return Ok(None);
        }

        let slice = match self.split.remainder.take() {
            Some(remainder) => remainder,
            None => {
                if self.split.exhausted {
                    self.finish();
                    return Ok(None);
                }
                match read_slice(&mut self.split.reader, self.split.config.read_size()).await? {
                    Some(slice) => slice,
                    None => {
                        self.split.exhausted = true;
                        self.finish();
                        return Ok(None);
                    }
                }
            }
        };

        Ok(Some(self.absorb(slice)))
    }

    /// Pulls this chunk to end-of-data, discarding the bytes.
    ///
    /// Returns the number of bytes discarded.
    pub async fn drain(&mut self) -> Result<u64, SplitError> {
        let mut total = 0u64;
        while let Some(slice) = self.pull().await? {
            total += slice.len() as u64;
        }
        Ok(total)
    }
}

/// Reads one slice from the async source, suspending until data or
/// end-of-data. `Interrupted` is retried in place.
async fn read_slice<R: AsyncRead + Unpin>(
    reader: &mut R,
    read_size: usize,
) -> Result<Option<Bytes>, SplitError> {
    let mut buf = vec![0u8; read_size];
    loop {
        let result = poll_fn(|cx| Pin::new(&mut *reader).poll_read(cx, &mut buf)).await;
        match result {
            Ok(0) => return Ok(None),
            Ok(n) => {
                buf.truncate(n);
                return Ok(Some(Bytes::from(buf)));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
