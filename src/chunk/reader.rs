//! The Chunk type - a bounded sub-reader over the shared source.

use std::io::Read;

use bytes::{Buf, Bytes};

use crate::error::SplitError;
use crate::splitter::Split;

/// A bounded sub-reader delivering at most `chunk_size` bytes.
///
/// A `Chunk` is produced by [`Split::next_chunk`] and borrows the session
/// mutably for as long as it is alive, so only one chunk can pull from the
/// source at a time. It is primed with any remainder bytes the previous chunk
/// read past its own boundary, pulls further bytes from the source on demand,
/// and stops exactly at its byte budget. Bytes read past the budget are handed
/// back to the session as the next chunk's remainder, never emitted here.
///
/// Consume it either slice-by-slice via [`Chunk::pull`] or through the
/// [`std::io::Read`] impl. Once the budget is reached or the source is
/// exhausted, the chunk is finished: `pull` returns `Ok(None)`, `read`
/// returns `Ok(0)`, and the source is never touched again.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use splitrs::{SplitConfig, Splitter};
///
/// let splitter = Splitter::new(SplitConfig::new(4)?);
/// let mut split = splitter.split(Cursor::new(b"hello world".to_vec()));
///
/// let mut chunk = split.next_chunk()?.unwrap();
/// let mut payload = Vec::new();
/// while let Some(slice) = chunk.pull()? {
///     payload.extend_from_slice(&slice);
/// }
/// assert_eq!(&payload, b"hell");
/// # Ok::<(), splitrs::SplitError>(())
/// ```
pub struct Chunk<'a, R> {
    split: &'a mut Split<R>,
    index: u64,
    delivered: usize,
    finished: bool,
    /// Slice pulled but not yet handed out through the `Read` impl.
    stash: Bytes,
}

impl<'a, R> Chunk<'a, R> {
    pub(crate) fn new(split: &'a mut Split<R>, index: u64) -> Self {
        Self {
            split,
            index,
            delivered: 0,
            finished: false,
            stash: Bytes::new(),
        }
    }

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

    /// Marks the chunk finished and releases the session for the next one.
    fn finish(&mut self) {
        self.finished = true;
        self.split.awaiting_drain = false;
    }

    /// Absorbs an input slice: emits up to the remaining budget, hands any
    /// overage back to the session as the next chunk's remainder.
    fn absorb(&mut self, mut slice: Bytes) -> Bytes {
        let budget = self.split.config.chunk_size() - self.delivered;
        if slice.len() >= budget {
            // Ownership of the tail moves to the session, not a copy.
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

impl<R: Read> Chunk<'_, R> {
    /// Pulls the next slice of this chunk, or `Ok(None)` at end-of-data.
    ///
    /// The first pull consumes the remainder primed from the previous chunk,
    /// if any; later pulls request up to `read_size` bytes from the source.
    /// A slice that would cross the chunk boundary is split there: the head is
    /// returned, the tail is carried to the next chunk. `Ok(None)` is
    /// terminal.
    ///
    /// I/O errors propagate without mutating chunk state, so a pull that
    /// failed with e.g. [`std::io::ErrorKind::WouldBlock`] on a non-blocking
    /// source may simply be retried. `Interrupted` reads are retried in
    /// place.
    pub fn pull(&mut self) -> Result<Option<Bytes>, SplitError> {
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
                match read_slice(&mut self.split.reader, self.split.config.read_size())? {
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
    /// Returns the number of bytes discarded. A consumer that wants to skip
    /// ahead must drain explicitly; abandoning an undrained chunk instead
    /// makes every later [`Split::next_chunk`] fail with
    /// [`SplitError::PrematureAdvance`].
    pub fn drain(&mut self) -> Result<u64, SplitError> {
        let mut total = self.stash.len() as u64;
        self.stash = Bytes::new();
        while let Some(slice) = self.pull()? {
            total += slice.len() as u64;
        }
        Ok(total)
    }
}

impl<R: Read> Read for Chunk<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.stash.is_empty() {
            match self.pull() {
                Ok(Some(slice)) => self.stash = slice,
                Ok(None) => return Ok(0),
                Err(SplitError::Io(e)) => return Err(e),
                Err(e) => return Err(std::io::Error::other(e)),
            }
        }
        let n = self.stash.len().min(buf.len());
        buf[..n].copy_from_slice(&self.stash[..n]);
        self.stash.advance(n);
        Ok(n)
    }
}

/// Reads one slice from the source.
///
/// Returns `Ok(None)` at end-of-data. `Interrupted` is retried; any other
/// error propagates untouched.
fn read_slice<R: Read>(reader: &mut R, read_size: usize) -> Result<Option<Bytes>, SplitError> {
    let mut buf = vec![0u8; read_size];
    loop {
        match reader.read(&mut buf) {
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
