//! Stream adapter yielding each chunk's whole payload.
//!
//! For consumers that do not need the pull-by-pull protocol, [`split_stream`]
//! turns an async reader into a `futures_core::Stream` with one item per
//! chunk. Every item except possibly the last is exactly `chunk_size` bytes;
//! an empty source yields exactly one empty item.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::config::SplitConfig;
use crate::error::SplitError;

pin_project! {
    /// A stream that yields fixed-size chunk payloads from an async reader.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic.
    /// Works with tokio (via `tokio_util::compat`), async-std, smol, or any
    /// futures-compatible runtime.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use futures_util::StreamExt;
    /// use splitrs::{split_stream, SplitConfig};
    ///
    /// async fn demo<R: futures_io::AsyncRead>(reader: R) -> Result<(), splitrs::SplitError> {
    ///     let mut stream = split_stream(reader, SplitConfig::new(17 * 1024)?);
    ///     while let Some(payload) = stream.next().await {
    ///         println!("chunk: {} bytes", payload?.len());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub struct SplitStream<R> {
        #[pin]
        reader: R,
        config: SplitConfig,
        read_buf: Vec<u8>,
        chunk_buf: Vec<u8>,
        emitted: u64,
        validated: bool,
        finished: bool,
    }
}

impl<R: AsyncRead> Stream for SplitStream<R> {
    type Item = Result<Bytes, SplitError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        if !*this.validated {
            *this.validated = true;
            if let Err(e) = this.config.validate() {
                *this.finished = true;
                return Poll::Ready(Some(Err(e)));
            }
        }

        let chunk_size = this.config.chunk_size();

        loop {
            // A full chunk is already buffered.
            if this.chunk_buf.len() >= chunk_size {
                let payload = Bytes::copy_from_slice(&this.chunk_buf[..chunk_size]);
                this.chunk_buf.copy_within(chunk_size.., 0);
                this.chunk_buf.truncate(this.chunk_buf.len() - chunk_size);
                *this.emitted += 1;
                return Poll::Ready(Some(Ok(payload)));
            }

            match this.reader.as_mut().poll_read(cx, &mut this.read_buf[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(SplitError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    // End of stream. The tail becomes the last chunk; a source
                    // that never produced a byte still yields one empty chunk.
                    *this.finished = true;
                    if !this.chunk_buf.is_empty() || *this.emitted == 0 {
                        let payload = Bytes::copy_from_slice(&this.chunk_buf[..]);
                        this.chunk_buf.clear();
                        *this.emitted += 1;
                        return Poll::Ready(Some(Ok(payload)));
                    }
                    return Poll::Ready(None);
                }
                Poll::Ready(Ok(n)) => {
                    this.chunk_buf.extend_from_slice(&this.read_buf[..n]);
                }
            }
        }
    }
}

/// Creates a stream of fixed-size chunk payloads from an async reader.
///
/// One item per chunk: every payload except possibly the last is exactly
/// `chunk_size` bytes, so a source of length `L` yields
/// `max(1, L.div_ceil(chunk_size))` items. Configuration problems surface as
/// the first (and only) item.
///
/// For tokio readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use splitrs::{split_stream, SplitConfig};
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let stream = split_stream(file.compat(), SplitConfig::new(17 * 1024)?);
/// ```
pub fn split_stream<R: AsyncRead>(reader: R, config: SplitConfig) -> SplitStream<R> {
    SplitStream {
        reader,
        read_buf: vec![0u8; config.read_size()],
        chunk_buf: Vec::with_capacity(config.chunk_size()),
        config,
        emitted: 0,
        validated: false,
        finished: false,
    }
}
