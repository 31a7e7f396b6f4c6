//! splitrs
//!
//! Fixed-size stream splitting for Rust.
//!
//! `splitrs` splits one ordered byte stream of unknown length into a sequence
//! of bounded sub-readers ("chunks"), each carrying at most `chunk_size`
//! bytes, delivered one at a time. It is designed as a small, composable
//! primitive for:
//!
//! - uploading a stream in bounded parts
//! - bounded staging of unbounded input
//! - framing a pipe into fixed-size records
//!
//! The crate intentionally:
//! - does NOT manage files or paths
//! - does NOT manage concurrency
//! - does NOT transform or compress bytes
//! - does NOT buffer more than one read ahead
//!
//! It only does one thing: **Read bytes → hand out bounded chunks**
//!
//! Each chunk must be drained to end-of-data before the next one is produced;
//! bytes read past a chunk's boundary carry over to the next chunk, so every
//! source byte lands in exactly one chunk, exactly once, in order.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use splitrs::{SplitConfig, SplitError, Splitter};
//!
//! fn main() -> Result<(), SplitError> {
//!     let file = File::open("data.bin")?;
//!     let splitter = Splitter::new(SplitConfig::new(17 * 1024)?);
//!     let mut split = splitter.split(file);
//!
//!     while let Some(mut chunk) = split.next_chunk()? {
//!         while let Some(slice) = chunk.pull()? {
//!             println!("chunk {}: {} bytes", chunk.index(), slice.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_io::AsyncRead;
//! use splitrs::{split_async, SplitConfig};
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), splitrs::SplitError> {
//!     let mut split = split_async(reader, SplitConfig::new(17 * 1024)?);
//!
//!     while let Some(mut chunk) = split.next_chunk().await? {
//!         while let Some(slice) = chunk.pull().await? {
//!             println!("chunk {}: {} bytes", chunk.index(), slice.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod splitter;

#[cfg(feature = "async-io")]
mod async_split;

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use config::SplitConfig;
pub use error::SplitError;
pub use splitter::{Split, Splitter};

#[cfg(feature = "async-io")]
pub use async_split::{AsyncChunk, AsyncSplit, SplitStream, split_async, split_stream};
