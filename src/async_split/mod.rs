//! Async splitting support.
//!
//! This module provides asynchronous splitting using the
//! `futures-io::AsyncRead` trait, making it runtime-agnostic and compatible
//! with tokio, async-std, smol, and other async runtimes.
//!
//! - [`split_async`] - Chunk-at-a-time protocol, mirrors the sync [`crate::Split`]
//! - [`split_stream`] - A `Stream` yielding each chunk's whole payload
//!
//! This module requires the `async-io` feature to be enabled.

mod split;
mod stream;

pub use split::{AsyncChunk, AsyncSplit, split_async};
pub use stream::{SplitStream, split_stream};
