//! The bounded sub-reader handed out by a splitting session.
//!
//! - [`Chunk`] - Reads at most `chunk_size` bytes from the shared source

mod reader;

pub use reader::Chunk;
