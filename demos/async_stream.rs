//! Async stream splitting example.
//!
//! Demonstrates the `Stream` adapter: one item per chunk, each item the
//! chunk's whole payload.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use futures_util::StreamExt;
use splitrs::{SplitConfig, split_stream};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();

    println!("Splitting {} bytes into 17 KiB chunks...\n", data.len());

    let reader: &[u8] = &data;
    let mut stream = split_stream(reader, SplitConfig::new(17 * 1024)?);

    let mut total_chunks = 0usize;
    let mut total_bytes = 0usize;
    while let Some(payload) = stream.next().await {
        let payload = payload?;
        println!("Chunk {}: {:>6} bytes", total_chunks, payload.len());
        total_chunks += 1;
        total_bytes += payload.len();
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);

    Ok(())
}
