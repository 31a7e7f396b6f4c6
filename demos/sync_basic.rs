//! Basic synchronous splitting example.
//!
//! Run with:
//!     cargo run --example sync_basic

use std::io::Cursor;

use splitrs::{SplitConfig, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create some sample data
    let data: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();

    println!("Splitting {} bytes into 17 KiB chunks...\n", data.len());

    let splitter = Splitter::new(SplitConfig::new(17 * 1024)?);
    let mut split = splitter.split(Cursor::new(data));

    let mut total_bytes = 0u64;
    while let Some(mut chunk) = split.next_chunk()? {
        let mut chunk_bytes = 0usize;
        let mut pulls = 0usize;
        while let Some(slice) = chunk.pull()? {
            chunk_bytes += slice.len();
            pulls += 1;
        }
        total_bytes += chunk_bytes as u64;

        println!(
            "Chunk {}: {} bytes in {} pulls",
            chunk.index(),
            chunk_bytes,
            pulls
        );
    }

    println!(
        "\nTotal: {} chunks, {} bytes",
        split.chunks_produced(),
        total_bytes
    );

    Ok(())
}
