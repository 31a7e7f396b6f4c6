//! File splitting example.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file

use std::env;
use std::fs::File;
use std::io::Read;

use splitrs::{SplitConfig, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Splitting file: {}\n", path);

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    let config = SplitConfig::new(100)?;
    let mut split = Splitter::new(config).split(file);

    let mut total_bytes = 0usize;
    while let Some(mut chunk) = split.next_chunk()? {
        // Each chunk is an ordinary reader bounded to 100 bytes.
        let mut payload = Vec::new();
        chunk.read_to_end(&mut payload)?;
        total_bytes += payload.len();

        println!("Chunk {}: {} bytes", chunk.index(), payload.len());
    }

    println!(
        "\nTotal: {} chunks, {} bytes",
        split.chunks_produced(),
        total_bytes
    );

    Ok(())
}
