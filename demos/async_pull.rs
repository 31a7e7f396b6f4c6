//! Async chunk-at-a-time splitting example.
//!
//! Demonstrates the pull protocol over a source that produces data slowly:
//! each pull suspends until the source reports data or end-of-data.
//!
//! Run with:
//!     cargo run --example async_pull --features async-io

use splitrs::{SplitConfig, split_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (reader, mut writer) = tokio::io::duplex(256);

    // A writer task that trickles data in small bursts.
    let producer = tokio::spawn(async move {
        use tokio::io::AsyncWriteExt;
        for i in 0..20u8 {
            let burst = vec![i; 300];
            writer.write_all(&burst).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    });

    let mut split = split_async(reader.compat(), SplitConfig::new(1024)?);

    let mut total_bytes = 0u64;
    while let Some(mut chunk) = split.next_chunk().await? {
        let mut chunk_bytes = 0usize;
        let mut pulls = 0usize;
        while let Some(slice) = chunk.pull().await? {
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
    producer.await?;

    println!(
        "\nTotal: {} chunks, {} bytes",
        split.chunks_produced(),
        total_bytes
    );

    Ok(())
}
