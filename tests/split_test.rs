// Integration tests for the splitting session API
// Tests cover: byte conservation, bounded size, sequencing, validation

use std::io::{Cursor, Read};

use splitrs::{SplitConfig, SplitError, Splitter};

/// Drains a whole session, returning each chunk's payload.
fn collect_chunks(data: &[u8], chunk_size: usize, read_size: usize) -> Vec<Vec<u8>> {
    let config = SplitConfig::new(chunk_size)
        .unwrap()
        .with_read_size(read_size);
    let mut split = Splitter::new(config).split(Cursor::new(data.to_vec()));

    let mut payloads = Vec::new();
    while let Some(mut chunk) = split.next_chunk().unwrap() {
        let mut payload = Vec::new();
        while let Some(slice) = chunk.pull().unwrap() {
            payload.extend_from_slice(&slice);
        }
        assert!(chunk.is_finished());
        payloads.push(payload);
    }
    payloads
}

// ============================================================================
// Byte Conservation and Bounded Size
// ============================================================================

#[test]
fn test_one_mib_source_17_kib_chunks() {
    let chunk_size = 17 * 1024;
    let data = vec![0u8; 1024 * 1024];

    let payloads = collect_chunks(&data, chunk_size, 8 * 1024);

    assert_eq!(payloads.len(), data.len().div_ceil(chunk_size));
    for payload in &payloads[..payloads.len() - 1] {
        assert_eq!(payload.len(), chunk_size, "every full chunk hits its budget");
    }
    assert_eq!(
        payloads.last().unwrap().len(),
        data.len() % chunk_size,
        "last chunk carries the tail"
    );

    let reassembled: Vec<u8> = payloads.into_iter().flatten().collect();
    assert_eq!(reassembled, data, "reassembly must be byte-exact");
}

#[test]
fn test_byte_conservation_uneven_read_sizes() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

    // Read sizes that do not divide the chunk size exercise the remainder
    // carry in every possible alignment.
    for read_size in [1, 3, 7, 64, 1000, 8192] {
        let payloads = collect_chunks(&data, 100, read_size);
        assert_eq!(payloads.len(), 100);

        let reassembled: Vec<u8> = payloads.into_iter().flatten().collect();
        assert_eq!(
            reassembled, data,
            "read_size {} dropped or duplicated bytes",
            read_size
        );
    }
}

#[test]
fn test_empty_source_one_empty_chunk() {
    let payloads = collect_chunks(&[], 1, 8192);
    assert_eq!(payloads.len(), 1);
    assert!(payloads[0].is_empty());
}

#[test]
fn test_short_source_single_chunk() {
    let payloads = collect_chunks(b"abc", 10, 8192);
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0], b"abc");
}

#[test]
fn test_evenly_divisible_no_empty_tail() {
    let payloads = collect_chunks(&[9u8; 30], 10, 4);
    assert_eq!(payloads.len(), 3, "no zero-length final chunk");
    for payload in &payloads {
        assert_eq!(payload.len(), 10);
    }
}

#[test]
fn test_chunk_size_one() {
    let payloads = collect_chunks(b"xyz", 1, 8192);
    assert_eq!(payloads.len(), 3);
    assert_eq!(payloads, vec![b"x".to_vec(), b"y".to_vec(), b"z".to_vec()]);
}

// ============================================================================
// Sequencing Invariant
// ============================================================================

#[test]
fn test_premature_advance_fails() {
    let config = SplitConfig::new(2).unwrap();
    let mut split = Splitter::new(config).split(Cursor::new(b"abcdef".to_vec()));

    let mut chunk = split.next_chunk().unwrap().unwrap();
    chunk.pull().unwrap().unwrap(); // budget reached in one pull, but still:
    drop(chunk);

    // That chunk did finish (budget hit exactly), so advancing is fine.
    let chunk = split.next_chunk().unwrap().unwrap();
    drop(chunk); // this one never pulled at all

    assert!(matches!(
        split.next_chunk(),
        Err(SplitError::PrematureAdvance { index: 1 })
    ));
}

#[test]
fn test_partially_pulled_chunk_blocks_advance() {
    let config = SplitConfig::new(10).unwrap().with_read_size(4);
    let mut split = Splitter::new(config).split(Cursor::new(vec![0u8; 100]));

    let mut chunk = split.next_chunk().unwrap().unwrap();
    chunk.pull().unwrap().unwrap(); // 4 of 10 bytes
    assert!(!chunk.is_finished());
    drop(chunk);

    assert!(matches!(
        split.next_chunk(),
        Err(SplitError::PrematureAdvance { index: 0 })
    ));
}

#[test]
fn test_explicit_drain_allows_advance() {
    let config = SplitConfig::new(10).unwrap().with_read_size(4);
    let mut split = Splitter::new(config).split(Cursor::new(vec![0u8; 100]));

    let mut chunk = split.next_chunk().unwrap().unwrap();
    chunk.pull().unwrap().unwrap();
    assert_eq!(chunk.drain().unwrap(), 6, "drain discards the rest");
    drop(chunk);

    assert!(split.next_chunk().unwrap().is_some());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_zero_chunk_size_rejected_before_any_chunk() {
    assert!(matches!(
        SplitConfig::new(0),
        Err(SplitError::InvalidChunkSize { given: 0 })
    ));
}

#[test]
fn test_chunk_size_constant_across_session() {
    let config = SplitConfig::new(7).unwrap();
    let mut split = Splitter::new(config).split(Cursor::new(vec![0u8; 20]));

    while let Some(mut chunk) = split.next_chunk().unwrap() {
        assert_eq!(chunk.chunk_size(), 7);
        chunk.drain().unwrap();
    }
}

// ============================================================================
// Read Impl Composition
// ============================================================================

#[test]
fn test_chunks_compose_with_read_consumers() {
    let data: Vec<u8> = (0..256u16).map(|i| i as u8).collect();
    let config = SplitConfig::new(100).unwrap().with_read_size(33);
    let mut split = Splitter::new(config).split(Cursor::new(data.clone()));

    let mut reassembled = Vec::new();
    let mut counts = Vec::new();
    while let Some(mut chunk) = split.next_chunk().unwrap() {
        // Hand the chunk to ordinary Read-based code.
        let mut payload = Vec::new();
        chunk.read_to_end(&mut payload).unwrap();
        counts.push(payload.len());
        reassembled.extend_from_slice(&payload);
    }

    assert_eq!(counts, vec![100, 100, 56]);
    assert_eq!(reassembled, data);
}

#[test]
fn test_retry_after_would_block() {
    // A non-blocking source: WouldBlock must not disturb chunk state, so the
    // same pull can simply be retried.
    struct NonBlocking {
        ready: bool,
        data: Cursor<Vec<u8>>,
    }

    impl Read for NonBlocking {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.ready {
                self.ready = true;
                return Err(std::io::Error::from(std::io::ErrorKind::WouldBlock));
            }
            self.ready = false;
            self.data.read(buf)
        }
    }

    let reader = NonBlocking {
        ready: false,
        data: Cursor::new(b"abcdefgh".to_vec()),
    };
    let mut split = Splitter::new(SplitConfig::new(5).unwrap()).split(reader);

    let mut chunk = split.next_chunk().unwrap().unwrap();
    let mut payload = Vec::new();
    loop {
        match chunk.pull() {
            Ok(Some(slice)) => payload.extend_from_slice(&slice),
            Ok(None) => break,
            Err(SplitError::Io(e)) if e.kind() == std::io::ErrorKind::WouldBlock => continue,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(&payload, b"abcde");
    assert_eq!(chunk.delivered(), 5);
}

// ============================================================================
// Async (feature = "async-io")
// ============================================================================

#[cfg(feature = "async-io")]
mod async_tests {
    use futures_util::StreamExt;
    use splitrs::{SplitConfig, split_async, split_stream};
    use tokio_util::compat::TokioAsyncReadCompatExt;

    #[tokio::test]
    async fn test_async_one_mib_source() {
        let chunk_size = 17 * 1024;
        let data = vec![0u8; 1024 * 1024];
        let reader: &[u8] = &data;

        let mut split = split_async(reader, SplitConfig::new(chunk_size).unwrap());
        let mut sizes = Vec::new();
        while let Some(mut chunk) = split.next_chunk().await.unwrap() {
            sizes.push(chunk.drain().await.unwrap() as usize);
        }

        assert_eq!(sizes.len(), data.len().div_ceil(chunk_size));
        assert!(sizes[..sizes.len() - 1].iter().all(|&s| s == chunk_size));
        assert_eq!(*sizes.last().unwrap(), data.len() % chunk_size);
    }

    #[tokio::test]
    async fn test_pull_suspends_until_data_arrives() {
        // The writer trickles data in; each pull must park until the source
        // reports data or end-of-data, never spin or misread a slow source
        // as exhausted.
        let (rx, mut tx) = tokio::io::duplex(64);

        let writer = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            for part in [&b"hel"[..], b"lo ", b"wor", b"ld!"] {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                tx.write_all(part).await.unwrap();
            }
            // tx dropped here: end-of-data
        });

        let mut split = split_async(rx.compat(), SplitConfig::new(5).unwrap());
        let mut payloads = Vec::new();
        while let Some(mut chunk) = split.next_chunk().await.unwrap() {
            let mut payload = Vec::new();
            while let Some(slice) = chunk.pull().await.unwrap() {
                payload.extend_from_slice(&slice);
            }
            payloads.push(payload);
        }
        writer.await.unwrap();

        let reassembled: Vec<u8> = payloads.iter().flatten().copied().collect();
        assert_eq!(&reassembled, b"hello world!");
        assert_eq!(payloads.len(), 3);
        assert_eq!(payloads[0].len(), 5);
        assert_eq!(payloads[1].len(), 5);
        assert_eq!(payloads[2].len(), 2);
    }

    #[tokio::test]
    async fn test_stream_matches_sync_behavior() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 256) as u8).collect();
        let reader: &[u8] = &data;

        let stream = split_stream(reader, SplitConfig::new(640).unwrap());
        let payloads: Vec<_> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(payloads.len(), data.len().div_ceil(640));
        let reassembled: Vec<u8> = payloads.iter().flat_map(|p| p.iter().copied()).collect();
        assert_eq!(reassembled, data);
    }
}
