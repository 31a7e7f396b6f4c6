#![no_main]

use libfuzzer_sys::fuzz_target;
use splitrs::{SplitConfig, Splitter};

fuzz_target!(|input: (Vec<u8>, u16, u16)| {
    let (data, raw_chunk, raw_read) = input;
    let chunk_size = (raw_chunk as usize % 1024) + 1;
    let read_size = (raw_read as usize % 512) + 1;

    let config = SplitConfig::new(chunk_size)
        .unwrap()
        .with_read_size(read_size);
    let mut split = Splitter::new(config).split(std::io::Cursor::new(data.clone()));

    let mut payloads: Vec<Vec<u8>> = Vec::new();
    while let Some(mut chunk) = split.next_chunk().unwrap() {
        let mut payload = Vec::new();
        while let Some(slice) = chunk.pull().unwrap() {
            payload.extend_from_slice(&slice);
        }
        assert!(chunk.is_finished());
        assert_eq!(chunk.delivered(), payload.len());
        payloads.push(payload);
    }

    // Verify: chunk count
    assert_eq!(payloads.len(), data.len().div_ceil(chunk_size).max(1));

    // Verify: bounded size, only the last chunk may fall short
    for (i, payload) in payloads.iter().enumerate() {
        if i < payloads.len() - 1 {
            assert_eq!(payload.len(), chunk_size);
        } else {
            assert!(payload.len() <= chunk_size);
        }
    }

    // Verify: byte conservation, in order, no loss or duplication
    let reassembled: Vec<u8> = payloads.into_iter().flatten().collect();
    assert_eq!(reassembled, data);

    // Verify: the session result matches the in-memory splitter
    let eager = Splitter::new(config).split_bytes(data.clone());
    let eager_joined: Vec<u8> = eager.iter().flat_map(|c| c.iter().copied()).collect();
    assert_eq!(eager_joined, data);
});
