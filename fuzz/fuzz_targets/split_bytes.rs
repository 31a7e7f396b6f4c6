#![no_main]

use libfuzzer_sys::fuzz_target;
use splitrs::{SplitConfig, Splitter};

fuzz_target!(|input: (Vec<u8>, u16)| {
    let (data, raw_size) = input;
    let chunk_size = (raw_size as usize % 4096) + 1;

    let splitter = Splitter::new(SplitConfig::new(chunk_size).unwrap());
    let chunks = splitter.split_bytes(data.clone());

    // Verify: chunk count
    assert_eq!(chunks.len(), data.len().div_ceil(chunk_size).max(1));

    // Verify: bounded size, only the last chunk may fall short
    for (i, chunk) in chunks.iter().enumerate() {
        if i < chunks.len() - 1 {
            assert_eq!(chunk.len(), chunk_size);
        } else {
            assert!(chunk.len() <= chunk_size);
        }
    }

    // Verify: byte conservation
    let reassembled: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
    assert_eq!(reassembled, data);
});
