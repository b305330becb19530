#![no_main]
use libfuzzer_sys::fuzz_target;
use oxilz::{EncodeOptions, decode, encode_with_options};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Use the first two bytes as tuning knobs.
    let window_size = 1 + data[0] as usize;
    let min_match = 1 + (data[1] as usize % 8);
    let input = &data[2..];

    let opts = EncodeOptions {
        window_size,
        min_match,
    };
    let tokens = encode_with_options(input, &opts);
    let output = decode(&tokens).unwrap();
    assert_eq!(output, input);
});
