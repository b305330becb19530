#![no_main]
use libfuzzer_sys::fuzz_target;
use oxilz::{Backref, Token, decode};

// Deserialize arbitrary bytes into an arbitrary token stream; decoding
// must either succeed or fail with MalformedStream, never panic.
fuzz_target!(|data: &[u8]| {
    let mut tokens = Vec::new();
    for chunk in data.chunks_exact(4) {
        if chunk[0] & 1 == 0 {
            tokens.push(Token::Literal(chunk[1]));
        } else {
            tokens.push(Token::Backref(Backref {
                length: chunk[1] as usize,
                distance: u16::from_le_bytes([chunk[2], chunk[3]]) as usize,
            }));
        }
    }

    let _ = decode(&tokens);
});
