// Greedy token stream builder.
//
// Walks the input left to right. At each uncovered position the history
// window (up to `window_size` bytes immediately before the cursor) is
// searched for the longest backreference, and the cursor advances past
// the emitted token. Greedy and non-backtracking: once a match is taken,
// shorter alternatives or delayed literal emission are never
// reconsidered.

use crate::matcher;
use crate::token::Token;

/// Default history window size (32 KiB).
pub const DEFAULT_WINDOW_SIZE: usize = 1 << 15;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for the encoder.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// History window size `W` in bytes. Every emitted backreference has
    /// `distance < min(position, W)`. Changing it changes compression
    /// behavior but never correctness.
    pub window_size: usize,
    /// Minimum match length worth a backreference; anything shorter is
    /// emitted as literals. The default of 1 takes every match, however
    /// uneconomical it would be in a real wire format.
    pub min_match: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_match: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode `input` into a token stream with default options.
pub fn encode(input: &[u8]) -> Vec<Token> {
    encode_with_options(input, &EncodeOptions::default())
}

/// Encode with custom options.
///
/// # Panics
///
/// Panics if `window_size` or `min_match` is zero.
pub fn encode_with_options(input: &[u8], opts: &EncodeOptions) -> Vec<Token> {
    assert!(opts.window_size > 0, "window size must be positive");
    assert!(opts.min_match > 0, "minimum match length must be positive");

    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < input.len() {
        // The window is a borrowed view of the bytes just consumed: it
        // has length exactly min(pos, W) and never includes input[pos].
        let history = &input[pos - pos.min(opts.window_size)..pos];
        let part = &input[pos..];

        match matcher::find_best_match(part, history) {
            Some(m) if m.length >= opts.min_match => {
                // A match pointing outside the window it was searched in
                // is a finder bug, not a data error.
                debug_assert!(m.distance < history.len());
                log::trace!("pos {pos}: backref length={} distance={}", m.length, m.distance);
                tokens.push(Token::Backref(m));
                pos += m.length;
            }
            _ => {
                log::trace!("pos {pos}: literal {:#04x}", input[pos]);
                tokens.push(Token::Literal(input[pos]));
                pos += 1;
            }
        }
    }

    tokens
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
