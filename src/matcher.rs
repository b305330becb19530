// Backreference search over the history window.
//
// Implements the core sliding-window match loop: every candidate start
// offset in the history is compared byte by byte against the lookahead,
// and a read that runs off the end of the window wraps back to the
// candidate's own start offset. The window suffix acts as a repeating
// unit, which is exactly what the decoder reproduces when a copy re-reads
// bytes it has just appended. A match may therefore be longer than its
// distance.

use crate::token::Backref;

/// Find the longest backreference for `part` within `history`.
///
/// `part` is the not-yet-encoded suffix of the input, starting at the
/// current position. `history` holds the up-to-window-size bytes
/// immediately preceding it, oldest first; it is empty at position 0.
///
/// Returns `None` when not even the first byte of `part` occurs anywhere
/// in the window. Ties between equally long matches are broken in favor
/// of the smaller distance: a closer reference is cheaper in any
/// realistic downstream encoding.
///
/// Pure function of its two inputs.
pub fn find_best_match(part: &[u8], history: &[u8]) -> Option<Backref> {
    if part.is_empty() || history.is_empty() {
        return None;
    }

    let mut best: Option<Backref> = None;

    // Nearest-first scan: a farther candidate must be strictly longer to
    // displace the current best, which gives the smaller-distance
    // tie-break for free.
    for distance in 0..history.len() {
        let start = history.len() - 1 - distance;
        let length = cyclic_match_len(part, history, start);
        if length == 0 {
            continue;
        }
        if best.is_none_or(|b| length > b.length) {
            log::trace!("match candidate: length={length} distance={distance}");
            best = Some(Backref { length, distance });
            if length == part.len() {
                // The lookahead is exhausted; no candidate can do better.
                break;
            }
        }
    }

    best
}

/// Match length between `part` and the window suffix starting at `start`,
/// reading the suffix cyclically.
///
/// Once the read position would pass the end of the window it wraps back
/// to `start` (not to the start of the window) and keeps going, so the
/// suffix `history[start..]` repeats for as long as `part` keeps
/// matching. Halts at the first mismatch (no gaps) or when `part` is
/// exhausted.
fn cyclic_match_len(part: &[u8], history: &[u8], start: usize) -> usize {
    let period = history.len() - start;
    let mut length = 0;
    while length < part.len() && part[length] == history[start + (length % period)] {
        length += 1;
    }
    length
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
