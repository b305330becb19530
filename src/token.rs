// Logical token stream representation.
//
// The encoder produces an ordered sequence of tokens; the decoder replays
// it. No wire format is defined here; packing tokens into a concrete byte
// layout is a surrounding serializer's job. The token sequence itself is
// the contract between the two sides.

/// A backreference into already-produced output.
///
/// `distance = 0` starts copying at the single most recent output byte;
/// `distance = d` starts `d + 1` positions before the current output end.
/// The copy range is allowed to run past the data that exists when the
/// copy starts: each copied byte immediately becomes a valid source for
/// the next position, so `length` may exceed `distance + 1`. That is how
/// a run of a short repeating unit collapses into a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backref {
    /// Number of bytes to copy. Emitted backreferences always have
    /// `length >= 1`.
    pub length: usize,
    /// Offset back from the end of output, zero-based. Always strictly
    /// less than the number of bytes the consumer has produced at the
    /// moment the reference is resolved.
    pub distance: usize,
}

/// A single element of the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// One raw byte emitted verbatim.
    Literal(u8),
    /// A copy instruction against earlier output.
    Backref(Backref),
}

impl Token {
    /// Number of output bytes this token expands to.
    pub fn output_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Backref(b) => b.length,
        }
    }
}
