// Token stream reconstruction.
//
// Replays a token stream against a single append-only output buffer.
// Literals append directly; backreferences copy from the live buffer.
// When a reference's source range extends past the bytes that exist at
// the moment the copy starts, the copy proceeds byte by byte so that
// every appended byte is readable by the next position of the same copy.
// Snapshotting the buffer length before such a copy would go stale in
// exactly the case that matters.

use thiserror::Error;

use crate::token::{Backref, Token};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced while replaying a token stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A backreference pointed before the start of the output produced so
    /// far. The stream is corrupt or adversarial; decoding aborts at the
    /// offending token and no partial output is returned.
    #[error(
        "malformed stream: token {token_index} has distance {distance} but only {available} output byte(s) exist"
    )]
    MalformedStream {
        /// Index of the offending token within the stream.
        token_index: usize,
        /// The out-of-range distance.
        distance: usize,
        /// Bytes of output that existed when the token was resolved.
        available: usize,
    },
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Replay `tokens`, reconstructing the original byte sequence.
///
/// The output grows monotonically: it is appended to, never truncated or
/// rewritten in place. A backreference whose distance points before the
/// first output byte fails with [`DecodeError::MalformedStream`].
pub fn decode(tokens: &[Token]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();

    for (token_index, token) in tokens.iter().enumerate() {
        match *token {
            Token::Literal(byte) => out.push(byte),
            Token::Backref(Backref { length, distance }) => {
                if distance >= out.len() {
                    return Err(DecodeError::MalformedStream {
                        token_index,
                        distance,
                        available: out.len(),
                    });
                }
                let start = out.len() - distance - 1;

                if length <= out.len() - start {
                    // The whole source range already exists: bulk append.
                    out.extend_from_within(start..start + length);
                } else {
                    // Overlapping copy: the source range extends into
                    // bytes this copy is itself producing. Byte by byte,
                    // so each push is visible to the next read.
                    log::trace!(
                        "token {token_index}: overlapping copy length={length} distance={distance}"
                    );
                    for offset in 0..length {
                        let byte = out[start + offset];
                        out.push(byte);
                    }
                }
            }
        }
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_append_in_order() {
        let tokens = vec![
            Token::Literal(b'H'),
            Token::Literal(b'i'),
            Token::Literal(b'!'),
        ];
        assert_eq!(decode(&tokens).unwrap(), b"Hi!");
    }

    #[test]
    fn empty_stream_empty_output() {
        assert_eq!(decode(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn bulk_copy_existing_range() {
        // "ABCD" then copy "AB" from distance 3.
        let tokens = vec![
            Token::Literal(b'A'),
            Token::Literal(b'B'),
            Token::Literal(b'C'),
            Token::Literal(b'D'),
            Token::Backref(Backref {
                length: 2,
                distance: 3,
            }),
        ];
        assert_eq!(decode(&tokens).unwrap(), b"ABCDAB");
    }

    #[test]
    fn overlapping_copy_single_byte_run() {
        let tokens = vec![
            Token::Literal(b'A'),
            Token::Backref(Backref {
                length: 5,
                distance: 0,
            }),
        ];
        assert_eq!(decode(&tokens).unwrap(), b"AAAAAA");
    }

    #[test]
    fn overlapping_copy_multi_byte_unit() {
        // The concrete scenario: three literals plus a distance-2,
        // length-6 reference reproduce "ABCABCABC".
        let tokens = vec![
            Token::Literal(b'A'),
            Token::Literal(b'B'),
            Token::Literal(b'C'),
            Token::Backref(Backref {
                length: 6,
                distance: 2,
            }),
        ];
        assert_eq!(decode(&tokens).unwrap(), b"ABCABCABC");
    }

    #[test]
    fn leading_backref_is_malformed() {
        // distance 0 against empty output reads before the beginning of
        // time.
        let tokens = vec![Token::Backref(Backref {
            length: 3,
            distance: 0,
        })];
        assert_eq!(
            decode(&tokens),
            Err(DecodeError::MalformedStream {
                token_index: 0,
                distance: 0,
                available: 0,
            })
        );
    }

    #[test]
    fn mid_stream_excessive_distance_is_malformed() {
        let tokens = vec![
            Token::Literal(b'A'),
            Token::Literal(b'B'),
            Token::Backref(Backref {
                length: 1,
                distance: 2,
            }),
        ];
        assert_eq!(
            decode(&tokens),
            Err(DecodeError::MalformedStream {
                token_index: 2,
                distance: 2,
                available: 2,
            })
        );
    }

    #[test]
    fn zero_length_backref_is_empty_copy() {
        // Never produced by the encoder, but tolerated in a foreign
        // stream once the distance validates.
        let tokens = vec![
            Token::Literal(b'A'),
            Token::Backref(Backref {
                length: 0,
                distance: 0,
            }),
            Token::Literal(b'B'),
        ];
        assert_eq!(decode(&tokens).unwrap(), b"AB");
    }

    #[test]
    fn malformed_error_message_names_the_token() {
        let err = decode(&[Token::Backref(Backref {
            length: 3,
            distance: 7,
        })])
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("token 0"), "unexpected message: {msg}");
        assert!(msg.contains("distance 7"), "unexpected message: {msg}");
    }
}
