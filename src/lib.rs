//! Oxilz: a sliding-window LZ77 token codec with self-overlapping
//! backreferences.
//!
//! The crate provides:
//! - A window match finder (`matcher`)
//! - A greedy token stream builder (`encoder`)
//! - A token stream reconstructor (`decoder`)
//! - An optional CLI (`cli` feature)
//!
//! A backreference may be longer than its distance: the copy reads bytes
//! it is itself producing, so a short repeating unit expands into an
//! arbitrarily long run from a single token. The encoder's match search
//! and the decoder's copy loop both honor that, on the encode side by
//! wrapping window reads back to the candidate's start offset and on the
//! decode side by copying byte by byte against the growing output.
//!
//! Tokens are a logical representation only; packing them into a wire
//! format is left to a surrounding serializer.
//!
//! # Quick Start
//!
//! ```
//! use oxilz::{decode, encode};
//!
//! let input = b"ABCABCABC";
//! let tokens = encode(input);
//! let output = decode(&tokens).unwrap();
//! assert_eq!(output, input);
//! ```

pub mod decoder;
pub mod encoder;
pub mod matcher;
pub mod token;

#[cfg(feature = "cli")]
pub mod cli;

pub use decoder::{DecodeError, decode};
pub use encoder::{DEFAULT_WINDOW_SIZE, EncodeOptions, encode, encode_with_options};
pub use token::{Backref, Token};
