/*!
# Codec Error Types

Typed errors for the LZSS decode/encode surface, kept separate from the
`anyhow` errors used by the CLI binary. Library callers branch on these
variants directly; the binary converts them into `anyhow` context chains.
*/

use thiserror::Error;

/// Failure modes the token decoder can report. A third condition, a
/// length mismatch against the container header's declared
/// uncompressed length, is not a `DecodeError` because it is not fatal
/// and is only observable by the caller comparing lengths after a
/// successful decode.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
    /// A token byte (command flag, literal, or back-reference/run
    /// payload) was needed but the compressed buffer had already been
    /// fully consumed.
    #[error("compressed stream ended before the next token could be read")]
    InputExhausted,

    /// A self-referential back-reference pointed at or before the start
    /// of the output written so far.
    #[error(
        "back-reference offset {offset} is invalid at output position {output_pos}"
    )]
    InvalidBackReference { offset: u16, output_pos: usize },
}

/// Failure modes for the greedy encoder. The encoder itself cannot fail
/// for any input within the container's 16-bit length boundary;
/// `TooLarge` exists only to surface that boundary check at the
/// `encode` entry point instead of silently truncating, and
/// `Unimplemented` reports a request for an encoder this crate doesn't
/// provide (the dictionary-backed variants and the stored passthrough).
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum EncodeError {
    #[error("input length {0} exceeds the 16-bit container length boundary")]
    TooLarge(usize),

    #[error("no encoder is implemented for compression type tag 0x{0:02x}")]
    Unimplemented(u8),
}

/// A one-byte compression type tag outside the five recognized values.
/// Rejected at the container boundary, never inside the codec itself.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("unsupported compression type tag 0x{0:02x}")]
pub struct UnsupportedCompressionType(pub u8);
