/*!
# topdec

Codec for a family of LZSS-derived compression formats used by a game
asset pipeline's container archives. Five type tags select between a
stored (uncompressed) payload and four flavors of LZSS: dictionary-
backed (`0x01`/`0x03`, decode only) and self-referential (`0x81`/
`0x83`, decode and encode).

The container header that carries the type tag is handled by
[`container`]; the bit-stream framing shared by every compressed
variant lives in [`bitstream`]; the pre-seeded dictionary window used
by `0x01`/`0x03` lives in [`dictionary`]. [`decode`] and [`encode`] are
the two halves of the codec itself.
*/

pub mod bitstream;
pub mod container;
pub mod dictionary;
pub mod decode;
pub mod encode;
pub mod error;

pub use container::{CompressionType, ContainerHeader};
pub use error::{DecodeError, EncodeError, UnsupportedCompressionType};

/// Largest uncompressed length the container format can declare.
/// Historically only the low 16 bits of the length fields were ever
/// populated.
pub const MAX_UNCOMPRESSED_LEN: usize = u16::MAX as usize;

/// Decompress `compressed` according to `kind`, producing exactly
/// `uncompressed_len` bytes.
///
/// All five type tags are supported on the decode side.
pub fn decode(
    kind: CompressionType,
    compressed: &[u8],
    uncompressed_len: usize,
) -> Result<Vec<u8>, DecodeError> {
    match kind {
        CompressionType::Stored => Ok(decode::decode_00(compressed, uncompressed_len)),
        CompressionType::Dict01 => decode::decode_01(compressed, uncompressed_len),
        CompressionType::Dict03 => decode::decode_03(compressed, uncompressed_len),
        CompressionType::SelfRef81 => decode::decode_81(compressed, uncompressed_len),
        CompressionType::SelfRef83 => decode::decode_83(compressed, uncompressed_len),
    }
}

/// Compress `uncompressed` according to `kind`.
///
/// Only `SelfRef81` and `SelfRef83` have an encoder in this crate: the
/// reference tooling this format was distilled from never shipped an
/// encoder for the dictionary-backed variants either (see
/// `DESIGN.md`), so `Dict01`/`Dict03` return
/// [`EncodeError::Unimplemented`]. `Stored` also has no encoder here
/// since storing a payload uncompressed needs no codec logic beyond a
/// copy, which callers can do directly.
pub fn encode(kind: CompressionType, uncompressed: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if uncompressed.len() > MAX_UNCOMPRESSED_LEN {
        return Err(EncodeError::TooLarge(uncompressed.len()));
    }
    match kind {
        CompressionType::SelfRef81 => Ok(encode::encode_81(uncompressed)),
        CompressionType::SelfRef83 => Ok(encode::encode_83(uncompressed)),
        other => Err(EncodeError::Unimplemented(other.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_ref_81_round_trips_through_top_level_dispatch() {
        let data = b"the quick brown fox jumps over the lazy dog".to_vec();
        let compressed = encode(CompressionType::SelfRef81, &data).unwrap();
        let decoded = decode(CompressionType::SelfRef81, &compressed, data.len()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn self_ref_83_round_trips_through_top_level_dispatch() {
        let data = b"aaaaaaaaaaaaaaaaaaaaaaabbbbbbbbbbbbbbbbbbbbbccccccccc".to_vec();
        let compressed = encode(CompressionType::SelfRef83, &data).unwrap();
        let decoded = decode(CompressionType::SelfRef83, &compressed, data.len()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn stored_round_trips_as_an_identity_copy() {
        let data = b"raw passthrough payload".to_vec();
        let decoded = decode(CompressionType::Stored, &data, data.len()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn dictionary_variants_have_no_encoder() {
        let err = encode(CompressionType::Dict01, b"abc").unwrap_err();
        assert_eq!(err, EncodeError::Unimplemented(0x01));
        let err = encode(CompressionType::Dict03, b"abc").unwrap_err();
        assert_eq!(err, EncodeError::Unimplemented(0x03));
    }

    #[test]
    fn stored_has_no_encoder_either() {
        let err = encode(CompressionType::Stored, b"abc").unwrap_err();
        assert_eq!(err, EncodeError::Unimplemented(0x00));
    }

    #[test]
    fn encode_rejects_input_past_the_16_bit_length_boundary() {
        let data = vec![0u8; MAX_UNCOMPRESSED_LEN + 1];
        let err = encode(CompressionType::SelfRef81, &data).unwrap_err();
        assert_eq!(err, EncodeError::TooLarge(data.len()));
    }

    proptest::proptest! {
        #[test]
        fn self_ref_81_round_trips_for_arbitrary_bytes(
            data in proptest::collection::vec(proptest::num::u8::ANY, 0..2048)
        ) {
            let compressed = encode(CompressionType::SelfRef81, &data).unwrap();
            let decoded = decode(CompressionType::SelfRef81, &compressed, data.len()).unwrap();
            proptest::prop_assert_eq!(decoded, data);
        }

        #[test]
        fn self_ref_83_round_trips_for_arbitrary_bytes(
            data in proptest::collection::vec(proptest::num::u8::ANY, 0..2048)
        ) {
            let compressed = encode(CompressionType::SelfRef83, &data).unwrap();
            let decoded = decode(CompressionType::SelfRef83, &compressed, data.len()).unwrap();
            proptest::prop_assert_eq!(decoded, data);
        }
    }
}
