/*!
# Container Header

The archive format wrapping a compressed payload is a 9-byte
little-endian header: a type tag and two lengths. It sits outside the
token codec itself, one layer up, so the CLI binary doesn't have to
hand-roll it.
*/

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::UnsupportedCompressionType;

/// The one-byte type tag that selects which codec applies to the
/// payload following the header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CompressionType {
    /// `0x00`: payload is stored uncompressed.
    Stored,
    /// `0x01`: dictionary-backed LZSS, literals and back-references only.
    Dict01,
    /// `0x03`: dictionary-backed LZSS, adds run tokens.
    Dict03,
    /// `0x81`: self-referential LZSS, literals and back-references only.
    SelfRef81,
    /// `0x83`: self-referential LZSS, adds run tokens.
    SelfRef83,
}

impl TryFrom<u8> for CompressionType {
    type Error = UnsupportedCompressionType;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0x00 => Ok(CompressionType::Stored),
            0x01 => Ok(CompressionType::Dict01),
            0x03 => Ok(CompressionType::Dict03),
            0x81 => Ok(CompressionType::SelfRef81),
            0x83 => Ok(CompressionType::SelfRef83),
            other => Err(UnsupportedCompressionType(other)),
        }
    }
}

impl From<CompressionType> for u8 {
    fn from(kind: CompressionType) -> u8 {
        match kind {
            CompressionType::Stored => 0x00,
            CompressionType::Dict01 => 0x01,
            CompressionType::Dict03 => 0x03,
            CompressionType::SelfRef81 => 0x81,
            CompressionType::SelfRef83 => 0x83,
        }
    }
}

/// The 9-byte header that precedes every compressed payload: a type
/// tag, the compressed length, and the uncompressed length, both as
/// 32-bit little-endian integers. The reference tooling this format
/// comes from historically only ever populated the low 16 bits of each.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ContainerHeader {
    pub kind: CompressionType,
    pub compressed_len: u32,
    pub uncompressed_len: u32,
}

impl ContainerHeader {
    pub const SIZE: usize = 9;

    pub fn read(mut r: impl Read) -> io::Result<Self> {
        let tag = r.read_u8()?;
        let kind = CompressionType::try_from(tag)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let compressed_len = r.read_u32::<LittleEndian>()?;
        let uncompressed_len = r.read_u32::<LittleEndian>()?;
        Ok(Self {
            kind,
            compressed_len,
            uncompressed_len,
        })
    }

    pub fn write(&self, mut w: impl Write) -> io::Result<()> {
        w.write_u8(self.kind.into())?;
        w.write_u32::<LittleEndian>(self.compressed_len)?;
        w.write_u32::<LittleEndian>(self.uncompressed_len)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let header = ContainerHeader {
            kind: CompressionType::SelfRef83,
            compressed_len: 42,
            uncompressed_len: 274,
        };
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        assert_eq!(buf.len(), ContainerHeader::SIZE);
        assert_eq!(buf[0], 0x83);
        let parsed = ContainerHeader::read(&buf[..]).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn rejects_unknown_type_tag() {
        let mut buf = vec![0x42u8];
        buf.extend_from_slice(&[0u8; 8]);
        let err = ContainerHeader::read(&buf[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn every_compression_type_round_trips_through_u8() {
        for kind in [
            CompressionType::Stored,
            CompressionType::Dict01,
            CompressionType::Dict03,
            CompressionType::SelfRef81,
            CompressionType::SelfRef83,
        ] {
            let tag: u8 = kind.into();
            assert_eq!(CompressionType::try_from(tag).unwrap(), kind);
        }
    }
}
