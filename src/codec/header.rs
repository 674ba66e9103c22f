//! CCSDS Space Packet primary header: 6 bytes, big-endian.
//!
//! `total_length = 6 + packet_data_length + 1`; the length field records
//! the number of bytes following the primary header, minus one.

use crate::error::CodecError;

pub const PRIMARY_HEADER_LEN: usize = 6;
pub const SYNC_PATTERN: [u8; 4] = [0x1A, 0xCF, 0xFC, 0x1D];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    Telemetry,
    Telecommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFlags {
    Continuation,
    FirstSegment,
    LastSegment,
    Standalone,
}

impl SequenceFlags {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => SequenceFlags::Continuation,
            1 => SequenceFlags::FirstSegment,
            2 => SequenceFlags::LastSegment,
            _ => SequenceFlags::Standalone,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            SequenceFlags::Continuation => 0,
            SequenceFlags::FirstSegment => 1,
            SequenceFlags::LastSegment => 2,
            SequenceFlags::Standalone => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryHeader {
    pub version: u8,
    pub packet_type: PacketType,
    pub secondary_header_flag: bool,
    pub apid: u16,
    pub sequence_flags: SequenceFlags,
    pub sequence_count: u16,
    pub packet_data_length: u16,
}

impl PrimaryHeader {
    pub const SEQUENCE_COUNT_MODULUS: u16 = 0x4000;

    pub fn pack(&self) -> [u8; PRIMARY_HEADER_LEN] {
        let type_bit: u16 = match self.packet_type {
            PacketType::Telemetry => 0,
            PacketType::Telecommand => 1,
        };
        let sh_bit: u16 = u16::from(self.secondary_header_flag);
        let word1 = ((self.version as u16 & 0x7) << 13)
            | (type_bit << 12)
            | (sh_bit << 11)
            | (self.apid & 0x7FF);
        let word2 = ((self.sequence_flags.to_bits() as u16) << 14)
            | (self.sequence_count & 0x3FFF);
        let word3 = self.packet_data_length;

        let mut out = [0u8; PRIMARY_HEADER_LEN];
        out[0..2].copy_from_slice(&word1.to_be_bytes());
        out[2..4].copy_from_slice(&word2.to_be_bytes());
        out[4..6].copy_from_slice(&word3.to_be_bytes());
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < PRIMARY_HEADER_LEN {
            return Err(CodecError::HeaderTooShort(bytes.len()));
        }
        let word1 = u16::from_be_bytes([bytes[0], bytes[1]]);
        let word2 = u16::from_be_bytes([bytes[2], bytes[3]]);
        let word3 = u16::from_be_bytes([bytes[4], bytes[5]]);

        let version = ((word1 >> 13) & 0x7) as u8;
        let packet_type = if (word1 >> 12) & 0x1 == 1 {
            PacketType::Telecommand
        } else {
            PacketType::Telemetry
        };
        let secondary_header_flag = (word1 >> 11) & 0x1 == 1;
        let apid = word1 & 0x7FF;
        let sequence_flags = SequenceFlags::from_bits((word2 >> 14) as u8);
        let sequence_count = word2 & 0x3FFF;

        Ok(PrimaryHeader {
            version,
            packet_type,
            secondary_header_flag,
            apid,
            sequence_flags,
            sequence_count,
            packet_data_length: word3,
        })
    }

    /// Total packet length in bytes including this 6-byte header.
    pub fn total_length(&self) -> usize {
        PRIMARY_HEADER_LEN + self.packet_data_length as usize + 1
    }

    /// Secondary-header length in bytes is derived from packet direction,
    /// not from the secondary-header flag bit alone: TC carries a 4-byte
    /// PUS header, TM a 10-byte one.
    pub fn secondary_header_len(&self) -> usize {
        match self.packet_type {
            PacketType::Telecommand => 4,
            PacketType::Telemetry => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trip() {
        let header = PrimaryHeader {
            version: 0,
            packet_type: PacketType::Telecommand,
            secondary_header_flag: true,
            apid: 100,
            sequence_flags: SequenceFlags::Standalone,
            sequence_count: 42,
            packet_data_length: 9,
        };
        let packed = header.pack();
        let unpacked = PrimaryHeader::unpack(&packed).unwrap();
        assert_eq!(header, unpacked);
    }

    #[test]
    fn too_short_is_an_error() {
        assert!(matches!(
            PrimaryHeader::unpack(&[0u8; 4]),
            Err(CodecError::HeaderTooShort(4))
        ));
    }

    #[test]
    fn total_length_invariant() {
        let header = PrimaryHeader {
            version: 0,
            packet_type: PacketType::Telecommand,
            secondary_header_flag: true,
            apid: 100,
            sequence_flags: SequenceFlags::Standalone,
            sequence_count: 0,
            packet_data_length: 5,
        };
        assert_eq!(header.total_length(), 6 + 5 + 1);
    }
}
