//! Telecommand encoding (C5): assembles a primary header, PUS TC secondary
//! header, payload, and trailing CRC-16 into a wire-ready packet.

use crate::codec::crc::crc16_ccitt_false;
use crate::codec::header::{PacketType, PrimaryHeader, SequenceFlags, SYNC_PATTERN};
use crate::codec::pus::{TcSecondaryHeader, PUS_VERSION};
use crate::error::CodecError;

pub const MAX_PACKET_DATA_FIELD: usize = 4096;

/// Encoder-side defaults for a TC packet. `ack_flags` defaults to 0
/// (no acknowledgements requested) to match ground-segment ping traffic;
/// callers that need acceptance/execution acks set it explicitly.
#[derive(Debug, Clone, Copy)]
pub struct TcPacketConfig {
    pub apid: u16,
    pub source_id: u8,
    pub ack_flags: u8,
}

impl Default for TcPacketConfig {
    fn default() -> Self {
        TcPacketConfig { apid: 100, source_id: 0, ack_flags: 0 }
    }
}

pub struct TcEncoder {
    config: TcPacketConfig,
    sequence_count: u16,
    prefix_sync: bool,
}

impl TcEncoder {
    pub fn new(config: TcPacketConfig) -> Self {
        TcEncoder { config, sequence_count: 0, prefix_sync: false }
    }

    pub fn with_sync_prefix(mut self, enabled: bool) -> Self {
        self.prefix_sync = enabled;
        self
    }

    fn next_sequence_count(&mut self) -> u16 {
        let current = self.sequence_count;
        self.sequence_count = (self.sequence_count + 1) % PrimaryHeader::SEQUENCE_COUNT_MODULUS;
        current
    }

    /// Encodes one telecommand carrying `service`/`subtype` and raw
    /// application data, returning the complete wire-format bytes.
    pub fn encode(
        &mut self,
        service: u8,
        subtype: u8,
        app_data: &[u8],
    ) -> Result<heapless::Vec<u8, MAX_PACKET_DATA_FIELD>, CodecError> {
        let secondary = TcSecondaryHeader {
            version: PUS_VERSION,
            ack_flags: self.config.ack_flags,
            service,
            subtype,
            source_id: self.config.source_id,
        };
        let secondary_bytes = secondary.pack();

        let data_field_len = secondary_bytes.len() + app_data.len() + 2;
        if data_field_len == 0 || data_field_len - 1 > u16::MAX as usize {
            return Err(CodecError::PayloadTooLarge(data_field_len));
        }
        let packet_data_length = (data_field_len - 1) as u16;

        let header = PrimaryHeader {
            version: 0,
            packet_type: PacketType::Telecommand,
            secondary_header_flag: true,
            apid: self.config.apid,
            sequence_flags: SequenceFlags::Standalone,
            sequence_count: self.next_sequence_count(),
            packet_data_length,
        };

        let mut out: heapless::Vec<u8, MAX_PACKET_DATA_FIELD> = heapless::Vec::new();
        if self.prefix_sync {
            let _ = out.extend_from_slice(&SYNC_PATTERN);
        }
        let _ = out.extend_from_slice(&header.pack());
        let _ = out.extend_from_slice(&secondary_bytes);
        let _ = out.extend_from_slice(app_data);

        let crc = crc16_ccitt_false(&out[self.sync_offset()..]);
        let _ = out.extend_from_slice(&crc.to_be_bytes());

        if out.len() > MAX_PACKET_DATA_FIELD {
            return Err(CodecError::PayloadTooLarge(out.len()));
        }
        Ok(out)
    }

    fn sync_offset(&self) -> usize {
        if self.prefix_sync { SYNC_PATTERN.len() } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_matches_the_reference_vector() {
        let mut encoder = TcEncoder::new(TcPacketConfig { apid: 100, source_id: 0, ack_flags: 0 });
        let encoded = encoder.encode(17, 1, &[]).unwrap();
        assert_eq!(
            &encoded[..],
            &[0x18, 0x64, 0xC0, 0x00, 0x00, 0x05, 0x10, 0x11, 0x01, 0x00, 0x2F, 0xED]
        );
    }

    #[test]
    fn sequence_count_wraps_at_modulus() {
        let mut encoder = TcEncoder::new(TcPacketConfig::default());
        encoder.sequence_count = PrimaryHeader::SEQUENCE_COUNT_MODULUS - 1;
        let first = encoder.encode(17, 1, &[]).unwrap();
        let second = encoder.encode(17, 1, &[]).unwrap();
        let first_header = PrimaryHeader::unpack(&first).unwrap();
        let second_header = PrimaryHeader::unpack(&second).unwrap();
        assert_eq!(first_header.sequence_count, PrimaryHeader::SEQUENCE_COUNT_MODULUS - 1);
        assert_eq!(second_header.sequence_count, 0);
    }

    #[test]
    fn sync_prefix_is_optional_and_excluded_from_crc_input() {
        let mut plain = TcEncoder::new(TcPacketConfig::default());
        let mut synced = TcEncoder::new(TcPacketConfig::default()).with_sync_prefix(true);
        let a = plain.encode(17, 1, &[]).unwrap();
        let b = synced.encode(17, 1, &[]).unwrap();
        assert_eq!(b.len(), a.len() + 4);
        assert_eq!(&b[4..], &a[..]);
    }
}
