//! High-level command factory (C16): the ground-segment-facing API that
//! assembles correctly-framed telecommands without callers touching
//! service/subtype numbers directly, and keeps a bounded history of what
//! it has sent.

use crate::codec::encoder::{TcEncoder, TcPacketConfig};
use crate::codec::pus::HkStructureId;
use crate::error::CodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacecraftMode {
    Safe = 0,
    Idle = 1,
    Nominal = 2,
    Science = 3,
    Downlink = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentCommand {
    pub sequence_count: u16,
    pub service: u8,
    pub subtype: u8,
}

const HISTORY_CAPACITY: usize = 64;

pub struct CommandBuilder {
    encoder: TcEncoder,
    history: heapless::Deque<SentCommand, HISTORY_CAPACITY>,
}

impl CommandBuilder {
    pub fn new(config: TcPacketConfig) -> Self {
        CommandBuilder { encoder: TcEncoder::new(config), history: heapless::Deque::new() }
    }

    fn record(&mut self, sequence_count: u16, service: u8, subtype: u8) {
        if self.history.is_full() {
            let _ = self.history.pop_front();
        }
        let _ = self.history.push_back(SentCommand { sequence_count, service, subtype });
    }

    fn build(
        &mut self,
        service: u8,
        subtype: u8,
        app_data: &[u8],
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        let packet = self.encoder.encode(service, subtype, app_data)?;
        let header = crate::codec::header::PrimaryHeader::unpack(&packet)?;
        self.record(header.sequence_count, service, subtype);
        Ok(packet)
    }

    pub fn ping(&mut self) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        self.build(17, 1, &[])
    }

    pub fn mode_change(
        &mut self,
        mode: SpacecraftMode,
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        self.build(200, 1, &[mode as u8])
    }

    pub fn enable_housekeeping(
        &mut self,
        hk: HkStructureId,
        interval_ms: u32,
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        let mut body = [0u8; 6];
        body[0..2].copy_from_slice(&hk.to_u16().to_be_bytes());
        body[2..6].copy_from_slice(&interval_ms.to_be_bytes());
        self.build(3, 5, &body)
    }

    pub fn disable_housekeeping(
        &mut self,
        hk: HkStructureId,
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        self.build(3, 6, &hk.to_u16().to_be_bytes())
    }

    pub fn time_sync(
        &mut self,
        seconds: u32,
        subseconds: u16,
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        let mut body = [0u8; 6];
        body[0..4].copy_from_slice(&seconds.to_be_bytes());
        body[4..6].copy_from_slice(&subseconds.to_be_bytes());
        self.build(9, 1, &body)
    }

    pub fn reset(
        &mut self,
        reset_type: u8,
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        self.build(8, 1, &[reset_type])
    }

    pub fn memory_read(
        &mut self,
        address: u32,
        length: u16,
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        let mut body = [0u8; 6];
        body[0..4].copy_from_slice(&address.to_be_bytes());
        body[4..6].copy_from_slice(&length.to_be_bytes());
        self.build(6, 5, &body)
    }

    pub fn raw(
        &mut self,
        service: u8,
        subtype: u8,
        app_data: &[u8],
    ) -> Result<heapless::Vec<u8, { crate::codec::encoder::MAX_PACKET_DATA_FIELD }>, CodecError> {
        self.build(service, subtype, app_data)
    }

    pub fn history(&self) -> impl Iterator<Item = &SentCommand> {
        self.history.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_records_itself_in_history() {
        let mut builder = CommandBuilder::new(TcPacketConfig::default());
        builder.ping().unwrap();
        builder.ping().unwrap();
        let entries: heapless::Vec<SentCommand, 8> = builder.history().copied().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sequence_count, 0);
        assert_eq!(entries[1].sequence_count, 1);
    }

    #[test]
    fn mode_change_encodes_the_requested_mode_byte() {
        let mut builder = CommandBuilder::new(TcPacketConfig::default());
        let packet = builder.mode_change(SpacecraftMode::Safe).unwrap();
        let header = crate::codec::header::PrimaryHeader::unpack(&packet).unwrap();
        let secondary_start = 6;
        let mode_byte = packet[secondary_start + 4];
        assert_eq!(mode_byte, SpacecraftMode::Safe as u8);
        assert_eq!(header.packet_data_length as usize + 7, packet.len());
    }
}
