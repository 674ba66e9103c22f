//! Streaming telemetry decoder (C6) with resynchronization: feed it bytes
//! as they arrive off the radio, pull complete, CRC-verified packets back.
//!
//! On a CRC mismatch the decoder does not give up on the whole buffer; it
//! drops a single byte and retries the search for the next sync pattern,
//! the same recovery strategy a corrupted live downlink needs.

use heapless::Deque;
use tracing::warn;

use crate::codec::crc::crc16_ccitt_false;
use crate::codec::header::{PrimaryHeader, PRIMARY_HEADER_LEN, SYNC_PATTERN};
use crate::error::CodecError;

pub const MAX_BUFFERED_BYTES: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    pub header: PrimaryHeader,
    pub body: heapless::Vec<u8, 4096>,
}

/// Public counters updated on every decode attempt (§7): never bubbled as
/// errors themselves, but the means by which a caller notices a noisy
/// downlink without having to thread error values through `drain()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub crc_mismatches: u32,
    pub framing_errors: u32,
    pub apid_mismatches: u32,
}

/// Whether the decoder requires the 4-byte sync pattern before each packet
/// or parses bare CCSDS frames. Ground-link framing over a noisy RF channel
/// needs sync; a reliable byte stream (e.g. a TCP socket) does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Required,
    Optional,
}

pub struct StreamDecoder {
    buffer: Deque<u8, MAX_BUFFERED_BYTES>,
    sync_mode: SyncMode,
    apid_filter: Option<heapless::Vec<u16, 16>>,
    stats: DecoderStats,
}

impl StreamDecoder {
    pub fn new(sync_mode: SyncMode) -> Self {
        StreamDecoder { buffer: Deque::new(), sync_mode, apid_filter: None, stats: DecoderStats::default() }
    }

    pub fn get_stats(&self) -> &DecoderStats {
        &self.stats
    }

    pub fn with_apid_filter(mut self, apids: &[u16]) -> Self {
        let mut v = heapless::Vec::new();
        for &apid in apids {
            let _ = v.push(apid);
        }
        self.apid_filter = Some(v);
        self
    }

    /// Appends incoming bytes to the internal buffer. Bytes beyond
    /// capacity are dropped from the front to make room, mirroring a
    /// bounded ring buffer over an unbounded radio stream.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.buffer.is_full() {
                let _ = self.buffer.pop_front();
            }
            let _ = self.buffer.push_back(b);
        }
    }

    /// Pulls as many complete, verified packets out of the buffer as
    /// currently available, leaving any trailing partial packet buffered.
    pub fn drain(&mut self) -> heapless::Vec<DecodedPacket, 32> {
        let mut out = heapless::Vec::new();
        while let Some(packet) = self.try_decode_one() {
            if out.push(packet).is_err() {
                break;
            }
        }
        out
    }

    fn snapshot(&self) -> heapless::Vec<u8, MAX_BUFFERED_BYTES> {
        let mut v = heapless::Vec::new();
        for &b in self.buffer.iter() {
            let _ = v.push(b);
        }
        v
    }

    fn drop_front(&mut self, n: usize) {
        for _ in 0..n {
            if self.buffer.pop_front().is_none() {
                break;
            }
        }
    }

    fn find_sync(&self, data: &[u8]) -> Option<usize> {
        if data.len() < SYNC_PATTERN.len() {
            return None;
        }
        data.windows(SYNC_PATTERN.len()).position(|w| w == SYNC_PATTERN)
    }

    fn try_decode_one(&mut self) -> Option<DecodedPacket> {
        loop {
            let data = self.snapshot();

            let frame_start = match self.sync_mode {
                SyncMode::Required => {
                    let pos = self.find_sync(&data)?;
                    if pos > 0 {
                        self.drop_front(pos);
                    }
                    SYNC_PATTERN.len()
                }
                SyncMode::Optional => 0,
            };

            let data = self.snapshot();
            if data.len() < frame_start + PRIMARY_HEADER_LEN {
                return None;
            }
            let header = match PrimaryHeader::unpack(&data[frame_start..]) {
                Ok(h) => h,
                Err(_) => {
                    self.stats.framing_errors += 1;
                    self.drop_front(1);
                    continue;
                }
            };

            let total = header.total_length();
            if data.len() < frame_start + total {
                return None;
            }

            if let Some(filter) = &self.apid_filter {
                if !filter.contains(&header.apid) {
                    self.stats.apid_mismatches += 1;
                    self.drop_front(frame_start + total);
                    continue;
                }
            }

            let frame = &data[frame_start..frame_start + total];
            let body = &frame[PRIMARY_HEADER_LEN..total - 2];
            let expected = u16::from_be_bytes([frame[total - 2], frame[total - 1]]);
            let actual = crc16_ccitt_false(&frame[..total - 2]);

            if expected != actual {
                self.stats.crc_mismatches += 1;
                warn!(apid = header.apid, expected, actual, "CRC mismatch, resynchronising");
                self.drop_front(frame_start + 1);
                continue;
            }

            self.drop_front(frame_start + total);

            let mut body_vec = heapless::Vec::new();
            let _ = body_vec.extend_from_slice(body);
            return Some(DecodedPacket { header, body: body_vec });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoder::{TcEncoder, TcPacketConfig};

    #[test]
    fn decodes_one_packet_with_sync_prefix() {
        let mut encoder =
            TcEncoder::new(TcPacketConfig { apid: 100, source_id: 0, ack_flags: 0 }).with_sync_prefix(true);
        let encoded = encoder.encode(17, 1, &[]).unwrap();

        let mut decoder = StreamDecoder::new(SyncMode::Required);
        decoder.feed(&encoded);
        let packets = decoder.drain();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].header.apid, 100);
        assert_eq!(packets[0].body.len(), 4);
    }

    #[test]
    fn recovers_from_a_single_byte_of_garbage_before_sync() {
        let mut encoder =
            TcEncoder::new(TcPacketConfig::default()).with_sync_prefix(true);
        let encoded = encoder.encode(17, 1, &[]).unwrap();

        let mut decoder = StreamDecoder::new(SyncMode::Required);
        decoder.feed(&[0xAA]);
        decoder.feed(&encoded);
        let packets = decoder.drain();
        assert_eq!(packets.len(), 1);
    }

    #[test]
    fn corrupted_crc_is_dropped_and_resync_continues() {
        let mut encoder = TcEncoder::new(TcPacketConfig::default()).with_sync_prefix(true);
        let mut first = encoder.encode(17, 1, &[]).unwrap();
        let second = encoder.encode(17, 1, &[]).unwrap();

        let last = first.len() - 1;
        first[last] ^= 0xFF;

        let mut decoder = StreamDecoder::new(SyncMode::Required);
        decoder.feed(&first);
        decoder.feed(&second);
        let packets = decoder.drain();
        assert_eq!(packets.len(), 1);
        assert_eq!(decoder.get_stats().crc_mismatches, 1);
    }

    #[test]
    fn apid_filter_drops_unwanted_packets() {
        let mut encoder = TcEncoder::new(TcPacketConfig { apid: 200, source_id: 0, ack_flags: 0 })
            .with_sync_prefix(true);
        let encoded = encoder.encode(17, 1, &[]).unwrap();

        let mut decoder = StreamDecoder::new(SyncMode::Required).with_apid_filter(&[100]);
        decoder.feed(&encoded);
        let packets = decoder.drain();
        assert!(packets.is_empty());
        assert_eq!(decoder.get_stats().apid_mismatches, 1);
        assert_eq!(decoder.get_stats().crc_mismatches, 0);
    }

    #[test]
    fn apid_mismatch_is_checked_before_crc_so_a_corrupt_unwanted_packet_is_not_counted_as_a_crc_error() {
        let mut encoder = TcEncoder::new(TcPacketConfig { apid: 200, source_id: 0, ack_flags: 0 })
            .with_sync_prefix(true);
        let mut encoded = encoder.encode(17, 1, &[]).unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut decoder = StreamDecoder::new(SyncMode::Required).with_apid_filter(&[100]);
        decoder.feed(&encoded);
        assert!(decoder.drain().is_empty());
        assert_eq!(decoder.get_stats().apid_mismatches, 1);
        assert_eq!(decoder.get_stats().crc_mismatches, 0);
    }
}
