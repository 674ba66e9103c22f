//! PUS secondary headers and the closed service/subtype dispatch enum (C7).
//!
//! Dispatch is a tagged enum, never a runtime table: one variant per
//! catalogued `(service, subtype)`, plus `Raw` for anything uncatalogued.

use crate::error::CodecError;

pub const TC_SECONDARY_HEADER_LEN: usize = 4;
pub const TM_SECONDARY_HEADER_LEN: usize = 10;
pub const PUS_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcSecondaryHeader {
    pub version: u8,
    pub ack_flags: u8,
    pub service: u8,
    pub subtype: u8,
    pub source_id: u8,
}

impl TcSecondaryHeader {
    pub fn pack(&self) -> [u8; TC_SECONDARY_HEADER_LEN] {
        [
            ((self.version & 0x0F) << 4) | (self.ack_flags & 0x0F),
            self.service,
            self.subtype,
            self.source_id,
        ]
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < TC_SECONDARY_HEADER_LEN {
            return Err(CodecError::SecondaryHeaderTooShort(TC_SECONDARY_HEADER_LEN));
        }
        Ok(TcSecondaryHeader {
            version: (bytes[0] >> 4) & 0x0F,
            ack_flags: bytes[0] & 0x0F,
            service: bytes[1],
            subtype: bytes[2],
            source_id: bytes[3],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TmSecondaryHeader {
    pub version: u8,
    pub service: u8,
    pub subtype: u8,
    pub destination_id: u8,
    pub seconds: u32,
    pub subseconds: u16,
}

impl TmSecondaryHeader {
    pub fn pack(&self) -> [u8; TM_SECONDARY_HEADER_LEN] {
        let mut out = [0u8; TM_SECONDARY_HEADER_LEN];
        out[0] = (self.version & 0x0F) << 4;
        out[1] = self.service;
        out[2] = self.subtype;
        out[3] = self.destination_id;
        out[4..8].copy_from_slice(&self.seconds.to_be_bytes());
        out[8..10].copy_from_slice(&self.subseconds.to_be_bytes());
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < TM_SECONDARY_HEADER_LEN {
            return Err(CodecError::SecondaryHeaderTooShort(TM_SECONDARY_HEADER_LEN));
        }
        Ok(TmSecondaryHeader {
            version: (bytes[0] >> 4) & 0x0F,
            service: bytes[1],
            subtype: bytes[2],
            destination_id: bytes[3],
            seconds: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            subseconds: u16::from_be_bytes([bytes[8], bytes[9]]),
        })
    }
}

/// Housekeeping structure identifiers (§6). SYSTEM/ADCS are produced by
/// this crate's own simulator telemetry; POWER/COMMS/THERMAL are decoded
/// because the ground-segment codec must understand bus traffic from
/// subsystems this crate does not itself simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HkStructureId {
    System,
    Power,
    Adcs,
    Comms,
    Thermal,
    Payload,
    Unknown(u16),
}

impl HkStructureId {
    pub fn from_u16(v: u16) -> Self {
        match v {
            0x0001 => HkStructureId::System,
            0x0002 => HkStructureId::Power,
            0x0003 => HkStructureId::Adcs,
            0x0004 => HkStructureId::Comms,
            0x0005 => HkStructureId::Thermal,
            0x0006 => HkStructureId::Payload,
            other => HkStructureId::Unknown(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            HkStructureId::System => 0x0001,
            HkStructureId::Power => 0x0002,
            HkStructureId::Adcs => 0x0003,
            HkStructureId::Comms => 0x0004,
            HkStructureId::Thermal => 0x0005,
            HkStructureId::Payload => 0x0006,
            HkStructureId::Unknown(v) => v,
        }
    }
}

/// System housekeeping report body, matching the §8 concrete test vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemHk {
    pub mode: u8,
    pub uptime_s: u32,
    pub reset_count: u16,
    pub last_reset_reason: u8,
    pub cpu_usage_percent: u8,
    pub memory_used_bytes: u32,
}

impl SystemHk {
    const LEN: usize = 13;

    fn parse(body: &[u8]) -> Result<Self, CodecError> {
        if body.len() < Self::LEN {
            return Err(CodecError::FieldUnderflow {
                service: 3,
                subtype: 25,
                need: Self::LEN,
                have: body.len(),
            });
        }
        Ok(SystemHk {
            mode: body[0],
            uptime_s: u32::from_be_bytes([body[1], body[2], body[3], body[4]]),
            reset_count: u16::from_be_bytes([body[5], body[6]]),
            last_reset_reason: body[7],
            cpu_usage_percent: body[8],
            memory_used_bytes: u32::from_be_bytes([body[9], body[10], body[11], body[12]]),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    pub event_id: u16,
    pub severity: u8,
    pub onboard_time: u32,
    pub data: heapless::Vec<u8, 64>,
}

/// The closed dispatch enum for decoded PUS payloads (C7). Every
/// catalogued service/subtype in §6 has a variant; anything else falls
/// back to `Raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum PusPayload {
    EnableHousekeeping { hk_id: u16, interval_ms: u32 },
    DisableHousekeeping { hk_id: u16 },
    HousekeepingReport { hk_id: u16, system: Option<SystemHk> },
    Event(EventReport),
    MemoryRead { address: u32, length: u16 },
    Reset { reset_type: u8 },
    TimeSync { seconds: u32, subseconds: u16 },
    Ping,
    ModeChange { mode: u8 },
    Raw { service: u8, subtype: u8, bytes: heapless::Vec<u8, 256> },
}

pub fn decode_payload(service: u8, subtype: u8, body: &[u8]) -> Result<PusPayload, CodecError> {
    match (service, subtype) {
        (3, 5) => {
            if body.len() < 6 {
                return Err(CodecError::FieldUnderflow { service, subtype, need: 6, have: body.len() });
            }
            Ok(PusPayload::EnableHousekeeping {
                hk_id: u16::from_be_bytes([body[0], body[1]]),
                interval_ms: u32::from_be_bytes([body[2], body[3], body[4], body[5]]),
            })
        }
        (3, 6) => {
            if body.len() < 2 {
                return Err(CodecError::FieldUnderflow { service, subtype, need: 2, have: body.len() });
            }
            Ok(PusPayload::DisableHousekeeping { hk_id: u16::from_be_bytes([body[0], body[1]]) })
        }
        (3, 25) => {
            if body.len() < 2 {
                return Err(CodecError::FieldUnderflow { service, subtype, need: 2, have: body.len() });
            }
            let hk_id = u16::from_be_bytes([body[0], body[1]]);
            let system = if HkStructureId::from_u16(hk_id) == HkStructureId::System {
                Some(SystemHk::parse(&body[2..])?)
            } else {
                None
            };
            Ok(PusPayload::HousekeepingReport { hk_id, system })
        }
        (5, _) => {
            if body.len() < 7 {
                return Err(CodecError::FieldUnderflow { service, subtype, need: 7, have: body.len() });
            }
            let mut data = heapless::Vec::new();
            let _ = data.extend_from_slice(&body[7..body.len().min(7 + 64)]);
            Ok(PusPayload::Event(EventReport {
                event_id: u16::from_be_bytes([body[0], body[1]]),
                severity: body[2],
                onboard_time: u32::from_be_bytes([body[3], body[4], body[5], body[6]]),
                data,
            }))
        }
        (6, 5) => {
            if body.len() < 6 {
                return Err(CodecError::FieldUnderflow { service, subtype, need: 6, have: body.len() });
            }
            Ok(PusPayload::MemoryRead {
                address: u32::from_be_bytes([body[0], body[1], body[2], body[3]]),
                length: u16::from_be_bytes([body[4], body[5]]),
            })
        }
        (8, 1) => {
            let reset_type = body.first().copied().unwrap_or(0);
            Ok(PusPayload::Reset { reset_type })
        }
        (9, 1) => {
            if body.len() < 6 {
                return Err(CodecError::FieldUnderflow { service, subtype, need: 6, have: body.len() });
            }
            Ok(PusPayload::TimeSync {
                seconds: u32::from_be_bytes([body[0], body[1], body[2], body[3]]),
                subseconds: u16::from_be_bytes([body[4], body[5]]),
            })
        }
        (17, 1) => Ok(PusPayload::Ping),
        (200, 1) => {
            let mode = body.first().copied().unwrap_or(0);
            Ok(PusPayload::ModeChange { mode })
        }
        _ => {
            let mut bytes = heapless::Vec::new();
            let _ = bytes.extend_from_slice(&body[..body.len().min(256)]);
            Ok(PusPayload::Raw { service, subtype, bytes })
        }
    }
}
