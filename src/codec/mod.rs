//! CCSDS/PUS packet codec: primary header framing, PUS secondary headers,
//! CRC-16 integrity, a streaming resynchronizing decoder, and a high-level
//! command factory on top.

pub mod command_builder;
pub mod crc;
pub mod decoder;
pub mod encoder;
pub mod header;
pub mod pus;

pub use command_builder::{CommandBuilder, SentCommand, SpacecraftMode};
pub use decoder::{DecodedPacket, DecoderStats, StreamDecoder, SyncMode};
pub use encoder::{TcEncoder, TcPacketConfig};
pub use header::{PacketType, PrimaryHeader, SequenceFlags};
pub use pus::{decode_payload, HkStructureId, PusPayload, TcSecondaryHeader, TmSecondaryHeader};
