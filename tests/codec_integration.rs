//! End-to-end codec coverage: command builder output goes over a
//! streaming decoder and comes back out the other side as a dispatched
//! `PusPayload`, the way a real ground station and a real bus would
//! exchange a handful of distinct command kinds.

use cubesat_groundlink::codec::{
    decode_payload, CommandBuilder, HkStructureId, PusPayload, StreamDecoder, SyncMode,
    TcPacketConfig,
};

#[test]
fn ping_round_trips_through_the_full_pipeline() {
    let mut builder = CommandBuilder::new(TcPacketConfig::default());
    let wire = builder.ping().unwrap();

    let mut decoder = StreamDecoder::new(SyncMode::Optional);
    decoder.feed(&wire);
    let packets = decoder.drain();
    assert_eq!(packets.len(), 1);

    let body = &packets[0].body;
    let secondary = cubesat_groundlink::codec::TcSecondaryHeader::unpack(body).unwrap();
    let app_data = &body[4..];
    let payload = decode_payload(secondary.service, secondary.subtype, app_data).unwrap();
    assert_eq!(payload, PusPayload::Ping);
}

#[test]
fn mode_change_round_trips_with_the_commanded_mode_preserved() {
    use cubesat_groundlink::codec::SpacecraftMode;

    let mut builder = CommandBuilder::new(TcPacketConfig::default());
    let wire = builder.mode_change(SpacecraftMode::Science).unwrap();

    let mut decoder = StreamDecoder::new(SyncMode::Optional);
    decoder.feed(&wire);
    let packets = decoder.drain();
    let body = &packets[0].body;
    let secondary = cubesat_groundlink::codec::TcSecondaryHeader::unpack(body).unwrap();
    let payload = decode_payload(secondary.service, secondary.subtype, &body[4..]).unwrap();
    assert_eq!(payload, PusPayload::ModeChange { mode: SpacecraftMode::Science as u8 });
}

#[test]
fn enable_housekeeping_round_trips_with_structure_id_and_interval_preserved() {
    let mut builder = CommandBuilder::new(TcPacketConfig::default());
    let wire = builder.enable_housekeeping(HkStructureId::Adcs, 500).unwrap();

    let mut decoder = StreamDecoder::new(SyncMode::Optional);
    decoder.feed(&wire);
    let packets = decoder.drain();
    let body = &packets[0].body;
    let secondary = cubesat_groundlink::codec::TcSecondaryHeader::unpack(body).unwrap();
    let payload = decode_payload(secondary.service, secondary.subtype, &body[4..]).unwrap();
    match payload {
        PusPayload::EnableHousekeeping { hk_id, interval_ms } => {
            assert_eq!(HkStructureId::from_u16(hk_id), HkStructureId::Adcs);
            assert_eq!(interval_ms, 500);
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn a_multi_packet_stream_with_sync_prefixes_decodes_in_order() {
    let mut encoder_a = cubesat_groundlink::codec::TcEncoder::new(TcPacketConfig { apid: 10, source_id: 0, ack_flags: 0 })
        .with_sync_prefix(true);
    let mut encoder_b = cubesat_groundlink::codec::TcEncoder::new(TcPacketConfig { apid: 20, source_id: 0, ack_flags: 0 })
        .with_sync_prefix(true);

    let first = encoder_a.encode(17, 1, &[]).unwrap();
    let second = encoder_b.encode(8, 1, &[3]).unwrap();

    let mut stream = heapless::Vec::<u8, 64>::new();
    let _ = stream.extend_from_slice(&first);
    let _ = stream.extend_from_slice(&second);

    let mut decoder = StreamDecoder::new(SyncMode::Required);
    decoder.feed(&stream);
    let packets = decoder.drain();

    assert_eq!(packets.len(), 2);
    assert_eq!(packets[0].header.apid, 10);
    assert_eq!(packets[1].header.apid, 20);

    let second_payload = decode_payload(8, 1, &packets[1].body).unwrap();
    assert_eq!(second_payload, PusPayload::Reset { reset_type: 3 });
}

#[test]
fn the_full_tm_hk_report_wire_vector_decodes_through_the_stream_decoder() {
    use cubesat_groundlink::codec::crc::crc16_ccitt_false;
    use cubesat_groundlink::codec::pus::SystemHk;
    use cubesat_groundlink::codec::{PacketType, PrimaryHeader, SequenceFlags, TmSecondaryHeader};

    // The SYSTEM housekeeping body a real bus would downlink: hk_id=1
    // followed by the §6 SystemHk vector (mode=2, uptime=3600s,
    // reset_count=5, last_reset_reason=0, cpu=25%, mem=102400 bytes),
    // plus three reserved trailing bytes the structure doesn't cover.
    let body: [u8; 18] = [
        0x00, 0x01, // hk_id = 0x0001 (SYSTEM)
        0x02, 0x00, 0x00, 0x0E, 0x10, 0x00, 0x05, 0x00, 0x19, 0x00, 0x01, 0x90, 0x00, 0x00, 0x00,
        0x00,
    ];

    let secondary = TmSecondaryHeader { version: 1, service: 3, subtype: 25, destination_id: 0, seconds: 0, subseconds: 0 };
    let secondary_bytes = secondary.pack();

    let data_field_len = secondary_bytes.len() + body.len() + 2;
    let header = PrimaryHeader {
        version: 0,
        packet_type: PacketType::Telemetry,
        secondary_header_flag: true,
        apid: 100,
        sequence_flags: SequenceFlags::Standalone,
        sequence_count: 1,
        packet_data_length: (data_field_len - 1) as u16,
    };

    let mut wire = heapless::Vec::<u8, 64>::new();
    let _ = wire.extend_from_slice(&header.pack());
    let _ = wire.extend_from_slice(&secondary_bytes);
    let _ = wire.extend_from_slice(&body);
    let crc = crc16_ccitt_false(&wire);
    let _ = wire.extend_from_slice(&crc.to_be_bytes());

    let mut decoder = StreamDecoder::new(SyncMode::Optional);
    decoder.feed(&wire);
    let packets = decoder.drain();
    assert_eq!(packets.len(), 1, "the assembled packet must pass CRC and come back out of the decoder");
    assert_eq!(packets[0].header.apid, 100);
    assert_eq!(packets[0].header.sequence_count, 1);

    let decoded_secondary = TmSecondaryHeader::unpack(&packets[0].body).unwrap();
    assert_eq!(decoded_secondary.service, 3);
    assert_eq!(decoded_secondary.subtype, 25);

    let app_data = &packets[0].body[10..];
    let payload = decode_payload(decoded_secondary.service, decoded_secondary.subtype, app_data).unwrap();
    match payload {
        PusPayload::HousekeepingReport { hk_id, system: Some(system) } => {
            assert_eq!(HkStructureId::from_u16(hk_id), HkStructureId::System);
            assert_eq!(
                system,
                SystemHk {
                    mode: 2,
                    uptime_s: 3600,
                    reset_count: 5,
                    last_reset_reason: 0,
                    cpu_usage_percent: 25,
                    memory_used_bytes: 102_400,
                }
            );
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}
