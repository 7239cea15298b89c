extern crate tempfile;
extern crate tsframe;

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};

use tsframe::ts::{self, Pid, TsHeader, TsPacket, TsPacketWriter, WriteTsPacket};
use tsframe::ErrorKind;

fn packet(pid: u16, cc: u32) -> TsPacket {
    let raw = (0x47 << 24) | (u32::from(pid) << 8) | 0x10 | (cc & 0xF);
    TsPacket {
        header: TsHeader::from_u32(raw).unwrap(),
        data: (0..TsPacket::DATA_SIZE).map(|i| (i as u8) ^ (cc as u8)).collect(),
    }
}

fn stream(count: usize) -> Vec<u8> {
    let mut writer = TsPacketWriter::new(Vec::new());
    for i in 0..count {
        writer.write_ts_packet(&packet(0x100, i as u32)).unwrap();
    }
    writer.into_stream()
}

fn ts_file(bytes: &[u8]) -> File {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    file
}

#[test]
fn empty_file_yields_nothing() {
    let mut packets = ts::parse(ts_file(&[]));
    assert!(packets.next().is_none());
    assert!(packets.next().is_none());
}

#[test]
fn whole_packets_are_parsed_in_order() {
    let packets = ts::parse(ts_file(&stream(20)))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(packets.len(), 20);
    for (i, p) in packets.iter().enumerate() {
        assert_eq!(*p, packet(0x100, i as u32));
    }
}

#[test]
fn bad_first_byte_yields_no_packets() {
    let mut bytes = stream(3);
    bytes[0] = 0x00;
    let results = ts::parse(ts_file(&bytes)).collect::<Vec<_>>();
    assert_eq!(results.len(), 1);
    let error = results[0].as_ref().err().unwrap();
    assert_eq!(*error.kind(), ErrorKind::InvalidSyncByte);
}

#[test]
fn misaligned_packet_stops_the_pass() {
    let mut bytes = stream(4);
    bytes.insert(2 * TsPacket::SIZE, 0xFF);
    let results = ts::parse(&bytes[..]).collect::<Vec<_>>();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    let error = results[2].as_ref().err().unwrap();
    assert_eq!(*error.kind(), ErrorKind::InvalidSyncByte);
}

#[test]
fn trailing_partial_packet_is_reported() {
    let extra = stream(1);
    for &k in &[1, 3, 4, 5, 100, 187] {
        let mut bytes = stream(5);
        bytes.extend_from_slice(&extra[..k]);
        let results = ts::parse(ts_file(&bytes)).collect::<Vec<_>>();

        assert_eq!(results.len(), 6, "k={}", k);
        assert!(results[..5].iter().all(|r| r.is_ok()), "k={}", k);
        let error = results[5].as_ref().err().unwrap();
        assert_eq!(*error.kind(), ErrorKind::TruncatedPacket, "k={}", k);
    }
}

#[test]
fn early_stop_reads_no_further_than_the_last_packet() {
    let mut packets = ts::parse(ts_file(&stream(10)));
    let first = packets.next().unwrap().unwrap();
    assert_eq!(first.header.pid.as_u16(), 0x100);

    let reader = packets.into_reader();
    assert_eq!(reader.offset(), TsPacket::SIZE as u64);
    assert_eq!(reader.packet_count(), 1);

    let mut file = reader.into_stream();
    assert_eq!(
        file.seek(SeekFrom::Current(0)).unwrap(),
        TsPacket::SIZE as u64
    );
}

#[test]
fn null_packets_are_framed_like_any_other() {
    let mut writer = TsPacketWriter::new(Vec::new());
    writer.write_ts_packet(&packet(Pid::PAT, 0)).unwrap();
    writer.write_ts_packet(&packet(Pid::NULL, 0)).unwrap();
    let packets = ts::parse(&writer.into_stream()[..])
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(packets[0].header.pid.is_pat());
    assert!(packets[1].header.pid.is_null());
}
