//! Transport stream.
//!
//! # References
//!
//! - [MPEG transport stream](https://en.wikipedia.org/wiki/MPEG_transport_stream)
use std::io::Read;

pub use self::continuity::{ContinuityChecker, ContinuityStatus};
pub use self::header::{
    AdaptationFieldControl, ContinuityCounter, Pid, TransportScramblingControl, TsHeader,
};
pub use self::packet::TsPacket;
pub use self::reader::{ReadTsPacket, TsPacketReader, TsPackets};
pub use self::writer::{TsPacketWriter, WriteTsPacket};

mod continuity;
mod header;
mod packet;
mod reader;
mod writer;

/// Parses `stream` as a flat sequence of TS packets.
///
/// The returned iterator is lazy and makes a single pass over `stream`, which must be
/// positioned at a packet boundary. It ends with `None` when the input ends at a packet
/// boundary, or after yielding one error (`InvalidSyncByte`, `TruncatedPacket` or
/// `ByteSource`). Dropping it drops `stream`.
pub fn parse<R: Read>(stream: R) -> TsPackets<R> {
    TsPacketReader::new(stream).packets()
}
