use std::io::{self, Read};
use std::iter::FusedIterator;

use byteorder::{BigEndian, ByteOrder};

use ts::{TsHeader, TsPacket};
use {Error, ErrorKind, Result};

/// The `ReadTsPacket` trait allows for reading TS packets from a source.
pub trait ReadTsPacket {
    /// Reads a TS packet.
    ///
    /// If the end of the stream is reached at a packet boundary, it will return `Ok(None)`.
    /// Once an error has been returned, every later call returns `Ok(None)`.
    fn read_ts_packet(&mut self) -> Result<Option<TsPacket>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingHeader,
    EndOfInput,
    Failed,
}

/// TS packet reader.
///
/// Frames the byte stream into 188-byte packets, one packet at a time and in stream order.
/// The reader owns `stream`, so dropping the reader releases it.
#[derive(Debug)]
pub struct TsPacketReader<R> {
    stream: R,
    state: State,
    offset: u64,
    packet_count: u64,
}
impl<R: Read> TsPacketReader<R> {
    /// Makes a new `TsPacketReader` instance.
    pub fn new(stream: R) -> Self {
        TsPacketReader {
            stream,
            state: State::AwaitingHeader,
            offset: 0,
            packet_count: 0,
        }
    }

    /// Returns a reference to the underlaying byte stream.
    pub fn stream(&self) -> &R {
        &self.stream
    }

    /// Converts `TsPacketReader` into the underlaying byte stream `R`.
    pub fn into_stream(self) -> R {
        self.stream
    }

    /// Returns the number of bytes consumed from the stream so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of packets read so far.
    pub fn packet_count(&self) -> u64 {
        self.packet_count
    }

    /// Converts `TsPacketReader` into an iterator over the remaining packets.
    pub fn packets(self) -> TsPackets<R> {
        TsPackets { reader: self }
    }

    /// Fills `buf` unless the stream ends first, returning the number of bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.offset += filled as u64;
                    return Err(track!(Error::from(e)));
                }
            }
        }
        self.offset += filled as u64;
        Ok(filled)
    }

    fn read_next_packet(&mut self) -> Result<Option<TsPacket>> {
        let packet_offset = self.offset;

        let mut header_bytes = [0; TsPacket::HEADER_SIZE];
        let size = track!(self.fill(&mut header_bytes))?;
        if size == 0 {
            return Ok(None);
        }
        track_assert_eq!(
            size,
            TsPacket::HEADER_SIZE,
            ErrorKind::TruncatedPacket,
            "offset={}",
            packet_offset
        );
        let header = track!(
            TsHeader::from_u32(BigEndian::read_u32(&header_bytes)),
            "offset={}",
            packet_offset
        )?;

        let mut data = vec![0; TsPacket::DATA_SIZE];
        let size = track!(self.fill(&mut data))?;
        track_assert_eq!(
            size,
            TsPacket::DATA_SIZE,
            ErrorKind::TruncatedPacket,
            "offset={}, pid={:#X}",
            packet_offset,
            header.pid.as_u16()
        );

        log::trace!(
            "TS packet: offset={}, pid={:#X}, cc={}",
            packet_offset,
            header.pid.as_u16(),
            header.continuity_counter.as_u8()
        );
        self.packet_count += 1;
        Ok(Some(TsPacket { header, data }))
    }
}
impl<R: Read> ReadTsPacket for TsPacketReader<R> {
    fn read_ts_packet(&mut self) -> Result<Option<TsPacket>> {
        if self.state != State::AwaitingHeader {
            return Ok(None);
        }
        match self.read_next_packet() {
            Ok(Some(packet)) => Ok(Some(packet)),
            Ok(None) => {
                log::debug!("End of input: packets={}", self.packet_count);
                self.state = State::EndOfInput;
                Ok(None)
            }
            Err(e) => {
                log::debug!("Framing failed: packets={}, error={}", self.packet_count, e);
                self.state = State::Failed;
                Err(track!(e))
            }
        }
    }
}

/// Lazy sequence of TS packets.
///
/// Yields `Ok` for each framed packet and at most one `Err`, after which it is exhausted.
///
/// This is created by [`TsPacketReader::packets`] or [`ts::parse`].
///
/// [`TsPacketReader::packets`]: struct.TsPacketReader.html#method.packets
/// [`ts::parse`]: fn.parse.html
#[derive(Debug)]
pub struct TsPackets<R> {
    reader: TsPacketReader<R>,
}
impl<R> TsPackets<R> {
    /// Returns a reference to the underlaying reader.
    pub fn reader(&self) -> &TsPacketReader<R> {
        &self.reader
    }

    /// Converts `TsPackets` into the underlaying reader.
    pub fn into_reader(self) -> TsPacketReader<R> {
        self.reader
    }
}
impl<R: Read> Iterator for TsPackets<R> {
    type Item = Result<TsPacket>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_ts_packet() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
impl<R: Read> FusedIterator for TsPackets<R> {}
