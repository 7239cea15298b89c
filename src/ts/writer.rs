use std::io::Write;

use ts::TsPacket;
use {Error, ErrorKind, Result};

/// The `WriteTsPacket` trait allows for writing TS packets to a destination.
pub trait WriteTsPacket {
    /// Writes a TS packet.
    fn write_ts_packet(&mut self, packet: &TsPacket) -> Result<()>;
}

/// TS packet writer.
#[derive(Debug)]
pub struct TsPacketWriter<W> {
    stream: W,
}
impl<W: Write> TsPacketWriter<W> {
    /// Makes a new `TsPacketWriter` instance.
    pub fn new(stream: W) -> Self {
        TsPacketWriter { stream }
    }

    /// Returns a reference to the underlaying byte stream.
    pub fn stream(&self) -> &W {
        &self.stream
    }

    /// Converts `TsPacketWriter` into the underlaying byte stream `W`.
    pub fn into_stream(self) -> W {
        self.stream
    }
}
impl<W: Write> WriteTsPacket for TsPacketWriter<W> {
    fn write_ts_packet(&mut self, packet: &TsPacket) -> Result<()> {
        track_assert_eq!(
            packet.data.len(),
            TsPacket::DATA_SIZE,
            ErrorKind::InvalidInput
        );
        track!(packet.header.write_to(&mut self.stream))?;
        track!(self.stream.write_all(&packet.data).map_err(Error::from))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ts::TsHeader;

    #[test]
    fn writes_header_then_data() {
        let packet = TsPacket {
            header: TsHeader::from_u32(0x4740_1114).unwrap(),
            data: vec![0xFF; TsPacket::DATA_SIZE],
        };
        let mut writer = TsPacketWriter::new(Vec::new());
        writer.write_ts_packet(&packet).unwrap();

        let bytes = writer.into_stream();
        assert_eq!(bytes.len(), TsPacket::SIZE);
        assert_eq!(&bytes[..4], &[0x47, 0x40, 0x11, 0x14]);
        assert!(bytes[4..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn rejects_short_data() {
        let packet = TsPacket {
            header: TsHeader::from_u32(0x4700_0010).unwrap(),
            data: vec![0; 10],
        };
        let mut writer = TsPacketWriter::new(Vec::new());
        let error = writer.write_ts_packet(&packet).err().unwrap();
        assert_eq!(*error.kind(), ErrorKind::InvalidInput);
        assert!(writer.stream().is_empty());
    }
}
