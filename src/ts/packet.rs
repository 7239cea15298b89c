use ts::TsHeader;

/// Transport stream packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsPacket {
    #[allow(missing_docs)]
    pub header: TsHeader,

    /// The `DATA_SIZE` bytes that follow the header.
    ///
    /// If the header announces an adaptation field, it occupies the beginning of this area and
    /// the payload proper is the remaining `184 - adaptation_field_length` bytes.
    pub data: Vec<u8>,
}
impl TsPacket {
    /// Size of a TS packet in bytes.
    pub const SIZE: usize = 188;

    /// Size of a TS packet header in bytes.
    pub const HEADER_SIZE: usize = 4;

    /// Size of the area following the header.
    pub const DATA_SIZE: usize = 184;
}
