use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use {Error, ErrorKind, Result};

const SHIFT_SYNC_BYTE: u32 = 24;
const SHIFT_TRANSPORT_ERROR_INDICATOR: u32 = 23;
const SHIFT_PAYLOAD_UNIT_START_INDICATOR: u32 = 22;
const SHIFT_TRANSPORT_PRIORITY: u32 = 21;
const SHIFT_PID: u32 = 8;
const SHIFT_TRANSPORT_SCRAMBLING_CONTROL: u32 = 6;
const SHIFT_ADAPTATION_FIELD_CONTROL: u32 = 4;

// 01000111 0 1 0 0000000010001 00 01 0100
const MASK_SYNC_BYTE: u32 = 0xFF << SHIFT_SYNC_BYTE;
const MASK_TRANSPORT_ERROR_INDICATOR: u32 = 0x1 << SHIFT_TRANSPORT_ERROR_INDICATOR;
const MASK_PAYLOAD_UNIT_START_INDICATOR: u32 = 0x1 << SHIFT_PAYLOAD_UNIT_START_INDICATOR;
const MASK_TRANSPORT_PRIORITY: u32 = 0x1 << SHIFT_TRANSPORT_PRIORITY;
const MASK_PID: u32 = 0x1FFF << SHIFT_PID;
const MASK_TRANSPORT_SCRAMBLING_CONTROL: u32 = 0x3 << SHIFT_TRANSPORT_SCRAMBLING_CONTROL;
const MASK_ADAPTATION_FIELD_CONTROL: u32 = 0x3 << SHIFT_ADAPTATION_FIELD_CONTROL;
const MASK_CONTINUITY_COUNTER: u32 = 0xF;

/// TS packet header.
///
/// All bit manipulation of the 32-bit header word happens in [`from_u32`] and [`to_u32`];
/// everything else reads the named fields.
///
/// [`from_u32`]: #method.from_u32
/// [`to_u32`]: #method.to_u32
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TsHeader {
    /// Set if an uncorrectable bit error exists in the packet.
    pub transport_error_indicator: bool,

    /// Set if the payload begins a new PES packet or PSI section.
    pub payload_unit_start_indicator: bool,

    #[allow(missing_docs)]
    pub transport_priority: bool,

    #[allow(missing_docs)]
    pub pid: Pid,

    #[allow(missing_docs)]
    pub transport_scrambling_control: TransportScramblingControl,

    #[allow(missing_docs)]
    pub adaptation_field_control: AdaptationFieldControl,

    #[allow(missing_docs)]
    pub continuity_counter: ContinuityCounter,
}
impl TsHeader {
    /// The value every TS packet starts with.
    pub const SYNC_BYTE: u8 = 0x47;

    /// Returns the sync byte of this header.
    ///
    /// A decoded header always carries `SYNC_BYTE`.
    pub fn sync_byte(&self) -> u8 {
        Self::SYNC_BYTE
    }

    /// Decodes a header from its big-endian 32-bit representation.
    ///
    /// # Errors
    ///
    /// If the top 8 bits are not `0x47`, it will return an `ErrorKind::InvalidSyncByte` error.
    pub fn from_u32(header: u32) -> Result<Self> {
        let sync_byte = ((header & MASK_SYNC_BYTE) >> SHIFT_SYNC_BYTE) as u8;
        track_assert_eq!(
            sync_byte,
            Self::SYNC_BYTE,
            ErrorKind::InvalidSyncByte,
            "header={:#010X}",
            header
        );

        Ok(TsHeader {
            transport_error_indicator: (header & MASK_TRANSPORT_ERROR_INDICATOR) != 0,
            payload_unit_start_indicator: (header & MASK_PAYLOAD_UNIT_START_INDICATOR) != 0,
            transport_priority: (header & MASK_TRANSPORT_PRIORITY) != 0,
            pid: Pid(((header & MASK_PID) >> SHIFT_PID) as u16),
            transport_scrambling_control: TransportScramblingControl::from_u8(
                ((header & MASK_TRANSPORT_SCRAMBLING_CONTROL) >> SHIFT_TRANSPORT_SCRAMBLING_CONTROL)
                    as u8,
            ),
            adaptation_field_control: AdaptationFieldControl::from_u8(
                ((header & MASK_ADAPTATION_FIELD_CONTROL) >> SHIFT_ADAPTATION_FIELD_CONTROL) as u8,
            ),
            continuity_counter: ContinuityCounter((header & MASK_CONTINUITY_COUNTER) as u8),
        })
    }

    /// Encodes this header into its 32-bit representation.
    pub fn to_u32(&self) -> u32 {
        (u32::from(Self::SYNC_BYTE) << SHIFT_SYNC_BYTE)
            | (u32::from(self.transport_error_indicator) << SHIFT_TRANSPORT_ERROR_INDICATOR)
            | (u32::from(self.payload_unit_start_indicator) << SHIFT_PAYLOAD_UNIT_START_INDICATOR)
            | (u32::from(self.transport_priority) << SHIFT_TRANSPORT_PRIORITY)
            | (u32::from(self.pid.as_u16()) << SHIFT_PID)
            | (u32::from(self.transport_scrambling_control.as_u8())
                << SHIFT_TRANSPORT_SCRAMBLING_CONTROL)
            | (u32::from(self.adaptation_field_control.as_u8()) << SHIFT_ADAPTATION_FIELD_CONTROL)
            | u32::from(self.continuity_counter.as_u8())
    }

    /// Writes the 4 header bytes to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        track!(writer
            .write_u32::<BigEndian>(self.to_u32())
            .map_err(Error::from))
    }
}

/// Packet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(u16);
impl Pid {
    /// PID of the program association table.
    pub const PAT: u16 = 0x0000;

    /// PID of the conditional access table.
    pub const CAT: u16 = 0x0001;

    /// PID of null (stuffing) packets.
    pub const NULL: u16 = 0x1FFF;

    /// Maximum value of a 13-bit PID.
    pub const MAX: u16 = 0x1FFF;

    /// Makes a new `Pid` instance.
    ///
    /// # Errors
    ///
    /// If `pid` is greater than `Pid::MAX`, it will return an `ErrorKind::InvalidInput` error.
    pub fn new(pid: u16) -> Result<Self> {
        track_assert!(pid <= Self::MAX, ErrorKind::InvalidInput, "pid={:#X}", pid);
        Ok(Pid(pid))
    }

    /// Returns the value of the identifier.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns `true` if this is the PID of null packets.
    pub fn is_null(&self) -> bool {
        self.0 == Self::NULL
    }

    /// Returns `true` if this is the PID of the program association table.
    pub fn is_pat(&self) -> bool {
        self.0 == Self::PAT
    }
}

/// 4-bit per-PID sequence number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContinuityCounter(u8);
impl ContinuityCounter {
    /// Makes a new `ContinuityCounter` instance.
    ///
    /// # Errors
    ///
    /// If `n` is not less than 16, it will return an `ErrorKind::InvalidInput` error.
    pub fn new(n: u8) -> Result<Self> {
        track_assert!(n < 16, ErrorKind::InvalidInput, "continuity_counter={}", n);
        Ok(ContinuityCounter(n))
    }

    /// Returns the value of the counter.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Returns the counter that follows this one (wrapping after 15).
    pub fn next(&self) -> Self {
        ContinuityCounter((self.0 + 1) & 0x0F)
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportScramblingControl {
    NotScrambled = 0b00,
    Reserved = 0b01,
    ScrambledWithEvenKey = 0b10,
    ScrambledWithOddKey = 0b11,
}
impl TransportScramblingControl {
    fn from_u8(n: u8) -> Self {
        match n & 0b11 {
            0b00 => TransportScramblingControl::NotScrambled,
            0b01 => TransportScramblingControl::Reserved,
            0b10 => TransportScramblingControl::ScrambledWithEvenKey,
            _ => TransportScramblingControl::ScrambledWithOddKey,
        }
    }

    /// Returns the 2-bit value of this field.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdaptationFieldControl {
    Reserved = 0b00,
    PayloadOnly = 0b01,
    AdaptationFieldOnly = 0b10,
    AdaptationFieldAndPayload = 0b11,
}
impl AdaptationFieldControl {
    fn from_u8(n: u8) -> Self {
        match n & 0b11 {
            0b00 => AdaptationFieldControl::Reserved,
            0b01 => AdaptationFieldControl::PayloadOnly,
            0b10 => AdaptationFieldControl::AdaptationFieldOnly,
            _ => AdaptationFieldControl::AdaptationFieldAndPayload,
        }
    }

    /// Returns the 2-bit value of this field.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` if the packet carries an adaptation field.
    pub fn has_adaptation_field(self) -> bool {
        match self {
            AdaptationFieldControl::AdaptationFieldOnly
            | AdaptationFieldControl::AdaptationFieldAndPayload => true,
            _ => false,
        }
    }

    /// Returns `true` if the packet carries a payload.
    pub fn has_payload(self) -> bool {
        match self {
            AdaptationFieldControl::PayloadOnly
            | AdaptationFieldControl::AdaptationFieldAndPayload => true,
            _ => false,
        }
    }
}
