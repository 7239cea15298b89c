use trackable::error::TrackableError;
use trackable::error::{ErrorKind as TrackableErrorKind, ErrorKindExt};

/// This crate specific `Error` type.
#[derive(Debug, Clone)]
pub struct Error(TrackableError<ErrorKind>);
derive_traits_for_trackable_error_newtype!(Error, ErrorKind);
impl From<std::io::Error> for Error {
    fn from(f: std::io::Error) -> Self {
        ErrorKind::ByteSource.cause(f).into()
    }
}

/// Possible error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The underlying byte source failed for a reason other than end-of-input.
    ByteSource,

    /// A packet header does not begin with the `0x47` sync byte.
    InvalidSyncByte,

    /// The input ended in the middle of a packet.
    TruncatedPacket,

    /// A caller supplied value is out of range (e.g., a PID wider than 13 bits).
    InvalidInput,
}
impl TrackableErrorKind for ErrorKind {}
