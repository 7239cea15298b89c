//! MPEG2-TS packet framing and header decoding library.
//!
//! Splits a transport stream into 188-byte packets, checks the sync byte of each one and
//! decodes the 4-byte header into named fields. End-of-input at a packet boundary ends the
//! stream cleanly; a misplaced sync byte or an incomplete packet ends it with an error.
//!
//! # Examples
//!
//! ```
//! use tsframe::ts;
//!
//! let mut bytes = vec![0x47, 0x40, 0x11, 0x14];
//! bytes.extend_from_slice(&[0xFF; 184]);
//!
//! let packets = ts::parse(&bytes[..]).collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(packets.len(), 1);
//! assert_eq!(packets[0].header.pid.as_u16(), 0x11);
//! ```
//!
//! # References
//!
//! - [MPEG transport stream](https://en.wikipedia.org/wiki/MPEG_transport_stream)
#![warn(missing_docs)]
extern crate byteorder;
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate quickcheck;
#[macro_use]
extern crate trackable;

pub use error::{Error, ErrorKind};

pub mod ts;

mod error;

/// This crate specific `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
