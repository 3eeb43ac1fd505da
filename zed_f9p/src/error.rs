use core::fmt;

/// Reason a buffer was not turned into a packet.
///
/// Every variant is a silent rejection from the point of view of the in-place
/// [`decode`](crate::decode) API: the output record is left untouched. The
/// variant is only there for callers that want to know why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    /// Buffer is shorter than the smallest possible frame
    TooShort { got: usize },
    /// The first two bytes are not the UBX sync characters
    BadSync { got: [u8; 2] },
    InvalidChecksum {
        expect: u16,
        got: u16,
    },
    /// Valid frame, but nothing is registered for this class/id pair
    UnknownMessage { class: u8, id: u8 },
    PayloadLengthMismatch {
        packet: &'static str,
        expect: usize,
        got: usize,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::TooShort { got } => {
                write!(f, "Buffer too short for a UBX frame, got {} bytes", got)
            },
            ParserError::BadSync { got } => write!(
                f,
                "Not valid sync characters, got {:#04x} {:#04x}",
                got[0], got[1]
            ),
            ParserError::InvalidChecksum { expect, got } => write!(
                f,
                "Not valid packet's checksum, expect {:x}, got {:x}",
                expect, got
            ),
            ParserError::UnknownMessage { class, id } => {
                write!(f, "Unknown packet class {:#04x} id {:#04x}", class, id)
            },
            ParserError::PayloadLengthMismatch {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Invalid packet({}) length, expect {}, got {}",
                packet, expect, got
            ),
        }
    }
}

impl core::error::Error for ParserError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidNanoseconds,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidNanoseconds => f.write_str("invalid nanoseconds"),
        }
    }
}

impl core::error::Error for DateTimeError {}

/// Failure while pushing configuration to the receiver
#[derive(Debug)]
pub enum DeviceError<E> {
    Transport(E),
}

impl<E: fmt::Display> fmt::Display for DeviceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Transport(e) => write!(f, "DeviceError: {}", e),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for DeviceError<E> {}
