pub(crate) mod checksum;
pub(crate) mod field;

use log::trace;

use crate::{
    constants::{
        UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_FRAME_MIN_LEN, UBX_LENGTH_OFFSET,
        UBX_MSG_ID_OFFSET, UBX_PAYLOAD_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    error::ParserError,
    ubx_packets::{match_packet, NavPvt, UbxPacket},
};
use checksum::UbxChecksumCalc;

/// A buffer that passed sync and checksum validation.
///
/// The frame is assumed to fill the buffer exactly: the checksum is always
/// the last two bytes.
#[derive(Debug, Clone, Copy)]
pub struct FrameRef<'a> {
    bytes: &'a [u8],
}

impl<'a> FrameRef<'a> {
    pub fn class(&self) -> u8 {
        field::read_u8(self.bytes, UBX_CLASS_OFFSET)
    }

    pub fn msg_id(&self) -> u8 {
        field::read_u8(self.bytes, UBX_MSG_ID_OFFSET)
    }

    /// Payload length as written in the header, not necessarily what the buffer holds
    pub fn declared_payload_len(&self) -> u16 {
        field::read_u16(self.bytes, UBX_LENGTH_OFFSET)
    }

    /// Bytes between the header and the checksum
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[UBX_PAYLOAD_OFFSET..self.bytes.len() - UBX_CHECKSUM_LEN]
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// Checks that `buf` is a complete, authentic UBX frame: long enough, starting
/// with the sync characters and carrying a matching checksum.
pub fn validate_frame(buf: &[u8]) -> Result<FrameRef<'_>, ParserError> {
    if buf.len() < UBX_FRAME_MIN_LEN {
        return Err(ParserError::TooShort { got: buf.len() });
    }
    if buf[0] != UBX_SYNC_CHAR_1 || buf[1] != UBX_SYNC_CHAR_2 {
        return Err(ParserError::BadSync {
            got: [buf[0], buf[1]],
        });
    }
    UbxChecksumCalc::validate_frame(buf)?;
    Ok(FrameRef { bytes: buf })
}

/// Validates `buf` and decodes it into a fresh packet.
pub fn parse(buf: &[u8]) -> Result<UbxPacket, ParserError> {
    let frame = validate_frame(buf)?;
    match_packet(&frame)
}

/// Decodes the first `size` bytes of `buffer` into `record`.
///
/// `record` is overwritten as a whole on success and left untouched on any
/// error, so callers who don't care why a buffer was dropped can ignore the
/// result.
pub fn decode(buffer: &[u8], size: usize, record: &mut NavPvt) -> Result<(), ParserError> {
    let Some(frame) = buffer.get(..size) else {
        trace!("size {} exceeds buffer of {} bytes", size, buffer.len());
        return Err(ParserError::TooShort { got: buffer.len() });
    };
    match parse(frame) {
        Ok(UbxPacket::NavPvt(pvt)) => {
            *record = pvt;
            Ok(())
        },
        Err(e) => {
            trace!("dropping {} byte buffer: {}", size, e);
            Err(e)
        },
    }
}
