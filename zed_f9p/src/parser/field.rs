//! Little-endian field extraction at fixed byte offsets.
//!
//! Offsets are not bounds checked beyond normal slice indexing: callers check
//! the frame length before reading fields out of it.

pub(crate) const fn read_u8(buf: &[u8], offset: usize) -> u8 {
    buf[offset]
}

pub(crate) const fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

pub(crate) const fn read_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

pub(crate) const fn read_i16(buf: &[u8], offset: usize) -> i16 {
    read_u16(buf, offset) as i16
}

pub(crate) const fn read_i32(buf: &[u8], offset: usize) -> i32 {
    read_u32(buf, offset) as i32
}
