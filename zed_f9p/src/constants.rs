pub const UBX_SYNC_CHAR_1: u8 = 0xb5;
pub const UBX_SYNC_CHAR_2: u8 = 0x62;
pub(crate) const UBX_SYNC_SIZE: usize = 2;
pub(crate) const UBX_PAYLOAD_SIZE_LEN: usize = 2;
pub(crate) const UBX_CLASS_LEN: usize = 1;
pub(crate) const UBX_ID_LEN: usize = 1;
pub(crate) const UBX_HEADER_LEN: usize =
    UBX_SYNC_SIZE + UBX_PAYLOAD_SIZE_LEN + UBX_CLASS_LEN + UBX_ID_LEN;
pub(crate) const UBX_CHECKSUM_LEN: usize = 2;

/// Sync (2) + class (1) + id (1) + length (2) + checksum (2), empty payload
pub const UBX_FRAME_MIN_LEN: usize = UBX_HEADER_LEN + UBX_CHECKSUM_LEN;

pub(crate) const UBX_CLASS_OFFSET: usize = 2; // After SYNC_CHAR_1, SYNC_CHAR_2
pub(crate) const UBX_MSG_ID_OFFSET: usize = 3; // After CLASS
pub(crate) const UBX_LENGTH_OFFSET: usize = 4; // After MSG_ID
pub(crate) const UBX_PAYLOAD_OFFSET: usize = UBX_HEADER_LEN;

pub const UBX_CLASS_NAV: u8 = 0x01;
pub const UBX_CLASS_CFG: u8 = 0x06;

pub const UBX_NAV_PVT_ID: u8 = 0x07;
pub const UBX_CFG_VALSET_ID: u8 = 0x8a;
