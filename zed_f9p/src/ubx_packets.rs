pub mod cfg_val;
mod packets;

pub use cfg_val::{CfgVal, KeyId, StorageSize};
pub use packets::*;

/// Information about concrete UBX protocol's packet
pub trait UbxPacketMeta {
    const CLASS: u8;
    const ID: u8;
    const FIXED_PAYLOAD_LEN: Option<u16>;
    const MAX_PAYLOAD_LEN: u16;
}
