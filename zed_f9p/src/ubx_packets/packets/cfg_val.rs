use bitflags::bitflags;

use crate::{
    cfg_val::CfgVal,
    constants::{
        UBX_CHECKSUM_LEN, UBX_CLASS_CFG, UBX_CLASS_OFFSET, UBX_CFG_VALSET_ID, UBX_HEADER_LEN,
        UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    parser::checksum::UbxChecksumCalc,
    UbxPacketMeta,
};

/// version (1) + layers (1) + reserved (2) + one key/value pair
const CFG_VAL_SET_PAYLOAD_LEN: usize = 4 + CfgVal::SIZE;

/// Length of a single-item CFG-VALSET frame on the wire
pub const CFG_VAL_SET_PACKET_LEN: usize = UBX_HEADER_LEN + CFG_VAL_SET_PAYLOAD_LEN + UBX_CHECKSUM_LEN;

/// Marker for the CFG-VALSET message, only ever sent to the receiver
pub struct CfgValSet;

impl UbxPacketMeta for CfgValSet {
    const CLASS: u8 = UBX_CLASS_CFG;
    const ID: u8 = UBX_CFG_VALSET_ID;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
    const MAX_PAYLOAD_LEN: u16 = 772; // 4 + (4 + 8) * 64
}

bitflags! {
    /// A mask describing where configuration is applied.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CfgLayerSet: u8 {
        const RAM = 0b001;
        const BBR = 0b010;
        const FLASH = 0b100;
    }
}

impl Default for CfgLayerSet {
    fn default() -> Self {
        Self::RAM | Self::BBR | Self::FLASH
    }
}

/// Single-item CFG-VALSET (0x06 0x8a) frame
#[derive(Debug, Clone, Copy)]
pub struct CfgValSetBuilder {
    /// Message version, 0 for a plain set without transaction
    pub version: u8,
    pub layers: CfgLayerSet,
    pub cfg_data: CfgVal,
}

impl CfgValSetBuilder {
    pub fn new(cfg_data: CfgVal) -> Self {
        Self {
            version: 0,
            layers: CfgLayerSet::default(),
            cfg_data,
        }
    }

    /// Serializes the frame, checksum included
    pub const fn into_packet_bytes(self) -> [u8; CFG_VAL_SET_PACKET_LEN] {
        let len = (CFG_VAL_SET_PAYLOAD_LEN as u16).to_le_bytes();
        let kv = self.cfg_data.into_cfg_kv_bytes();
        let mut ret = [
            UBX_SYNC_CHAR_1,
            UBX_SYNC_CHAR_2,
            CfgValSet::CLASS,
            CfgValSet::ID,
            len[0],
            len[1],
            self.version,
            self.layers.bits(),
            0, // reserved
            0,
            kv[0],
            kv[1],
            kv[2],
            kv[3],
            kv[4],
            0, // ck_a
            0, // ck_b
        ];
        let mut calc = UbxChecksumCalc::new();
        let mut i = UBX_CLASS_OFFSET;
        while i < CFG_VAL_SET_PACKET_LEN - UBX_CHECKSUM_LEN {
            calc.update_byte(ret[i]);
            i += 1;
        }
        let (ck_a, ck_b) = calc.result();
        ret[CFG_VAL_SET_PACKET_LEN - 2] = ck_a;
        ret[CFG_VAL_SET_PACKET_LEN - 1] = ck_b;
        ret
    }
}

/// Turns NMEA output off on UART1, applied to RAM, BBR and flash
pub const fn build_disable_legacy_output_frame() -> [u8; CFG_VAL_SET_PACKET_LEN] {
    CfgValSetBuilder {
        version: 0,
        layers: CfgLayerSet::all(),
        cfg_data: CfgVal::Uart1OutProtNmea(false),
    }
    .into_packet_bytes()
}

/// Sets how often NAV-PVT is emitted on UART1: once every `rate` navigation epochs,
/// 0 disables it
pub const fn build_set_output_rate_frame(rate: u8) -> [u8; CFG_VAL_SET_PACKET_LEN] {
    CfgValSetBuilder {
        version: 0,
        layers: CfgLayerSet::all(),
        cfg_data: CfgVal::MsgoutUbxNavPvtUart1(rate),
    }
    .into_packet_bytes()
}
