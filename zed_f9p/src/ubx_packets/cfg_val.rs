/// 32-bit configuration item identifier used by CFG-VALSET / CFG-VALGET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSize {
    OneBit,
    OneByte,
    TwoBytes,
    FourBytes,
    EightBytes,
}

impl StorageSize {
    pub const fn to_usize(self) -> usize {
        match self {
            Self::OneBit | Self::OneByte => 1,
            Self::TwoBytes => 2,
            Self::FourBytes => 4,
            Self::EightBytes => 8,
        }
    }
}

impl KeyId {
    pub(crate) const SIZE: usize = 4;

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Size of the value as encoded in bits 28..31 of the key
    pub const fn value_size(&self) -> Option<StorageSize> {
        match (self.0 >> 28) & 0b111 {
            1 => Some(StorageSize::OneBit),
            2 => Some(StorageSize::OneByte),
            3 => Some(StorageSize::TwoBytes),
            4 => Some(StorageSize::FourBytes),
            5 => Some(StorageSize::EightBytes),
            _ => None,
        }
    }

    pub const fn group_id(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn item_id(&self) -> u8 {
        self.0 as u8
    }
}

macro_rules! from_cfg_v_bytes {
    ($byte:expr, bool) => {
        match $byte {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    };
    ($byte:expr, u8) => {
        Some($byte)
    };
}

macro_rules! into_cfg_v_byte {
    ($value:expr, bool) => {
        $value as u8
    };
    ($value:expr, u8) => {
        $value
    };
}

macro_rules! cfg_val {
  (
    $(
      $(#[$item_comment:meta])*
      $cfg_item:ident, $cfg_key_id:literal, $cfg_value_type:ident,
    )*
  ) => {
    /// A single configuration item together with the value to store.
    ///
    /// Only one-byte items are listed; they share the 5-byte key/value layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum CfgVal {
      $(
        $(#[$item_comment])*
        $cfg_item($cfg_value_type),
      )*
    }

    impl CfgVal {
      /// Encoded length: key id plus value
      pub const SIZE: usize = KeyId::SIZE + 1;

      pub const fn key(&self) -> KeyId {
        match self {
          $(
            Self::$cfg_item(_) => KeyId($cfg_key_id),
          )*
        }
      }

      const fn value_byte(&self) -> u8 {
        match self {
          $(
            Self::$cfg_item(value) => into_cfg_v_byte!(*value, $cfg_value_type),
          )*
        }
      }

      /// Key id (little endian) followed by the value byte
      pub const fn into_cfg_kv_bytes(self) -> [u8; Self::SIZE] {
        let key_id = self.key().0.to_le_bytes();
        [key_id[0], key_id[1], key_id[2], key_id[3], self.value_byte()]
      }

      /// Parses one key/value pair, `None` for unknown keys or out of range values
      pub fn parse(buf: &[u8]) -> Option<Self> {
        let [k0, k1, k2, k3, value, ..] = buf else {
          return None;
        };
        match u32::from_le_bytes([*k0, *k1, *k2, *k3]) {
          $(
            $cfg_key_id => from_cfg_v_bytes!(*value, $cfg_value_type).map(Self::$cfg_item),
          )*
          _ => None,
        }
      }
    }
  }
}

cfg_val! {
  // CFG-UART1OUTPROT
  /// Flag to indicate if NMEA should be an output protocol on UART1
  Uart1OutProtNmea,      0x10740002, bool,

  // CFG-UART2OUTPROT
  /// Flag to indicate if NMEA should be an output protocol on UART2
  Uart2OutProtNmea,      0x10760002, bool,

  // CFG-MSGOUT
  /// Output rate of the UBX-NAV-PVT message on port UART1
  MsgoutUbxNavPvtUart1, 0x20910007, u8,
  /// Output rate of the UBX-NAV-PVT message on port UART2
  MsgoutUbxNavPvtUart2, 0x20910008, u8,
}
