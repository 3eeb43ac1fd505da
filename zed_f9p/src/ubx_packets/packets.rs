mod cfg_val;
mod nav_pvt;

pub use cfg_val::*;
pub use nav_pvt::*;

use crate::{error::ParserError, parser::FrameRef, UbxPacketMeta};

/// Every packet this crate knows how to decode.
///
/// Matching on it is exhaustive, so a new message type has to be handled
/// explicitly wherever packets are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UbxPacket {
    NavPvt(NavPvt),
}

impl UbxPacket {
    pub const fn class_and_msg_id(&self) -> (u8, u8) {
        match self {
            UbxPacket::NavPvt(_) => (NavPvt::CLASS, NavPvt::ID),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            UbxPacket::NavPvt(_) => "NavPvt",
        }
    }
}

/// Routes a validated frame to its decoder by class and message id.
///
/// Anything not listed is reported as [ParserError::UnknownMessage]; the
/// receiver emits plenty of messages nobody asked for.
pub(crate) fn match_packet(frame: &FrameRef<'_>) -> Result<UbxPacket, ParserError> {
    match (frame.class(), frame.msg_id()) {
        (NavPvt::CLASS, NavPvt::ID) => NavPvt::from_frame(frame).map(UbxPacket::NavPvt),
        (class, id) => Err(ParserError::UnknownMessage { class, id }),
    }
}
