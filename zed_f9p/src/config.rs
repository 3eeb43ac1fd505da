use core::iter;

use crate::{
    cfg_val::CfgVal,
    ubx_packets::{CfgLayerSet, CfgValSetBuilder, CFG_VAL_SET_PACKET_LEN},
};

/// Settings pushed to the receiver once after power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct InitConfig {
    /// Stop NMEA sentences on UART1 so only UBX is left on the wire
    pub disable_uart1_nmea: bool,
    /// NAV-PVT output rate on UART1, in navigation epochs per message
    pub nav_pvt_rate: u8,
    pub layers: CfgLayerSet,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            disable_uart1_nmea: true,
            nav_pvt_rate: 3,
            layers: CfgLayerSet::default(),
        }
    }
}

impl InitConfig {
    /// CFG-VALSET frames in the order they have to be sent
    pub fn frames(&self) -> impl Iterator<Item = [u8; CFG_VAL_SET_PACKET_LEN]> {
        let layers = self.layers;
        let valset = move |cfg_data| {
            CfgValSetBuilder {
                version: 0,
                layers,
                cfg_data,
            }
            .into_packet_bytes()
        };
        self.disable_uart1_nmea
            .then(|| valset(CfgVal::Uart1OutProtNmea(false)))
            .into_iter()
            .chain(iter::once(valset(CfgVal::MsgoutUbxNavPvtUart1(
                self.nav_pvt_rate,
            ))))
    }
}
