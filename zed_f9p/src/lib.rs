//! # zed_f9p
//!
//! UBX frame codec for the u-blox ZED-F9P: decodes the navigation solution
//! (UBX-NAV-PVT) and builds the configuration frames the receiver needs at
//! start-up. The crate does no I/O by itself; frames go out through a
//! [UbxTransport] and raw buffers come in as byte slices.
//!
//! Constructing Packets
//! ====================
//!
//! Configuration is sent as single-item CFG-VALSET frames:
//! ```
//! use zed_f9p::{build_set_output_rate_frame, CfgLayerSet, CfgVal, CfgValSetBuilder};
//!
//! let packet: [u8; 17] = build_set_output_rate_frame(5);
//! assert_eq!(packet[14], 5);
//!
//! let packet: [u8; 17] = CfgValSetBuilder {
//!     version: 0,
//!     layers: CfgLayerSet::RAM,
//!     cfg_data: CfgVal::Uart2OutProtNmea(false),
//! }
//! .into_packet_bytes();
//! ```
//!
//! Parsing Packets
//! ===============
//!
//! A buffer is expected to hold exactly one frame, e.g. what a DMA transfer
//! delivered after an idle line. Use [parse] to get a fresh packet, or
//! [decode] to overwrite a record the caller already owns:
//! ```
//! use zed_f9p::{decode, parse, NavPvt, ParserError};
//!
//! let mut record = NavPvt::default();
//! let my_raw_data = [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x01, 0x0f, 0x38];
//!
//! // An ACK-ACK is a valid frame, but not one this crate decodes
//! assert_eq!(
//!     parse(&my_raw_data),
//!     Err(ParserError::UnknownMessage { class: 5, id: 1 })
//! );
//! assert!(decode(&my_raw_data, my_raw_data.len(), &mut record).is_err());
//! assert_eq!(record, NavPvt::default());
//! ```
//!
//! no_std Support
//! ==============
//!
//! Without the `std` feature the crate is `no_std` and allocation free. The
//! blanket [UbxTransport] implementation for `std::io::Write` goes away;
//! implement the trait for your UART instead.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    config::InitConfig,
    constants::*,
    device::Device,
    error::{DateTimeError, DeviceError, ParserError},
    parser::{
        checksum::{ubx_checksum, verify_checksum},
        decode, parse, validate_frame, FrameRef,
    },
    transport::UbxTransport,
    ubx_packets::*,
};

mod config;
mod constants;
mod device;
mod error;
mod parser;
mod transport;
mod ubx_packets;
