#[macro_use]
extern crate afl;
extern crate zed_f9p;

use zed_f9p::{NavPvt, UbxPacket};

fn decode(size: usize, data: &[u8]) {
    let before = NavPvt {
        itow: 0x5a5a_5a5a,
        ..NavPvt::default()
    };
    let mut record = before;
    match zed_f9p::decode(data, size, &mut record) {
        Ok(()) => {
            // Only a complete NAV-PVT frame may get through
            assert_eq!(size, 100);
            assert!(zed_f9p::verify_checksum(&data[..size]));
            assert_eq!(
                zed_f9p::parse(&data[..size]),
                Ok(UbxPacket::NavPvt(record))
            );
        },
        Err(_) => {
            // The buffer might contain any of a variety of errors
            assert_eq!(record, before);
        },
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        if let Some((&size, rest)) = data.split_first() {
            // Exercise sizes beyond the buffer as well
            decode(size as usize, rest);
        }
    });
}
