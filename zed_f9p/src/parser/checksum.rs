use crate::{
    constants::{UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_FRAME_MIN_LEN},
    ParserError,
};

/// UBX [Fletcher-16 checksum](https://en.wikipedia.org/wiki/Fletcher%27s_checksum) calculator,
/// usable both byte-by-byte and over a whole frame
#[derive(Default, Clone, Copy)]
pub(crate) struct UbxChecksumCalc {
    ck_a: u8,
    ck_b: u8,
}

impl UbxChecksumCalc {
    pub(crate) const fn new() -> Self {
        Self { ck_a: 0, ck_b: 0 }
    }

    /// Update checksum with new bytes
    pub(crate) const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub(crate) const fn update_byte(&mut self, byte: u8) {
        self.ck_a = self.ck_a.wrapping_add(byte);
        self.ck_b = self.ck_b.wrapping_add(self.ck_a);
    }

    /// Get the current checksum result
    pub(crate) const fn result(self) -> (u8, u8) {
        (self.ck_a, self.ck_b)
    }

    pub(crate) const fn validate_result(
        self,
        received_ck_a: u8,
        received_ck_b: u8,
    ) -> Result<(), ParserError> {
        let (calculated_ck_a, calculated_ck_b) = self.result();
        if self.is_valid(received_ck_a, received_ck_b) {
            Ok(())
        } else {
            Err(ParserError::InvalidChecksum {
                expect: u16::from_le_bytes([received_ck_a, received_ck_b]),
                got: u16::from_le_bytes([calculated_ck_a, calculated_ck_b]),
            })
        }
    }

    /// Checks the trailing checksum of a complete frame.
    ///
    /// The sum runs from the class byte up to, but excluding, the two checksum
    /// bytes, which are stored `ck_a` first.
    pub(crate) fn validate_frame(frame: &[u8]) -> Result<(), ParserError> {
        if frame.len() < UBX_FRAME_MIN_LEN {
            return Err(ParserError::TooShort { got: frame.len() });
        }
        let ck_offset = frame.len() - UBX_CHECKSUM_LEN;
        let mut calc = Self::new();
        calc.update(&frame[UBX_CLASS_OFFSET..ck_offset]);
        calc.validate_result(frame[ck_offset], frame[ck_offset + 1])
    }

    const fn is_valid(&self, received_ck_a: u8, received_ck_b: u8) -> bool {
        self.ck_a == received_ck_a && self.ck_b == received_ck_b
    }
}

/// Fletcher checksum `(ck_a, ck_b)` over `data`.
///
/// For a frame of `n` bytes the protocol range is `frame[2..n - 2]`.
pub const fn ubx_checksum(data: &[u8]) -> (u8, u8) {
    let mut calc = UbxChecksumCalc::new();
    calc.update(data);
    calc.result()
}

/// `true` when the last two bytes of `frame` match the checksum of everything
/// between the sync characters and them. Never panics.
pub fn verify_checksum(frame: &[u8]) -> bool {
    UbxChecksumCalc::validate_frame(frame).is_ok()
}

#[cfg(test)]
mod tests {
    use crate::constants::{UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2};

    use super::*;

    const PACK_LEN: u8 = 2;
    const VALID_CK_A: u8 = 0x11;
    const VALID_CK_B: u8 = 0x38;
    // UBX-ACK-ACK packet: Class=0x05, ID=0x01, Length=0x0002, Payload=[0x04, 0x05], Checksum=[0x11, 0x38]
    const VALID_UBX_PACKET: [u8; 10] = [
        UBX_SYNC_CHAR_1,
        UBX_SYNC_CHAR_2, // Sync chars (not included in checksum)
        0x05,
        0x01, // Class and Message ID
        PACK_LEN,
        0x00, // Length (2 bytes)
        0x04,
        0x05, // Payload
        VALID_CK_A,
        VALID_CK_B, // Checksum
    ];

    const fn create_invalid_ubx_packet() -> [u8; 10] {
        let mut packet = VALID_UBX_PACKET;
        let buf_len = packet.len();
        packet[buf_len - 1] = packet[buf_len - 1].wrapping_add(1);
        packet
    }

    #[test]
    fn test_streaming_checksum_valid() {
        let packet = VALID_UBX_PACKET;
        let mut calc = UbxChecksumCalc::new();
        calc.update(&packet[2..8]);
        assert!(calc.validate_result(packet[8], packet[9]).is_ok());
    }

    #[test]
    fn test_streaming_checksum_invalid() {
        let packet = create_invalid_ubx_packet();
        let mut calc = UbxChecksumCalc::new();
        calc.update(&packet[2..8]);

        let result = calc.validate_result(packet[8], packet[9]);
        assert_eq!(
            result,
            Err(ParserError::InvalidChecksum {
                expect: 0x3911,
                got: 0x3811,
            })
        );
    }

    #[test]
    fn test_streaming_checksum_incremental() {
        let packet = VALID_UBX_PACKET;
        let mut calc = UbxChecksumCalc::new();
        for byte in &packet[2..8] {
            calc.update_byte(*byte);
        }
        assert_eq!(calc.validate_result(packet[8], packet[9]), Ok(()));
    }

    #[test]
    fn test_streaming_checksum_chunks() {
        let packet = VALID_UBX_PACKET;
        let mut calc = UbxChecksumCalc::new();
        calc.update(&packet[2..4]); // Class and ID
        calc.update(&packet[4..6]); // Length
        calc.update(&packet[6..8]); // Payload
        assert_eq!(calc.validate_result(packet[8], packet[9]), Ok(()));
    }

    #[test]
    fn test_frame_validation() {
        assert_eq!(UbxChecksumCalc::validate_frame(&VALID_UBX_PACKET), Ok(()));
        assert!(verify_checksum(&VALID_UBX_PACKET));
        assert!(!verify_checksum(&create_invalid_ubx_packet()));
    }

    #[test]
    fn test_frame_validation_short_buffer() {
        assert_eq!(
            UbxChecksumCalc::validate_frame(&VALID_UBX_PACKET[..3]),
            Err(ParserError::TooShort { got: 3 })
        );
        assert!(!verify_checksum(&[]));
    }

    #[test]
    fn test_empty_payload_checksum() {
        // Class, ID, Length = 0, checksum computed below
        let mut packet = [UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, 0x05, 0x00, 0x00, 0x00, 0, 0];
        let (ck_a, ck_b) = ubx_checksum(&packet[2..6]);
        packet[6] = ck_a;
        packet[7] = ck_b;
        assert!(verify_checksum(&packet));
    }

    #[test]
    fn test_checksum_is_repeatable() {
        let first = ubx_checksum(&VALID_UBX_PACKET[2..8]);
        let second = ubx_checksum(&VALID_UBX_PACKET[2..8]);
        assert_eq!(first, second);
        assert_eq!(first, (VALID_CK_A, VALID_CK_B));
    }

    #[test]
    fn test_single_byte_flip_changes_checksum() {
        let reference = ubx_checksum(&VALID_UBX_PACKET[2..8]);
        for i in 2..8 {
            for bit in 0..8 {
                let mut packet = VALID_UBX_PACKET;
                packet[i] ^= 1 << bit;
                assert_ne!(ubx_checksum(&packet[2..8]), reference, "byte {i} bit {bit}");
            }
        }
    }

    #[test]
    fn test_const_checksum_computation() {
        const CK: (u8, u8) = ubx_checksum(&[0x05, 0x01, PACK_LEN, 0x00, 0x04, 0x05]);
        assert_eq!(CK, (VALID_CK_A, VALID_CK_B));
    }
}
