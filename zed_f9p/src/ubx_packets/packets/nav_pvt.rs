use bitflags::bitflags;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::{
    constants::{UBX_CLASS_NAV, UBX_NAV_PVT_ID},
    error::{DateTimeError, ParserError},
    parser::{
        field::{read_i16, read_i32, read_u16, read_u32, read_u8},
        FrameRef,
    },
    UbxPacketMeta,
};

const NAV_PVT_PAYLOAD_LEN: usize = 92;

// Payload offsets, UBX-NAV-PVT (0x01 0x07)
const ITOW: usize = 0;
const YEAR: usize = 4;
const MONTH: usize = 6;
const DAY: usize = 7;
const HOUR: usize = 8;
const MIN: usize = 9;
const SEC: usize = 10;
const VALID: usize = 11;
const T_ACC: usize = 12;
const NANO: usize = 16;
const FIX_TYPE: usize = 20;
const FLAGS: usize = 21;
const FLAGS2: usize = 22;
const NUM_SV: usize = 23;
const LON: usize = 24;
const LAT: usize = 28;
const HEIGHT: usize = 32;
const H_MSL: usize = 36;
const H_ACC: usize = 40;
const V_ACC: usize = 44;
const VEL_N: usize = 48;
const VEL_E: usize = 52;
const VEL_D: usize = 56;
const G_SPEED: usize = 60;
const HEAD_MOT: usize = 64;
const S_ACC: usize = 68;
const HEAD_ACC: usize = 72;
const P_DOP: usize = 76;
const FLAGS3: usize = 78;
// 80..84 reserved
const HEAD_VEH: usize = 84;
const MAG_DEC: usize = 88;
const MAG_ACC: usize = 90;

/// Navigation Position Velocity Time Solution
///
/// Every field holds the raw value in device units as it appeared on the wire.
/// Scaled and typed views are available through the accessor methods.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPvt {
    /// GPS Millisecond time of week of the navigation epoch.
    ///
    /// Messages with the same iTOW value can be assumed to have come from the same navigation solution.
    pub itow: u32,
    /// Year (UTC)
    pub year: u16,
    /// Month, range 1..12 (UTC)
    pub month: u8,
    /// Day of month, range 1..31 (UTC)
    pub day: u8,
    /// Hour of day, range 0..23 (UTC)
    pub hour: u8,
    /// Minute of hour, range 0..59 (UTC)
    pub min: u8,
    /// Seconds of minute, range 0..60 (UTC)
    pub sec: u8,
    /// Validity flags, see [NavPvtValidFlags]
    pub valid: u8,
    /// Time accuracy estimate \[ns\] (UTC)
    pub t_acc: u32,
    /// Fraction of second \[ns\], range -1e9 .. 1e9 (UTC)
    pub nano: i32,
    /// GNSS fix type, see [GnssFixType]
    pub fix_type: u8,
    /// Fix status flags, see [NavPvtFlags]
    pub flags: u8,
    /// Additional flags, see [NavPvtFlags2]
    pub flags2: u8,
    /// Number of satellites used in the solution
    pub num_sv: u8,
    /// Longitude \[1e-7 deg\]
    pub lon: i32,
    /// Latitude \[1e-7 deg\]
    pub lat: i32,
    /// Height above ellipsoid \[mm\]
    pub height: i32,
    /// Height above mean sea level \[mm\]
    pub h_msl: i32,
    /// Horizontal accuracy estimate \[mm\]
    pub h_acc: u32,
    /// Vertical accuracy estimate \[mm\]
    pub v_acc: u32,
    /// NED north velocity \[mm/s\]
    pub vel_n: i32,
    /// NED east velocity \[mm/s\]
    pub vel_e: i32,
    /// NED down velocity \[mm/s\]
    pub vel_d: i32,
    /// Ground speed (2-D) \[mm/s\]
    pub g_speed: i32,
    /// Heading of motion (2-D) \[1e-5 deg\]
    pub head_mot: i32,
    /// Speed accuracy estimate \[mm/s\]
    pub s_acc: u32,
    /// Heading accuracy estimate, motion and vehicle \[1e-5 deg\]
    pub head_acc: u32,
    /// Position DOP \[0.01\]
    pub p_dop: u16,
    /// Additional flags, see [NavPvtFlags3]
    pub flags3: u16,
    /// Heading of vehicle (2-D) \[1e-5 deg\]
    pub head_veh: i32,
    /// Magnetic declination \[1e-2 deg\]
    pub mag_dec: i16,
    /// Magnetic declination accuracy \[1e-2 deg\]
    pub mag_acc: u16,
}

impl UbxPacketMeta for NavPvt {
    const CLASS: u8 = UBX_CLASS_NAV;
    const ID: u8 = UBX_NAV_PVT_ID;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(NAV_PVT_PAYLOAD_LEN as u16);
    const MAX_PAYLOAD_LEN: u16 = NAV_PVT_PAYLOAD_LEN as u16;
}

impl NavPvt {
    /// Decodes an already validated frame.
    ///
    /// Both the declared length and the number of bytes actually present
    /// between header and checksum have to be exactly 92.
    pub(crate) fn from_frame(frame: &FrameRef<'_>) -> Result<Self, ParserError> {
        let declared = usize::from(frame.declared_payload_len());
        if declared != NAV_PVT_PAYLOAD_LEN {
            return Err(Self::len_mismatch(declared));
        }
        let payload: &[u8; NAV_PVT_PAYLOAD_LEN] = frame
            .payload()
            .try_into()
            .map_err(|_| Self::len_mismatch(frame.payload().len()))?;
        Ok(Self::from_payload(payload))
    }

    const fn len_mismatch(got: usize) -> ParserError {
        ParserError::PayloadLengthMismatch {
            packet: "NavPvt",
            expect: NAV_PVT_PAYLOAD_LEN,
            got,
        }
    }

    const fn from_payload(p: &[u8; NAV_PVT_PAYLOAD_LEN]) -> Self {
        Self {
            itow: read_u32(p, ITOW),
            year: read_u16(p, YEAR),
            month: read_u8(p, MONTH),
            day: read_u8(p, DAY),
            hour: read_u8(p, HOUR),
            min: read_u8(p, MIN),
            sec: read_u8(p, SEC),
            valid: read_u8(p, VALID),
            t_acc: read_u32(p, T_ACC),
            nano: read_i32(p, NANO),
            fix_type: read_u8(p, FIX_TYPE),
            flags: read_u8(p, FLAGS),
            flags2: read_u8(p, FLAGS2),
            num_sv: read_u8(p, NUM_SV),
            lon: read_i32(p, LON),
            lat: read_i32(p, LAT),
            height: read_i32(p, HEIGHT),
            h_msl: read_i32(p, H_MSL),
            h_acc: read_u32(p, H_ACC),
            v_acc: read_u32(p, V_ACC),
            vel_n: read_i32(p, VEL_N),
            vel_e: read_i32(p, VEL_E),
            vel_d: read_i32(p, VEL_D),
            g_speed: read_i32(p, G_SPEED),
            head_mot: read_i32(p, HEAD_MOT),
            s_acc: read_u32(p, S_ACC),
            head_acc: read_u32(p, HEAD_ACC),
            p_dop: read_u16(p, P_DOP),
            flags3: read_u16(p, FLAGS3),
            head_veh: read_i32(p, HEAD_VEH),
            mag_dec: read_i16(p, MAG_DEC),
            mag_acc: read_u16(p, MAG_ACC),
        }
    }

    pub fn validity(&self) -> NavPvtValidFlags {
        NavPvtValidFlags::from_bits_truncate(self.valid)
    }

    pub fn gnss_fix_type(&self) -> GnssFixType {
        GnssFixType::from(self.fix_type)
    }

    pub fn fix_status(&self) -> NavPvtFlags {
        NavPvtFlags::from_bits_truncate(self.flags)
    }

    pub fn confirmation(&self) -> NavPvtFlags2 {
        NavPvtFlags2::from_bits_truncate(self.flags2)
    }

    pub fn correction_info(&self) -> NavPvtFlags3 {
        NavPvtFlags3::from(self.flags3)
    }

    /// Longitude in \[deg\]
    pub fn longitude(&self) -> f64 {
        f64::from(self.lon) * 1e-7
    }

    /// Latitude in \[deg\]
    pub fn latitude(&self) -> f64 {
        f64::from(self.lat) * 1e-7
    }

    /// Height above reference ellipsoid in \[m\]
    pub fn height_above_ellipsoid(&self) -> f64 {
        f64::from(self.height) * 1e-3
    }

    /// Height above mean sea level in \[m\]
    pub fn height_above_msl(&self) -> f64 {
        f64::from(self.h_msl) * 1e-3
    }

    /// Horizontal accuracy in \[m\]
    pub fn horizontal_accuracy(&self) -> f64 {
        f64::from(self.h_acc) * 1e-3
    }

    /// Vertical accuracy in \[m\]
    pub fn vertical_accuracy(&self) -> f64 {
        f64::from(self.v_acc) * 1e-3
    }

    /// Velocity north component \[m/s\]
    pub fn velocity_north(&self) -> f64 {
        f64::from(self.vel_n) * 1e-3
    }

    /// Velocity east component \[m/s\]
    pub fn velocity_east(&self) -> f64 {
        f64::from(self.vel_e) * 1e-3
    }

    /// Velocity down component \[m/s\]
    pub fn velocity_down(&self) -> f64 {
        f64::from(self.vel_d) * 1e-3
    }

    /// Ground speed \[m/s\]
    pub fn ground_speed_2d(&self) -> f64 {
        f64::from(self.g_speed) * 1e-3
    }

    /// Speed accuracy estimate \[m/s\]
    pub fn speed_accuracy(&self) -> f64 {
        f64::from(self.s_acc) * 1e-3
    }

    /// Heading of motion 2-D \[deg\]
    pub fn heading_motion(&self) -> f64 {
        f64::from(self.head_mot) * 1e-5
    }

    /// Heading accuracy estimate \[deg\]
    pub fn heading_accuracy(&self) -> f64 {
        f64::from(self.head_acc) * 1e-5
    }

    /// Heading of vehicle (2-D) \[deg\]. Only meaningful when
    /// [HEAD_VEH_VALID](NavPvtFlags::HEAD_VEH_VALID) is set, otherwise the
    /// receiver repeats the heading of motion here.
    pub fn heading_vehicle(&self) -> f64 {
        f64::from(self.head_veh) * 1e-5
    }

    pub fn position_dop(&self) -> f64 {
        f64::from(self.p_dop) * 1e-2
    }

    /// Magnetic declination \[deg\]
    pub fn magnetic_declination(&self) -> f64 {
        f64::from(self.mag_dec) * 1e-2
    }

    /// Magnetic declination accuracy \[deg\]
    pub fn magnetic_declination_accuracy(&self) -> f64 {
        f64::from(self.mag_acc) * 1e-2
    }
}

impl TryFrom<&NavPvt> for DateTime<Utc> {
    type Error = DateTimeError;

    fn try_from(sol: &NavPvt) -> Result<Self, Self::Error> {
        const NANOS_PER_SEC: i32 = 1_000_000_000;

        let date = NaiveDate::from_ymd_opt(
            i32::from(sol.year),
            u32::from(sol.month),
            u32::from(sol.day),
        )
        .ok_or(DateTimeError::InvalidDate)?;
        let time = NaiveTime::from_hms_opt(
            u32::from(sol.hour),
            u32::from(sol.min),
            u32::from(sol.sec),
        )
        .ok_or(DateTimeError::InvalidTime)?;
        if sol.nano <= -NANOS_PER_SEC || sol.nano >= NANOS_PER_SEC {
            return Err(DateTimeError::InvalidNanoseconds);
        }
        // nano is signed: a negative fraction belongs to the previous second
        NaiveDateTime::new(date, time)
            .checked_add_signed(TimeDelta::nanoseconds(i64::from(sol.nano)))
            .map(|dt| Utc.from_utc_datetime(&dt))
            .ok_or(DateTimeError::InvalidNanoseconds)
    }
}

/// GNSS fix type reported in `NavPvt::fix_type`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GnssFixType {
    NoFix,
    DeadReckoningOnly,
    Fix2D,
    Fix3D,
    GPSPlusDeadReckoning,
    TimeOnlyFix,
    Reserved(u8),
}

impl From<u8> for GnssFixType {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::NoFix,
            1 => Self::DeadReckoningOnly,
            2 => Self::Fix2D,
            3 => Self::Fix3D,
            4 => Self::GPSPlusDeadReckoning,
            5 => Self::TimeOnlyFix,
            other => Self::Reserved(other),
        }
    }
}

impl From<GnssFixType> for u8 {
    fn from(fix: GnssFixType) -> Self {
        match fix {
            GnssFixType::NoFix => 0,
            GnssFixType::DeadReckoningOnly => 1,
            GnssFixType::Fix2D => 2,
            GnssFixType::Fix3D => 3,
            GnssFixType::GPSPlusDeadReckoning => 4,
            GnssFixType::TimeOnlyFix => 5,
            GnssFixType::Reserved(raw) => raw,
        }
    }
}

bitflags! {
    /// Validity flags of `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtValidFlags: u8 {
        /// 1 = valid UTC Date
        const VALID_DATE = 0x01;
        /// 1 = valid UTC time of day
        const VALID_TIME = 0x02;
        /// 1 = UTC time of day has been fully resolved (no seconds uncertainty).
        /// Cannot be used to check if time is completely solved.
        const FULLY_RESOLVED = 0x04;
        /// 1 = valid magnetic declination
        const VALID_MAG = 0x08;
    }
}

bitflags! {
    /// Fix status flags for `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtFlags: u8 {
        /// 1 = Position and velocity valid and within DOP and accuracy masks
        const GPS_FIX_OK = 1;
        /// 1 = Differential corrections were applied; DGPS used
        const DIFF_SOLN = 2;
        /// 1 = Heading of vehicle is valid, only set if the receiver is in sensor fusion mode
        const HEAD_VEH_VALID = 0x20;
        /// 1 = Carrier phase range solution with floating ambiguities
        const CARR_SOLN_FLOAT = 0x40;
        /// 1 = Carrier phase range solution with fixed ambiguities
        const CARR_SOLN_FIXED = 0x80;
    }
}

bitflags! {
    /// Additional flags for `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtFlags2: u8 {
        /// 1 = information about UTC Date and Time of Day validity confirmation is available
        const CONFIRMED_AVAI = 0x20;
        /// 1 = UTC Date validity could be confirmed
        const CONFIRMED_DATE = 0x40;
        /// 1 = UTC Time of Day could be confirmed
        const CONFIRMED_TIME = 0x80;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPvtFlags3 {
    invalid_llh: bool,
    last_correction_age: u8,
}

impl NavPvtFlags3 {
    /// 1 = Invalid lon, lat, height and hMSL
    pub fn invalid_llh(&self) -> bool {
        self.invalid_llh
    }

    /// Age of the most recently received differential correction
    ///
    /// Values:
    /// - `0`: Not available
    /// - `1`: Age between 0 and 1 second
    /// - `2`: Age between 1 (inclusive) and 2 seconds
    /// - `3`: Age between 2 (inclusive) and 5 seconds
    /// - `4`: Age between 5 (inclusive) and 10 seconds
    /// - `5`: Age between 10 (inclusive) and 15 seconds
    /// - `6`: Age between 15 (inclusive) and 20 seconds
    /// - `7`: Age between 20 (inclusive) and 30 seconds
    /// - `8`: Age between 30 (inclusive) and 45 seconds
    /// - `9`: Age between 45 (inclusive) and 60 seconds
    /// - `10`: Age between 60 (inclusive) and 90 seconds
    /// - `11`: Age between 90 (inclusive) and 120 seconds
    /// - `>=12`: Age greater or equal than 120 seconds
    pub fn last_correction_age(&self) -> u8 {
        self.last_correction_age
    }
}

impl From<u16> for NavPvtFlags3 {
    fn from(val: u16) -> Self {
        const LAST_CORRECTION_AGE_MASK: u16 = 0b0000_0000_0001_1110;
        Self {
            invalid_llh: val & 0x01 == 1,
            last_correction_age: ((val & LAST_CORRECTION_AGE_MASK) >> 1) as u8, // bits 1–4
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn sample() -> NavPvt {
        NavPvt {
            year: 2024,
            month: 8,
            day: 21,
            hour: 14,
            min: 30,
            sec: 15,
            nano: 250_000_000,
            ..NavPvt::default()
        }
    }

    #[test]
    fn fix_type_round_trips_known_and_reserved_codes() {
        assert_eq!(GnssFixType::from(3), GnssFixType::Fix3D);
        assert_eq!(GnssFixType::from(0x42), GnssFixType::Reserved(0x42));
        for raw in 0..=u8::MAX {
            assert_eq!(u8::from(GnssFixType::from(raw)), raw);
        }
    }

    #[test]
    fn flags3_bit_layout() {
        let flags = NavPvtFlags3::from(0b1_0111);
        assert!(flags.invalid_llh());
        assert_eq!(flags.last_correction_age(), 0b1011);
        assert!(!NavPvtFlags3::from(0).invalid_llh());
    }

    #[test]
    fn typed_flag_views_drop_reserved_bits() {
        let pvt = NavPvt {
            valid: 0xf3,
            flags: 0x21 | 0x04,
            flags2: 0xe1,
            ..NavPvt::default()
        };
        assert_eq!(
            pvt.validity(),
            NavPvtValidFlags::VALID_DATE | NavPvtValidFlags::VALID_TIME
        );
        assert_eq!(
            pvt.fix_status(),
            NavPvtFlags::GPS_FIX_OK | NavPvtFlags::HEAD_VEH_VALID
        );
        assert_eq!(pvt.confirmation(), NavPvtFlags2::all());
    }

    #[test]
    fn scaled_views() {
        let pvt = NavPvt {
            lon: -1_223_456_789,
            lat: 473_456_789,
            h_msl: 80_123,
            g_speed: 2_650,
            head_mot: 15_234_567,
            p_dop: 135,
            mag_dec: -1_234,
            ..NavPvt::default()
        };
        assert!((pvt.longitude() + 122.345_678_9).abs() < 1e-9);
        assert!((pvt.latitude() - 47.345_678_9).abs() < 1e-9);
        assert!((pvt.height_above_msl() - 80.123).abs() < 1e-9);
        assert!((pvt.ground_speed_2d() - 2.65).abs() < 1e-9);
        assert!((pvt.heading_motion() - 152.345_67).abs() < 1e-9);
        assert!((pvt.position_dop() - 1.35).abs() < 1e-9);
        assert!((pvt.magnetic_declination() + 12.34).abs() < 1e-9);
    }

    #[test]
    fn datetime_conversion() {
        let dt = DateTime::<Utc>::try_from(&sample()).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 8, 21));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 30, 15));
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn datetime_negative_nanos_borrow_a_second() {
        let pvt = NavPvt {
            nano: -12_345,
            ..sample()
        };
        let dt = DateTime::<Utc>::try_from(&pvt).unwrap();
        assert_eq!(dt.second(), 14);
        assert_eq!(dt.nanosecond(), 1_000_000_000 - 12_345);
    }

    #[test]
    fn datetime_rejects_invalid_fields() {
        let bad_date = NavPvt {
            month: 13,
            ..sample()
        };
        assert_eq!(
            DateTime::<Utc>::try_from(&bad_date),
            Err(DateTimeError::InvalidDate)
        );

        let bad_time = NavPvt {
            hour: 24,
            ..sample()
        };
        assert_eq!(
            DateTime::<Utc>::try_from(&bad_time),
            Err(DateTimeError::InvalidTime)
        );

        let bad_nanos = NavPvt {
            nano: 1_000_000_000,
            ..sample()
        };
        assert_eq!(
            DateTime::<Utc>::try_from(&bad_nanos),
            Err(DateTimeError::InvalidNanoseconds)
        );

        // Receiver default before any fix: year 0 month 0
        assert_eq!(
            DateTime::<Utc>::try_from(&NavPvt::default()),
            Err(DateTimeError::InvalidDate)
        );
    }
}
