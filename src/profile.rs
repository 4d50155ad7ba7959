//! Sensor output profiles and the static tables binding each profile to its
//! channel data layout.
//!
//! The tables in this module are the protocol contract: every offset, mask,
//! and shift is taken from the sensor documentation and must be reproduced
//! bit-for-bit. A wrong entry silently corrupts decoded measurements without
//! any runtime signal, so changes here must be checked against the published
//! packet layouts.

use crate::channel::{ChannelField, ChannelLayout};
use crate::field::{FieldStructure, FieldType};
use log::warn;
use std::fmt;

/// The channel data layout of one pixel under one profile, together with the
/// fixed byte size of that pixel's channel data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    /// Lookup table from channel field to its bit-packing description.
    pub fields: ChannelLayout,
    /// Size in bytes of one pixel's channel data.
    pub data_size: usize,
}

const LEGACY_FIELDS: &[(ChannelField, FieldStructure)] = &[
    (
        ChannelField::Flags,
        FieldStructure::new(FieldType::U8, 3, 0, 4),
    ),
    (
        ChannelField::Reflectivity,
        FieldStructure::new(FieldType::U16, 4, 0, 0),
    ),
    (
        ChannelField::Signal,
        FieldStructure::new(FieldType::U16, 6, 0, 0),
    ),
    (
        ChannelField::NearIR,
        FieldStructure::new(FieldType::U16, 8, 0, 0),
    ),
    (
        ChannelField::Raw32Word1,
        FieldStructure::new(FieldType::U32, 0, 0, 0),
    ),
    (
        ChannelField::Raw32Word2,
        FieldStructure::new(FieldType::U32, 4, 0, 0),
    ),
    (
        ChannelField::Raw32Word3,
        FieldStructure::new(FieldType::U32, 8, 0, 0),
    ),
];

const LEGACY_PROFILE: ColumnProfile = ColumnProfile {
    fields: ChannelLayout::new(LEGACY_FIELDS),
    data_size: 12,
};

const DUAL_RETURNS_FIELDS: &[(ChannelField, FieldStructure)] = &[
    (
        ChannelField::Range,
        FieldStructure::new(FieldType::U32, 0, 0x0007_FFFF, 0),
    ),
    (
        ChannelField::Flags,
        FieldStructure::new(FieldType::U8, 2, 0b1111_1000, 3),
    ),
    (
        ChannelField::Reflectivity,
        FieldStructure::new(FieldType::U8, 3, 0, 0),
    ),
    (
        ChannelField::Range2,
        FieldStructure::new(FieldType::U32, 4, 0x0007_FFFF, 0),
    ),
    (
        ChannelField::Flags2,
        FieldStructure::new(FieldType::U8, 6, 0b1111_1000, 3),
    ),
    (
        ChannelField::Reflectivity2,
        FieldStructure::new(FieldType::U8, 7, 0, 0),
    ),
    (
        ChannelField::Signal,
        FieldStructure::new(FieldType::U16, 8, 0, 0),
    ),
    (
        ChannelField::Signal2,
        FieldStructure::new(FieldType::U16, 10, 0, 0),
    ),
    (
        ChannelField::NearIR,
        FieldStructure::new(FieldType::U16, 12, 0, 0),
    ),
    (
        ChannelField::Raw32Word1,
        FieldStructure::new(FieldType::U32, 0, 0, 0),
    ),
    (
        ChannelField::Raw32Word2,
        FieldStructure::new(FieldType::U32, 4, 0, 0),
    ),
    (
        ChannelField::Raw32Word3,
        FieldStructure::new(FieldType::U32, 8, 0, 0),
    ),
    (
        ChannelField::Raw32Word4,
        FieldStructure::new(FieldType::U32, 12, 0, 0),
    ),
];

const DUAL_RETURNS_PROFILE: ColumnProfile = ColumnProfile {
    fields: ChannelLayout::new(DUAL_RETURNS_FIELDS),
    data_size: 16,
};

const SINGLE_RETURNS_FIELDS: &[(ChannelField, FieldStructure)] = &[
    (
        ChannelField::Range,
        FieldStructure::new(FieldType::U32, 0, 0x0007_FFFF, 0),
    ),
    (
        ChannelField::Flags,
        FieldStructure::new(FieldType::U8, 2, 0b1111_1000, 3),
    ),
    (
        ChannelField::Reflectivity,
        FieldStructure::new(FieldType::U8, 4, 0, 0),
    ),
    (
        ChannelField::Signal,
        FieldStructure::new(FieldType::U16, 6, 0, 0),
    ),
    (
        ChannelField::NearIR,
        FieldStructure::new(FieldType::U16, 8, 0, 0),
    ),
    (
        ChannelField::Raw32Word1,
        FieldStructure::new(FieldType::U32, 0, 0, 0),
    ),
    (
        ChannelField::Raw32Word2,
        FieldStructure::new(FieldType::U32, 4, 0, 0),
    ),
    (
        ChannelField::Raw32Word3,
        FieldStructure::new(FieldType::U32, 8, 0, 0),
    ),
];

const SINGLE_RETURNS_PROFILE: ColumnProfile = ColumnProfile {
    fields: ChannelLayout::new(SINGLE_RETURNS_FIELDS),
    data_size: 12,
};

const SINGLE_RETURNS_LOW_DATA_RATE_FIELDS: &[(ChannelField, FieldStructure)] = &[
    (
        ChannelField::Range,
        FieldStructure::new(FieldType::U32, 0, 0x7FFF, -3),
    ),
    (
        ChannelField::Flags,
        FieldStructure::new(FieldType::U8, 1, 0b1000_0000, 7),
    ),
    (
        ChannelField::Reflectivity,
        FieldStructure::new(FieldType::U8, 2, 0, 0),
    ),
    (
        ChannelField::NearIR,
        FieldStructure::new(FieldType::U16, 2, 0xFF00, 4),
    ),
    (
        ChannelField::Raw32Word1,
        FieldStructure::new(FieldType::U32, 0, 0, 0),
    ),
];

const SINGLE_RETURNS_LOW_DATA_RATE_PROFILE: ColumnProfile = ColumnProfile {
    fields: ChannelLayout::new(SINGLE_RETURNS_LOW_DATA_RATE_FIELDS),
    data_size: 4,
};

const FUSA_TWO_WORD_PIXEL_FIELDS: &[(ChannelField, FieldStructure)] = &[
    (
        ChannelField::Range,
        FieldStructure::new(FieldType::U32, 0, 0x7FFF, -3),
    ),
    (
        ChannelField::Flags,
        FieldStructure::new(FieldType::U8, 1, 0b1000_0000, 7),
    ),
    (
        ChannelField::Reflectivity,
        FieldStructure::new(FieldType::U8, 2, 0xFF, 0),
    ),
    (
        ChannelField::NearIR,
        FieldStructure::new(FieldType::U16, 3, 0xFF, -4),
    ),
    (
        ChannelField::Range2,
        FieldStructure::new(FieldType::U32, 4, 0x7FFF, -3),
    ),
    (
        ChannelField::Flags2,
        FieldStructure::new(FieldType::U8, 5, 0b1000_0000, 7),
    ),
    (
        ChannelField::Reflectivity2,
        FieldStructure::new(FieldType::U8, 6, 0xFF, 0),
    ),
    (
        ChannelField::Raw32Word1,
        FieldStructure::new(FieldType::U32, 0, 0, 0),
    ),
    (
        ChannelField::Raw32Word2,
        FieldStructure::new(FieldType::U32, 4, 0, 0),
    ),
];

const FUSA_TWO_WORD_PIXEL_PROFILE: ColumnProfile = ColumnProfile {
    fields: ChannelLayout::new(FUSA_TWO_WORD_PIXEL_FIELDS),
    data_size: 8,
};

/// How channel data from the LiDAR sensor is packaged and sent over the wire.
///
/// Each profile is bound to exactly one `ColumnProfile` describing the pixel
/// layout of its channel data. The numeric codes are stable wire values.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LidarProfile {
    /// The legacy profile (deprecated packet framing).
    #[default]
    Legacy = 0,
    /// Dual returns, encoded as `RNG19_RFL8_SIG16_NIR16_DUAL`.
    DualReturns = 1,
    /// Single returns (sensor default), encoded as `RNG19_RFL8_SIG16_NIR16`.
    SingleReturns = 2,
    /// Single returns at a reduced data rate, encoded as `RNG15_RFL8_NIR8`.
    SingleReturnsLowDataRate = 3,
    /// Functional Safety two-word pixel format, encoded as
    /// `FUSA_RNG15_RFL8_NIR8_DUAL`.
    FuSaTwoWordPixel = 4,
}

impl LidarProfile {
    /// Converts a numeric profile code to a `LidarProfile`.
    ///
    /// Unrecognized codes fall back to `Legacy`: the wire protocol has no
    /// "invalid profile" representation, only codes added after this
    /// implementation was written, and decoding must stay defined for them.
    pub fn from_code(code: u8) -> LidarProfile {
        match code {
            1 => LidarProfile::DualReturns,
            2 => LidarProfile::SingleReturns,
            3 => LidarProfile::SingleReturnsLowDataRate,
            4 => LidarProfile::FuSaTwoWordPixel,
            0 => LidarProfile::Legacy,
            other => {
                warn!("unknown lidar profile code {}, assuming legacy", other);
                LidarProfile::Legacy
            }
        }
    }

    /// Returns the numeric profile code of this `LidarProfile`.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the profile name as used by the sensor configuration protocol.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            LidarProfile::Legacy => "LEGACY",
            LidarProfile::DualReturns => "RNG19_RFL8_SIG16_NIR16_DUAL",
            LidarProfile::SingleReturns => "RNG19_RFL8_SIG16_NIR16",
            LidarProfile::SingleReturnsLowDataRate => "RNG15_RFL8_NIR8",
            LidarProfile::FuSaTwoWordPixel => "FUSA_RNG15_RFL8_NIR8_DUAL",
        }
    }

    /// Parses a profile wire name.
    /// Unrecognized names fall back to `Legacy`.
    pub fn from_wire_str(name: &str) -> LidarProfile {
        match name {
            "RNG19_RFL8_SIG16_NIR16_DUAL" => LidarProfile::DualReturns,
            "RNG19_RFL8_SIG16_NIR16" => LidarProfile::SingleReturns,
            "RNG15_RFL8_NIR8" => LidarProfile::SingleReturnsLowDataRate,
            "FUSA_RNG15_RFL8_NIR8_DUAL" => LidarProfile::FuSaTwoWordPixel,
            _ => LidarProfile::Legacy,
        }
    }

    /// Returns the column profile bound to this `LidarProfile`: the channel
    /// data layout and the pixel data size.
    pub fn column_profile(self) -> &'static ColumnProfile {
        match self {
            LidarProfile::Legacy => &LEGACY_PROFILE,
            LidarProfile::DualReturns => &DUAL_RETURNS_PROFILE,
            LidarProfile::SingleReturns => &SINGLE_RETURNS_PROFILE,
            LidarProfile::SingleReturnsLowDataRate => &SINGLE_RETURNS_LOW_DATA_RATE_PROFILE,
            LidarProfile::FuSaTwoWordPixel => &FUSA_TWO_WORD_PIXEL_PROFILE,
        }
    }

    /// Returns the channel data layout of this profile.
    pub fn column_fields(self) -> ChannelLayout {
        self.column_profile().fields
    }

    /// Returns the number of channel fields in this profile's layout.
    pub fn column_field_count(self) -> usize {
        self.column_fields().len()
    }

    /// Returns the size in bytes of one pixel's channel data under this
    /// profile.
    pub fn column_data_size(self) -> usize {
        self.column_profile().data_size
    }
}

impl fmt::Display for LidarProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LidarProfile::Legacy => "legacy",
            LidarProfile::DualReturns => "dual-returns",
            LidarProfile::SingleReturns => "single-returns",
            LidarProfile::SingleReturnsLowDataRate => "single-returns low-data-rate",
            LidarProfile::FuSaTwoWordPixel => "FuSa two-word pixel",
        };
        f.write_str(name)
    }
}

/// How IMU data is packaged and sent over the wire.
///
/// `Legacy` is currently the only defined profile.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImuProfile {
    #[default]
    Legacy = 0,
}

impl ImuProfile {
    /// Returns the profile name as used by the sensor configuration protocol.
    pub fn as_wire_str(self) -> &'static str {
        "LEGACY"
    }

    /// Parses an IMU profile wire name. With a single defined profile every
    /// input maps to `Legacy`.
    pub fn from_wire_str(_name: &str) -> ImuProfile {
        ImuProfile::Legacy
    }
}

impl fmt::Display for ImuProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("legacy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PROFILES: [LidarProfile; 5] = [
        LidarProfile::Legacy,
        LidarProfile::DualReturns,
        LidarProfile::SingleReturns,
        LidarProfile::SingleReturnsLowDataRate,
        LidarProfile::FuSaTwoWordPixel,
    ];

    #[test]
    fn pixel_data_sizes() {
        let cases = [
            (LidarProfile::Legacy, 12),
            (LidarProfile::DualReturns, 16),
            (LidarProfile::SingleReturns, 12),
            (LidarProfile::SingleReturnsLowDataRate, 4),
            (LidarProfile::FuSaTwoWordPixel, 8),
        ];

        for (profile, size) in cases {
            assert_eq!(profile.column_data_size(), size, "{}", profile);
        }
    }

    #[test]
    fn field_counts() {
        let cases = [
            (LidarProfile::Legacy, 7),
            (LidarProfile::DualReturns, 13),
            (LidarProfile::SingleReturns, 8),
            (LidarProfile::SingleReturnsLowDataRate, 5),
            (LidarProfile::FuSaTwoWordPixel, 9),
        ];

        for (profile, count) in cases {
            assert_eq!(profile.column_field_count(), count, "{}", profile);
        }
    }

    #[test]
    fn no_field_reads_past_pixel_data() {
        for profile in ALL_PROFILES {
            let data_size = profile.column_data_size();
            for (field, structure) in profile.column_fields().iter() {
                let end = structure.byte_offset + structure.field_type.size_bytes();
                assert!(
                    end <= data_size,
                    "{} {} reads past pixel data ({} > {})",
                    profile,
                    field,
                    end,
                    data_size
                );
            }
        }
    }

    #[test]
    fn layout_keys_are_unique() {
        for profile in ALL_PROFILES {
            let layout = profile.column_fields();
            for (i, (field, _)) in layout.iter().enumerate() {
                let duplicates = layout.iter().skip(i + 1).filter(|(f, _)| f == field).count();
                assert_eq!(duplicates, 0, "{} duplicated in {}", field, profile);
            }
        }
    }

    #[test]
    fn range_precision_per_profile() {
        // 19-bit range encodings
        for profile in [LidarProfile::DualReturns, LidarProfile::SingleReturns] {
            let layout = profile.column_fields();
            let range = layout.get(ChannelField::Range).unwrap();
            assert_eq!(range.mask_bit_count(), 19, "{}", profile);
        }

        // 15-bit range encodings
        for profile in [
            LidarProfile::SingleReturnsLowDataRate,
            LidarProfile::FuSaTwoWordPixel,
        ] {
            let layout = profile.column_fields();
            let range = layout.get(ChannelField::Range).unwrap();
            assert_eq!(range.mask_bit_count(), 15, "{}", profile);
        }

        // the legacy profile carries no dedicated range field
        assert!(!LidarProfile::Legacy
            .column_fields()
            .contains(ChannelField::Range));
    }

    #[test]
    fn dual_profiles_carry_second_returns() {
        for profile in [LidarProfile::DualReturns, LidarProfile::FuSaTwoWordPixel] {
            let layout = profile.column_fields();
            assert!(layout.contains(ChannelField::Range2), "{}", profile);
            assert!(layout.contains(ChannelField::Reflectivity2), "{}", profile);
            assert!(layout.contains(ChannelField::Flags2), "{}", profile);
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_legacy() {
        for code in [5u8, 17, 0xFF] {
            let profile = LidarProfile::from_code(code);
            assert_eq!(profile, LidarProfile::Legacy);
            assert_eq!(profile.column_profile(), &LEGACY_PROFILE);
        }
    }

    #[test]
    fn wire_name_round_trip() {
        for profile in ALL_PROFILES {
            assert_eq!(LidarProfile::from_wire_str(profile.as_wire_str()), profile);
        }

        // unrecognized names degrade to the legacy profile, whose wire name
        // is then reported for them
        let unknown = LidarProfile::from_wire_str("RNG31_EXPERIMENTAL");
        assert_eq!(unknown, LidarProfile::Legacy);
        assert_eq!(unknown.as_wire_str(), "LEGACY");
    }

    #[test]
    fn profile_code_round_trip() {
        for profile in ALL_PROFILES {
            assert_eq!(LidarProfile::from_code(profile.code()), profile);
        }
    }

    #[test]
    fn imu_profile_is_single_valued() {
        assert_eq!(ImuProfile::from_wire_str("LEGACY"), ImuProfile::Legacy);
        assert_eq!(ImuProfile::from_wire_str("ANYTHING"), ImuProfile::Legacy);
        assert_eq!(ImuProfile::Legacy.as_wire_str(), "LEGACY");
    }
}
