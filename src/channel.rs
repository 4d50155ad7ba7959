//! Named measurement channels and the per-profile lookup table mapping them
//! to their bit-packing descriptions.

use crate::field::FieldStructure;
use std::fmt;

/// A named measurement channel carried in a pixel's channel data.
///
/// The numeric codes are part of the wire protocol and are stable; they are
/// used as table keys and must never be reordered.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelField {
    /// Sentinel for unrecognized channel names or codes.
    #[default]
    Unknown = 0,
    /// Range of the first return.
    Range = 1,
    /// Range of the second return.
    Range2 = 2,
    /// Signal photons of the first return.
    Signal = 3,
    /// Signal photons of the second return.
    Signal2 = 4,
    /// Calibrated reflectivity of the first return.
    Reflectivity = 5,
    /// Calibrated reflectivity of the second return.
    Reflectivity2 = 6,
    /// Near-infrared photons related to natural environmental illumination.
    NearIR = 7,
    /// Flags of the first return.
    Flags = 8,
    /// Flags of the second return.
    Flags2 = 9,

    /// Raw bytes of the column headers.
    RawHeaders = 40,
    Raw32Word5 = 45,
    Raw32Word6 = 46,
    Raw32Word7 = 47,
    Raw32Word8 = 48,
    Raw32Word9 = 49,

    Custom0 = 50,
    Custom1 = 51,
    Custom2 = 52,
    Custom3 = 53,
    Custom4 = 54,
    Custom5 = 55,
    Custom6 = 56,
    Custom7 = 57,
    Custom8 = 58,
    Custom9 = 59,

    /// Raw 32-bit words of the pixel's channel data.
    Raw32Word1 = 60,
    Raw32Word2 = 61,
    Raw32Word3 = 62,
    Raw32Word4 = 63,

    /// Count sentinel; one past the largest assigned code.
    Max = 64,
}

impl ChannelField {
    /// Converts a numeric channel code to a `ChannelField`.
    /// Unrecognized codes fall back to `Unknown`.
    pub fn from_code(code: u8) -> ChannelField {
        match code {
            1 => ChannelField::Range,
            2 => ChannelField::Range2,
            3 => ChannelField::Signal,
            4 => ChannelField::Signal2,
            5 => ChannelField::Reflectivity,
            6 => ChannelField::Reflectivity2,
            7 => ChannelField::NearIR,
            8 => ChannelField::Flags,
            9 => ChannelField::Flags2,
            40 => ChannelField::RawHeaders,
            45 => ChannelField::Raw32Word5,
            46 => ChannelField::Raw32Word6,
            47 => ChannelField::Raw32Word7,
            48 => ChannelField::Raw32Word8,
            49 => ChannelField::Raw32Word9,
            50 => ChannelField::Custom0,
            51 => ChannelField::Custom1,
            52 => ChannelField::Custom2,
            53 => ChannelField::Custom3,
            54 => ChannelField::Custom4,
            55 => ChannelField::Custom5,
            56 => ChannelField::Custom6,
            57 => ChannelField::Custom7,
            58 => ChannelField::Custom8,
            59 => ChannelField::Custom9,
            60 => ChannelField::Raw32Word1,
            61 => ChannelField::Raw32Word2,
            62 => ChannelField::Raw32Word3,
            63 => ChannelField::Raw32Word4,
            64 => ChannelField::Max,
            _ => ChannelField::Unknown,
        }
    }

    /// Returns the numeric channel code of this `ChannelField`.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the wire name of this `ChannelField` as used by the sensor
    /// configuration protocol. `Max` has no wire name and reports `UNKNOWN`.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            ChannelField::Unknown | ChannelField::Max => "UNKNOWN",
            ChannelField::Range => "RANGE",
            ChannelField::Range2 => "RANGE2",
            ChannelField::Signal => "SIGNAL",
            ChannelField::Signal2 => "SIGNAL2",
            ChannelField::Reflectivity => "REFLECTIVITY",
            ChannelField::Reflectivity2 => "REFLECTIVITY2",
            ChannelField::NearIR => "NEAR_IR",
            ChannelField::Flags => "FLAGS",
            ChannelField::Flags2 => "FLAGS2",
            ChannelField::RawHeaders => "RAW_HEADERS",
            ChannelField::Raw32Word5 => "RAW32_WORD5",
            ChannelField::Raw32Word6 => "RAW32_WORD6",
            ChannelField::Raw32Word7 => "RAW32_WORD7",
            ChannelField::Raw32Word8 => "RAW32_WORD8",
            ChannelField::Raw32Word9 => "RAW32_WORD9",
            ChannelField::Custom0 => "CUSTOM0",
            ChannelField::Custom1 => "CUSTOM1",
            ChannelField::Custom2 => "CUSTOM2",
            ChannelField::Custom3 => "CUSTOM3",
            ChannelField::Custom4 => "CUSTOM4",
            ChannelField::Custom5 => "CUSTOM5",
            ChannelField::Custom6 => "CUSTOM6",
            ChannelField::Custom7 => "CUSTOM7",
            ChannelField::Custom8 => "CUSTOM8",
            ChannelField::Custom9 => "CUSTOM9",
            ChannelField::Raw32Word1 => "RAW32_WORD1",
            ChannelField::Raw32Word2 => "RAW32_WORD2",
            ChannelField::Raw32Word3 => "RAW32_WORD3",
            ChannelField::Raw32Word4 => "RAW32_WORD4",
        }
    }

    /// Parses a channel wire name.
    /// Unrecognized names fall back to `Unknown`.
    pub fn from_wire_str(name: &str) -> ChannelField {
        match name {
            "RANGE" => ChannelField::Range,
            "RANGE2" => ChannelField::Range2,
            "SIGNAL" => ChannelField::Signal,
            "SIGNAL2" => ChannelField::Signal2,
            "REFLECTIVITY" => ChannelField::Reflectivity,
            "REFLECTIVITY2" => ChannelField::Reflectivity2,
            "NEAR_IR" => ChannelField::NearIR,
            "FLAGS" => ChannelField::Flags,
            "FLAGS2" => ChannelField::Flags2,
            "RAW_HEADERS" => ChannelField::RawHeaders,
            "RAW32_WORD5" => ChannelField::Raw32Word5,
            "RAW32_WORD6" => ChannelField::Raw32Word6,
            "RAW32_WORD7" => ChannelField::Raw32Word7,
            "RAW32_WORD8" => ChannelField::Raw32Word8,
            "RAW32_WORD9" => ChannelField::Raw32Word9,
            "CUSTOM0" => ChannelField::Custom0,
            "CUSTOM1" => ChannelField::Custom1,
            "CUSTOM2" => ChannelField::Custom2,
            "CUSTOM3" => ChannelField::Custom3,
            "CUSTOM4" => ChannelField::Custom4,
            "CUSTOM5" => ChannelField::Custom5,
            "CUSTOM6" => ChannelField::Custom6,
            "CUSTOM7" => ChannelField::Custom7,
            "CUSTOM8" => ChannelField::Custom8,
            "CUSTOM9" => ChannelField::Custom9,
            "RAW32_WORD1" => ChannelField::Raw32Word1,
            "RAW32_WORD2" => ChannelField::Raw32Word2,
            "RAW32_WORD3" => ChannelField::Raw32Word3,
            "RAW32_WORD4" => ChannelField::Raw32Word4,
            _ => ChannelField::Unknown,
        }
    }
}

impl fmt::Display for ChannelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// The complete bit-packing recipe for one pixel's channel data under one
/// profile: a lookup table from `ChannelField` to its `FieldStructure`.
///
/// Layouts are small (at most 13 entries), statically constructed, and never
/// mutated, so a sorted slice with a linear lookup is all that is needed.
/// Entry order is irrelevant; this is a lookup table, not a sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChannelLayout {
    entries: &'static [(ChannelField, FieldStructure)],
}

impl ChannelLayout {
    /// Creates a layout over a static entry table. Keys must be unique.
    pub const fn new(entries: &'static [(ChannelField, FieldStructure)]) -> ChannelLayout {
        ChannelLayout { entries }
    }

    /// Looks up the bit-packing description of a channel field.
    pub fn get(&self, field: ChannelField) -> Option<&FieldStructure> {
        self.entries
            .iter()
            .find(|(key, _)| *key == field)
            .map(|(_, structure)| structure)
    }

    /// Returns `true` if the layout carries the given channel field.
    pub fn contains(&self, field: ChannelField) -> bool {
        self.get(field).is_some()
    }

    /// Returns the number of channel fields in the layout.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the layout has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the layout's `(field, structure)` entries.
    pub fn iter(&self) -> impl Iterator<Item = &(ChannelField, FieldStructure)> {
        self.entries.iter()
    }
}
