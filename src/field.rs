//! Bit-packing primitives describing how channel fields are laid out inside a
//! pixel's channel data words.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};

/// The storage width of a single channel field within a pixel's channel data.
///
/// Fields on the wire are unsigned little-endian integers of a fixed width.
/// `Void` describes the absence of a stored value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    #[default]
    Void,
    U8,
    U16,
    U32,
    U64,
}

impl FieldType {
    /// Converts a numeric type code to a `FieldType`.
    /// Unrecognized codes fall back to `Void`.
    pub fn from_code(code: u8) -> FieldType {
        match code {
            1 => FieldType::U8,
            2 => FieldType::U16,
            3 => FieldType::U32,
            4 => FieldType::U64,
            _ => FieldType::Void,
        }
    }

    /// Returns the numeric type code of this `FieldType`.
    pub fn code(self) -> u8 {
        match self {
            FieldType::Void => 0,
            FieldType::U8 => 1,
            FieldType::U16 => 2,
            FieldType::U32 => 3,
            FieldType::U64 => 4,
        }
    }

    /// Returns the size of the type in bytes.
    pub const fn size_bytes(self) -> usize {
        match self {
            FieldType::Void => 0,
            FieldType::U8 => 1,
            FieldType::U16 => 2,
            FieldType::U32 => 4,
            FieldType::U64 => 8,
        }
    }

    /// Returns the bitmask covering the full width of the type.
    ///
    /// `Void` and `U64` are explicit cases: shifting a `u64` by 0 or 64 bits
    /// would wrap rather than produce the intended mask.
    pub const fn full_mask(self) -> u64 {
        match self {
            FieldType::Void => 0,
            FieldType::U64 => u64::MAX,
            _ => (1u64 << (self.size_bytes() * 8)) - 1,
        }
    }
}

/// Describes how to extract one channel field from a pixel's channel data:
/// the storage type, the byte offset of the word holding the field, an
/// optional mask isolating the field's bits within that word, and a shift
/// aligning them.
///
/// The shift is signed: a positive shift moves bits right, a negative shift
/// moves bits left. All five profile tables are authored against this
/// convention.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FieldStructure {
    /// Storage type of the word holding the field.
    pub field_type: FieldType,
    /// Byte offset of the word within the pixel's channel data.
    pub byte_offset: usize,
    /// Mask isolating the field's bits within the stored word.
    /// Zero means the full width of `field_type` is used.
    pub value_mask: u64,
    /// Signed bit shift: positive shifts right, negative shifts left.
    pub shift: i32,
}

impl FieldStructure {
    /// Creates a new `FieldStructure`.
    pub const fn new(
        field_type: FieldType,
        byte_offset: usize,
        value_mask: u64,
        shift: i32,
    ) -> FieldStructure {
        FieldStructure {
            field_type,
            byte_offset,
            value_mask,
            shift,
        }
    }

    /// Returns the mask covering the bits of an extracted field value.
    ///
    /// The value mask (or, when zero, the type's full mask) is shifted the
    /// same way an extracted value is, then clamped to the type's width.
    /// A consumer can test extracted values against this mask, or count its
    /// bits to learn the precision a field carries.
    pub fn effective_mask(&self) -> u64 {
        let type_mask = self.field_type.full_mask();

        let mut mask = self.value_mask;
        if mask == 0 {
            mask = type_mask;
        }

        if self.shift > 0 {
            mask = mask.checked_shr(self.shift as u32).unwrap_or(0);
        } else if self.shift < 0 {
            mask = mask.checked_shl(self.shift.unsigned_abs()).unwrap_or(0);
        }

        mask & type_mask
    }

    /// Returns the number of bits set in the effective mask, i.e. the number
    /// of bits of precision the field carries.
    pub fn mask_bit_count(&self) -> u32 {
        self.effective_mask().count_ones()
    }

    /// Extracts the field value from a pixel's channel data.
    ///
    /// Reads the little-endian word of `field_type` width at `byte_offset`,
    /// applies the value mask, then applies the signed shift.
    ///
    /// # Arguments
    ///
    /// * `data` - One pixel's channel data bytes.
    pub fn read(&self, data: &[u8]) -> Result<u64> {
        let size = self.field_type.size_bytes();
        let end = self.byte_offset + size;
        if end > data.len() {
            return Err(Error::BufferTooShort {
                what: "channel field",
                wanted: end,
                got: data.len(),
            });
        }

        let word = &data[self.byte_offset..end];
        let raw = match self.field_type {
            FieldType::Void => 0,
            FieldType::U8 => u64::from(word[0]),
            FieldType::U16 => u64::from(LittleEndian::read_u16(word)),
            FieldType::U32 => u64::from(LittleEndian::read_u32(word)),
            FieldType::U64 => LittleEndian::read_u64(word),
        };

        let mut mask = self.value_mask;
        if mask == 0 {
            mask = self.field_type.full_mask();
        }

        let masked = raw & mask;
        let value = if self.shift > 0 {
            masked.checked_shr(self.shift as u32).unwrap_or(0)
        } else if self.shift < 0 {
            masked.checked_shl(self.shift.unsigned_abs()).unwrap_or(0)
        } else {
            masked
        };

        Ok(value)
    }
}
