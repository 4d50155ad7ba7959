//! Borrowed views over raw LiDAR datagrams.
//!
//! A [`LidarPacket`] checks the buffer length against the configured packet
//! geometry once, then hands out [`Column`] views that slice the buffer using
//! the offsets from [`LidarDataFormat`] and extract channel fields through
//! the active profile's layout. Decoding is pure and performs no I/O; many
//! packets may be decoded concurrently without shared state.

use crate::channel::ChannelField;
use crate::error::{Error, Result};
use crate::format::LidarDataFormat;
use crate::profile::LidarProfile;
use byteorder::{ByteOrder, LittleEndian};
use log::trace;

/// A borrowed view over one LiDAR datagram.
#[derive(Debug, Copy, Clone)]
pub struct LidarPacket<'a> {
    data: &'a [u8],
    format: &'a LidarDataFormat,
}

impl<'a> LidarPacket<'a> {
    /// Creates a packet view over `data`, validating its length against the
    /// geometry of `format`. Trailing bytes beyond the packet size are
    /// ignored.
    pub fn new(data: &'a [u8], format: &'a LidarDataFormat) -> Result<LidarPacket<'a>> {
        let wanted = format.size();
        if data.len() < wanted {
            return Err(Error::BufferTooShort {
                what: "lidar packet",
                wanted,
                got: data.len(),
            });
        }

        trace!(
            "lidar packet view: {} columns of {} bytes, {} profile",
            format.columns_per_packet,
            format.column_size(),
            format.lidar_profile
        );
        Ok(LidarPacket { data, format })
    }

    /// Returns the format this view decodes against.
    pub fn format(&self) -> &'a LidarDataFormat {
        self.format
    }

    /// Returns the packet-level header bytes. Empty for the legacy framing,
    /// which has no packet header.
    pub fn header(&self) -> &'a [u8] {
        &self.data[..self.format.header_size()]
    }

    /// Returns the packet-level footer bytes. Empty for the legacy framing,
    /// which has no packet footer.
    pub fn footer(&self) -> &'a [u8] {
        if self.format.footer_size() == 0 {
            &[]
        } else {
            let offset = self.format.footer_offset();
            &self.data[offset..offset + self.format.footer_size()]
        }
    }

    /// Returns the packet type from the packet header, or `None` for the
    /// legacy framing, which carries no packet-level metadata.
    pub fn packet_type(&self) -> Option<u16> {
        match self.format.lidar_profile {
            LidarProfile::Legacy => None,
            _ => Some(LittleEndian::read_u16(&self.data[0..2])),
        }
    }

    /// Returns the frame ID from the packet header, or `None` for the legacy
    /// framing, which carries the frame ID per column instead.
    pub fn frame_id(&self) -> Option<u16> {
        match self.format.lidar_profile {
            LidarProfile::Legacy => None,
            _ => Some(LittleEndian::read_u16(&self.data[2..4])),
        }
    }

    /// Returns a view over the column at `column`, or `None` when the index
    /// is outside the packet.
    pub fn column(&self, column: usize) -> Option<Column<'a>> {
        if column >= self.format.columns_per_packet {
            return None;
        }

        let offset = self.format.column_offset(column);
        let data = &self.data[offset..offset + self.format.column_size()];
        Some(Column {
            data,
            format: self.format,
        })
    }

    /// Iterates over all columns in the packet.
    pub fn columns(&self) -> impl Iterator<Item = Column<'a>> + '_ {
        (0..self.format.columns_per_packet).filter_map(|column| self.column(column))
    }
}

/// A borrowed view over one column of a LiDAR datagram: the column header,
/// the pixels' channel data, and (for the legacy framing) the column footer.
#[derive(Debug, Copy, Clone)]
pub struct Column<'a> {
    data: &'a [u8],
    format: &'a LidarDataFormat,
}

impl<'a> Column<'a> {
    /// Returns the column timestamp in ns.
    pub fn timestamp(&self) -> u64 {
        LittleEndian::read_u64(&self.data[0..8])
    }

    /// Returns the measurement ID, the azimuth index of this column within
    /// the frame.
    pub fn measurement_id(&self) -> u16 {
        LittleEndian::read_u16(&self.data[8..10])
    }

    /// Returns the frame ID carried in the column header, or `None` for
    /// newer framings, which carry the frame ID in the packet header.
    pub fn frame_id(&self) -> Option<u16> {
        match self.format.lidar_profile {
            LidarProfile::Legacy => Some(LittleEndian::read_u16(&self.data[10..12])),
            _ => None,
        }
    }

    /// Returns the raw column status word: the 32-bit footer word for the
    /// legacy framing, the 16-bit header word at byte 10 otherwise.
    pub fn status(&self) -> u32 {
        let offset = self.format.column_status_offset();
        match self.format.lidar_profile {
            LidarProfile::Legacy => LittleEndian::read_u32(&self.data[offset..offset + 4]),
            _ => u32::from(LittleEndian::read_u16(&self.data[offset..offset + 2])),
        }
    }

    /// Returns `true` if the sensor marked this column's data as valid.
    pub fn is_valid(&self) -> bool {
        match self.format.lidar_profile {
            LidarProfile::Legacy => self.status() == 0xFFFF_FFFF,
            _ => self.status() & 0x1 == 0x1,
        }
    }

    /// Returns the channel data bytes of the pixel at `row`, or `None` when
    /// the row is outside the column.
    pub fn pixel(&self, row: usize) -> Option<&'a [u8]> {
        if row >= self.format.pixels_per_column {
            return None;
        }

        let data_size = self.format.lidar_profile.column_data_size();
        let offset = self.format.column_header_size() + row * data_size;
        Some(&self.data[offset..offset + data_size])
    }

    /// Extracts one channel field value from the pixel at `row`.
    ///
    /// Returns `None` when the row is outside the column or the active
    /// profile does not carry the requested channel.
    pub fn field(&self, row: usize, channel: ChannelField) -> Option<u64> {
        let pixel = self.pixel(row)?;
        let layout = self.format.lidar_profile.column_fields();
        let structure = layout.get(channel)?;

        // the profile tables guarantee in-bounds reads within one pixel
        structure.read(pixel).ok()
    }

    /// Decodes every channel field of the pixel at `row`, in the layout's
    /// table order.
    pub fn decode_pixel(&self, row: usize) -> Option<Vec<(ChannelField, u64)>> {
        let pixel = self.pixel(row)?;
        let layout = self.format.lidar_profile.column_fields();

        let mut values = Vec::with_capacity(layout.len());
        for (channel, structure) in layout.iter() {
            match structure.read(pixel) {
                Ok(value) => values.push((*channel, value)),
                Err(_) => return None,
            }
        }

        Some(values)
    }
}
