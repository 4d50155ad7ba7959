//! Packet geometry derived from the sensor's configured data format.

use crate::profile::{ImuProfile, LidarProfile};

/// The window of columns over which the sensor fires, as a pair of column
/// indices. A window of `(0, 0)` means no window has been configured.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ColumnWindow {
    pub start: usize,
    pub end: usize,
}

impl ColumnWindow {
    /// Returns `true` if no window has been configured.
    pub fn is_zero(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// The configured format of the sensor's LiDAR data stream, and the packet
/// geometry that follows from it.
///
/// The profile and counts are supplied by sensor configuration at session
/// start; every geometry method below is a pure function of them. The legacy
/// profile uses an older packet framing than all newer profiles: no packet
/// header or footer, a larger column header, and a column footer carrying the
/// column status.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LidarDataFormat {
    /// Active LiDAR data profile.
    pub lidar_profile: LidarProfile,
    /// Active IMU data profile.
    pub imu_profile: ImuProfile,

    /// Azimuth window over which the sensor fires.
    pub column_window: ColumnWindow,
    /// Number of columns in one full rotation.
    pub columns_per_frame: usize,
    /// Number of columns in one LiDAR packet.
    pub columns_per_packet: usize,

    /// Per-row pixel shift applied when destaggering a frame, if published
    /// by the sensor.
    pub pixel_shift_by_row: Option<Vec<i32>>,
    /// Number of pixels in one column.
    pub pixels_per_column: usize,
}

impl LidarDataFormat {
    /// Returns the largest frame ID the sensor emits before wrapping.
    /// The legacy profile uses a 32-bit frame counter; all newer profiles
    /// use a 16-bit counter.
    pub fn max_frame_id(&self) -> u64 {
        match self.lidar_profile {
            LidarProfile::Legacy => u64::from(u32::MAX),
            _ => u64::from(u16::MAX),
        }
    }

    /// Returns the total size in bytes of one LiDAR packet: header, columns,
    /// and footer.
    pub fn size(&self) -> usize {
        self.header_size() + (self.columns_per_packet * self.column_size()) + self.footer_size()
    }

    /// Returns the size in bytes of the packet-level header.
    pub fn header_size(&self) -> usize {
        match self.lidar_profile {
            LidarProfile::Legacy => 0,
            _ => 32,
        }
    }

    /// Returns the size in bytes of the packet-level footer.
    pub fn footer_size(&self) -> usize {
        match self.lidar_profile {
            LidarProfile::Legacy => 0,
            _ => 32,
        }
    }

    /// Returns the byte offset of the packet-level footer, or 0 when the
    /// format has no footer.
    pub fn footer_offset(&self) -> usize {
        if self.footer_size() == 0 {
            0
        } else {
            self.header_size() + (self.columns_per_packet * self.column_size())
        }
    }

    /// Returns the size in bytes of one column: column header, pixel channel
    /// data, and column footer.
    pub fn column_size(&self) -> usize {
        self.column_header_size()
            + (self.pixels_per_column * self.lidar_profile.column_data_size())
            + self.column_footer_size()
    }

    /// Returns the byte offset of the column at `column` within the packet.
    pub fn column_offset(&self, column: usize) -> usize {
        self.header_size() + (column * self.column_size())
    }

    /// Returns the size in bytes of the column header.
    pub fn column_header_size(&self) -> usize {
        match self.lidar_profile {
            LidarProfile::Legacy => 16,
            _ => 12,
        }
    }

    /// Returns the size in bytes of the column footer.
    pub fn column_footer_size(&self) -> usize {
        match self.lidar_profile {
            LidarProfile::Legacy => 4,
            _ => 0,
        }
    }

    /// Returns the byte offset of the column status word within a column.
    ///
    /// The legacy profile stores the status as the column footer word. All
    /// newer profiles store it at byte 10 of the column header; the value is
    /// a protocol constant, not derived from the header size.
    pub fn column_status_offset(&self) -> usize {
        match self.lidar_profile {
            LidarProfile::Legacy => self.column_size() - self.column_footer_size(),
            _ => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(lidar_profile: LidarProfile) -> LidarDataFormat {
        LidarDataFormat {
            lidar_profile,
            imu_profile: ImuProfile::Legacy,
            column_window: ColumnWindow { start: 0, end: 1023 },
            columns_per_frame: 1024,
            columns_per_packet: 16,
            pixel_shift_by_row: None,
            pixels_per_column: 64,
        }
    }

    #[test]
    fn legacy_packet_geometry() {
        let format = format(LidarProfile::Legacy);

        assert_eq!(format.header_size(), 0);
        assert_eq!(format.footer_size(), 0);
        assert_eq!(format.footer_offset(), 0);
        assert_eq!(format.column_header_size(), 16);
        assert_eq!(format.column_footer_size(), 4);
        assert_eq!(format.column_size(), 16 + 64 * 12 + 4);
        assert_eq!(format.size(), 16 * (16 + 64 * 12 + 4));
    }

    #[test]
    fn dual_returns_packet_geometry() {
        let format = format(LidarProfile::DualReturns);

        assert_eq!(format.header_size(), 32);
        assert_eq!(format.footer_size(), 32);
        assert_eq!(format.column_header_size(), 12);
        assert_eq!(format.column_footer_size(), 0);
        assert_eq!(format.column_size(), 12 + 64 * 16);
        assert_eq!(format.size(), 32 + 16 * (12 + 64 * 16) + 32);
        assert_eq!(format.footer_offset(), 32 + 16 * (12 + 64 * 16));
    }

    #[test]
    fn column_offsets_are_contiguous() {
        for profile in [
            LidarProfile::Legacy,
            LidarProfile::DualReturns,
            LidarProfile::SingleReturns,
            LidarProfile::SingleReturnsLowDataRate,
            LidarProfile::FuSaTwoWordPixel,
        ] {
            let format = format(profile);
            assert_eq!(format.column_offset(0), format.header_size());

            for column in 0..format.columns_per_packet {
                assert_eq!(
                    format.column_offset(column + 1) - format.column_offset(column),
                    format.column_size()
                );
            }
        }
    }

    #[test]
    fn column_status_offsets() {
        let legacy = format(LidarProfile::Legacy);
        // the status is the last word of the column, in the footer
        assert_eq!(
            legacy.column_status_offset(),
            legacy.column_size() - legacy.column_footer_size()
        );
        assert_eq!(legacy.column_status_offset(), 16 + 64 * 12);

        for profile in [
            LidarProfile::DualReturns,
            LidarProfile::SingleReturns,
            LidarProfile::SingleReturnsLowDataRate,
            LidarProfile::FuSaTwoWordPixel,
        ] {
            assert_eq!(format(profile).column_status_offset(), 10);
        }
    }

    #[test]
    fn max_frame_id_per_framing() {
        assert_eq!(
            format(LidarProfile::Legacy).max_frame_id(),
            u64::from(u32::MAX)
        );

        for profile in [
            LidarProfile::DualReturns,
            LidarProfile::SingleReturns,
            LidarProfile::SingleReturnsLowDataRate,
            LidarProfile::FuSaTwoWordPixel,
        ] {
            assert_eq!(format(profile).max_frame_id(), u64::from(u16::MAX));
        }
    }

    #[test]
    fn column_window_zero() {
        assert!(ColumnWindow::default().is_zero());
        assert!(!ColumnWindow { start: 0, end: 1023 }.is_zero());
    }
}
