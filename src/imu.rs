//! IMU packet decoding.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use log::trace;
use std::fmt;

/// One decoded IMU datagram: three timestamps followed by linear acceleration
/// and angular velocity readings.
///
/// The wire record is a fixed 48-byte little-endian layout with no
/// bit-packing; fields sit at sequential offsets.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ImuPacket {
    /// Timestamp of the monotonic system time since boot, in ns.
    pub diagnostic_system_time: u64,
    /// Timestamp of the accelerometer reading relative to the configured
    /// time source, in ns.
    pub accelerometer_time: u64,
    /// Timestamp of the gyroscope reading relative to the configured time
    /// source, in ns.
    pub gyroscope_time: u64,

    /// Measured linear acceleration in g for the X axis.
    pub linear_acceleration_x: f32,
    /// Measured linear acceleration in g for the Y axis.
    pub linear_acceleration_y: f32,
    /// Measured linear acceleration in g for the Z axis.
    pub linear_acceleration_z: f32,

    /// Measured angular velocity in °/sec for the X axis.
    pub angular_velocity_x: f32,
    /// Measured angular velocity in °/sec for the Y axis.
    pub angular_velocity_y: f32,
    /// Measured angular velocity in °/sec for the Z axis.
    pub angular_velocity_z: f32,
}

impl ImuPacket {
    /// Size in bytes of one IMU datagram.
    pub const SIZE: usize = 48;

    /// Decodes an IMU datagram from `data`.
    ///
    /// Fails with `Error::BufferTooShort` when fewer than 48 bytes are
    /// supplied; a truncated datagram cannot be safely interpreted.
    pub fn decode(data: &[u8]) -> Result<ImuPacket> {
        if data.len() < Self::SIZE {
            return Err(Error::BufferTooShort {
                what: "IMU packet",
                wanted: Self::SIZE,
                got: data.len(),
            });
        }

        trace!("decoding IMU packet from {} bytes", data.len());
        Ok(ImuPacket {
            diagnostic_system_time: LittleEndian::read_u64(&data[0..8]),
            accelerometer_time: LittleEndian::read_u64(&data[8..16]),
            gyroscope_time: LittleEndian::read_u64(&data[16..24]),
            linear_acceleration_x: LittleEndian::read_f32(&data[24..28]),
            linear_acceleration_y: LittleEndian::read_f32(&data[28..32]),
            linear_acceleration_z: LittleEndian::read_f32(&data[32..36]),
            angular_velocity_x: LittleEndian::read_f32(&data[36..40]),
            angular_velocity_y: LittleEndian::read_f32(&data[40..44]),
            angular_velocity_z: LittleEndian::read_f32(&data[44..48]),
        })
    }

    /// Returns the linear acceleration as `[x, y, z]` in g.
    pub fn linear_acceleration(&self) -> [f32; 3] {
        [
            self.linear_acceleration_x,
            self.linear_acceleration_y,
            self.linear_acceleration_z,
        ]
    }

    /// Returns the angular velocity as `[x, y, z]` in °/sec.
    pub fn angular_velocity(&self) -> [f32; 3] {
        [
            self.angular_velocity_x,
            self.angular_velocity_y,
            self.angular_velocity_z,
        ]
    }
}

impl fmt::Display for ImuPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImuPacket(t+{}, a=[{:.4}, {:.4}, {:.4}], w=[{:.4}, {:.4}, {:.4}])",
            self.diagnostic_system_time,
            self.linear_acceleration_x,
            self.linear_acceleration_y,
            self.linear_acceleration_z,
            self.angular_velocity_x,
            self.angular_velocity_y,
            self.angular_velocity_z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buffer() -> [u8; ImuPacket::SIZE] {
        let mut data = [0u8; ImuPacket::SIZE];
        LittleEndian::write_u64(&mut data[0..8], 1_000_000_001);
        LittleEndian::write_u64(&mut data[8..16], 2_000_000_002);
        LittleEndian::write_u64(&mut data[16..24], 3_000_000_003);
        LittleEndian::write_f32(&mut data[24..28], 0.25);
        LittleEndian::write_f32(&mut data[28..32], -0.5);
        LittleEndian::write_f32(&mut data[32..36], 1.0);
        LittleEndian::write_f32(&mut data[36..40], 12.5);
        LittleEndian::write_f32(&mut data[40..44], -45.0);
        LittleEndian::write_f32(&mut data[44..48], 0.125);
        data
    }

    #[test]
    fn decode_reads_all_fields() {
        let packet = ImuPacket::decode(&sample_buffer()).unwrap();

        assert_eq!(packet.diagnostic_system_time, 1_000_000_001);
        assert_eq!(packet.accelerometer_time, 2_000_000_002);
        assert_eq!(packet.gyroscope_time, 3_000_000_003);
        assert_eq!(packet.linear_acceleration(), [0.25, -0.5, 1.0]);
        assert_eq!(packet.angular_velocity(), [12.5, -45.0, 0.125]);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut data = sample_buffer().to_vec();
        data.extend_from_slice(&[0xAA; 8]);

        let packet = ImuPacket::decode(&data).unwrap();
        assert_eq!(packet.diagnostic_system_time, 1_000_000_001);
    }

    #[test]
    fn decode_rejects_short_buffers() {
        match ImuPacket::decode(&[0u8; 40]) {
            Err(Error::BufferTooShort { wanted, got, .. }) => {
                assert_eq!(wanted, 48);
                assert_eq!(got, 40);
            }
            other => panic!("expected BufferTooShort, got {:?}", other),
        }

        assert!(ImuPacket::decode(&[]).is_err());
        assert!(ImuPacket::decode(&[0u8; 47]).is_err());
    }
}
