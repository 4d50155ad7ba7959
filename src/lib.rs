//! # Ouster packet decoder
//!
//! `ouster` decodes the UDP wire format emitted by Ouster OS-series LiDAR
//! sensors: columns of range/signal/reflectivity/near-IR measurements packed
//! according to one of several sensor-selectable profiles, and fixed-layout
//! IMU samples.
//!
//! The crate is organized around the profile tables:
//!
//! - [`field`]: bit-packing primitives ([`FieldType`], [`FieldStructure`])
//! - [`channel`]: named measurement channels and per-profile layouts
//! - [`profile`]: the five sensor output profiles and their static layout
//!   tables
//! - [`format`]: packet geometry derived from the configured
//!   [`LidarDataFormat`]
//! - [`packet`]: borrowed views slicing columns and pixels out of a datagram
//! - [`imu`]: the 48-byte IMU record
//!
//! A typical session obtains a [`LidarProfile`] and the frame geometry from
//! the sensor's configuration, builds a [`LidarDataFormat`], and decodes each
//! received datagram through a [`LidarPacket`] view:
//!
//! ```
//! use ouster::{ChannelField, LidarDataFormat, LidarPacket, LidarProfile};
//!
//! let format = LidarDataFormat {
//!     lidar_profile: LidarProfile::SingleReturns,
//!     columns_per_packet: 16,
//!     pixels_per_column: 64,
//!     ..Default::default()
//! };
//!
//! let datagram = vec![0u8; format.size()];
//! let packet = LidarPacket::new(&datagram, &format)?;
//! for column in packet.columns() {
//!     for row in 0..format.pixels_per_column {
//!         let _range = column.field(row, ChannelField::Range);
//!     }
//! }
//! # Ok::<(), ouster::Error>(())
//! ```
//!
//! Decoding never performs I/O and holds no shared mutable state; the only
//! shared resource is the read-only static profile table.
//!
//! Unrecognized enumerated wire values (profile codes, channel names) never
//! error; they degrade to defined defaults so the decoder stays usable
//! against firmware newer than this crate. The only runtime error is a
//! buffer shorter than the structure being decoded.

pub mod channel;
pub mod error;
pub mod field;
pub mod format;
pub mod imu;
pub mod packet;
pub mod profile;

pub use crate::channel::{ChannelField, ChannelLayout};
pub use crate::error::{Error, Result};
pub use crate::field::{FieldStructure, FieldType};
pub use crate::format::{ColumnWindow, LidarDataFormat};
pub use crate::imu::ImuPacket;
pub use crate::packet::{Column, LidarPacket};
pub use crate::profile::{ColumnProfile, ImuProfile, LidarProfile};
