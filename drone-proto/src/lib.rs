//! Wire protocol for a small educational drone and its handheld controller.
//!
//! The peers exchange framed binary messages over a serial byte link:
//!
//! ```text
//! [0x0A] [0x55] [header: 4] [payload: 0..=255] [crc16: 2, LE]
//! ```
//!
//! This crate is the transport-agnostic codec layer: checksums, addressing,
//! the payload catalog with its encode/decode contract, outbound frame
//! assembly, and the byte-at-a-time [`receiver::FrameReceiver`]. Session
//! logic (telemetry caching, request/acknowledgement matching, the actual
//! serial writes) lives in the `drone-link` crate on top of this one.
//!
//! `no_std` by default; the `std` feature exists for host-side tests.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod buzzer;
pub mod command;
pub mod crc;
pub mod cursor;
pub mod data_type;
pub mod device;
pub mod display;
pub mod frame;
pub mod header;
pub mod light;
pub mod message;
pub mod modes;
pub mod receiver;
pub mod telemetry;

pub use cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
pub use data_type::DataType;
pub use device::DeviceType;
pub use header::Header;
pub use message::{Message, Payload};
pub use receiver::{Frame, FrameError, FrameReceiver, ReceiverStats};
