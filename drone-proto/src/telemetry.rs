//! Telemetry payloads pushed by the drone.
//!
//! All of these are plain `Copy` value objects so the status cache can hand
//! out whole snapshots without sharing references into its slots.

use crate::cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
use crate::message::Message;
use crate::modes::{
    CardColorIndex, Headless, ModeControlFlight, ModeFlight, ModeMovement, ModeSystem,
    ModeUpdate, ModelNumber, SensorOrientation,
};

/// Operating-mode and battery snapshot. 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct State {
    pub mode_system: ModeSystem,
    pub mode_flight: ModeFlight,
    pub mode_control_flight: ModeControlFlight,
    pub mode_movement: ModeMovement,
    pub headless: Headless,
    /// Control responsiveness, 10..=100 percent.
    pub control_speed: u8,
    pub sensor_orientation: SensorOrientation,
    /// Battery charge, 0..=100 percent.
    pub battery: u8,
}

impl Message for State {
    fn size(&self) -> usize {
        8
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.mode_system as u8)?;
        writer.write_u8(self.mode_flight as u8)?;
        writer.write_u8(self.mode_control_flight as u8)?;
        writer.write_u8(self.mode_movement as u8)?;
        writer.write_u8(self.headless as u8)?;
        writer.write_u8(self.control_speed)?;
        writer.write_u8(self.sensor_orientation as u8)?;
        writer.write_u8(self.battery)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mode_system: ModeSystem::from_value(reader.read_u8()?),
            mode_flight: ModeFlight::from_value(reader.read_u8()?),
            mode_control_flight: ModeControlFlight::from_value(reader.read_u8()?),
            mode_movement: ModeMovement::from_value(reader.read_u8()?),
            headless: Headless::from_value(reader.read_u8()?),
            control_speed: reader.read_u8()?,
            sensor_orientation: SensorOrientation::from_value(reader.read_u8()?),
            battery: reader.read_u8()?,
        })
    }
}

/// Airframe orientation in degrees. 6 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attitude {
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}

impl Message for Attitude {
    fn size(&self) -> usize {
        6
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.roll)?;
        writer.write_i16(self.pitch)?;
        writer.write_i16(self.yaw)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            roll: reader.read_i16()?,
            pitch: reader.read_i16()?,
            yaw: reader.read_i16()?,
        })
    }
}

/// Estimated position relative to takeoff, in millimetres. 12 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Message for Position {
    fn size(&self) -> usize {
        12
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i32(self.x)?;
        writer.write_i32(self.y)?;
        writer.write_i32(self.z)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x: reader.read_i32()?,
            y: reader.read_i32()?,
            z: reader.read_i32()?,
        })
    }
}

/// Barometric and rangefinder altitude data. 16 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Altitude {
    /// Degrees Celsius.
    pub temperature: f32,
    /// Pascals.
    pub pressure: f32,
    /// Metres above the barometric reference.
    pub altitude: f32,
    /// Metres measured by the downward rangefinder.
    pub range_height: f32,
}

impl Message for Altitude {
    fn size(&self) -> usize {
        16
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_f32(self.temperature)?;
        writer.write_f32(self.pressure)?;
        writer.write_f32(self.altitude)?;
        writer.write_f32(self.range_height)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            temperature: reader.read_f32()?,
            pressure: reader.read_f32()?,
            altitude: reader.read_f32()?,
            range_height: reader.read_f32()?,
        })
    }
}

/// Raw IMU sample. 18 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Motion {
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,
    pub gyro_roll: i16,
    pub gyro_pitch: i16,
    pub gyro_yaw: i16,
    pub angle_roll: i16,
    pub angle_pitch: i16,
    pub angle_yaw: i16,
}

impl Message for Motion {
    fn size(&self) -> usize {
        18
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.accel_x)?;
        writer.write_i16(self.accel_y)?;
        writer.write_i16(self.accel_z)?;
        writer.write_i16(self.gyro_roll)?;
        writer.write_i16(self.gyro_pitch)?;
        writer.write_i16(self.gyro_yaw)?;
        writer.write_i16(self.angle_roll)?;
        writer.write_i16(self.angle_pitch)?;
        writer.write_i16(self.angle_yaw)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            accel_x: reader.read_i16()?,
            accel_y: reader.read_i16()?,
            accel_z: reader.read_i16()?,
            gyro_roll: reader.read_i16()?,
            gyro_pitch: reader.read_i16()?,
            gyro_yaw: reader.read_i16()?,
            angle_roll: reader.read_i16()?,
            angle_pitch: reader.read_i16()?,
            angle_yaw: reader.read_i16()?,
        })
    }
}

/// Rangefinder distances in millimetres. 12 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Range {
    pub left: i16,
    pub front: i16,
    pub right: i16,
    pub rear: i16,
    pub top: i16,
    pub bottom: i16,
}

impl Message for Range {
    fn size(&self) -> usize {
        12
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.left)?;
        writer.write_i16(self.front)?;
        writer.write_i16(self.right)?;
        writer.write_i16(self.rear)?;
        writer.write_i16(self.top)?;
        writer.write_i16(self.bottom)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            left: reader.read_i16()?,
            front: reader.read_i16()?,
            right: reader.read_i16()?,
            rear: reader.read_i16()?,
            top: reader.read_i16()?,
            bottom: reader.read_i16()?,
        })
    }
}

/// Optical-flow displacement in metres. 12 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Flow {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Message for Flow {
    fn size(&self) -> usize {
        12
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_f32(self.x)?;
        writer.write_f32(self.y)?;
        writer.write_f32(self.z)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x: reader.read_f32()?,
            y: reader.read_f32()?,
            z: reader.read_f32()?,
        })
    }
}

/// Color-card reader sample. 19 bytes.
///
/// Two sensors (front, rear), each reporting hue/saturation/value/lightness
/// as `i16`, then the classified color byte per sensor and the decoded card
/// byte. Classified bytes are stored raw so the wire image survives a
/// round trip; use the accessors for the enum view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CardColor {
    /// `[sensor][h, s, v, l]`.
    pub hsvl: [[i16; 4]; 2],
    /// Classified color byte per sensor.
    pub color: [u8; 2],
    pub card: u8,
}

impl CardColor {
    #[must_use]
    pub fn front_color(&self) -> CardColorIndex {
        CardColorIndex::from_value(self.color[0])
    }

    #[must_use]
    pub fn rear_color(&self) -> CardColorIndex {
        CardColorIndex::from_value(self.color[1])
    }
}

impl Message for CardColor {
    fn size(&self) -> usize {
        19
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        for sensor in &self.hsvl {
            for &component in sensor {
                writer.write_i16(component)?;
            }
        }
        writer.write_u8(self.color[0])?;
        writer.write_u8(self.color[1])?;
        writer.write_u8(self.card)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let mut hsvl = [[0i16; 4]; 2];
        for sensor in &mut hsvl {
            for component in sensor.iter_mut() {
                *component = reader.read_i16()?;
            }
        }
        let color = [reader.read_u8()?, reader.read_u8()?];
        let card = reader.read_u8()?;
        Ok(Self { hsvl, color, card })
    }
}

/// Firmware error bitmasks. 16 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorState {
    /// Firmware uptime in milliseconds when the flags were sampled.
    pub system_time: u64,
    pub sensor_flags: u32,
    pub state_flags: u32,
}

impl Message for ErrorState {
    fn size(&self) -> usize {
        16
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u64(self.system_time)?;
        writer.write_u32(self.sensor_flags)?;
        writer.write_u32(self.state_flags)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            system_time: reader.read_u64()?,
            sensor_flags: reader.read_u32()?,
            state_flags: reader.read_u32()?,
        })
    }
}

/// Lifetime flight counters. 14 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Count {
    /// Total powered-on time, seconds.
    pub time_system: u32,
    /// Total flight time, seconds.
    pub time_flight: u32,
    pub takeoffs: u16,
    pub landings: u16,
    pub accidents: u16,
}

impl Message for Count {
    fn size(&self) -> usize {
        14
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u32(self.time_system)?;
        writer.write_u32(self.time_flight)?;
        writer.write_u16(self.takeoffs)?;
        writer.write_u16(self.landings)?;
        writer.write_u16(self.accidents)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            time_system: reader.read_u32()?,
            time_flight: reader.read_u32()?,
            takeoffs: reader.read_u16()?,
            landings: reader.read_u16()?,
            accidents: reader.read_u16()?,
        })
    }
}

/// Firmware version triple, little-endian `build` first on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Version {
    pub build: u16,
    pub minor: u8,
    pub major: u8,
}

/// Model and firmware information. 13 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Information {
    pub mode_update: ModeUpdate,
    pub model_number: ModelNumber,
    pub version: Version,
    /// Firmware build date.
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Message for Information {
    fn size(&self) -> usize {
        13
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.mode_update as u8)?;
        writer.write_u32(self.model_number as u32)?;
        writer.write_u16(self.version.build)?;
        writer.write_u8(self.version.minor)?;
        writer.write_u8(self.version.major)?;
        writer.write_u16(self.year)?;
        writer.write_u8(self.month)?;
        writer.write_u8(self.day)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mode_update: ModeUpdate::from_value(reader.read_u8()?),
            model_number: ModelNumber::from_value(reader.read_u32()?),
            version: Version {
                build: reader.read_u16()?,
                minor: reader.read_u8()?,
                major: reader.read_u8()?,
            },
            year: reader.read_u16()?,
            month: reader.read_u8()?,
            day: reader.read_u8()?,
        })
    }
}

/// Raw 16-byte device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address {
    pub address: [u8; 16],
}

impl Message for Address {
    fn size(&self) -> usize {
        16
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_bytes(&self.address)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            address: reader.read_array()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<M: Message + PartialEq + core::fmt::Debug>(msg: &M) {
        let mut buf = [0u8; 32];
        let mut writer = ByteWriter::new(&mut buf);
        msg.encode(&mut writer).unwrap();
        assert_eq!(writer.written(), msg.size());

        let mut reader = ByteReader::new(&buf[..msg.size()]);
        let decoded = M::decode(&mut reader).unwrap();
        assert_eq!(&decoded, msg);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_state_wire_image() {
        let state = State {
            mode_system: ModeSystem::Running,
            mode_flight: ModeFlight::Flight,
            mode_control_flight: ModeControlFlight::Attitude,
            mode_movement: ModeMovement::Hovering,
            headless: Headless::Normal,
            control_speed: 100,
            sensor_orientation: SensorOrientation::Normal,
            battery: 85,
        };
        let mut buf = [0u8; 8];
        state.encode(&mut ByteWriter::new(&mut buf)).unwrap();
        assert_eq!(buf, [0x12, 0x13, 0x10, 0x02, 0x02, 100, 0x01, 85]);
        round_trip(&state);
    }

    #[test]
    fn test_card_color_round_trip_keeps_raw_bytes() {
        let card = CardColor {
            hsvl: [[359, -1, 255, 128], [0, 17, -32768, 32767]],
            // second byte is outside the classified set on purpose
            color: [0x04, 0x7E],
            card: 0x42,
        };
        round_trip(&card);
        assert_eq!(card.front_color(), CardColorIndex::Green);
        assert_eq!(card.rear_color(), CardColorIndex::Unknown);
    }

    #[test]
    fn test_information_round_trip() {
        let info = Information {
            mode_update: ModeUpdate::Complete,
            model_number: ModelNumber::Drone12DroneP1,
            version: Version {
                build: 1234,
                minor: 7,
                major: 22,
            },
            year: 2023,
            month: 11,
            day: 30,
        };
        round_trip(&info);
    }

    #[test]
    fn test_altitude_truncated() {
        let bytes = [0u8; 10];
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            Altitude::decode(&mut reader),
            Err(DecodeError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_address_round_trip() {
        let addr = Address {
            address: [
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 255,
            ],
        };
        round_trip(&addr);
    }
}
