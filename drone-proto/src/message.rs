//! The codec contract and the payload union.

use crate::buzzer::Buzzer;
use crate::command::{Ack, Request};
use crate::cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
use crate::data_type::DataType;
use crate::display::{
    DisplayClearAll, DisplayClearArea, DisplayDrawCircle, DisplayDrawImage, DisplayDrawLine,
    DisplayDrawPoint, DisplayDrawRect, DisplayDrawString, DisplayInvert,
};
use crate::light::{LightEvent, LightManual, LightMode};
use crate::telemetry::{
    Address, Altitude, Attitude, CardColor, Count, ErrorState, Flow, Information, Motion,
    Position, Range, State,
};

/// Codec contract every payload type implements.
///
/// `encode` must write exactly `size()` bytes and `decode` must read exactly
/// that many back, so `decode(encode(x)) == x` for every legal value.
pub trait Message: Sized {
    /// Encoded size in bytes.
    fn size(&self) -> usize;

    /// Write the wire image, little-endian.
    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError>;

    /// Read the wire image back.
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError>;
}

/// One decoded payload, tagged by its [`DataType`].
///
/// The variant set is closed and matches the discriminant set one for one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Payload {
    Ack(Ack),
    Error(ErrorState),
    Request(Request),
    Address(Address),
    Information(Information),
    LightManual(LightManual),
    LightMode(LightMode),
    LightEvent(LightEvent),
    State(State),
    Attitude(Attitude),
    Position(Position),
    Altitude(Altitude),
    Motion(Motion),
    Range(Range),
    Flow(Flow),
    Count(Count),
    Buzzer(Buzzer),
    DisplayClearAll(DisplayClearAll),
    DisplayInvert(DisplayInvert),
    DisplayDrawPoint(DisplayDrawPoint),
    DisplayDrawLine(DisplayDrawLine),
    DisplayDrawRect(DisplayDrawRect),
    DisplayDrawCircle(DisplayDrawCircle),
    DisplayDrawString(DisplayDrawString),
    DisplayClearArea(DisplayClearArea),
    DisplayDrawImage(DisplayDrawImage),
    CardColor(CardColor),
}

impl Payload {
    /// The discriminant this payload travels under.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Ack(_) => DataType::Ack,
            Self::Error(_) => DataType::Error,
            Self::Request(_) => DataType::Request,
            Self::Address(_) => DataType::Address,
            Self::Information(_) => DataType::Information,
            Self::LightManual(_) => DataType::LightManual,
            Self::LightMode(_) => DataType::LightMode,
            Self::LightEvent(_) => DataType::LightEvent,
            Self::State(_) => DataType::State,
            Self::Attitude(_) => DataType::Attitude,
            Self::Position(_) => DataType::Position,
            Self::Altitude(_) => DataType::Altitude,
            Self::Motion(_) => DataType::Motion,
            Self::Range(_) => DataType::Range,
            Self::Flow(_) => DataType::Flow,
            Self::Count(_) => DataType::Count,
            Self::Buzzer(_) => DataType::Buzzer,
            Self::DisplayClearAll(_) => DataType::DisplayClearAll,
            Self::DisplayInvert(_) => DataType::DisplayInvert,
            Self::DisplayDrawPoint(_) => DataType::DisplayDrawPoint,
            Self::DisplayDrawLine(_) => DataType::DisplayDrawLine,
            Self::DisplayDrawRect(_) => DataType::DisplayDrawRect,
            Self::DisplayDrawCircle(_) => DataType::DisplayDrawCircle,
            Self::DisplayDrawString(_) => DataType::DisplayDrawString,
            Self::DisplayClearArea(_) => DataType::DisplayClearArea,
            Self::DisplayDrawImage(_) => DataType::DisplayDrawImage,
            Self::CardColor(_) => DataType::CardColor,
        }
    }

    /// Encoded payload size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Ack(m) => m.size(),
            Self::Error(m) => m.size(),
            Self::Request(m) => m.size(),
            Self::Address(m) => m.size(),
            Self::Information(m) => m.size(),
            Self::LightManual(m) => m.size(),
            Self::LightMode(m) => m.size(),
            Self::LightEvent(m) => m.size(),
            Self::State(m) => m.size(),
            Self::Attitude(m) => m.size(),
            Self::Position(m) => m.size(),
            Self::Altitude(m) => m.size(),
            Self::Motion(m) => m.size(),
            Self::Range(m) => m.size(),
            Self::Flow(m) => m.size(),
            Self::Count(m) => m.size(),
            Self::Buzzer(m) => m.size(),
            Self::DisplayClearAll(m) => m.size(),
            Self::DisplayInvert(m) => m.size(),
            Self::DisplayDrawPoint(m) => m.size(),
            Self::DisplayDrawLine(m) => m.size(),
            Self::DisplayDrawRect(m) => m.size(),
            Self::DisplayDrawCircle(m) => m.size(),
            Self::DisplayDrawString(m) => m.size(),
            Self::DisplayClearArea(m) => m.size(),
            Self::DisplayDrawImage(m) => m.size(),
            Self::CardColor(m) => m.size(),
        }
    }

    /// Encode the payload body (no header, no checksum).
    pub fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        match self {
            Self::Ack(m) => m.encode(writer),
            Self::Error(m) => m.encode(writer),
            Self::Request(m) => m.encode(writer),
            Self::Address(m) => m.encode(writer),
            Self::Information(m) => m.encode(writer),
            Self::LightManual(m) => m.encode(writer),
            Self::LightMode(m) => m.encode(writer),
            Self::LightEvent(m) => m.encode(writer),
            Self::State(m) => m.encode(writer),
            Self::Attitude(m) => m.encode(writer),
            Self::Position(m) => m.encode(writer),
            Self::Altitude(m) => m.encode(writer),
            Self::Motion(m) => m.encode(writer),
            Self::Range(m) => m.encode(writer),
            Self::Flow(m) => m.encode(writer),
            Self::Count(m) => m.encode(writer),
            Self::Buzzer(m) => m.encode(writer),
            Self::DisplayClearAll(m) => m.encode(writer),
            Self::DisplayInvert(m) => m.encode(writer),
            Self::DisplayDrawPoint(m) => m.encode(writer),
            Self::DisplayDrawLine(m) => m.encode(writer),
            Self::DisplayDrawRect(m) => m.encode(writer),
            Self::DisplayDrawCircle(m) => m.encode(writer),
            Self::DisplayDrawString(m) => m.encode(writer),
            Self::DisplayClearArea(m) => m.encode(writer),
            Self::DisplayDrawImage(m) => m.encode(writer),
            Self::CardColor(m) => m.encode(writer),
        }
    }

    /// Decode the payload body named by `data_type`.
    pub fn decode(data_type: DataType, reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(match data_type {
            DataType::Ack => Self::Ack(Ack::decode(reader)?),
            DataType::Error => Self::Error(ErrorState::decode(reader)?),
            DataType::Request => Self::Request(Request::decode(reader)?),
            DataType::Address => Self::Address(Address::decode(reader)?),
            DataType::Information => Self::Information(Information::decode(reader)?),
            DataType::LightManual => Self::LightManual(LightManual::decode(reader)?),
            DataType::LightMode => Self::LightMode(LightMode::decode(reader)?),
            DataType::LightEvent => Self::LightEvent(LightEvent::decode(reader)?),
            DataType::State => Self::State(State::decode(reader)?),
            DataType::Attitude => Self::Attitude(Attitude::decode(reader)?),
            DataType::Position => Self::Position(Position::decode(reader)?),
            DataType::Altitude => Self::Altitude(Altitude::decode(reader)?),
            DataType::Motion => Self::Motion(Motion::decode(reader)?),
            DataType::Range => Self::Range(Range::decode(reader)?),
            DataType::Flow => Self::Flow(Flow::decode(reader)?),
            DataType::Count => Self::Count(Count::decode(reader)?),
            DataType::Buzzer => Self::Buzzer(Buzzer::decode(reader)?),
            DataType::DisplayClearAll => Self::DisplayClearAll(DisplayClearAll::decode(reader)?),
            DataType::DisplayInvert => Self::DisplayInvert(DisplayInvert::decode(reader)?),
            DataType::DisplayDrawPoint => {
                Self::DisplayDrawPoint(DisplayDrawPoint::decode(reader)?)
            }
            DataType::DisplayDrawLine => Self::DisplayDrawLine(DisplayDrawLine::decode(reader)?),
            DataType::DisplayDrawRect => Self::DisplayDrawRect(DisplayDrawRect::decode(reader)?),
            DataType::DisplayDrawCircle => {
                Self::DisplayDrawCircle(DisplayDrawCircle::decode(reader)?)
            }
            DataType::DisplayDrawString => {
                Self::DisplayDrawString(DisplayDrawString::decode(reader)?)
            }
            DataType::DisplayClearArea => Self::DisplayClearArea(DisplayClearArea::decode(reader)?),
            DataType::DisplayDrawImage => Self::DisplayDrawImage(DisplayDrawImage::decode(reader)?),
            DataType::CardColor => Self::CardColor(CardColor::decode(reader)?),
        })
    }

    /// Decode a payload body that must use the whole slice.
    ///
    /// Errors with [`DecodeError::TrailingData`] if the codec consumed fewer
    /// bytes than the header's length field declared.
    pub fn decode_exact(data_type: DataType, bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes);
        let payload = Self::decode(data_type, &mut reader)?;
        if reader.remaining() != 0 {
            return Err(DecodeError::TrailingData {
                remaining: reader.remaining(),
            });
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::modes::ModeFlight;

    fn round_trip(payload: &Payload) -> Payload {
        let mut buf = [0u8; 260];
        let mut writer = ByteWriter::new(&mut buf);
        payload.encode(&mut writer).unwrap();
        let written = writer.written();
        assert_eq!(written, payload.size());
        Payload::decode_exact(payload.data_type(), &buf[..written]).unwrap()
    }

    #[test]
    fn test_round_trip_telemetry_extremes() {
        let payloads = [
            Payload::Attitude(Attitude {
                roll: i16::MIN,
                pitch: i16::MAX,
                yaw: -1,
            }),
            Payload::Position(Position {
                x: i32::MIN,
                y: 0,
                z: i32::MAX,
            }),
            Payload::Altitude(Altitude {
                temperature: -40.5,
                pressure: 101_325.0,
                altitude: f32::MAX,
                range_height: 0.0,
            }),
            Payload::Motion(Motion {
                accel_x: i16::MIN,
                accel_y: i16::MAX,
                accel_z: 0,
                gyro_roll: -1,
                gyro_pitch: 1,
                gyro_yaw: 12345,
                angle_roll: -90,
                angle_pitch: 90,
                angle_yaw: 180,
            }),
            Payload::Count(Count {
                time_system: u32::MAX,
                time_flight: 0,
                takeoffs: u16::MAX,
                landings: 0,
                accidents: 7,
            }),
            Payload::Error(ErrorState {
                system_time: u64::MAX,
                sensor_flags: 0x8000_0001,
                state_flags: 0,
            }),
        ];
        for payload in &payloads {
            assert_eq!(&round_trip(payload), payload);
        }
    }

    #[test]
    fn test_every_payload_has_a_nonempty_body() {
        for dt in crate::data_type::ALL_DATA_TYPES {
            assert!(Payload::decode_exact(dt, &[]).is_err());
        }
    }

    #[test]
    fn test_decode_exact_rejects_trailing_bytes() {
        // A Request body is one byte; a second byte is a length mismatch.
        let err = Payload::decode_exact(DataType::Request, &[0x40, 0x00]);
        assert_eq!(err, Err(DecodeError::TrailingData { remaining: 1 }));
    }

    #[test]
    fn test_decode_truncated_state() {
        let err = Payload::decode_exact(DataType::State, &[0x12, 0x13, 0x10]);
        assert!(matches!(
            err,
            Err(DecodeError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_state_example_frame_body() {
        // battery 85%, in flight
        let body = [0x12, 0x13, 0x10, 0x02, 0x02, 0x64, 0x01, 85];
        let payload = Payload::decode_exact(DataType::State, &body).unwrap();
        let Payload::State(state) = payload else {
            panic!("wrong variant");
        };
        assert_eq!(state.mode_flight, ModeFlight::Flight);
        assert!(state.mode_flight.is_flying());
        assert_eq!(state.battery, 85);
    }
}
