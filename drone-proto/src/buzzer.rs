//! Buzzer control payload.

use crate::cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
use crate::message::Message;

/// How the buzzer value field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BuzzerMode {
    #[default]
    Stop = 0x00,
    Mute = 0x01,
    MuteReserve = 0x02,
    /// Value is a note index.
    Scale = 0x03,
    ScaleReserve = 0x04,
    /// Value is a frequency in hertz.
    Hz = 0x05,
    HzReserve = 0x06,
}

impl BuzzerMode {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::Mute,
            0x02 => Self::MuteReserve,
            0x03 => Self::Scale,
            0x04 => Self::ScaleReserve,
            0x05 => Self::Hz,
            0x06 => Self::HzReserve,
            _ => Self::Stop,
        }
    }
}

/// Sound the buzzer. 5 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buzzer {
    pub mode: BuzzerMode,
    /// Note index or frequency, per `mode`.
    pub value: u16,
    /// Duration, milliseconds.
    pub time: u16,
}

impl Message for Buzzer {
    fn size(&self) -> usize {
        5
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.mode as u8)?;
        writer.write_u16(self.value)?;
        writer.write_u16(self.time)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mode: BuzzerMode::from_value(reader.read_u8()?),
            value: reader.read_u16()?,
            time: reader.read_u16()?,
        })
    }
}
