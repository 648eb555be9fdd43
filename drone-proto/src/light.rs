//! LED control payloads.

use crate::cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
use crate::message::Message;

/// Built-in LED animation patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LightModePattern {
    #[default]
    None = 0x00,
    Manual = 0x10,
    Blinking = 0x11,
    Flicker = 0x12,
    Dimming = 0x13,
    Sunrise = 0x14,
    Sunset = 0x15,
    Rainbow = 0x16,
    Rainbow2 = 0x17,
}

impl LightModePattern {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x10 => Self::Manual,
            0x11 => Self::Blinking,
            0x12 => Self::Flicker,
            0x13 => Self::Dimming,
            0x14 => Self::Sunrise,
            0x15 => Self::Sunset,
            0x16 => Self::Rainbow,
            0x17 => Self::Rainbow2,
            _ => Self::None,
        }
    }
}

/// Set individual LEDs to a fixed brightness. 3 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightManual {
    /// Bitmask selecting the LEDs to drive.
    pub flags: u16,
    pub brightness: u8,
}

impl Message for LightManual {
    fn size(&self) -> usize {
        3
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u16(self.flags)?;
        writer.write_u8(self.brightness)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            flags: reader.read_u16()?,
            brightness: reader.read_u8()?,
        })
    }
}

/// Run a pattern with an interval. 3 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightMode {
    pub mode: LightModePattern,
    /// Pattern period, milliseconds.
    pub interval: u16,
}

impl Message for LightMode {
    fn size(&self) -> usize {
        3
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.mode as u8)?;
        writer.write_u16(self.interval)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mode: LightModePattern::from_value(reader.read_u8()?),
            interval: reader.read_u16()?,
        })
    }
}

/// Run a pattern a bounded number of times, then restore. 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightEvent {
    pub event: u8,
    pub interval: u16,
    pub repeat: u8,
}

impl Message for LightEvent {
    fn size(&self) -> usize {
        4
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.event)?;
        writer.write_u16(self.interval)?;
        writer.write_u8(self.repeat)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event: reader.read_u8()?,
            interval: reader.read_u16()?,
            repeat: reader.read_u8()?,
        })
    }
}
