//! Controller OLED display payloads.
//!
//! Coordinates are signed: drawing primitives may start off-screen and the
//! firmware clips them. The two variable-length payloads (string, image)
//! use bounded `heapless` buffers sized so the whole payload still fits the
//! one-byte frame length field.

use heapless::{String, Vec};

use crate::cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
use crate::message::Message;

/// Longest text a draw-string payload can carry (255 minus the fixed head).
pub const MAX_TEXT_LEN: usize = 249;
/// Longest bitmap a draw-image payload can carry.
pub const MAX_IMAGE_LEN: usize = 247;

/// Pixel paint mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayPixel {
    #[default]
    Black = 0x00,
    White = 0x01,
    Inverse = 0x02,
    Outline = 0x03,
}

impl DisplayPixel {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::White,
            0x02 => Self::Inverse,
            0x03 => Self::Outline,
            _ => Self::Black,
        }
    }
}

/// Built-in fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayFont {
    #[default]
    LiberationMono5x8 = 0x00,
    LiberationMono10x16 = 0x01,
}

impl DisplayFont {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::LiberationMono10x16,
            _ => Self::LiberationMono5x8,
        }
    }
}

/// Line style for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayLine {
    #[default]
    Solid = 0x00,
    Dotted = 0x01,
    Dashed = 0x02,
}

impl DisplayLine {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::Dotted,
            0x02 => Self::Dashed,
            _ => Self::Solid,
        }
    }
}

/// Fill the whole screen with one pixel value. 1 byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayClearAll {
    pub pixel: DisplayPixel,
}

impl Message for DisplayClearAll {
    fn size(&self) -> usize {
        1
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.pixel as u8)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            pixel: DisplayPixel::from_value(reader.read_u8()?),
        })
    }
}

/// Fill one rectangle with one pixel value. 9 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayClearArea {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub pixel: DisplayPixel,
}

impl Message for DisplayClearArea {
    fn size(&self) -> usize {
        9
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        writer.write_i16(self.width)?;
        writer.write_i16(self.height)?;
        writer.write_u8(self.pixel as u8)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x: reader.read_i16()?,
            y: reader.read_i16()?,
            width: reader.read_i16()?,
            height: reader.read_i16()?,
            pixel: DisplayPixel::from_value(reader.read_u8()?),
        })
    }
}

/// Invert one rectangle. 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayInvert {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

impl Message for DisplayInvert {
    fn size(&self) -> usize {
        8
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        writer.write_i16(self.width)?;
        writer.write_i16(self.height)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x: reader.read_i16()?,
            y: reader.read_i16()?,
            width: reader.read_i16()?,
            height: reader.read_i16()?,
        })
    }
}

/// Draw one pixel. 5 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDrawPoint {
    pub x: i16,
    pub y: i16,
    pub pixel: DisplayPixel,
}

impl Message for DisplayDrawPoint {
    fn size(&self) -> usize {
        5
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        writer.write_u8(self.pixel as u8)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x: reader.read_i16()?,
            y: reader.read_i16()?,
            pixel: DisplayPixel::from_value(reader.read_u8()?),
        })
    }
}

/// Draw a line segment. 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDrawLine {
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
    pub pixel: DisplayPixel,
    pub line: DisplayLine,
}

impl Message for DisplayDrawLine {
    fn size(&self) -> usize {
        10
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x1)?;
        writer.write_i16(self.y1)?;
        writer.write_i16(self.x2)?;
        writer.write_i16(self.y2)?;
        writer.write_u8(self.pixel as u8)?;
        writer.write_u8(self.line as u8)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x1: reader.read_i16()?,
            y1: reader.read_i16()?,
            x2: reader.read_i16()?,
            y2: reader.read_i16()?,
            pixel: DisplayPixel::from_value(reader.read_u8()?),
            line: DisplayLine::from_value(reader.read_u8()?),
        })
    }
}

/// Draw a rectangle, optionally filled. 11 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDrawRect {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub pixel: DisplayPixel,
    pub fill: bool,
    pub line: DisplayLine,
}

impl Message for DisplayDrawRect {
    fn size(&self) -> usize {
        11
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        writer.write_i16(self.width)?;
        writer.write_i16(self.height)?;
        writer.write_u8(self.pixel as u8)?;
        writer.write_u8(u8::from(self.fill))?;
        writer.write_u8(self.line as u8)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x: reader.read_i16()?,
            y: reader.read_i16()?,
            width: reader.read_i16()?,
            height: reader.read_i16()?,
            pixel: DisplayPixel::from_value(reader.read_u8()?),
            fill: reader.read_u8()? != 0,
            line: DisplayLine::from_value(reader.read_u8()?),
        })
    }
}

/// Draw a circle, optionally filled. 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDrawCircle {
    pub x: i16,
    pub y: i16,
    pub radius: i16,
    pub pixel: DisplayPixel,
    pub fill: bool,
}

impl Message for DisplayDrawCircle {
    fn size(&self) -> usize {
        8
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        writer.write_i16(self.radius)?;
        writer.write_u8(self.pixel as u8)?;
        writer.write_u8(u8::from(self.fill))?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            x: reader.read_i16()?,
            y: reader.read_i16()?,
            radius: reader.read_i16()?,
            pixel: DisplayPixel::from_value(reader.read_u8()?),
            fill: reader.read_u8()? != 0,
        })
    }
}

/// Draw UTF-8 text. 6 bytes plus the text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDrawString {
    pub x: i16,
    pub y: i16,
    pub font: DisplayFont,
    pub pixel: DisplayPixel,
    pub text: String<MAX_TEXT_LEN>,
}

impl Message for DisplayDrawString {
    fn size(&self) -> usize {
        6 + self.text.len()
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        writer.write_u8(self.font as u8)?;
        writer.write_u8(self.pixel as u8)?;
        writer.write_bytes(self.text.as_bytes())?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let x = reader.read_i16()?;
        let y = reader.read_i16()?;
        let font = DisplayFont::from_value(reader.read_u8()?);
        let pixel = DisplayPixel::from_value(reader.read_u8()?);
        // Take at most the buffer capacity; anything beyond it stays in the
        // reader and shows up as a length mismatch at the frame layer.
        let n = reader.remaining().min(MAX_TEXT_LEN);
        let raw = reader.read_bytes(n)?;
        let utf8 = core::str::from_utf8(raw).map_err(|e| DecodeError::InvalidValue {
            field: "display.text",
            value: raw[e.valid_up_to()],
        })?;
        let mut text = String::new();
        // Cannot fail: `n <= MAX_TEXT_LEN`.
        let _ = text.push_str(utf8);
        Ok(Self {
            x,
            y,
            font,
            pixel,
            text,
        })
    }
}

/// Draw a 1-bit bitmap. 8 bytes plus the bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDrawImage {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub data: Vec<u8, MAX_IMAGE_LEN>,
}

impl Message for DisplayDrawImage {
    fn size(&self) -> usize {
        8 + self.data.len()
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i16(self.x)?;
        writer.write_i16(self.y)?;
        writer.write_i16(self.width)?;
        writer.write_i16(self.height)?;
        writer.write_bytes(&self.data)?;
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let x = reader.read_i16()?;
        let y = reader.read_i16()?;
        let width = reader.read_i16()?;
        let height = reader.read_i16()?;
        let n = reader.remaining().min(MAX_IMAGE_LEN);
        let raw = reader.read_bytes(n)?;
        let mut data = Vec::new();
        // Cannot fail: `n <= MAX_IMAGE_LEN`.
        let _ = data.extend_from_slice(raw);
        Ok(Self {
            x,
            y,
            width,
            height,
            data,
        })
    }
}
