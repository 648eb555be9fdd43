//! Request and acknowledgement payloads.

use crate::cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
use crate::data_type::DataType;
use crate::message::Message;

/// Ask the peer to send one payload of the given type. 1 byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    pub data_type: DataType,
}

impl Message for Request {
    fn size(&self) -> usize {
        1
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.data_type.value())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let byte = reader.read_u8()?;
        let data_type = DataType::from_byte(byte).ok_or(DecodeError::InvalidValue {
            field: "request.data_type",
            value: byte,
        })?;
        Ok(Self { data_type })
    }
}

/// Acknowledgement of a received command: the acked discriminant. 1 byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ack {
    pub data_type: DataType,
}

impl Message for Ack {
    fn size(&self) -> usize {
        1
    }

    fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.data_type.value())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let byte = reader.read_u8()?;
        let data_type = DataType::from_byte(byte).ok_or(DecodeError::InvalidValue {
            field: "ack.data_type",
            value: byte,
        })?;
        Ok(Self { data_type })
    }
}
