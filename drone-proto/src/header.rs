//! Fixed four-byte frame header.

use crate::cursor::{ByteReader, ByteWriter, DecodeError, EncodeError};
use crate::data_type::DataType;
use crate::device::DeviceType;

/// Frame header: what the payload is, how long it is, and who is talking
/// to whom. Always exactly [`Header::SIZE`] bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header {
    pub data_type: DataType,
    /// Payload length in bytes.
    pub length: u8,
    pub from: DeviceType,
    pub to: DeviceType,
}

impl Header {
    pub const SIZE: usize = 4;

    pub fn encode(&self, writer: &mut ByteWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.data_type.value())?;
        writer.write_u8(self.length)?;
        writer.write_u8(self.from.value())?;
        writer.write_u8(self.to.value())?;
        Ok(())
    }

    /// Decode a header, rejecting unknown data-type or device bytes.
    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let data_type_byte = reader.read_u8()?;
        let data_type = DataType::from_byte(data_type_byte).ok_or(DecodeError::InvalidValue {
            field: "data_type",
            value: data_type_byte,
        })?;
        let length = reader.read_u8()?;
        let from_byte = reader.read_u8()?;
        let from = DeviceType::from_byte(from_byte).ok_or(DecodeError::InvalidValue {
            field: "from",
            value: from_byte,
        })?;
        let to_byte = reader.read_u8()?;
        let to = DeviceType::from_byte(to_byte).ok_or(DecodeError::InvalidValue {
            field: "to",
            value: to_byte,
        })?;
        Ok(Self {
            data_type,
            length,
            from,
            to,
        })
    }

    /// Decode from a fixed-size byte image.
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Result<Self, DecodeError> {
        Self::decode(&mut ByteReader::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let header = Header {
            data_type: DataType::State,
            length: 8,
            from: DeviceType::Drone,
            to: DeviceType::Controller,
        };

        let mut buf = [0u8; Header::SIZE];
        header.encode(&mut ByteWriter::new(&mut buf)).unwrap();
        assert_eq!(buf, [0x40, 0x08, 0x10, 0x20]);

        let decoded = Header::decode(&mut ByteReader::new(&buf)).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_decode_unknown_data_type() {
        let bytes = [0xEE, 0x00, 0x10, 0x20];
        assert_eq!(
            Header::from_bytes(&bytes),
            Err(DecodeError::InvalidValue {
                field: "data_type",
                value: 0xEE,
            })
        );
    }

    #[test]
    fn test_decode_unknown_device() {
        let bytes = [0x40, 0x08, 0x15, 0x20];
        assert_eq!(
            Header::from_bytes(&bytes),
            Err(DecodeError::InvalidValue {
                field: "from",
                value: 0x15,
            })
        );
    }

    #[test]
    fn test_decode_truncated() {
        let mut reader = ByteReader::new(&[0x40, 0x08]);
        assert_eq!(
            Header::decode(&mut reader),
            Err(DecodeError::InsufficientData {
                needed: 1,
                available: 0,
            })
        );
    }
}
