//! Outbound frame assembly.
//!
//! Wire layout:
//!
//! ```text
//! [0x0A] [0x55] [header: 4] [payload: header.length] [crc16 lo] [crc16 hi]
//! ```
//!
//! The checksum covers header and payload, not the start marker.

use crate::crc::calculate_crc16;
use crate::cursor::{ByteWriter, EncodeError};
use crate::device::DeviceType;
use crate::header::Header;
use crate::message::Payload;

pub const START_BYTE_1: u8 = 0x0A;
pub const START_BYTE_2: u8 = 0x55;

/// Payload length is a single header byte.
pub const MAX_PAYLOAD_SIZE: usize = 255;
/// Start marker + header + max payload + checksum trailer.
pub const MAX_FRAME_SIZE: usize = 2 + Header::SIZE + MAX_PAYLOAD_SIZE + 2;

/// Encode a complete frame into `buf`, returning the number of bytes
/// written. `buf` must hold at least `2 + 4 + payload.size() + 2` bytes.
pub fn encode_frame(
    payload: &Payload,
    from: DeviceType,
    to: DeviceType,
    buf: &mut [u8],
) -> Result<usize, EncodeError> {
    let size = payload.size();
    if size > MAX_PAYLOAD_SIZE {
        return Err(EncodeError::PayloadTooLarge { size });
    }
    let header = Header {
        data_type: payload.data_type(),
        length: size as u8,
        from,
        to,
    };

    let mut writer = ByteWriter::new(buf);
    writer.write_u8(START_BYTE_1)?;
    writer.write_u8(START_BYTE_2)?;
    header.encode(&mut writer)?;
    payload.encode(&mut writer)?;

    let body_end = writer.written();
    let crc = calculate_crc16(&buf[2..body_end]);

    let mut trailer = ByteWriter::new(&mut buf[body_end..]);
    trailer.write_u16(crc)?;
    Ok(body_end + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Request;
    use crate::data_type::DataType;

    #[test]
    fn test_request_frame_byte_image() {
        let payload = Payload::Request(Request {
            data_type: DataType::State,
        });
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(
            &payload,
            DeviceType::Controller,
            DeviceType::Drone,
            &mut buf,
        )
        .unwrap();

        assert_eq!(len, 2 + 4 + 1 + 2);
        assert_eq!(&buf[..6], &[0x0A, 0x55, 0x04, 0x01, 0x20, 0x10]);
        assert_eq!(buf[6], 0x40);

        let crc = calculate_crc16(&buf[2..7]);
        assert_eq!(buf[7], (crc & 0xFF) as u8);
        assert_eq!(buf[8], (crc >> 8) as u8);
    }

    #[test]
    fn test_buffer_too_small() {
        let payload = Payload::Request(Request {
            data_type: DataType::Motion,
        });
        let mut buf = [0u8; 4];
        assert!(matches!(
            encode_frame(
                &payload,
                DeviceType::Controller,
                DeviceType::Drone,
                &mut buf
            ),
            Err(EncodeError::BufferTooSmall { .. })
        ));
    }
}
