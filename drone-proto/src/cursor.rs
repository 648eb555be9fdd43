//! Little-endian byte cursors used by all payload codecs.
//!
//! Every multi-byte integer on the wire is little-endian. The cursors fail
//! with an explicit error instead of reading or writing past the end of the
//! underlying slice, so a truncated payload surfaces as
//! [`DecodeError::InsufficientData`] rather than a zero-filled value.

/// Error produced while decoding a payload from a byte cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The cursor ran out of bytes before the field was complete.
    InsufficientData { needed: usize, available: usize },
    /// The codec finished but declared payload bytes were left over.
    TrailingData { remaining: usize },
    /// A field held a byte outside its closed value set.
    InvalidValue { field: &'static str, value: u8 },
}

/// Error produced while encoding a payload into a byte cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The output buffer is too small for the encoded bytes.
    BufferTooSmall { needed: usize, available: usize },
    /// The payload exceeds the one-byte length field of the frame header.
    PayloadTooLarge { size: usize },
}

/// Read-only little-endian cursor over a byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::InsufficientData {
                needed: n,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let b = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.take(n)
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Consume whatever is left of the cursor.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }
}

/// Write-only little-endian cursor over a byte slice.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.pos
    }

    fn reserve(&mut self, n: usize) -> Result<&mut [u8], EncodeError> {
        let available = self.buf.len() - self.pos;
        if available < n {
            return Err(EncodeError::BufferTooSmall {
                needed: n,
                available,
            });
        }
        let slice = &mut self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<(), EncodeError> {
        self.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.reserve(2)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<(), EncodeError> {
        self.reserve(2)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.reserve(4)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), EncodeError> {
        self.reserve(4)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), EncodeError> {
        self.reserve(8)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), EncodeError> {
        self.write_u32(value.to_bits())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        self.reserve(data.len())?.copy_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_little_endian() {
        let data = [0x34, 0x12, 0xFF, 0xFF, 0xFF, 0xFF, 0x78, 0x56, 0x34, 0x12];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_i32().unwrap(), -1);
        assert_eq!(r.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_reader_insufficient_data() {
        let data = [0x01];
        let mut r = ByteReader::new(&data);
        assert_eq!(
            r.read_u16(),
            Err(DecodeError::InsufficientData {
                needed: 2,
                available: 1,
            })
        );
        // The failed read must not consume the remaining byte.
        assert_eq!(r.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn test_writer_round_trip() {
        let mut buf = [0u8; 32];
        let mut w = ByteWriter::new(&mut buf);
        w.write_u8(0xAB).unwrap();
        w.write_i16(-12345).unwrap();
        w.write_u32(0xDEAD_BEEF).unwrap();
        w.write_f32(1.5).unwrap();
        w.write_u64(u64::MAX).unwrap();
        let len = w.written();

        let mut r = ByteReader::new(&buf[..len]);
        assert_eq!(r.read_u8().unwrap(), 0xAB);
        assert_eq!(r.read_i16().unwrap(), -12345);
        assert_eq!(r.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(r.read_f32().unwrap(), 1.5);
        assert_eq!(r.read_u64().unwrap(), u64::MAX);
    }

    #[test]
    fn test_writer_buffer_too_small() {
        let mut buf = [0u8; 3];
        let mut w = ByteWriter::new(&mut buf);
        w.write_u16(1).unwrap();
        assert_eq!(
            w.write_u32(1),
            Err(EncodeError::BufferTooSmall {
                needed: 4,
                available: 1,
            })
        );
    }

    #[test]
    fn test_read_rest() {
        let data = [1u8, 2, 3, 4];
        let mut r = ByteReader::new(&data);
        r.read_u8().unwrap();
        assert_eq!(r.read_rest(), &[2, 3, 4]);
        assert_eq!(r.remaining(), 0);
    }
}
