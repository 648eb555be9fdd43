//! CRC-16 checksum for protocol frames.
//!
//! Uses CRC-16/XMODEM, matching the drone firmware. The trailer on the wire
//! is the 16-bit result in little-endian byte order.

use crc::{Crc, CRC_16_XMODEM};

/// CRC-16/XMODEM calculator with lookup table.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Calculate the CRC-16 checksum of a byte slice in one pass.
#[inline]
#[must_use]
pub fn calculate_crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// CRC-16 digest for incremental calculation.
///
/// The receiver folds the header and payload into one digest as the bytes
/// arrive; the sender checksums the assembled frame in one pass. Both
/// produce the same value for the same bytes.
pub struct Crc16Digest {
    digest: crc::Digest<'static, u16>,
}

impl Crc16Digest {
    /// Create a new CRC-16 digest.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            digest: CRC16.digest(),
        }
    }

    /// Update the digest with a single byte.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.digest.update(&[byte]);
    }

    /// Update the digest with a byte slice.
    #[inline]
    pub fn update_slice(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    /// Finalize and return the checksum value.
    #[inline]
    #[must_use]
    pub fn finalize(self) -> u16 {
        self.digest.finalize()
    }
}

impl Default for Crc16Digest {
    fn default() -> Self {
        Self::new()
    }
}
