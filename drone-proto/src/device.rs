//! Device addressing for the frame header.

/// A device on the serial link.
///
/// Frames carry a source and a destination device byte. The set is closed:
/// a header byte outside it is treated as framing noise by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceType {
    None = 0x00,
    /// The drone itself.
    Drone = 0x10,
    /// The handheld controller.
    Controller = 0x20,
    /// USB link board.
    Link = 0x30,
    /// Charging base.
    Base = 0x70,
    /// Factory test rig.
    Tester = 0xA0,
    /// Broadcast to every listener.
    Broadcasting = 0xFF,
}

impl DeviceType {
    /// Strict lookup from a wire byte. Unknown bytes reject the frame.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::None),
            0x10 => Some(Self::Drone),
            0x20 => Some(Self::Controller),
            0x30 => Some(Self::Link),
            0x70 => Some(Self::Base),
            0xA0 => Some(Self::Tester),
            0xFF => Some(Self::Broadcasting),
            _ => None,
        }
    }

    /// The wire byte.
    #[inline]
    #[must_use]
    pub fn value(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all() {
        for dev in [
            DeviceType::None,
            DeviceType::Drone,
            DeviceType::Controller,
            DeviceType::Link,
            DeviceType::Base,
            DeviceType::Tester,
            DeviceType::Broadcasting,
        ] {
            assert_eq!(DeviceType::from_byte(dev.value()), Some(dev));
        }
    }

    #[test]
    fn test_unknown_byte_rejected() {
        assert_eq!(DeviceType::from_byte(0x11), None);
        assert_eq!(DeviceType::from_byte(0x7F), None);
    }
}
