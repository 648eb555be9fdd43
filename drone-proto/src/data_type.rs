//! Message discriminants carried in the frame header.

/// The kind of payload a frame carries.
///
/// One discriminant per payload shape; the mapping is injective and the set
/// is closed. Bytes outside it are framing noise and make the receiver
/// resynchronize rather than error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataType {
    /// Acknowledgement of a received command.
    Ack = 0x02,
    /// Firmware error bitmasks.
    Error = 0x03,
    /// Request the peer to send one data type.
    Request = 0x04,
    /// Raw device address.
    Address = 0x06,
    /// Model and firmware version information.
    Information = 0x07,

    LightManual = 0x20,
    LightMode = 0x21,
    LightEvent = 0x22,

    /// Operating-mode and battery snapshot.
    State = 0x40,
    Attitude = 0x41,
    Position = 0x42,
    Altitude = 0x43,
    Motion = 0x44,
    Range = 0x45,
    Flow = 0x46,

    /// Flight-time and event counters.
    Count = 0x50,

    Buzzer = 0x62,

    DisplayClearAll = 0x80,
    DisplayInvert = 0x81,
    DisplayDrawPoint = 0x82,
    DisplayDrawLine = 0x83,
    DisplayDrawRect = 0x84,
    DisplayDrawCircle = 0x85,
    DisplayDrawString = 0x86,
    DisplayClearArea = 0x87,
    DisplayDrawImage = 0x88,

    /// Color-card reader sample.
    CardColor = 0x93,
}

impl DataType {
    /// Strict lookup from a wire byte. Unknown bytes reject the frame.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x02 => Some(Self::Ack),
            0x03 => Some(Self::Error),
            0x04 => Some(Self::Request),
            0x06 => Some(Self::Address),
            0x07 => Some(Self::Information),
            0x20 => Some(Self::LightManual),
            0x21 => Some(Self::LightMode),
            0x22 => Some(Self::LightEvent),
            0x40 => Some(Self::State),
            0x41 => Some(Self::Attitude),
            0x42 => Some(Self::Position),
            0x43 => Some(Self::Altitude),
            0x44 => Some(Self::Motion),
            0x45 => Some(Self::Range),
            0x46 => Some(Self::Flow),
            0x50 => Some(Self::Count),
            0x62 => Some(Self::Buzzer),
            0x80 => Some(Self::DisplayClearAll),
            0x81 => Some(Self::DisplayInvert),
            0x82 => Some(Self::DisplayDrawPoint),
            0x83 => Some(Self::DisplayDrawLine),
            0x84 => Some(Self::DisplayDrawRect),
            0x85 => Some(Self::DisplayDrawCircle),
            0x86 => Some(Self::DisplayDrawString),
            0x87 => Some(Self::DisplayClearArea),
            0x88 => Some(Self::DisplayDrawImage),
            0x93 => Some(Self::CardColor),
            _ => None,
        }
    }

    /// The wire byte.
    #[inline]
    #[must_use]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Whether this type is telemetry the drone pushes to us (as opposed
    /// to a command we send to it).
    #[must_use]
    pub fn is_telemetry(self) -> bool {
        matches!(
            self,
            Self::Error
                | Self::Address
                | Self::Information
                | Self::State
                | Self::Attitude
                | Self::Position
                | Self::Altitude
                | Self::Motion
                | Self::Range
                | Self::Flow
                | Self::Count
                | Self::CardColor
        )
    }
}

/// Every discriminant, for exhaustive checks in tests.
#[cfg(test)]
pub(crate) const ALL_DATA_TYPES: [DataType; 27] = [
    DataType::Ack,
    DataType::Error,
    DataType::Request,
    DataType::Address,
    DataType::Information,
    DataType::LightManual,
    DataType::LightMode,
    DataType::LightEvent,
    DataType::State,
    DataType::Attitude,
    DataType::Position,
    DataType::Altitude,
    DataType::Motion,
    DataType::Range,
    DataType::Flow,
    DataType::Count,
    DataType::Buzzer,
    DataType::DisplayClearAll,
    DataType::DisplayInvert,
    DataType::DisplayDrawPoint,
    DataType::DisplayDrawLine,
    DataType::DisplayDrawRect,
    DataType::DisplayDrawCircle,
    DataType::DisplayDrawString,
    DataType::DisplayClearArea,
    DataType::DisplayDrawImage,
    DataType::CardColor,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all() {
        for dt in ALL_DATA_TYPES {
            assert_eq!(DataType::from_byte(dt.value()), Some(dt));
        }
    }

    #[test]
    fn test_discriminants_unique() {
        for (i, a) in ALL_DATA_TYPES.iter().enumerate() {
            for b in &ALL_DATA_TYPES[i + 1..] {
                assert_ne!(a.value(), b.value());
            }
        }
    }

    #[test]
    fn test_unknown_byte_rejected() {
        assert_eq!(DataType::from_byte(0x01), None);
        assert_eq!(DataType::from_byte(0x89), None);
        assert_eq!(DataType::from_byte(0xFE), None);
    }

    #[test]
    fn test_telemetry_split() {
        assert!(DataType::State.is_telemetry());
        assert!(DataType::CardColor.is_telemetry());
        assert!(!DataType::Buzzer.is_telemetry());
        assert!(!DataType::Ack.is_telemetry());
        assert!(!DataType::DisplayDrawLine.is_telemetry());
    }
}
