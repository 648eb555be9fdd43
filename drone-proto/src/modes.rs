//! Operating-mode value enums carried inside telemetry payloads.
//!
//! These enums are lenient: an unknown wire value maps to the `None` (or
//! `Unknown`) sentinel instead of failing the decode, so a newer firmware
//! reporting a mode this driver does not know about still yields a usable
//! snapshot. Only header-level bytes (data type, device) are strict.

/// Top-level firmware state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ModeSystem {
    #[default]
    None = 0x00,
    Boot = 0x10,
    Start = 0x11,
    Running = 0x12,
    ReadyToReset = 0x13,
    Error = 0xA0,
}

impl ModeSystem {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x10 => Self::Boot,
            0x11 => Self::Start,
            0x12 => Self::Running,
            0x13 => Self::ReadyToReset,
            0xA0 => Self::Error,
            _ => Self::None,
        }
    }
}

/// Flight controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ModeFlight {
    #[default]
    None = 0x00,
    Ready = 0x10,
    Start = 0x11,
    TakeOff = 0x12,
    Flight = 0x13,
    Landing = 0x14,
    Flip = 0x15,
    Reverse = 0x16,
    Stop = 0x20,
    Accident = 0x30,
    Error = 0x31,
    Test = 0x40,
}

impl ModeFlight {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x10 => Self::Ready,
            0x11 => Self::Start,
            0x12 => Self::TakeOff,
            0x13 => Self::Flight,
            0x14 => Self::Landing,
            0x15 => Self::Flip,
            0x16 => Self::Reverse,
            0x20 => Self::Stop,
            0x30 => Self::Accident,
            0x31 => Self::Error,
            0x40 => Self::Test,
            _ => Self::None,
        }
    }

    /// True while the drone is airborne or transitioning to/from the air.
    #[must_use]
    pub fn is_flying(self) -> bool {
        matches!(
            self,
            Self::TakeOff | Self::Flight | Self::Landing | Self::Flip | Self::Reverse
        )
    }
}

/// How pilot input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ModeControlFlight {
    #[default]
    None = 0x00,
    Attitude = 0x10,
    Position = 0x11,
    Manual = 0x12,
    Rate = 0x13,
    Function = 0x14,
}

impl ModeControlFlight {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x10 => Self::Attitude,
            0x11 => Self::Position,
            0x12 => Self::Manual,
            0x13 => Self::Rate,
            0x14 => Self::Function,
            _ => Self::None,
        }
    }
}

/// Coarse motion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ModeMovement {
    #[default]
    None = 0x00,
    Ready = 0x01,
    Hovering = 0x02,
    Moving = 0x03,
    ReturnHome = 0x04,
}

impl ModeMovement {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::Ready,
            0x02 => Self::Hovering,
            0x03 => Self::Moving,
            0x04 => Self::ReturnHome,
            _ => Self::None,
        }
    }
}

/// Headless (absolute-heading) steering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Headless {
    #[default]
    None = 0x00,
    Headless = 0x01,
    Normal = 0x02,
}

impl Headless {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::Headless,
            0x02 => Self::Normal,
            _ => Self::None,
        }
    }
}

/// Whether the airframe thinks it is upside down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SensorOrientation {
    #[default]
    None = 0x00,
    Normal = 0x01,
    ReverseStart = 0x02,
    Reversed = 0x03,
}

impl SensorOrientation {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::Normal,
            0x02 => Self::ReverseStart,
            0x03 => Self::Reversed,
            _ => Self::None,
        }
    }
}

/// Firmware update progress, reported in the information payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ModeUpdate {
    #[default]
    None = 0x00,
    Ready = 0x01,
    Updating = 0x02,
    Complete = 0x03,
    Failed = 0x04,
    NotAvailable = 0x05,
    RunApplication = 0x06,
}

impl ModeUpdate {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::Ready,
            0x02 => Self::Updating,
            0x03 => Self::Complete,
            0x04 => Self::Failed,
            0x05 => Self::NotAvailable,
            0x06 => Self::RunApplication,
            _ => Self::None,
        }
    }
}

/// Hardware model, a 32-bit product code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum ModelNumber {
    #[default]
    None = 0x0000_0000,
    Drone8DroneP1 = 0x0008_1001,
    Drone12DroneP1 = 0x000C_1002,
    Drone12ControllerP1 = 0x000C_2001,
}

impl ModelNumber {
    #[must_use]
    pub fn from_value(value: u32) -> Self {
        match value {
            0x0008_1001 => Self::Drone8DroneP1,
            0x000C_1002 => Self::Drone12DroneP1,
            0x000C_2001 => Self::Drone12ControllerP1,
            _ => Self::None,
        }
    }
}

/// Classified color produced by the card reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CardColorIndex {
    #[default]
    Unknown = 0x00,
    White = 0x01,
    Red = 0x02,
    Yellow = 0x03,
    Green = 0x04,
    Cyan = 0x05,
    Blue = 0x06,
    Magenta = 0x07,
    Black = 0x08,
}

impl CardColorIndex {
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0x01 => Self::White,
            0x02 => Self::Red,
            0x03 => Self::Yellow,
            0x04 => Self::Green,
            0x05 => Self::Cyan,
            0x06 => Self::Blue,
            0x07 => Self::Magenta,
            0x08 => Self::Black,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_round_trip() {
        assert_eq!(ModeSystem::from_value(0x12), ModeSystem::Running);
        assert_eq!(ModeFlight::from_value(0x13), ModeFlight::Flight);
        assert_eq!(ModeControlFlight::from_value(0x11), ModeControlFlight::Position);
        assert_eq!(ModeMovement::from_value(0x02), ModeMovement::Hovering);
        assert_eq!(Headless::from_value(0x02), Headless::Normal);
        assert_eq!(SensorOrientation::from_value(0x03), SensorOrientation::Reversed);
        assert_eq!(ModeUpdate::from_value(0x06), ModeUpdate::RunApplication);
        assert_eq!(
            ModelNumber::from_value(0x000C_1002),
            ModelNumber::Drone12DroneP1
        );
        assert_eq!(CardColorIndex::from_value(0x04), CardColorIndex::Green);
    }

    #[test]
    fn test_unknown_values_fall_back_to_sentinel() {
        assert_eq!(ModeSystem::from_value(0x55), ModeSystem::None);
        assert_eq!(ModeFlight::from_value(0xFF), ModeFlight::None);
        assert_eq!(ModeUpdate::from_value(0x99), ModeUpdate::None);
        assert_eq!(ModelNumber::from_value(0xDEAD_BEEF), ModelNumber::None);
        assert_eq!(CardColorIndex::from_value(0x7E), CardColorIndex::Unknown);
    }

    #[test]
    fn test_is_flying() {
        assert!(ModeFlight::Flight.is_flying());
        assert!(ModeFlight::TakeOff.is_flying());
        assert!(ModeFlight::Landing.is_flying());
        assert!(!ModeFlight::Ready.is_flying());
        assert!(!ModeFlight::Stop.is_flying());
        assert!(!ModeFlight::None.is_flying());
    }
}
