use crate::error::CanError;
use core::convert::TryFrom;
use core::fmt;

// --- Bus Constants ---

/// Arbitration id base of a SET command. The module address is folded into
/// bits 8..16 (`base | module << 8`).
pub const SET_ARBITRATION_BASE: u32 = 0x01FC_0002;

/// Fixed arbitration id of a GET (status request) command.
pub const GET_ARBITRATION_ID: u32 = 0x01FC_FF01;

/// Bits of a SET arbitration id that carry the module address.
pub const ARBITRATION_MODULE_MASK: u32 = 0x0000_FF00;

/// Payload length of a SET frame.
pub const SET_PAYLOAD_LEN: usize = 8;

/// Payload length of a GET frame.
pub const GET_PAYLOAD_LEN: usize = 2;

/// Last byte of every SET payload.
pub const SET_TRAILER: u8 = 0xFF;

/// Level sent with on/toggle commands when the caller gives none (0x64).
pub const DEFAULT_LEVEL: u8 = 100;

/// "No delay" marker for the delay-on and delay-off bytes.
pub const NO_DELAY: u8 = 0xFF;

/// Soft-dim value for an instant transition. Other values are a
/// hardware-dependent ramp speed.
pub const SOFT_DIM_INSTANT: u8 = 0xFF;

/// Upper bound of the bus dim level (percent).
pub const BUS_LEVEL_MAX: u8 = 100;

/// Upper bound of the host brightness scale.
pub const HOST_BRIGHTNESS_MAX: u8 = 255;

// --- Core Protocol Identifiers ---

/// Module family code, as used both in the export file and in the bus
/// configuration entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
#[repr(u8)]
pub enum ModuleType {
    /// Switching relay module.
    Relay = 8,
    /// Phase dimmer module.
    Dimmer = 16,
    /// 0-10V analog output module.
    ZeroToTenVolt = 24,
}

impl ModuleType {
    /// Returns the numeric module-type code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ModuleType {
    type Error = CanError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(ModuleType::Relay),
            16 => Ok(ModuleType::Dimmer),
            24 => Ok(ModuleType::ZeroToTenVolt),
            _ => Err(CanError::InvalidModuleType(value)),
        }
    }
}

impl From<ModuleType> for u8 {
    fn from(module_type: ModuleType) -> Self {
        module_type.code()
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleType::Relay => write!(f, "relay"),
            ModuleType::Dimmer => write!(f, "dimmer"),
            ModuleType::ZeroToTenVolt => write!(f, "0-10v"),
        }
    }
}

/// Action byte of a SET command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Action {
    Off = 0x00,
    On = 0x01,
    Toggle = 0x02,
}

impl TryFrom<u8> for Action {
    type Error = CanError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Action::Off),
            0x01 => Ok(Action::On),
            0x02 => Ok(Action::Toggle),
            _ => Err(CanError::InvalidAction(value)),
        }
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        action as u8
    }
}
