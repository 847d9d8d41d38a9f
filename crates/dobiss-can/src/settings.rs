//! Connection settings handed to the transport that owns the bus.

use alloc::string::String;

/// Default transport backend.
pub const DEFAULT_INTERFACE: &str = "socketcan";

/// Default CAN channel.
pub const DEFAULT_CHANNEL: &str = "can0";

/// Which CAN adapter and channel the transport should open.
///
/// The codec never opens the bus itself; these settings are carried for the
/// transport collaborator. Missing fields fall back to the defaults when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusSettings {
    #[cfg_attr(feature = "serde", serde(default = "default_interface"))]
    pub interface: String,
    #[cfg_attr(feature = "serde", serde(default = "default_channel"))]
    pub channel: String,
}

#[cfg(feature = "serde")]
fn default_interface() -> String {
    String::from(DEFAULT_INTERFACE)
}

#[cfg(feature = "serde")]
fn default_channel() -> String {
    String::from(DEFAULT_CHANNEL)
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            interface: DEFAULT_INTERFACE.into(),
            channel: DEFAULT_CHANNEL.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BusSettings::default();
        assert_eq!(settings.interface, "socketcan");
        assert_eq!(settings.channel, "can0");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: BusSettings = serde_json::from_str(r#"{"channel":"vcan1"}"#).unwrap();
        assert_eq!(settings.interface, "socketcan");
        assert_eq!(settings.channel, "vcan1");
    }
}
