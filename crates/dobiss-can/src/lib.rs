#![cfg_attr(not(any(test, feature = "std")), no_std)]

// 'alloc' is used for the owned strings in the bus settings
extern crate alloc;

// --- Foundation Modules ---
pub mod error;
pub mod settings;
pub mod types;

// --- Conversions ---
pub mod brightness;

// --- Wire Frames ---
pub mod frame;

// --- Top-level Exports ---
pub use brightness::{to_bus_level, to_host_brightness};
pub use error::CanError;
pub use frame::codec::CodecHelpers;
pub use frame::{
    BusFrame, Codec, Command, GetCommand, SetCommand, build_get_frame, build_set_frame,
    deserialize_frame,
};
pub use settings::BusSettings;
pub use types::{Action, ModuleType};
