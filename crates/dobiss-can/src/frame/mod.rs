//! Bus frames and the SET / GET commands carried in them.

pub mod codec;
pub mod get;
pub mod set;

pub use codec::{Codec, deserialize_frame};
pub use get::GetCommand;
pub use set::SetCommand;

use crate::error::CanError;
use crate::types::Action;

/// Maximum payload of a classic CAN frame.
pub const MAX_PAYLOAD_LEN: usize = 8;

/// A raw bus frame: an extended arbitration id plus up to 8 payload bytes.
///
/// Frames are plain values; two frames with the same id and bytes are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusFrame {
    arbitration_id: u32,
    data: [u8; MAX_PAYLOAD_LEN],
    len: usize,
}

impl BusFrame {
    /// Creates a frame from an arbitration id and payload bytes.
    pub fn new(arbitration_id: u32, payload: &[u8]) -> Result<Self, CanError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(CanError::PayloadTooLong(payload.len()));
        }
        let mut data = [0u8; MAX_PAYLOAD_LEN];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            arbitration_id,
            data,
            len: payload.len(),
        })
    }

    pub const fn arbitration_id(&self) -> u32 {
        self.arbitration_id
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The `(arbitration id, payload)` pair handed to a transport.
    pub fn as_parts(&self) -> (u32, &[u8]) {
        (self.arbitration_id, self.payload())
    }
}

/// Any command the codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Set(SetCommand),
    Get(GetCommand),
}

/// Builds a SET frame with the default level, delays and soft-dim.
///
/// Use [`SetCommand`] directly to override the optional bytes.
pub fn build_set_frame(module: u32, output: u32, action: Action) -> BusFrame {
    SetCommand::new(module, output, action).encode()
}

/// Builds a GET (status request) frame.
pub fn build_get_frame(module: u32, output: u32) -> BusFrame {
    GetCommand::new(module, output).encode()
}
