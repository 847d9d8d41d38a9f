use crate::error::CanError;
use crate::frame::{BusFrame, Command, GetCommand, SetCommand};
use crate::types::{ARBITRATION_MODULE_MASK, GET_ARBITRATION_ID, SET_ARBITRATION_BASE};
use log::debug;

/// A trait for commands that map to and from a bus frame.
pub trait Codec: Sized {
    /// Encodes the command into a frame. Encoding never fails; every byte is
    /// already truncated when the command is built.
    fn encode(&self) -> BusFrame;

    /// Decodes a command from a received frame, validating its layout.
    fn decode(frame: &BusFrame) -> Result<Self, CanError>;
}

/// Contains helper functions shared by the command codecs.
pub struct CodecHelpers;
impl CodecHelpers {
    /// Keeps the low 8 bits of a caller-supplied value.
    pub const fn truncate(value: u32) -> u8 {
        (value & 0xFF) as u8
    }

    /// Folds a module address into the SET arbitration id.
    pub const fn set_arbitration_id(module: u8) -> u32 {
        SET_ARBITRATION_BASE | ((module as u32) << 8)
    }

    /// True if the id is a SET id for some module.
    pub const fn is_set_arbitration_id(id: u32) -> bool {
        id & !ARBITRATION_MODULE_MASK == SET_ARBITRATION_BASE
    }

    /// Extracts the module byte of a SET arbitration id.
    pub const fn module_from_arbitration_id(id: u32) -> u8 {
        ((id & ARBITRATION_MODULE_MASK) >> 8) as u8
    }

    /// Returns an error unless the payload has exactly `expected` bytes.
    pub fn check_len(frame: &BusFrame, expected: usize) -> Result<(), CanError> {
        let actual = frame.payload().len();
        if actual != expected {
            return Err(CanError::InvalidFrameLength { expected, actual });
        }
        Ok(())
    }
}

/// Parses a received frame into the matching command, dispatching on the
/// arbitration id.
pub fn deserialize_frame(frame: &BusFrame) -> Result<Command, CanError> {
    let id = frame.arbitration_id();

    let result = if id == GET_ARBITRATION_ID {
        GetCommand::decode(frame).map(Command::Get)
    } else if CodecHelpers::is_set_arbitration_id(id) {
        SetCommand::decode(frame).map(Command::Set)
    } else {
        Err(CanError::InvalidArbitrationId(id))
    };

    if let Ok(command) = &result {
        debug!("Successfully deserialized frame: {:?}", command);
    }

    result
}
