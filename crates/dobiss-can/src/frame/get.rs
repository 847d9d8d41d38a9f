use crate::error::CanError;
use crate::frame::{BusFrame, MAX_PAYLOAD_LEN};
use crate::frame::codec::{Codec, CodecHelpers};
use crate::types::{GET_ARBITRATION_ID, GET_PAYLOAD_LEN};

/// A GET command requesting the state of one output.
///
/// Always sent on [`GET_ARBITRATION_ID`] with the payload `[module, output]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCommand {
    pub module: u8,
    pub output: u8,
}

impl GetCommand {
    pub fn new(module: u32, output: u32) -> Self {
        Self {
            module: CodecHelpers::truncate(module),
            output: CodecHelpers::truncate(output),
        }
    }
}

impl Codec for GetCommand {
    fn encode(&self) -> BusFrame {
        let mut data = [0u8; MAX_PAYLOAD_LEN];
        data[0] = self.module;
        data[1] = self.output;
        BusFrame {
            arbitration_id: GET_ARBITRATION_ID,
            data,
            len: GET_PAYLOAD_LEN,
        }
    }

    fn decode(frame: &BusFrame) -> Result<Self, CanError> {
        if frame.arbitration_id() != GET_ARBITRATION_ID {
            return Err(CanError::InvalidArbitrationId(frame.arbitration_id()));
        }
        CodecHelpers::check_len(frame, GET_PAYLOAD_LEN)?;
        let buffer = frame.payload();
        Ok(Self {
            module: buffer[0],
            output: buffer[1],
        })
    }
}
