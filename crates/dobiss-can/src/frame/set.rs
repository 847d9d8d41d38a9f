use crate::error::CanError;
use crate::frame::BusFrame;
use crate::frame::codec::{Codec, CodecHelpers};
use crate::types::{
    Action, DEFAULT_LEVEL, NO_DELAY, SET_PAYLOAD_LEN, SET_TRAILER, SOFT_DIM_INSTANT,
};

/// A SET command: switch, toggle or dim one output.
///
/// Payload layout (8 bytes):
/// `[module, output, action, delay_on, delay_off, level, soft_dim, 0xFF]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCommand {
    pub module: u8,
    pub output: u8,
    pub action: Action,
    /// Dim level in percent (0-100). Ignored by relay modules.
    pub level: u8,
    pub delay_on: u8,
    pub delay_off: u8,
    /// 0xFF for instant, otherwise a hardware-dependent ramp speed.
    pub soft_dim: u8,
}

impl SetCommand {
    /// Creates a SET command with full level, no delays and instant dimming.
    ///
    /// `module` and `output` are truncated to their low byte.
    pub fn new(module: u32, output: u32, action: Action) -> Self {
        Self {
            module: CodecHelpers::truncate(module),
            output: CodecHelpers::truncate(output),
            action,
            level: DEFAULT_LEVEL,
            delay_on: NO_DELAY,
            delay_off: NO_DELAY,
            soft_dim: SOFT_DIM_INSTANT,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = CodecHelpers::truncate(level);
        self
    }

    pub fn with_delays(mut self, delay_on: u32, delay_off: u32) -> Self {
        self.delay_on = CodecHelpers::truncate(delay_on);
        self.delay_off = CodecHelpers::truncate(delay_off);
        self
    }

    pub fn with_soft_dim(mut self, soft_dim: u32) -> Self {
        self.soft_dim = CodecHelpers::truncate(soft_dim);
        self
    }

    /// The arbitration id this command is sent on.
    pub const fn arbitration_id(&self) -> u32 {
        CodecHelpers::set_arbitration_id(self.module)
    }
}

impl Codec for SetCommand {
    fn encode(&self) -> BusFrame {
        let payload: [u8; SET_PAYLOAD_LEN] = [
            self.module,
            self.output,
            self.action.into(),
            self.delay_on,
            self.delay_off,
            self.level,
            self.soft_dim,
            SET_TRAILER,
        ];
        BusFrame {
            arbitration_id: self.arbitration_id(),
            data: payload,
            len: SET_PAYLOAD_LEN,
        }
    }

    fn decode(frame: &BusFrame) -> Result<Self, CanError> {
        let id = frame.arbitration_id();
        if !CodecHelpers::is_set_arbitration_id(id) {
            return Err(CanError::InvalidArbitrationId(id));
        }
        CodecHelpers::check_len(frame, SET_PAYLOAD_LEN)?;

        let buffer = frame.payload();
        let arbitration_module = CodecHelpers::module_from_arbitration_id(id);
        if buffer[0] != arbitration_module {
            return Err(CanError::ModuleMismatch {
                arbitration: arbitration_module,
                payload: buffer[0],
            });
        }
        if buffer[7] != SET_TRAILER {
            return Err(CanError::InvalidTrailer(buffer[7]));
        }

        Ok(Self {
            module: buffer[0],
            output: buffer[1],
            action: Action::try_from(buffer[2])?,
            delay_on: buffer[3],
            delay_off: buffer[4],
            level: buffer[5],
            soft_dim: buffer[6],
        })
    }
}
