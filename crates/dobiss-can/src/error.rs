use core::fmt;

/// Errors raised while decoding bus frames.
///
/// Frame *construction* never fails: out-of-range inputs are truncated to
/// their low byte. Only decoding a received frame can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanError {
    /// The payload length does not match the command layout.
    InvalidFrameLength { expected: usize, actual: usize },
    /// A payload longer than a CAN frame can carry.
    PayloadTooLong(usize),
    /// The arbitration id does not belong to a known command.
    InvalidArbitrationId(u32),
    /// A value in the frame is not a valid `Action`.
    InvalidAction(u8),
    /// A value is not a known module-type code.
    InvalidModuleType(u8),
    /// The last byte of a SET payload is not the fixed trailer.
    InvalidTrailer(u8),
    /// The module byte of the arbitration id disagrees with the payload.
    ModuleMismatch { arbitration: u8, payload: u8 },
}

impl fmt::Display for CanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrameLength { expected, actual } => write!(
                f,
                "Invalid payload length: expected {expected} bytes but got {actual}"
            ),
            Self::PayloadTooLong(len) => {
                write!(f, "Payload of {len} bytes exceeds the 8-byte frame limit")
            }
            Self::InvalidArbitrationId(id) => write!(f, "Unknown arbitration id: {id:#010x}"),
            Self::InvalidAction(v) => write!(f, "Invalid action value: {v:#04x}"),
            Self::InvalidModuleType(v) => write!(f, "Invalid module type code: {v}"),
            Self::InvalidTrailer(v) => write!(f, "Invalid SET trailer byte: {v:#04x}"),
            Self::ModuleMismatch {
                arbitration,
                payload,
            } => write!(
                f,
                "Module {arbitration} in arbitration id does not match module {payload} in payload"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CanError {}
