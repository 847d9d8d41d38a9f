// crates/dobiss-can-config/src/log.rs

/// Trait for structs that provide metadata for logging
pub(crate) trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies the document a log line belongs to.
pub(crate) struct ParseContext<'a> {
    /// File path, or a label such as `<str>` for in-memory input.
    pub source: &'a str,
}

impl LogMetadata for ParseContext<'_> {
    fn meta(&self) -> String {
        format!("config={}", self.source)
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

// ===== cfg_warn! =====
macro_rules! cfg_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== cfg_debug! =====
macro_rules! cfg_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== cfg_trace! =====
macro_rules! cfg_trace {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::trace!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// Re-export macros for use in other files
pub(crate) use cfg_debug;
pub(crate) use cfg_trace;
pub(crate) use cfg_warn;
