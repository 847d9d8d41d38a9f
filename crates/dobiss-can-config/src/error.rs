// crates/dobiss-can-config/src/error.rs

use quick_xml::Error as XmlError;
use quick_xml::encoding::EncodingError;
use std::fmt;
use std::io;

/// Errors that make a whole document unusable.
///
/// Every variant means the document is malformed or could not be read; the
/// parse call produces no records at all. Problems with individual outputs
/// are never reported here, see [`crate::SkippedOutput`].
#[derive(Debug)]
pub enum ConfigError {
    /// The source could not be opened or read.
    Io(io::Error),

    /// An error from the underlying `quick-xml` reader (syntax, mismatched
    /// end tag, bad attribute, encoding, unknown namespace prefix).
    XmlParsing(XmlError),

    /// An entity reference that is neither predefined nor a character reference.
    UnknownEntity { entity: String },

    /// The input ended while an element was still open.
    UnclosedElement { element: String },

    /// The input contains no root element.
    MissingRootElement,

    /// A second top-level element follows the root element.
    MultipleRootElements { element: String },

    /// Character data before or after the root element.
    TextOutsideRoot { text: String },
}

impl ConfigError {
    /// True if the source could not be read, as opposed to being read and
    /// found malformed.
    pub fn is_read_failure(&self) -> bool {
        match self {
            ConfigError::Io(_) => true,
            ConfigError::XmlParsing(XmlError::Io(_)) => true,
            _ => false,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<XmlError> for ConfigError {
    fn from(e: XmlError) -> Self {
        ConfigError::XmlParsing(e)
    }
}

impl From<EncodingError> for ConfigError {
    fn from(e: EncodingError) -> Self {
        ConfigError::XmlParsing(XmlError::from(e))
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read file: {}", e),
            ConfigError::XmlParsing(e) => write!(f, "Invalid XML file: {}", e),
            ConfigError::UnknownEntity { entity } => {
                write!(f, "Invalid XML file: undefined entity &{};", entity)
            }
            ConfigError::UnclosedElement { element } => {
                write!(f, "Invalid XML file: element <{}> is never closed", element)
            }
            ConfigError::MissingRootElement => write!(f, "Invalid XML file: no element found"),
            ConfigError::MultipleRootElements { element } => write!(
                f,
                "Invalid XML file: unexpected element <{}> after the root element",
                element
            ),
            ConfigError::TextOutsideRoot { text } => {
                write!(f, "Invalid XML file: junk outside the root element: {:?}", text)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::XmlParsing(e) => Some(e),
            _ => None,
        }
    }
}
