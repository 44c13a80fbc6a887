//! Error types for unalto library.

use std::io;
use thiserror::Error;

/// Result type alias for unalto operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during ALTO processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not an ALTO document.
    #[error("Unknown file format: not an ALTO document")]
    UnknownFormat,

    /// The input is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The input bytes are not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A structural element (Layout, Page) is missing.
    #[error("{0} element not found in ALTO XML")]
    MissingElement(&'static str),

    /// A required geometry attribute is missing.
    #[error("Missing attribute {attribute} on {element}")]
    MissingAttribute {
        /// Element local name
        element: String,
        /// Attribute name
        attribute: &'static str,
    },

    /// A geometry attribute could not be parsed as an integer.
    #[error("Invalid value {value:?} for attribute {attribute} on {element}")]
    InvalidAttribute {
        /// Element local name
        element: String,
        /// Attribute name
        attribute: &'static str,
        /// Raw attribute value
        value: String,
    },

    /// Error during rendering (text, JSON, overlay).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error reports a missing Layout or Page element.
    ///
    /// Structural errors are recoverable: lenient parsing turns them into an
    /// empty layout instead of failing.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::MissingElement(_))
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
