//! XML error type.

use std::io;

use shapewire_core::CodecError;

/// Errors that can occur while reading or writing shapewire XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// The document could not be decoded into, or encoded from, a shape.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// An element that no registered shape handles.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// The document ended before the root element closed.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// Text or a name could not be decoded.
    #[error("failed to decode XML text: {0}")]
    ParseError(String),
}
