//! XML layer for shapewire.
//!
//! Turns XML documents into the element events the shapewire path decoder
//! consumes, and writes records back out as XML using the same descriptors.
//!
//! # Key components
//!
//! - [`XmlEvents`]: quick-xml backed element source for the root's children
//! - [`decode_xml`] / [`from_xml`] / [`decode_xml_any`]: XML bodies into records and shapes
//! - [`write_xml`] / [`to_xml`]: records and shapes into XML documents
//!
//! # XML conventions
//!
//! - Namespace prefixes on element names are ignored when reading
//! - Wrapped lists: `<Wire><Item>..</Item></Wire>`; flattened lists repeat `<Wire>`
//! - Maps: `<Wire><entry><key>..</key><value>..</value></entry></Wire>`
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

pub mod error;
pub mod reader;
pub mod writer;

pub use error::XmlError;
pub use reader::{XmlEvents, decode_xml, decode_xml_any, from_xml, from_xml_with};
pub use writer::{to_xml, write_xml};
