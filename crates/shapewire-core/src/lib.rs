//! Descriptor-driven key-path encoding and decoding for shapewire.
//!
//! This crate implements the one algorithm every generated marshaller of an
//! AWS-style query protocol repeats: flattening a nested object graph into
//! ordered `(dotted.path, value)` parameters, and rebuilding the graph from a
//! stream of tagged elements.
//!
//! # Key components
//!
//! - [`ShapeDescriptor`] / [`FieldDescriptor`]: static, per-shape field tables
//! - [`Record`] and [`Value`]: the dynamic instance of a shape
//! - [`Shape`]: conversion between typed structs and records
//! - [`encode`] / [`to_parameters`]: the path encoder
//! - [`decode_events`] / [`from_parameters`]: the path decoder
//! - [`format_scalar`] / [`parse_scalar`]: canonical scalar wire strings
//!
//! # Path conventions
//!
//! - Nested shape: `Parent.Child.Field`
//! - Member list: `Items.member.1.Field`
//! - Bare list: `Items.1.Field`
//! - Map: `Attrs.entry.1.key` / `Attrs.entry.1.value`
//! - Timestamps: ISO 8601 UTC with milliseconds (`2006-02-03T16:45:09.000Z`)

mod config;
mod decoder;
mod descriptor;
mod encoder;
mod error;
mod format;
mod params;
mod path;
pub mod query;
mod registry;
mod shape;
mod value;

pub use config::{CodecConfig, DEFAULT_MAX_DEPTH, DEFAULT_XML_NAMESPACE};
pub use decoder::{DecodeOptions, ElementEvent, ElementLayout, decode_events};
pub use descriptor::{
    ElementKind, FieldDescriptor, FieldKind, ListConvention, ListSpec, MapConvention, MapSpec,
    ScalarKind, ShapeDescriptor,
};
pub use encoder::{encode, encode_into, to_parameters, validate};
pub use error::{CodecError, CodecResult};
pub use format::{
    TIMESTAMP_FORMAT, format_scalar, format_timestamp, format_value, parse_scalar, parse_timestamp,
};
pub use params::ParameterSet;
pub use path::KeyPath;
pub use query::{decode_parameters, from_parameters};
pub use registry::ShapeRegistry;
pub use shape::{Shape, list_of, take_list_of};
pub use value::{Record, Scalar, Timestamp, Value};
