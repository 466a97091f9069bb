//! S3 model for shapewire.
//!
//! A subset of the S3 API described as static shapewire descriptors, with a
//! typed struct per shape and the string enums they carry.
//!
//! # Key components
//!
//! - [`shapes`]: typed structs implementing [`shapewire_core::Shape`] and their descriptors
//! - [`types`]: wire string enums (`as_str` / `From<&str>`)
//! - [`registry`]: every shape here, keyed by shape name and XML root element
#![allow(missing_docs)]

pub mod shapes;
pub mod types;

use shapewire_core::ShapeRegistry;

pub use shapes::*;
pub use types::{BucketVersioningStatus, MFADelete, ReplicationRuleStatus, StorageClass};

/// All S3 shapes in this crate.
///
/// Nested shapes are registered through their parents; the error document is
/// also reachable under its `Error` root element name.
#[must_use]
pub fn registry() -> ShapeRegistry {
    let mut registry = ShapeRegistry::new()
        .with(&TAGGING)
        .with(&PUT_BUCKET_VERSIONING_REQUEST)
        .with(&REPLICATION_CONFIGURATION)
        .with(&INVENTORY_ENCRYPTION)
        .with(&LIFECYCLE_EXPIRATION)
        .with(&DELETE)
        .with(&LIST_BUCKET_RESULT)
        .with(&CREATE_MULTIPART_UPLOAD_REQUEST);
    registry.register_alias(ServiceError::ROOT_ELEMENT, &SERVICE_ERROR);
    registry
}
