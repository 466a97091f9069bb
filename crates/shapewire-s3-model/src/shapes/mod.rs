//! Typed S3 shapes and their static descriptors.

mod delete;
mod inventory;
mod lifecycle;
mod listing;
mod multipart;
mod replication;
mod service_error;
mod tagging;
mod versioning;

pub use delete::{DELETE, Delete, OBJECT_IDENTIFIER, ObjectIdentifier};
pub use inventory::{INVENTORY_ENCRYPTION, InventoryEncryption, SSE_KMS, SSE_S3, SSEKMS, SSES3};
pub use lifecycle::{LIFECYCLE_EXPIRATION, LifecycleExpiration};
pub use listing::{
    COMMON_PREFIX, CommonPrefix, LIST_BUCKET_RESULT, ListBucketResult, OBJECT, Object,
};
pub use multipart::{CREATE_MULTIPART_UPLOAD_REQUEST, CreateMultipartUploadRequest};
pub use replication::{
    DESTINATION, Destination, REPLICATION_CONFIGURATION, REPLICATION_RULE,
    ReplicationConfiguration, ReplicationRule,
};
pub use service_error::{SERVICE_ERROR, ServiceError};
pub use tagging::{TAG, TAGGING, Tag, Tagging};
pub use versioning::{
    PUT_BUCKET_VERSIONING_REQUEST, PutBucketVersioningRequest, VERSIONING_CONFIGURATION,
    VersioningConfiguration,
};
