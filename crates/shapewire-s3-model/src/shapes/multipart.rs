//! Multipart upload initiation.

use std::collections::BTreeMap;

use shapewire_core::{
    CodecError, CodecResult, ElementKind, FieldDescriptor, MapSpec, Record, Scalar, ScalarKind,
    Shape, ShapeDescriptor, Timestamp, Value,
};

use super::tagging::{TAGGING, Tagging};
use crate::types::StorageClass;

/// Descriptor of [`CreateMultipartUploadRequest`].
pub static CREATE_MULTIPART_UPLOAD_REQUEST: ShapeDescriptor = ShapeDescriptor::new(
    "CreateMultipartUploadRequest",
    &[
        FieldDescriptor::scalar("Bucket", ScalarKind::String).required(),
        FieldDescriptor::scalar("Key", ScalarKind::String).required(),
        FieldDescriptor::scalar("ContentType", ScalarKind::String),
        FieldDescriptor::scalar("Expires", ScalarKind::Timestamp),
        FieldDescriptor::scalar("StorageClass", ScalarKind::String),
        FieldDescriptor::map("Metadata", MapSpec::of(ElementKind::Scalar(ScalarKind::String))),
        FieldDescriptor::shape("Tagging", &TAGGING),
    ],
);

/// Input of CreateMultipartUpload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMultipartUploadRequest {
    pub bucket: String,
    pub key: String,
    pub content_type: Option<String>,
    pub expires: Option<Timestamp>,
    pub storage_class: Option<StorageClass>,
    pub metadata: BTreeMap<String, String>,
    pub tagging: Option<Tagging>,
}

impl Shape for CreateMultipartUploadRequest {
    fn descriptor() -> &'static ShapeDescriptor {
        &CREATE_MULTIPART_UPLOAD_REQUEST
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new()
            .with("Bucket", self.bucket.as_str())
            .with("Key", self.key.as_str());
        record.set_opt("ContentType", self.content_type.as_deref());
        record.set_opt("Expires", self.expires);
        record.set_opt(
            "StorageClass",
            self.storage_class.as_ref().map(StorageClass::as_str),
        );
        if !self.metadata.is_empty() {
            record.set(
                "Metadata",
                Value::map(self.metadata.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            );
        }
        record.set_opt("Tagging", self.tagging.as_ref().map(Tagging::to_record));
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        let metadata: BTreeMap<String, String> = record
            .take_map("Metadata")?
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| match value {
                Value::Scalar(Scalar::String(value)) => Ok((key, value)),
                other => Err(CodecError::TypeMismatch {
                    field: "Metadata",
                    expected: "string",
                    found: other.kind_name(),
                }),
            })
            .collect::<CodecResult<_>>()?;

        Ok(Self {
            bucket: record.take_string("Bucket")?.unwrap_or_default(),
            key: record.take_string("Key")?.unwrap_or_default(),
            content_type: record.take_string("ContentType")?,
            expires: record.take_timestamp("Expires")?,
            storage_class: record
                .take_string("StorageClass")?
                .as_deref()
                .map(StorageClass::from),
            metadata,
            tagging: record
                .take_record("Tagging")?
                .map(Tagging::from_record)
                .transpose()?,
        })
    }
}
