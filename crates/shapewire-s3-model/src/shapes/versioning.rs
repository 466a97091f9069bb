//! Bucket versioning.

use shapewire_core::{CodecResult, FieldDescriptor, Record, ScalarKind, Shape, ShapeDescriptor};

use crate::types::{BucketVersioningStatus, MFADelete};

/// Descriptor of [`VersioningConfiguration`].
pub static VERSIONING_CONFIGURATION: ShapeDescriptor = ShapeDescriptor::new(
    "VersioningConfiguration",
    &[
        FieldDescriptor::scalar("MFADelete", ScalarKind::String).wire("MfaDelete"),
        FieldDescriptor::scalar("Status", ScalarKind::String),
    ],
);

/// Descriptor of [`PutBucketVersioningRequest`].
pub static PUT_BUCKET_VERSIONING_REQUEST: ShapeDescriptor = ShapeDescriptor::new(
    "PutBucketVersioningRequest",
    &[
        FieldDescriptor::scalar("Bucket", ScalarKind::String).required(),
        FieldDescriptor::scalar("MFA", ScalarKind::String),
        FieldDescriptor::shape("VersioningConfiguration", &VERSIONING_CONFIGURATION),
    ],
);

/// S3 VersioningConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersioningConfiguration {
    pub mfa_delete: Option<MFADelete>,
    pub status: Option<BucketVersioningStatus>,
}

impl Shape for VersioningConfiguration {
    fn descriptor() -> &'static ShapeDescriptor {
        &VERSIONING_CONFIGURATION
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_opt("MFADelete", self.mfa_delete.as_ref().map(MFADelete::as_str));
        record.set_opt("Status", self.status.as_ref().map(BucketVersioningStatus::as_str));
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            mfa_delete: record.take_string("MFADelete")?.as_deref().map(MFADelete::from),
            status: record
                .take_string("Status")?
                .as_deref()
                .map(BucketVersioningStatus::from),
        })
    }
}

/// Input of PutBucketVersioning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutBucketVersioningRequest {
    pub bucket: String,
    pub mfa: Option<String>,
    pub versioning_configuration: Option<VersioningConfiguration>,
}

impl Shape for PutBucketVersioningRequest {
    fn descriptor() -> &'static ShapeDescriptor {
        &PUT_BUCKET_VERSIONING_REQUEST
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new().with("Bucket", self.bucket.as_str());
        record.set_opt("MFA", self.mfa.as_deref());
        record.set_opt(
            "VersioningConfiguration",
            self.versioning_configuration
                .as_ref()
                .map(VersioningConfiguration::to_record),
        );
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            bucket: record.take_string("Bucket")?.unwrap_or_default(),
            mfa: record.take_string("MFA")?,
            versioning_configuration: record
                .take_record("VersioningConfiguration")?
                .map(VersioningConfiguration::from_record)
                .transpose()?,
        })
    }
}
