//! Error documents.

use shapewire_core::{CodecResult, FieldDescriptor, Record, ScalarKind, Shape, ShapeDescriptor};

/// Descriptor of [`ServiceError`].
pub static SERVICE_ERROR: ShapeDescriptor = ShapeDescriptor::new(
    "ServiceError",
    &[
        FieldDescriptor::scalar("Code", ScalarKind::String).required(),
        FieldDescriptor::scalar("Message", ScalarKind::String),
        FieldDescriptor::scalar("Resource", ScalarKind::String),
        FieldDescriptor::scalar("RequestId", ScalarKind::String),
    ],
);

/// An S3 error document.
///
/// S3 uses `noErrorWrapping: true`, so errors are a flat `<Error>` element
/// without an outer `<ErrorResponse>` wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceError {
    pub code: String,
    pub message: Option<String>,
    pub resource: Option<String>,
    pub request_id: Option<String>,
}

impl ServiceError {
    /// Root element name of an error document.
    pub const ROOT_ELEMENT: &'static str = "Error";

    /// Create an error with a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

impl Shape for ServiceError {
    fn descriptor() -> &'static ShapeDescriptor {
        &SERVICE_ERROR
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new().with("Code", self.code.as_str());
        record.set_opt("Message", self.message.as_deref());
        record.set_opt("Resource", self.resource.as_deref());
        record.set_opt("RequestId", self.request_id.as_deref());
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            code: record.take_string("Code")?.unwrap_or_default(),
            message: record.take_string("Message")?,
            resource: record.take_string("Resource")?,
            request_id: record.take_string("RequestId")?,
        })
    }
}
