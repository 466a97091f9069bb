//! Lifecycle expiration.

use shapewire_core::{
    CodecResult, FieldDescriptor, Record, ScalarKind, Shape, ShapeDescriptor, Timestamp,
};

/// Descriptor of [`LifecycleExpiration`].
pub static LIFECYCLE_EXPIRATION: ShapeDescriptor = ShapeDescriptor::new(
    "LifecycleExpiration",
    &[
        FieldDescriptor::scalar("Date", ScalarKind::Timestamp),
        FieldDescriptor::scalar("Days", ScalarKind::Integer),
        FieldDescriptor::scalar("ExpiredObjectDeleteMarker", ScalarKind::Boolean),
    ],
);

/// S3 LifecycleExpiration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleExpiration {
    pub date: Option<Timestamp>,
    pub days: Option<i32>,
    pub expired_object_delete_marker: Option<bool>,
}

impl Shape for LifecycleExpiration {
    fn descriptor() -> &'static ShapeDescriptor {
        &LIFECYCLE_EXPIRATION
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_opt("Date", self.date);
        record.set_opt("Days", self.days);
        record.set_opt("ExpiredObjectDeleteMarker", self.expired_object_delete_marker);
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            date: record.take_timestamp("Date")?,
            days: record.take_i32("Days")?,
            expired_object_delete_marker: record.take_bool("ExpiredObjectDeleteMarker")?,
        })
    }
}
