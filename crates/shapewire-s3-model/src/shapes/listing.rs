//! Bucket listing results.

use shapewire_core::{
    CodecResult, ElementKind, FieldDescriptor, ListSpec, Record, ScalarKind, Shape,
    ShapeDescriptor, Timestamp, list_of, take_list_of,
};

use crate::types::StorageClass;

/// Descriptor of [`Object`].
pub static OBJECT: ShapeDescriptor = ShapeDescriptor::new(
    "Object",
    &[
        FieldDescriptor::scalar("Key", ScalarKind::String),
        FieldDescriptor::scalar("LastModified", ScalarKind::Timestamp),
        FieldDescriptor::scalar("ETag", ScalarKind::String),
        FieldDescriptor::scalar("Size", ScalarKind::Long),
        FieldDescriptor::scalar("StorageClass", ScalarKind::String),
    ],
);

/// Descriptor of [`CommonPrefix`].
pub static COMMON_PREFIX: ShapeDescriptor = ShapeDescriptor::new(
    "CommonPrefix",
    &[FieldDescriptor::scalar("Prefix", ScalarKind::String)],
);

/// Descriptor of [`ListBucketResult`].
pub static LIST_BUCKET_RESULT: ShapeDescriptor = ShapeDescriptor::new(
    "ListBucketResult",
    &[
        FieldDescriptor::scalar("Name", ScalarKind::String),
        FieldDescriptor::scalar("Prefix", ScalarKind::String),
        FieldDescriptor::scalar("MaxKeys", ScalarKind::Integer),
        FieldDescriptor::scalar("IsTruncated", ScalarKind::Boolean),
        FieldDescriptor::list("Contents", ListSpec::of(ElementKind::Shape(&OBJECT)).flattened()),
        FieldDescriptor::list(
            "CommonPrefixes",
            ListSpec::of(ElementKind::Shape(&COMMON_PREFIX)).flattened(),
        ),
    ],
);

/// S3 Object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    pub key: Option<String>,
    pub last_modified: Option<Timestamp>,
    pub e_tag: Option<String>,
    pub size: Option<i64>,
    pub storage_class: Option<StorageClass>,
}

impl Shape for Object {
    fn descriptor() -> &'static ShapeDescriptor {
        &OBJECT
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_opt("Key", self.key.as_deref());
        record.set_opt("LastModified", self.last_modified);
        record.set_opt("ETag", self.e_tag.as_deref());
        record.set_opt("Size", self.size);
        record.set_opt(
            "StorageClass",
            self.storage_class.as_ref().map(StorageClass::as_str),
        );
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            key: record.take_string("Key")?,
            last_modified: record.take_timestamp("LastModified")?,
            e_tag: record.take_string("ETag")?,
            size: record.take_i64("Size")?,
            storage_class: record
                .take_string("StorageClass")?
                .as_deref()
                .map(StorageClass::from),
        })
    }
}

/// S3 CommonPrefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPrefix {
    pub prefix: Option<String>,
}

impl Shape for CommonPrefix {
    fn descriptor() -> &'static ShapeDescriptor {
        &COMMON_PREFIX
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_opt("Prefix", self.prefix.as_deref());
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            prefix: record.take_string("Prefix")?,
        })
    }
}

/// Output of ListObjects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBucketResult {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub max_keys: Option<i32>,
    pub is_truncated: Option<bool>,
    pub contents: Vec<Object>,
    pub common_prefixes: Vec<CommonPrefix>,
}

impl Shape for ListBucketResult {
    fn descriptor() -> &'static ShapeDescriptor {
        &LIST_BUCKET_RESULT
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_opt("Name", self.name.as_deref());
        record.set_opt("Prefix", self.prefix.as_deref());
        record.set_opt("MaxKeys", self.max_keys);
        record.set_opt("IsTruncated", self.is_truncated);
        if !self.contents.is_empty() {
            record.set("Contents", list_of(&self.contents));
        }
        if !self.common_prefixes.is_empty() {
            record.set("CommonPrefixes", list_of(&self.common_prefixes));
        }
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            name: record.take_string("Name")?,
            prefix: record.take_string("Prefix")?,
            max_keys: record.take_i32("MaxKeys")?,
            is_truncated: record.take_bool("IsTruncated")?,
            contents: take_list_of(&mut record, "Contents")?,
            common_prefixes: take_list_of(&mut record, "CommonPrefixes")?,
        })
    }
}
