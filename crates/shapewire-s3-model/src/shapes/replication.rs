//! Bucket replication.

use shapewire_core::{
    CodecResult, ElementKind, FieldDescriptor, ListSpec, Record, ScalarKind, Shape,
    ShapeDescriptor, list_of, take_list_of,
};

use crate::types::{ReplicationRuleStatus, StorageClass};

/// Descriptor of [`Destination`].
pub static DESTINATION: ShapeDescriptor = ShapeDescriptor::new(
    "Destination",
    &[
        FieldDescriptor::scalar("Bucket", ScalarKind::String).required(),
        FieldDescriptor::scalar("Account", ScalarKind::String),
        FieldDescriptor::scalar("StorageClass", ScalarKind::String),
    ],
);

/// Descriptor of [`ReplicationRule`].
pub static REPLICATION_RULE: ShapeDescriptor = ShapeDescriptor::new(
    "ReplicationRule",
    &[
        FieldDescriptor::scalar("ID", ScalarKind::String),
        FieldDescriptor::scalar("Priority", ScalarKind::Integer),
        FieldDescriptor::scalar("Prefix", ScalarKind::String),
        FieldDescriptor::scalar("Status", ScalarKind::String).required(),
        FieldDescriptor::shape("Destination", &DESTINATION).required(),
    ],
);

/// Descriptor of [`ReplicationConfiguration`].
///
/// Rules use bare list indices in query form (`Rule.1.ID`) and are flattened
/// in XML (`<Rule>` repeated directly under the root).
pub static REPLICATION_CONFIGURATION: ShapeDescriptor = ShapeDescriptor::new(
    "ReplicationConfiguration",
    &[
        FieldDescriptor::scalar("Role", ScalarKind::String).required(),
        FieldDescriptor::list(
            "Rules",
            ListSpec::of(ElementKind::Shape(&REPLICATION_RULE))
                .bare()
                .flattened(),
        )
        .wire("Rule")
        .required(),
    ],
);

/// S3 Destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destination {
    pub bucket: String,
    pub account: Option<String>,
    pub storage_class: Option<StorageClass>,
}

impl Shape for Destination {
    fn descriptor() -> &'static ShapeDescriptor {
        &DESTINATION
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new().with("Bucket", self.bucket.as_str());
        record.set_opt("Account", self.account.as_deref());
        record.set_opt(
            "StorageClass",
            self.storage_class.as_ref().map(StorageClass::as_str),
        );
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            bucket: record.take_string("Bucket")?.unwrap_or_default(),
            account: record.take_string("Account")?,
            storage_class: record
                .take_string("StorageClass")?
                .as_deref()
                .map(StorageClass::from),
        })
    }
}

/// S3 ReplicationRule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationRule {
    pub id: Option<String>,
    pub priority: Option<i32>,
    pub prefix: Option<String>,
    pub status: ReplicationRuleStatus,
    pub destination: Destination,
}

impl Shape for ReplicationRule {
    fn descriptor() -> &'static ShapeDescriptor {
        &REPLICATION_RULE
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_opt("ID", self.id.as_deref());
        record.set_opt("Priority", self.priority);
        record.set_opt("Prefix", self.prefix.as_deref());
        record.set("Status", self.status.as_str());
        record.set("Destination", self.destination.to_record());
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            id: record.take_string("ID")?,
            priority: record.take_i32("Priority")?,
            prefix: record.take_string("Prefix")?,
            status: record
                .take_string("Status")?
                .as_deref()
                .map(ReplicationRuleStatus::from)
                .unwrap_or_default(),
            destination: record
                .take_record("Destination")?
                .map(Destination::from_record)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// S3 ReplicationConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationConfiguration {
    pub role: String,
    pub rules: Vec<ReplicationRule>,
}

impl Shape for ReplicationConfiguration {
    fn descriptor() -> &'static ShapeDescriptor {
        &REPLICATION_CONFIGURATION
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("Role", self.role.as_str())
            .with("Rules", list_of(&self.rules))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            role: record.take_string("Role")?.unwrap_or_default(),
            rules: take_list_of(&mut record, "Rules")?,
        })
    }
}
