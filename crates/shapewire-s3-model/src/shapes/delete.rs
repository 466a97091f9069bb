//! Multi-object delete.

use shapewire_core::{
    CodecResult, ElementKind, FieldDescriptor, ListSpec, Record, ScalarKind, Shape,
    ShapeDescriptor, list_of, take_list_of,
};

/// Descriptor of [`ObjectIdentifier`].
pub static OBJECT_IDENTIFIER: ShapeDescriptor = ShapeDescriptor::new(
    "ObjectIdentifier",
    &[
        FieldDescriptor::scalar("Key", ScalarKind::String).required(),
        FieldDescriptor::scalar("VersionId", ScalarKind::String),
    ],
);

/// Descriptor of [`Delete`].
pub static DELETE: ShapeDescriptor = ShapeDescriptor::new(
    "Delete",
    &[
        FieldDescriptor::list(
            "Objects",
            ListSpec::of(ElementKind::Shape(&OBJECT_IDENTIFIER)).flattened(),
        )
        .wire("Object")
        .required(),
        FieldDescriptor::scalar("Quiet", ScalarKind::Boolean),
    ],
);

/// S3 ObjectIdentifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectIdentifier {
    pub key: String,
    pub version_id: Option<String>,
}

impl Shape for ObjectIdentifier {
    fn descriptor() -> &'static ShapeDescriptor {
        &OBJECT_IDENTIFIER
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new().with("Key", self.key.as_str());
        record.set_opt("VersionId", self.version_id.as_deref());
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            key: record.take_string("Key")?.unwrap_or_default(),
            version_id: record.take_string("VersionId")?,
        })
    }
}

/// S3 Delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delete {
    pub objects: Vec<ObjectIdentifier>,
    pub quiet: Option<bool>,
}

impl Shape for Delete {
    fn descriptor() -> &'static ShapeDescriptor {
        &DELETE
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new().with("Objects", list_of(&self.objects));
        record.set_opt("Quiet", self.quiet);
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            objects: take_list_of(&mut record, "Objects")?,
            quiet: record.take_bool("Quiet")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use shapewire_core::to_parameters;

    use super::*;

    #[test]
    fn test_should_encode_objects_with_member_convention() {
        let delete = Delete {
            objects: vec![
                ObjectIdentifier {
                    key: "a.txt".to_owned(),
                    version_id: Some("v1".to_owned()),
                },
                ObjectIdentifier {
                    key: "b.txt".to_owned(),
                    version_id: None,
                },
            ],
            quiet: Some(true),
        };

        let params = to_parameters(&delete, "Delete.").expect("encode");
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![
                ("Delete.Object.member.1.Key", "a.txt"),
                ("Delete.Object.member.1.VersionId", "v1"),
                ("Delete.Object.member.2.Key", "b.txt"),
                ("Delete.Quiet", "true"),
            ]
        );
    }
}
