//! Object and bucket tagging.

use shapewire_core::{
    CodecResult, ElementKind, FieldDescriptor, ListSpec, Record, ScalarKind, Shape,
    ShapeDescriptor, list_of, take_list_of,
};

/// Descriptor of [`Tag`].
pub static TAG: ShapeDescriptor = ShapeDescriptor::new(
    "Tag",
    &[
        FieldDescriptor::scalar("Key", ScalarKind::String).required(),
        FieldDescriptor::scalar("Value", ScalarKind::String).required(),
    ],
);

/// Descriptor of [`Tagging`].
pub static TAGGING: ShapeDescriptor = ShapeDescriptor::new(
    "Tagging",
    &[FieldDescriptor::list(
        "TagSet",
        ListSpec::of(ElementKind::Shape(&TAG)).item_name("Tag"),
    )
    .required()],
);

/// S3 Tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Create a tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Shape for Tag {
    fn descriptor() -> &'static ShapeDescriptor {
        &TAG
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("Key", self.key.as_str())
            .with("Value", self.value.as_str())
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            key: record.take_string("Key")?.unwrap_or_default(),
            value: record.take_string("Value")?.unwrap_or_default(),
        })
    }
}

/// S3 Tagging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tagging {
    pub tag_set: Vec<Tag>,
}

impl Shape for Tagging {
    fn descriptor() -> &'static ShapeDescriptor {
        &TAGGING
    }

    fn to_record(&self) -> Record {
        Record::new().with("TagSet", list_of(&self.tag_set))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            tag_set: take_list_of(&mut record, "TagSet")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use shapewire_core::{from_parameters, to_parameters};

    use super::*;

    #[test]
    fn test_should_encode_tag_set_with_member_convention() {
        let tagging = Tagging {
            tag_set: vec![Tag::new("env", "prod"), Tag::new("team", "storage")],
        };

        let params = to_parameters(&tagging, "Tagging.").expect("encode");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("Tagging.TagSet.member.1.Key", "env"),
                ("Tagging.TagSet.member.1.Value", "prod"),
                ("Tagging.TagSet.member.2.Key", "team"),
                ("Tagging.TagSet.member.2.Value", "storage"),
            ]
        );

        let decoded: Tagging = from_parameters(&params, "Tagging.").expect("decode");
        assert_eq!(decoded, tagging);
    }

    #[test]
    fn test_should_keep_empty_tag_set() {
        let params = to_parameters(&Tagging::default(), "").expect("encode");
        assert_eq!(params.get("TagSet"), Some(""));
    }
}
