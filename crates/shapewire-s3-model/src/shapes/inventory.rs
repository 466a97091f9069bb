//! Inventory report encryption.

use shapewire_core::{CodecResult, FieldDescriptor, Record, ScalarKind, Shape, ShapeDescriptor};

/// Descriptor of [`SSES3`].
pub static SSE_S3: ShapeDescriptor = ShapeDescriptor::new("SSES3", &[]);

/// Descriptor of [`SSEKMS`].
pub static SSE_KMS: ShapeDescriptor = ShapeDescriptor::new(
    "SSEKMS",
    &[FieldDescriptor::scalar("KeyId", ScalarKind::String).required()],
);

/// Descriptor of [`InventoryEncryption`].
pub static INVENTORY_ENCRYPTION: ShapeDescriptor = ShapeDescriptor::new(
    "InventoryEncryption",
    &[
        FieldDescriptor::shape("SSES3", &SSE_S3).wire("SSE-S3"),
        FieldDescriptor::shape("SSEKMS", &SSE_KMS).wire("SSE-KMS"),
    ],
);

/// S3 SSES3 marker: server-side encryption with S3-managed keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SSES3;

impl Shape for SSES3 {
    fn descriptor() -> &'static ShapeDescriptor {
        &SSE_S3
    }

    fn to_record(&self) -> Record {
        Record::new()
    }

    fn from_record(_record: Record) -> CodecResult<Self> {
        Ok(Self)
    }
}

/// S3 SSEKMS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SSEKMS {
    pub key_id: String,
}

impl Shape for SSEKMS {
    fn descriptor() -> &'static ShapeDescriptor {
        &SSE_KMS
    }

    fn to_record(&self) -> Record {
        Record::new().with("KeyId", self.key_id.as_str())
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            key_id: record.take_string("KeyId")?.unwrap_or_default(),
        })
    }
}

/// S3 InventoryEncryption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryEncryption {
    pub sses3: Option<SSES3>,
    pub ssekms: Option<SSEKMS>,
}

impl Shape for InventoryEncryption {
    fn descriptor() -> &'static ShapeDescriptor {
        &INVENTORY_ENCRYPTION
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_opt("SSES3", self.sses3.as_ref().map(SSES3::to_record));
        record.set_opt("SSEKMS", self.ssekms.as_ref().map(SSEKMS::to_record));
        record
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            sses3: record
                .take_record("SSES3")?
                .map(SSES3::from_record)
                .transpose()?,
            ssekms: record
                .take_record("SSEKMS")?
                .map(SSEKMS::from_record)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use shapewire_core::to_parameters;

    use super::*;

    #[test]
    fn test_should_use_hyphenated_wire_names() {
        let encryption = InventoryEncryption {
            sses3: None,
            ssekms: Some(SSEKMS {
                key_id: "arn:aws:kms:us-east-1:1:key/abc".to_owned(),
            }),
        };

        let params = to_parameters(&encryption, "Encryption.").expect("encode");
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("Encryption.SSE-KMS.KeyId", "arn:aws:kms:us-east-1:1:key/abc")]
        );
    }

    #[test]
    fn test_should_write_nothing_for_empty_marker_shape() {
        let encryption = InventoryEncryption {
            sses3: Some(SSES3),
            ssekms: None,
        };

        let params = to_parameters(&encryption, "").expect("encode");
        assert!(params.is_empty());
    }
}
