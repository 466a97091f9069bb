//! XML document round trips.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use shapewire_core::{Shape, Timestamp, to_parameters};
    use shapewire_s3_model::{
        CommonPrefix, Delete, InventoryEncryption, ListBucketResult, Object, ObjectIdentifier,
        ReplicationConfiguration, ReplicationRuleStatus, SSES3, ServiceError, StorageClass, Tag,
        Tagging,
    };
    use shapewire_xml::{from_xml, from_xml_with, to_xml};

    use crate::{test_config, xml_text};

    #[test]
    fn test_should_roundtrip_list_bucket_result() {
        let config = test_config();
        let result = ListBucketResult {
            name: Some("photos".to_owned()),
            prefix: Some("2024/".to_owned()),
            max_keys: Some(1000),
            is_truncated: Some(false),
            contents: vec![
                Object {
                    key: Some("2024/a.jpg".to_owned()),
                    last_modified: Utc
                        .with_ymd_and_hms(2006, 2, 3, 16, 45, 9)
                        .single()
                        .map(Timestamp::new),
                    e_tag: Some("\"abc\"".to_owned()),
                    size: Some(1024),
                    storage_class: Some(StorageClass::Standard),
                },
                Object {
                    key: Some("2024/b.jpg".to_owned()),
                    ..Object::default()
                },
            ],
            common_prefixes: vec![CommonPrefix {
                prefix: Some("2024/raw/".to_owned()),
            }],
        };

        let xml = to_xml("ListBucketResult", &result, &config).expect("serialize");
        let text = xml_text(&xml);
        assert!(text.contains("<LastModified>2006-02-03T16:45:09.000Z</LastModified>"));
        assert!(text.contains("<CommonPrefixes><Prefix>2024/raw/</Prefix></CommonPrefixes>"));

        let decoded: ListBucketResult = from_xml_with(&xml, &config).expect("deserialize");
        assert_eq!(decoded, result);
    }

    #[test]
    fn test_should_deserialize_delete_objects() {
        let _ = test_config();
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<Delete xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Object><Key>a.txt</Key></Object>
  <Object><Key>b.txt</Key><VersionId>v2</VersionId></Object>
  <Quiet>true</Quiet>
</Delete>"#;

        let delete: Delete = from_xml(xml).expect("deserialize");
        assert_eq!(
            delete,
            Delete {
                objects: vec![
                    ObjectIdentifier {
                        key: "a.txt".to_owned(),
                        version_id: None,
                    },
                    ObjectIdentifier {
                        key: "b.txt".to_owned(),
                        version_id: Some("v2".to_owned()),
                    },
                ],
                quiet: Some(true),
            }
        );
    }

    #[test]
    fn test_should_deserialize_replication_configuration() {
        let _ = test_config();
        let xml = br"<ReplicationConfiguration>
  <Role>arn:aws:iam::123456789012:role/replication</Role>
  <Rule>
    <ID>rule-1</ID>
    <Priority>1</Priority>
    <Status>Enabled</Status>
    <Filter><Prefix>ignored</Prefix></Filter>
    <Destination><Bucket>arn:aws:s3:::backup</Bucket><StorageClass>GLACIER</StorageClass></Destination>
  </Rule>
</ReplicationConfiguration>";

        let config: ReplicationConfiguration = from_xml(xml).expect("deserialize");
        assert_eq!(config.rules.len(), 1);
        let rule = &config.rules[0];
        assert_eq!(rule.id.as_deref(), Some("rule-1"));
        assert_eq!(rule.status, ReplicationRuleStatus::Enabled);
        assert_eq!(rule.prefix, None);
        assert_eq!(rule.destination.storage_class, Some(StorageClass::Glacier));
    }

    #[test]
    fn test_should_preserve_empty_marker_shape_in_xml_only() {
        let config = test_config();
        let encryption = InventoryEncryption {
            sses3: Some(SSES3),
            ssekms: None,
        };

        let xml = to_xml("InventoryEncryption", &encryption, &config).expect("serialize");
        assert!(xml_text(&xml).contains("<SSE-S3/>"));
        let decoded: InventoryEncryption = from_xml(&xml).expect("deserialize");
        assert_eq!(decoded, encryption);

        let params = to_parameters(&encryption, "").expect("encode");
        assert!(params.is_empty());
    }

    #[test]
    fn test_should_write_error_document() {
        let config = test_config().with_xml_namespace(None);
        let error = ServiceError {
            code: "NoSuchBucket".to_owned(),
            message: Some("The specified bucket does not exist".to_owned()),
            resource: Some("/mybucket".to_owned()),
            request_id: Some("tx000001".to_owned()),
        };

        let xml = to_xml(ServiceError::ROOT_ELEMENT, &error, &config).expect("serialize");
        assert_eq!(
            xml_text(&xml),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message><Resource>/mybucket</Resource><RequestId>tx000001</RequestId></Error>"
        );

        let decoded: ServiceError = from_xml(&xml).expect("deserialize");
        assert_eq!(decoded, error);
    }

    #[test]
    fn test_should_agree_between_query_and_xml_forms() {
        let config = test_config();
        let tagging = Tagging {
            tag_set: vec![Tag::new("env", "prod"), Tag::new("a<b", "c&d")],
        };

        let xml = to_xml("Tagging", &tagging, &config).expect("serialize");
        let from_body: Tagging = from_xml(&xml).expect("deserialize");

        let params = to_parameters(&tagging, "").expect("encode");
        let from_query = Tagging::from_record(
            shapewire_core::decode_parameters(
                Tagging::descriptor(),
                &params,
                "",
                shapewire_core::DecodeOptions::query(&config),
            )
            .expect("decode"),
        )
        .expect("typed");

        assert_eq!(from_body, tagging);
        assert_eq!(from_query, tagging);
    }
}
