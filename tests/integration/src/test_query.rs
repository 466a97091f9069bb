//! Query parameter round trips.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use shapewire_core::{
        CodecError, ParameterSet, Shape, Timestamp, encode_into, from_parameters, to_parameters,
    };
    use shapewire_s3_model::{
        BucketVersioningStatus, CreateMultipartUploadRequest, Destination, MFADelete,
        PutBucketVersioningRequest, ReplicationConfiguration, ReplicationRule,
        ReplicationRuleStatus, StorageClass, Tag, Tagging, VersioningConfiguration,
    };

    use crate::test_config;

    fn round_trip_form<T: Shape + PartialEq + std::fmt::Debug>(value: &T, prefix: &str) -> T {
        let body = to_parameters(value, prefix).expect("encode").to_form_body();
        let params = ParameterSet::from_form_body(&body);
        from_parameters(&params, prefix).expect("decode")
    }

    #[test]
    fn test_should_round_trip_versioning_request_through_form_body() {
        let _ = test_config();
        let request = PutBucketVersioningRequest {
            bucket: "my bucket".to_owned(),
            mfa: Some("arn:aws:iam::1:mfa/root 123456".to_owned()),
            versioning_configuration: Some(VersioningConfiguration {
                mfa_delete: Some(MFADelete::Enabled),
                status: Some(BucketVersioningStatus::Enabled),
            }),
        };

        assert_eq!(round_trip_form(&request, ""), request);
    }

    #[test]
    fn test_should_round_trip_multipart_request_with_metadata_and_timestamp() {
        let _ = test_config();
        let request = CreateMultipartUploadRequest {
            bucket: "uploads".to_owned(),
            key: "videos/a&b.mp4".to_owned(),
            content_type: Some("video/mp4".to_owned()),
            expires: Timestamp::from_millis(1_700_000_000_123),
            storage_class: Some(StorageClass::IntelligentTiering),
            metadata: BTreeMap::from([("x=y".to_owned(), "1 + 1".to_owned())]),
            tagging: Some(Tagging {
                tag_set: vec![Tag::new("a", "b")],
            }),
        };

        let params = to_parameters(&request, "").expect("encode");
        assert_eq!(params.get("Expires"), Some("2023-11-14T22:13:20.123Z"));
        assert_eq!(round_trip_form(&request, "Upload."), request);
    }

    #[test]
    fn test_should_round_trip_replication_rules() {
        let _ = test_config();
        let config = ReplicationConfiguration {
            role: "role".to_owned(),
            rules: (1..=3)
                .map(|i| ReplicationRule {
                    id: Some(format!("rule-{i}")),
                    priority: Some(i),
                    prefix: Some(format!("logs/{i}/")),
                    status: ReplicationRuleStatus::Enabled,
                    destination: Destination {
                        bucket: format!("backup-{i}"),
                        ..Destination::default()
                    },
                })
                .collect(),
        };

        let params = to_parameters(&config, "Replication.").expect("encode");
        assert_eq!(params.get("Replication.Rule.3.Destination.Bucket"), Some("backup-3"));
        assert_eq!(round_trip_form(&config, "Replication."), config);
    }

    #[test]
    fn test_should_append_shapes_under_distinct_prefixes() {
        let _ = test_config();
        let mut sink = ParameterSet::new();
        sink.insert("Action", "PutBucketTagging");

        let first = Tagging {
            tag_set: vec![Tag::new("k1", "v1")],
        };
        let second = Tagging {
            tag_set: vec![Tag::new("k2", "v2")],
        };
        encode_into(Tagging::descriptor(), &first.to_record(), "First.", &mut sink)
            .expect("first");
        encode_into(Tagging::descriptor(), &second.to_record(), "Second.", &mut sink)
            .expect("second");

        assert_eq!(sink.paths().next(), Some("Action"));
        assert_eq!(sink.len(), 5);

        let decoded: Tagging = from_parameters(&sink, "Second.").expect("decode");
        assert_eq!(decoded, second);
    }

    #[test]
    fn test_should_reject_overlapping_prefix_without_touching_sink() {
        let _ = test_config();
        let tagging = Tagging {
            tag_set: vec![Tag::new("k", "v")],
        };
        let mut sink = to_parameters(&tagging, "T.").expect("encode");
        let before = sink.clone();

        let err = encode_into(Tagging::descriptor(), &tagging.to_record(), "T.", &mut sink)
            .expect_err("duplicate");
        assert!(matches!(err, CodecError::InvalidArgument(_)));
        assert_eq!(sink, before);
    }

    #[test]
    fn test_should_name_field_when_query_value_is_malformed() {
        let _ = test_config();
        let mut params = ParameterSet::new();
        params.insert("Role", "r");
        params.insert("Rule.1.Priority", "first");

        let err = from_parameters::<ReplicationConfiguration>(&params, "").expect_err("parse");
        match err {
            CodecError::Parse {
                shape, field, text, ..
            } => {
                assert_eq!(shape, "ReplicationRule");
                assert_eq!(field, "Priority");
                assert_eq!(text, "first");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
