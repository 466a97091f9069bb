//! Shape dispatch by XML root element.

#[cfg(test)]
mod tests {
    use shapewire_core::Shape;
    use shapewire_s3_model::{ServiceError, Tagging, registry};
    use shapewire_xml::{XmlError, decode_xml_any};

    use crate::test_config;

    #[test]
    fn test_should_dispatch_error_documents() {
        let config = test_config();
        let xml = br"<Error><Code>AccessDenied</Code><Message>Access Denied</Message><RequestId>r1</RequestId></Error>";

        let (descriptor, record) = decode_xml_any(&registry(), xml, &config).expect("decode");
        assert_eq!(descriptor.name, "ServiceError");

        let error = ServiceError::from_record(record).expect("typed");
        assert_eq!(error.code, "AccessDenied");
        assert_eq!(error.resource, None);
    }

    #[test]
    fn test_should_dispatch_by_shape_name() {
        let config = test_config();
        let xml = br"<Tagging><TagSet><Tag><Key>k</Key><Value>v</Value></Tag></TagSet></Tagging>";

        let (descriptor, record) = decode_xml_any(&registry(), xml, &config).expect("decode");
        assert_eq!(descriptor.name, "Tagging");
        let tagging = Tagging::from_record(record).expect("typed");
        assert_eq!(tagging.tag_set.len(), 1);
    }

    #[test]
    fn test_should_reject_unregistered_root() {
        let config = test_config();
        let err = decode_xml_any(&registry(), b"<CORSConfiguration/>", &config)
            .expect_err("unknown root");
        assert!(matches!(err, XmlError::UnexpectedElement(name) if name == "CORSConfiguration"));
    }
}
