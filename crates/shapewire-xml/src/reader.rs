//! Reading XML documents as element events.
//!
//! The root element is consumed here; the decoder sees only its children.
//! Text is kept verbatim and entity references arrive as separate quick-xml
//! events, so they are resolved and passed on as their own text pieces.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use shapewire_core::{
    CodecConfig, DecodeOptions, ElementEvent, Record, Shape, ShapeDescriptor, ShapeRegistry,
    decode_events,
};

use crate::error::XmlError;

/// Element events for the children of an XML document's root element.
pub struct XmlEvents<'a> {
    reader: Reader<&'a [u8]>,
    root: String,
    depth: usize,
    pending_exit: bool,
    done: bool,
}

impl std::fmt::Debug for XmlEvents<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlEvents")
            .field("root", &self.root)
            .field("depth", &self.depth)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<'a> XmlEvents<'a> {
    /// Skip the prolog and consume the root element.
    ///
    /// # Errors
    ///
    /// Returns `XmlError::MissingElement` if the document has no root element.
    pub fn open(xml: &'a [u8]) -> Result<Self, XmlError> {
        let mut reader = Reader::from_reader(xml);

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let root = local_name(&e)?;
                    return Ok(Self {
                        reader,
                        root,
                        depth: 1,
                        pending_exit: false,
                        done: false,
                    });
                }
                Event::Empty(e) => {
                    let root = local_name(&e)?;
                    return Ok(Self {
                        reader,
                        root,
                        depth: 0,
                        pending_exit: false,
                        done: true,
                    });
                }
                Event::Eof => {
                    return Err(XmlError::MissingElement("root element".to_string()));
                }
                // Declaration, comments, processing instructions, whitespace.
                _ => {}
            }
        }
    }

    /// Local name of the root element.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    fn next_event(&mut self) -> Result<Option<ElementEvent>, XmlError> {
        if self.pending_exit {
            self.pending_exit = false;
            return Ok(Some(ElementEvent::Exit));
        }

        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    self.depth += 1;
                    return Ok(Some(ElementEvent::enter(local_name(&e)?)));
                }
                Event::Empty(e) => {
                    self.pending_exit = true;
                    return Ok(Some(ElementEvent::enter(local_name(&e)?)));
                }
                Event::End(_) => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        return Ok(None);
                    }
                    return Ok(Some(ElementEvent::Exit));
                }
                Event::Text(e) => {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    let unescaped =
                        unescape(&decoded).map_err(|err| XmlError::ParseError(err.to_string()))?;
                    return Ok(Some(ElementEvent::text(unescaped)));
                }
                Event::CData(e) => {
                    let text = String::from_utf8(e.into_inner().into_owned())
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    return Ok(Some(ElementEvent::Text(text)));
                }
                Event::GeneralRef(e) => {
                    let name = e
                        .decode()
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    let raw = format!("&{name};");
                    let resolved = unescape(&raw)
                        .map_err(|err| XmlError::ParseError(err.to_string()))?
                        .into_owned();
                    return Ok(Some(ElementEvent::Text(resolved)));
                }
                Event::Eof => {
                    return Err(XmlError::UnexpectedEof(self.root.clone()));
                }
                _ => {}
            }
        }
    }
}

impl Iterator for XmlEvents<'_> {
    type Item = Result<ElementEvent, XmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn local_name(e: &BytesStart<'_>) -> Result<String, XmlError> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_owned)
        .map_err(|err| XmlError::ParseError(err.to_string()))
}

/// Decode an XML document into a record of `descriptor`.
///
/// The root element name is not checked against the descriptor.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or a value fails to parse.
pub fn decode_xml(
    descriptor: &'static ShapeDescriptor,
    xml: &[u8],
    config: &CodecConfig,
) -> Result<Record, XmlError> {
    let events = XmlEvents::open(xml)?;
    tracing::trace!(root = events.root(), shape = descriptor.name, "decoding XML document");
    decode_events(descriptor, events, DecodeOptions::xml(config))
}

/// Deserialize an XML document into a typed shape with default settings.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml<T: Shape>(xml: &[u8]) -> Result<T, XmlError> {
    from_xml_with(xml, &CodecConfig::default())
}

/// Deserialize an XML document into a typed shape.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml_with<T: Shape>(xml: &[u8], config: &CodecConfig) -> Result<T, XmlError> {
    let record = decode_xml(T::descriptor(), xml, config)?;
    Ok(T::from_record(record)?)
}

/// Decode an XML document whose shape is chosen by its root element name.
///
/// # Errors
///
/// Returns `XmlError::UnexpectedElement` if no shape is registered under the
/// root element name.
pub fn decode_xml_any(
    registry: &ShapeRegistry,
    xml: &[u8],
    config: &CodecConfig,
) -> Result<(&'static ShapeDescriptor, Record), XmlError> {
    let events = XmlEvents::open(xml)?;
    let descriptor = registry
        .get(events.root())
        .ok_or_else(|| XmlError::UnexpectedElement(events.root().to_owned()))?;
    let record = decode_events(descriptor, events, DecodeOptions::xml(config))?;
    Ok((descriptor, record))
}

#[cfg(test)]
mod tests {
    use shapewire_core::{
        CodecError, ElementKind, FieldDescriptor, ListSpec, ScalarKind, Timestamp, Value,
    };

    use super::*;

    static TAG: ShapeDescriptor = ShapeDescriptor::new(
        "Tag",
        &[
            FieldDescriptor::scalar("Key", ScalarKind::String),
            FieldDescriptor::scalar("Value", ScalarKind::String),
        ],
    );

    static TAGGING: ShapeDescriptor = ShapeDescriptor::new(
        "Tagging",
        &[FieldDescriptor::list(
            "TagSet",
            ListSpec::of(ElementKind::Shape(&TAG)).item_name("Tag"),
        )],
    );

    static RULE: ShapeDescriptor = ShapeDescriptor::new(
        "Rule",
        &[
            FieldDescriptor::scalar("ID", ScalarKind::String),
            FieldDescriptor::scalar("Priority", ScalarKind::Integer),
            FieldDescriptor::scalar("Created", ScalarKind::Timestamp),
        ],
    );

    static RULES: ShapeDescriptor = ShapeDescriptor::new(
        "RuleConfiguration",
        &[
            FieldDescriptor::scalar("Role", ScalarKind::String),
            FieldDescriptor::list("Rules", ListSpec::of(ElementKind::Shape(&RULE)).flattened())
                .wire("Rule"),
        ],
    );

    fn tag(key: &str, value: &str) -> Option<Value> {
        Some(Record::new().with("Key", key).with("Value", value).into())
    }

    #[test]
    fn test_should_decode_tagging() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<Tagging xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <TagSet>
    <Tag><Key>env</Key><Value>prod</Value></Tag>
    <Tag><Key>team</Key><Value>backend</Value></Tag>
  </TagSet>
</Tagging>"#;

        let record = decode_xml(&TAGGING, xml, &CodecConfig::default()).expect("decode tagging");
        assert_eq!(
            record.get("TagSet"),
            Some(&Value::List(vec![tag("env", "prod"), tag("team", "backend")]))
        );
    }

    #[test]
    fn test_should_strip_namespace_prefixes() {
        let xml = br#"<s3:Tagging xmlns:s3="http://s3.amazonaws.com/doc/2006-03-01/"><s3:TagSet><s3:Tag><s3:Key>k</s3:Key><s3:Value>v</s3:Value></s3:Tag></s3:TagSet></s3:Tagging>"#;

        let record = decode_xml(&TAGGING, xml, &CodecConfig::default()).expect("decode");
        assert_eq!(record.get("TagSet"), Some(&Value::List(vec![tag("k", "v")])));
    }

    #[test]
    fn test_should_resolve_entities_and_cdata() {
        let xml = br"<Tagging><TagSet><Tag><Key>a &amp; b &lt;c&gt;</Key><Value><![CDATA[x < y]]></Value></Tag></TagSet></Tagging>";

        let record = decode_xml(&TAGGING, xml, &CodecConfig::default()).expect("decode");
        assert_eq!(
            record.get("TagSet"),
            Some(&Value::List(vec![tag("a & b <c>", "x < y")]))
        );
    }

    #[test]
    fn test_should_resolve_character_references() {
        let xml = br"<Tagging><TagSet><Tag><Key>&#x41;&#66;&quot;</Key><Value>&apos;v&apos;</Value></Tag></TagSet></Tagging>";

        let record = decode_xml(&TAGGING, xml, &CodecConfig::default()).expect("decode");
        assert_eq!(
            record.get("TagSet"),
            Some(&Value::List(vec![tag("AB\"", "'v'")]))
        );
    }

    #[test]
    fn test_should_skip_unknown_elements() {
        let xml = br"<Tagging><Extra><Nested>1</Nested></Extra><TagSet><Tag><Key>k</Key><Unknown/><Value>v</Value></Tag></TagSet></Tagging>";

        let record = decode_xml(&TAGGING, xml, &CodecConfig::default()).expect("decode");
        assert_eq!(record.get("TagSet"), Some(&Value::List(vec![tag("k", "v")])));
    }

    #[test]
    fn test_should_collect_flattened_list() {
        let xml = br"<RuleConfiguration>
  <Role>arn:role</Role>
  <Rule><ID>r1</ID><Priority>1</Priority><Created>2023-11-14T22:13:20.123Z</Created></Rule>
  <Rule><ID>r2</ID><Priority>2</Priority></Rule>
</RuleConfiguration>";

        let record = decode_xml(&RULES, xml, &CodecConfig::default()).expect("decode");
        let created = Timestamp::from_millis(1_700_000_000_123).expect("valid millis");
        assert_eq!(
            record.get("Rules"),
            Some(&Value::List(vec![
                Some(
                    Record::new()
                        .with("ID", "r1")
                        .with("Priority", 1)
                        .with("Created", created)
                        .into()
                ),
                Some(Record::new().with("ID", "r2").with("Priority", 2).into()),
            ]))
        );
        assert_eq!(record.get("Role"), Some(&Value::from("arn:role")));
    }

    #[test]
    fn test_should_name_field_on_parse_failure() {
        let xml = br"<RuleConfiguration><Rule><Priority>high</Priority></Rule></RuleConfiguration>";

        let err = decode_xml(&RULES, xml, &CodecConfig::default()).expect_err("parse error");
        match err {
            XmlError::Codec(CodecError::Parse { field, text, .. }) => {
                assert_eq!(field, "Priority");
                assert_eq!(text, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_should_decode_empty_root() {
        let record = decode_xml(&TAGGING, b"<Tagging/>", &CodecConfig::default()).expect("decode");
        assert!(record.is_empty());
    }

    #[test]
    fn test_should_fail_without_root() {
        let err = decode_xml(&TAGGING, b"<?xml version=\"1.0\"?>", &CodecConfig::default())
            .expect_err("missing root");
        assert!(matches!(err, XmlError::MissingElement(_)));
    }

    #[test]
    fn test_should_fail_on_truncated_document() {
        let err = decode_xml(&TAGGING, b"<Tagging><TagSet><Tag>", &CodecConfig::default())
            .expect_err("truncated");
        assert!(matches!(
            err,
            XmlError::UnexpectedEof(_) | XmlError::QuickXml(_)
        ));
    }

    #[test]
    fn test_should_enforce_max_depth() {
        let xml = b"<Tagging><A><B><C><D/></C></B></A></Tagging>";
        let config = CodecConfig::default().with_max_depth(2);

        let err = decode_xml(&TAGGING, xml, &config).expect_err("too deep");
        assert!(matches!(err, XmlError::Codec(CodecError::TooDeep(2))));
    }

    #[test]
    fn test_should_pick_shape_by_root_name() {
        let registry = ShapeRegistry::new().with(&TAGGING).with(&RULES);
        let xml = b"<RuleConfiguration><Role>r</Role></RuleConfiguration>";

        let (descriptor, record) =
            decode_xml_any(&registry, xml, &CodecConfig::default()).expect("decode");
        assert_eq!(descriptor.name, "RuleConfiguration");
        assert_eq!(record.get("Role"), Some(&Value::from("r")));

        let err = decode_xml_any(&registry, b"<Nope/>", &CodecConfig::default())
            .expect_err("unknown root");
        assert!(matches!(err, XmlError::UnexpectedElement(name) if name == "Nope"));
    }
}
