//! Writing records as XML documents.
//!
//! Fields are written in declaration order under their wire names. List
//! elements that are `None` are omitted since XML carries no index.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use shapewire_core::{
    CodecConfig, ElementKind, FieldKind, Record, Shape, ShapeDescriptor, Value, format_scalar,
    validate,
};

use crate::error::XmlError;

/// Serialize a typed shape as an XML document under `root_element`.
///
/// # Errors
///
/// Returns `XmlError` if the value does not match its descriptor or writing fails.
pub fn to_xml<T: Shape>(
    root_element: &str,
    value: &T,
    config: &CodecConfig,
) -> Result<Vec<u8>, XmlError> {
    write_xml(T::descriptor(), &value.to_record(), root_element, config)
}

/// Serialize a record as an XML document under `root_element`.
///
/// Produces the XML declaration and the root `xmlns` attribute when
/// `config` asks for them.
///
/// # Errors
///
/// Returns `XmlError` if the record does not match the descriptor or writing fails.
pub fn write_xml(
    descriptor: &ShapeDescriptor,
    record: &Record,
    root_element: &str,
    config: &CodecConfig,
) -> Result<Vec<u8>, XmlError> {
    validate(descriptor, record)?;

    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    if config.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    let mut root = writer.create_element(root_element);
    if let Some(namespace) = config.xml_namespace.as_deref() {
        root = root.with_attribute(("xmlns", namespace));
    }
    root.write_inner_content(|w| write_fields(w, descriptor, record))?;

    tracing::debug!(
        shape = descriptor.name,
        root = root_element,
        bytes = buf.len(),
        "wrote XML document"
    );
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Helper functions for writing common XML patterns
// ---------------------------------------------------------------------------

/// Write a simple `<tag>text</tag>` element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_fields<W: Write>(
    writer: &mut Writer<W>,
    descriptor: &ShapeDescriptor,
    record: &Record,
) -> io::Result<()> {
    for field in descriptor.fields {
        let Some(value) = record.get(field.name) else {
            continue;
        };
        let tag = field.wire_name;

        match (&field.kind, value) {
            (FieldKind::Scalar(_), Value::Scalar(scalar)) => {
                write_text_element(writer, tag, &format_scalar(scalar))?;
            }
            (FieldKind::Shape(shape), Value::Shape(nested)) => {
                write_shape_element(writer, tag, shape, nested)?;
            }
            (FieldKind::List(spec), Value::List(items)) if spec.flattened => {
                for item in items.iter().flatten() {
                    write_element(writer, tag, spec.element, item)?;
                }
            }
            (FieldKind::List(spec), Value::List(items)) => {
                writer.create_element(tag).write_inner_content(|w| {
                    for item in items.iter().flatten() {
                        write_element(w, spec.item_name, spec.element, item)?;
                    }
                    Ok(())
                })?;
            }
            (FieldKind::Map(spec), Value::Map(entries)) => {
                writer.create_element(tag).write_inner_content(|w| {
                    for (key, entry_value) in entries {
                        w.create_element("entry").write_inner_content(|w| {
                            write_text_element(w, spec.key_name, key)?;
                            write_element(w, spec.value_name, spec.value, entry_value)
                        })?;
                    }
                    Ok(())
                })?;
            }
            (kind, value) => return Err(mismatch(descriptor.name, tag, kind.as_str(), value)),
        }
    }
    Ok(())
}

fn write_shape_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    descriptor: &ShapeDescriptor,
    record: &Record,
) -> io::Result<()> {
    if record.is_empty() {
        writer.create_element(tag).write_empty()?;
    } else {
        writer
            .create_element(tag)
            .write_inner_content(|w| write_fields(w, descriptor, record))?;
    }
    Ok(())
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    element: ElementKind,
    value: &Value,
) -> io::Result<()> {
    match (element, value) {
        (ElementKind::Scalar(_), Value::Scalar(scalar)) => {
            write_text_element(writer, tag, &format_scalar(scalar))
        }
        (ElementKind::Shape(shape), Value::Shape(record)) => {
            write_shape_element(writer, tag, shape, record)
        }
        (ElementKind::Scalar(_), value) => Err(mismatch("element", tag, "scalar", value)),
        (ElementKind::Shape(shape), value) => Err(mismatch(shape.name, tag, "shape", value)),
    }
}

fn mismatch(shape: &str, tag: &str, expected: &str, found: &Value) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
            "{shape}.{tag}: expected {expected}, found {}",
            found.kind_name()
        ),
    )
}
