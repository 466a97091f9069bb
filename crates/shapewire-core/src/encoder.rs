//! Path encoder: flattens a shape instance into ordered parameters.
//!
//! Per field, in declaration order:
//!
//! 1. absent: skipped
//! 2. scalar: `prefix.Wire = value`
//! 3. nested shape: recurse under `prefix.Wire`
//! 4. list: element `i` (1-based) under `prefix.Wire.member.i` or `prefix.Wire.i`;
//!    `None` elements write nothing but still consume their index
//! 5. map: entry `i` writes `prefix.Wire.entry.i.key` and recurses the value under
//!    `prefix.Wire.entry.i.value`
//!
//! An empty list or map, or a list whose elements all write nothing, is written
//! as `prefix.Wire = ""` so that its presence survives decoding. A list element
//! or map value that is an empty shape is written as `path = ""` for the same
//! reason.

use crate::descriptor::{
    ElementKind, FieldDescriptor, FieldKind, ListSpec, MapSpec, ShapeDescriptor,
};
use crate::error::{CodecError, CodecResult};
use crate::format::format_scalar;
use crate::params::ParameterSet;
use crate::path::KeyPath;
use crate::shape::Shape;
use crate::value::{Record, Value};

/// Encode a typed shape under `prefix`.
pub fn to_parameters<T: Shape>(shape: &T, prefix: &str) -> CodecResult<ParameterSet> {
    encode(T::descriptor(), &shape.to_record(), prefix)
}

/// Encode a record under `prefix` into a fresh parameter set.
pub fn encode(
    descriptor: &ShapeDescriptor,
    record: &Record,
    prefix: &str,
) -> CodecResult<ParameterSet> {
    let mut params = ParameterSet::new();
    encode_into(descriptor, record, prefix, &mut params)?;
    Ok(params)
}

/// Encode a record under `prefix`, appending to `sink`.
///
/// The record is validated and encoded in full before `sink` is touched; on
/// error `sink` is unchanged. A produced path that already exists in `sink`
/// is rejected.
pub fn encode_into(
    descriptor: &ShapeDescriptor,
    record: &Record,
    prefix: &str,
    sink: &mut ParameterSet,
) -> CodecResult<()> {
    validate(descriptor, record)?;

    let mut scratch = ParameterSet::new();
    write_shape(descriptor, record, &KeyPath::from_prefix(prefix), &mut scratch);

    if let Some(path) = scratch.paths().find(|p| sink.contains(p)) {
        return Err(CodecError::InvalidArgument(format!(
            "parameter {path} is already present"
        )));
    }

    tracing::debug!(
        shape = descriptor.name,
        prefix,
        count = scratch.len(),
        "encoded shape parameters"
    );
    sink.extend(scratch);
    Ok(())
}

/// Check a record against its descriptor.
///
/// Rejects fields the shape does not declare, values whose kind differs from
/// the declared kind, and missing required fields, recursively.
pub fn validate(descriptor: &ShapeDescriptor, record: &Record) -> CodecResult<()> {
    for (name, _) in record.iter() {
        if descriptor.field(name).is_none() {
            return Err(CodecError::InvalidArgument(format!(
                "{} has no field named {name}",
                descriptor.name
            )));
        }
    }

    for field in descriptor.fields {
        match record.get(field.name) {
            Some(value) => validate_field(descriptor, field, value)?,
            None if field.required => {
                return Err(CodecError::InvalidArgument(format!(
                    "{}.{} is required",
                    descriptor.name, field.name
                )));
            }
            None => {}
        }
    }
    Ok(())
}

fn validate_field(
    owner: &ShapeDescriptor,
    field: &FieldDescriptor,
    value: &Value,
) -> CodecResult<()> {
    match (&field.kind, value) {
        (FieldKind::Scalar(kind), Value::Scalar(s)) if s.kind() == *kind => Ok(()),
        (FieldKind::Shape(shape), Value::Shape(record)) => validate(shape, record),
        (FieldKind::List(spec), Value::List(items)) => items
            .iter()
            .flatten()
            .try_for_each(|item| validate_element(owner, field, &spec.element, item)),
        (FieldKind::Map(spec), Value::Map(entries)) => entries
            .iter()
            .try_for_each(|(_, v)| validate_element(owner, field, &spec.value, v)),
        (kind, value) => Err(kind_mismatch(owner, field, kind.as_str(), value)),
    }
}

fn validate_element(
    owner: &ShapeDescriptor,
    field: &FieldDescriptor,
    element: &ElementKind,
    value: &Value,
) -> CodecResult<()> {
    match (element, value) {
        (ElementKind::Scalar(kind), Value::Scalar(s)) if s.kind() == *kind => Ok(()),
        (ElementKind::Shape(shape), Value::Shape(record)) => validate(shape, record),
        (ElementKind::Scalar(kind), value) => {
            Err(kind_mismatch(owner, field, kind.as_str(), value))
        }
        (ElementKind::Shape(_), value) => Err(kind_mismatch(owner, field, "shape", value)),
    }
}

fn kind_mismatch(
    owner: &ShapeDescriptor,
    field: &FieldDescriptor,
    expected: &str,
    value: &Value,
) -> CodecError {
    CodecError::InvalidArgument(format!(
        "{}.{} expects {expected}, got {}",
        owner.name,
        field.name,
        value.kind_name()
    ))
}

// The writers below run on validated records; kind combinations that
// validation rejects cannot reach them.

fn write_shape(descriptor: &ShapeDescriptor, record: &Record, path: &KeyPath, sink: &mut ParameterSet) {
    for field in descriptor.fields {
        let Some(value) = record.get(field.name) else {
            continue;
        };
        let field_path = path.field(field.wire_name);
        match (&field.kind, value) {
            (FieldKind::Scalar(_), Value::Scalar(s)) => {
                sink.insert(field_path.into_string(), format_scalar(s));
            }
            (FieldKind::Shape(shape), Value::Shape(nested)) => {
                write_shape(shape, nested, &field_path, sink);
            }
            (FieldKind::List(spec), Value::List(items)) => {
                write_list(spec, items, &field_path, sink);
            }
            (FieldKind::Map(spec), Value::Map(entries)) => {
                write_map(spec, entries, &field_path, sink);
            }
            _ => {}
        }
    }
}

fn write_list(spec: &ListSpec, items: &[Option<Value>], path: &KeyPath, sink: &mut ParameterSet) {
    let before = sink.len();
    for (i, item) in items.iter().enumerate() {
        let Some(item) = item else {
            continue;
        };
        let item_path = path.index(spec.convention.token(), i + 1);
        write_element(&spec.element, item, &item_path, sink);
    }
    if sink.len() == before {
        sink.insert(path.as_str(), "");
    }
}

fn write_map(spec: &MapSpec, entries: &[(String, Value)], path: &KeyPath, sink: &mut ParameterSet) {
    if entries.is_empty() {
        sink.insert(path.as_str(), "");
        return;
    }
    for (i, (key, value)) in entries.iter().enumerate() {
        let entry_path = path.index(spec.convention.token(), i + 1);
        sink.insert(entry_path.field(spec.key_name).into_string(), key.as_str());
        write_element(&spec.value, value, &entry_path.field(spec.value_name), sink);
    }
}

fn write_element(element: &ElementKind, value: &Value, path: &KeyPath, sink: &mut ParameterSet) {
    match (element, value) {
        (ElementKind::Scalar(_), Value::Scalar(s)) => {
            sink.insert(path.as_str(), format_scalar(s));
        }
        (ElementKind::Shape(shape), Value::Shape(record)) => {
            let before = sink.len();
            write_shape(shape, record, path, sink);
            if sink.len() == before {
                sink.insert(path.as_str(), "");
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ScalarKind;

    static ITEM: ShapeDescriptor = ShapeDescriptor::new(
        "Item",
        &[
            FieldDescriptor::scalar("Id", ScalarKind::String),
            FieldDescriptor::scalar("Weight", ScalarKind::Integer),
        ],
    );

    static DESTINATION: ShapeDescriptor = ShapeDescriptor::new(
        "Destination",
        &[FieldDescriptor::scalar("Bucket", ScalarKind::String).required()],
    );

    static FOO: ShapeDescriptor = ShapeDescriptor::new(
        "Foo",
        &[
            FieldDescriptor::scalar("Name", ScalarKind::String),
            FieldDescriptor::list("Items", ListSpec::of(ElementKind::Shape(&ITEM))),
            FieldDescriptor::list(
                "Labels",
                ListSpec::of(ElementKind::Scalar(ScalarKind::String)).bare(),
            ),
            FieldDescriptor::shape("Destination", &DESTINATION),
            FieldDescriptor::map("Meta", MapSpec::of(ElementKind::Scalar(ScalarKind::String))),
            FieldDescriptor::scalar("MFADelete", ScalarKind::String).wire("MfaDelete"),
        ],
    );

    fn item(id: &str) -> Value {
        Record::new().with("Id", id).into()
    }

    fn pairs(params: &ParameterSet) -> Vec<(&str, &str)> {
        params.iter().collect()
    }

    #[test]
    fn test_should_encode_nothing_for_empty_record() {
        let params = encode(&FOO, &Record::new(), "Foo.").expect("encode");
        assert!(params.is_empty());
    }

    #[test]
    fn test_should_skip_null_elements_but_keep_indices() {
        let record = Record::new().with("Name", "abc").with(
            "Items",
            Value::List(vec![Some(item("x")), None, Some(item("y"))]),
        );

        let params = encode(&FOO, &record, "Foo.").expect("encode");
        assert_eq!(
            pairs(&params),
            vec![
                ("Foo.Name", "abc"),
                ("Foo.Items.member.1.Id", "x"),
                ("Foo.Items.member.3.Id", "y"),
            ]
        );
    }

    #[test]
    fn test_should_encode_nested_shape_under_prefix() {
        let record = Record::new().with("Destination", Record::new().with("Bucket", "b1"));
        let params = encode(&FOO, &record, "Dest.").expect("encode");
        assert_eq!(pairs(&params), vec![("Dest.Destination.Bucket", "b1")]);
    }

    #[test]
    fn test_should_encode_bare_scalar_list() {
        let record = Record::new().with("Labels", Value::list(["a", "b"]));
        let params = encode(&FOO, &record, "").expect("encode");
        assert_eq!(pairs(&params), vec![("Labels.1", "a"), ("Labels.2", "b")]);
    }

    #[test]
    fn test_should_encode_map_entries() {
        let record = Record::new().with("Meta", Value::map([("color", "red"), ("size", "L")]));
        let params = encode(&FOO, &record, "").expect("encode");
        assert_eq!(
            pairs(&params),
            vec![
                ("Meta.entry.1.key", "color"),
                ("Meta.entry.1.value", "red"),
                ("Meta.entry.2.key", "size"),
                ("Meta.entry.2.value", "L"),
            ]
        );
    }

    #[test]
    fn test_should_mark_empty_list_present() {
        let record = Record::new().with("Labels", Value::List(Vec::new()));
        let params = encode(&FOO, &record, "").expect("encode");
        assert_eq!(pairs(&params), vec![("Labels", "")]);
    }

    #[test]
    fn test_should_mark_empty_shape_elements() {
        let record = Record::new()
            .with("Items", Value::List(vec![Some(Record::new().into())]))
            .with("Labels", Value::List(vec![None, None]));
        let params = encode(&FOO, &record, "").expect("encode");
        assert_eq!(pairs(&params), vec![("Items.member.1", ""), ("Labels", "")]);
    }

    #[test]
    fn test_should_follow_declaration_order_and_wire_names() {
        let record = Record::new()
            .with("MFADelete", "Enabled")
            .with("Name", "n");
        let params = encode(&FOO, &record, "").expect("encode");
        assert_eq!(pairs(&params), vec![("Name", "n"), ("MfaDelete", "Enabled")]);
    }

    #[test]
    fn test_should_reject_missing_required_field() {
        let record = Record::new().with("Destination", Record::new());
        let err = encode(&FOO, &record, "").expect_err("required field missing");
        assert!(matches!(err, CodecError::InvalidArgument(ref m) if m.contains("Bucket")));
    }

    #[test]
    fn test_should_reject_kind_mismatch() {
        let record = Record::new().with(
            "Items",
            Value::List(vec![Some(Record::new().with("Weight", "heavy").into())]),
        );
        assert!(matches!(
            encode(&FOO, &record, ""),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_should_reject_undeclared_field() {
        let record = Record::new().with("Bogus", "x");
        assert!(matches!(
            encode(&FOO, &record, ""),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_should_leave_sink_untouched_on_error() {
        let mut sink = ParameterSet::new();
        sink.insert("Action", "PutFoo");
        let record = Record::new()
            .with("Name", "ok")
            .with("Destination", Record::new());

        assert!(encode_into(&FOO, &record, "", &mut sink).is_err());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_should_reject_duplicate_parameter_in_sink() {
        let mut sink = ParameterSet::new();
        sink.insert("Name", "existing");
        let record = Record::new().with("Name", "new");

        assert!(encode_into(&FOO, &record, "", &mut sink).is_err());
        assert_eq!(sink.get("Name"), Some("existing"));
    }
}
