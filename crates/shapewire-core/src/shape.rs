//! Typed shapes.

use crate::descriptor::ShapeDescriptor;
use crate::error::{CodecError, CodecResult};
use crate::value::{Record, Value};

/// A typed struct backed by a static [`ShapeDescriptor`].
///
/// Implementors only convert between themselves and a [`Record`]; all wire
/// layout decisions live in the descriptor.
pub trait Shape: Sized {
    /// The descriptor of this shape.
    fn descriptor() -> &'static ShapeDescriptor;

    /// Convert into a record keyed by field name.
    fn to_record(&self) -> Record;

    /// Rebuild from a record produced by a decoder.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::TypeMismatch` if a field holds a value of the wrong kind.
    fn from_record(record: Record) -> CodecResult<Self>;
}

/// Convert typed shapes into a list value.
pub fn list_of<T: Shape>(items: &[T]) -> Value {
    Value::list(items.iter().map(Shape::to_record))
}

/// Rebuild typed shapes from a list field, dropping `None` slots.
///
/// # Errors
///
/// Returns `CodecError::TypeMismatch` if the field or an element has the wrong kind.
pub fn take_list_of<T: Shape>(record: &mut Record, name: &'static str) -> CodecResult<Vec<T>> {
    record
        .take_list(name)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|item| match item {
            Value::Shape(nested) => T::from_record(nested),
            other => Err(CodecError::TypeMismatch {
                field: name,
                expected: "shape",
                found: other.kind_name(),
            }),
        })
        .collect()
}
