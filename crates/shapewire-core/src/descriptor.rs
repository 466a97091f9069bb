//! Static shape descriptors.
//!
//! Every shape of the service model is described once, as a `static`
//! [`ShapeDescriptor`] listing its fields in declaration order. The encoder and
//! decoder are driven entirely by these tables, so a new shape is data rather
//! than another hand-written marshaller.
//!
//! ```
//! use shapewire_core::{FieldDescriptor, ScalarKind, ShapeDescriptor};
//!
//! static VERSIONING: ShapeDescriptor = ShapeDescriptor::new(
//!     "VersioningConfiguration",
//!     &[
//!         FieldDescriptor::scalar("MFADelete", ScalarKind::String).wire("MfaDelete"),
//!         FieldDescriptor::scalar("Status", ScalarKind::String),
//!     ],
//! );
//!
//! assert_eq!(VERSIONING.field("MFADelete").map(|f| f.wire_name), Some("MfaDelete"));
//! ```

use std::fmt;

/// Primitive value kinds that map to a single wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 text, written verbatim.
    String,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// `true` / `false`.
    Boolean,
    /// UTC instant with millisecond precision.
    Timestamp,
}

impl ScalarKind {
    /// Human-readable name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How list elements are indexed in query paths.
///
/// Both conventions occur in the same service model. The choice is part of
/// the wire contract and is carried per list field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListConvention {
    /// `Items.member.1`
    #[default]
    Member,
    /// `Items.1`
    Bare,
}

impl ListConvention {
    /// The token inserted between the list name and the index, if any.
    #[must_use]
    pub const fn token(self) -> Option<&'static str> {
        match self {
            Self::Member => Some("member"),
            Self::Bare => None,
        }
    }
}

/// How map entries are indexed in query paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapConvention {
    /// `Attrs.entry.1.key`
    #[default]
    Entry,
    /// `Attrs.1.key`
    Bare,
}

impl MapConvention {
    /// The token inserted between the map name and the index, if any.
    #[must_use]
    pub const fn token(self) -> Option<&'static str> {
        match self {
            Self::Entry => Some("entry"),
            Self::Bare => None,
        }
    }
}

/// The kind of a list element or map value.
#[derive(Debug, Clone, Copy)]
pub enum ElementKind {
    /// A scalar element.
    Scalar(ScalarKind),
    /// A nested shape element.
    Shape(&'static ShapeDescriptor),
}

/// Layout of a list field.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    /// Element kind.
    pub element: ElementKind,
    /// Query path convention.
    pub convention: ListConvention,
    /// XML element name wrapping each item of a non-flattened list.
    pub item_name: &'static str,
    /// In XML, items appear directly in the parent, each named by the
    /// field's wire name, with no wrapping list element.
    pub flattened: bool,
}

impl ListSpec {
    /// A `.member.N` list whose XML items are `<member>` elements.
    #[must_use]
    pub const fn of(element: ElementKind) -> Self {
        Self {
            element,
            convention: ListConvention::Member,
            item_name: "member",
            flattened: false,
        }
    }

    /// Switch to bare `.N` indexing.
    #[must_use]
    pub const fn bare(mut self) -> Self {
        self.convention = ListConvention::Bare;
        self
    }

    /// Name XML items `<name>` instead of `<member>`.
    #[must_use]
    pub const fn item_name(mut self, name: &'static str) -> Self {
        self.item_name = name;
        self
    }

    /// Mark the XML layout as flattened.
    #[must_use]
    pub const fn flattened(mut self) -> Self {
        self.flattened = true;
        self
    }
}

/// Layout of a map field. Keys are always strings.
#[derive(Debug, Clone, Copy)]
pub struct MapSpec {
    /// Value kind.
    pub value: ElementKind,
    /// Query path convention.
    pub convention: MapConvention,
    /// Name of the key element inside an entry.
    pub key_name: &'static str,
    /// Name of the value element inside an entry.
    pub value_name: &'static str,
}

impl MapSpec {
    /// The XML element wrapping each entry.
    pub const XML_ENTRY: &'static str = "entry";

    /// An `.entry.N.key` / `.entry.N.value` map.
    #[must_use]
    pub const fn of(value: ElementKind) -> Self {
        Self {
            value,
            convention: MapConvention::Entry,
            key_name: "key",
            value_name: "value",
        }
    }

    /// Switch to bare `.N` indexing.
    #[must_use]
    pub const fn bare(mut self) -> Self {
        self.convention = MapConvention::Bare;
        self
    }

    /// Rename the key and value elements.
    #[must_use]
    pub const fn names(mut self, key_name: &'static str, value_name: &'static str) -> Self {
        self.key_name = key_name;
        self.value_name = value_name;
        self
    }
}

/// What a field holds.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A single scalar.
    Scalar(ScalarKind),
    /// A nested shape.
    Shape(&'static ShapeDescriptor),
    /// An ordered list.
    List(ListSpec),
    /// A string-keyed map.
    Map(MapSpec),
}

impl FieldKind {
    /// Short name of the kind, used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.as_str(),
            Self::Shape(_) => "shape",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

/// One field of a shape.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name, used as the key in a [`Record`](crate::Record).
    pub name: &'static str,
    /// External parameter / element name.
    pub wire_name: &'static str,
    /// What the field holds.
    pub kind: FieldKind,
    /// Whether the encoder rejects records without this field.
    pub required: bool,
}

impl FieldDescriptor {
    /// An optional field whose wire name equals its name.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            wire_name: name,
            kind,
            required: false,
        }
    }

    /// A scalar field.
    #[must_use]
    pub const fn scalar(name: &'static str, kind: ScalarKind) -> Self {
        Self::new(name, FieldKind::Scalar(kind))
    }

    /// A nested shape field.
    #[must_use]
    pub const fn shape(name: &'static str, shape: &'static ShapeDescriptor) -> Self {
        Self::new(name, FieldKind::Shape(shape))
    }

    /// A list field.
    #[must_use]
    pub const fn list(name: &'static str, spec: ListSpec) -> Self {
        Self::new(name, FieldKind::List(spec))
    }

    /// A map field.
    #[must_use]
    pub const fn map(name: &'static str, spec: MapSpec) -> Self {
        Self::new(name, FieldKind::Map(spec))
    }

    /// Override the wire name.
    #[must_use]
    pub const fn wire(mut self, wire_name: &'static str) -> Self {
        self.wire_name = wire_name;
        self
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Whether XML items of this field sit directly in the parent element.
    #[must_use]
    pub const fn is_flattened_list(&self) -> bool {
        matches!(self.kind, FieldKind::List(ListSpec { flattened: true, .. }))
    }
}

/// A named shape with its fields in declaration order.
pub struct ShapeDescriptor {
    /// Shape name, also the default XML root element name.
    pub name: &'static str,
    /// Fields in declaration (and therefore encoding) order.
    pub fields: &'static [FieldDescriptor],
}

impl ShapeDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    /// Look up a field by its field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field by its wire name.
    #[must_use]
    pub fn field_by_wire_name(&self, wire_name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }

    /// Shapes referenced directly by this shape's fields.
    pub fn nested_shapes(&self) -> impl Iterator<Item = &'static ShapeDescriptor> {
        self.fields.iter().filter_map(|f| match f.kind {
            FieldKind::Shape(shape)
            | FieldKind::List(ListSpec {
                element: ElementKind::Shape(shape),
                ..
            })
            | FieldKind::Map(MapSpec {
                value: ElementKind::Shape(shape),
                ..
            }) => Some(shape),
            _ => None,
        })
    }
}

// Shapes may refer to themselves; print names only to keep Debug finite.
impl fmt::Debug for ShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeDescriptor")
            .field("name", &self.name)
            .field(
                "fields",
                &self.fields.iter().map(|fd| fd.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
