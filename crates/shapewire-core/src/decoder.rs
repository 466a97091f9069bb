//! Path decoder: rebuilds a shape instance from a stream of element events.
//!
//! The stream describes the *children* of the root shape: the XML adapter
//! consumes the root element itself, and query parameters have no root.
//! Decoding keeps a stack of open frames; entering a known element pushes a
//! frame for the field's target, exiting pops it and stores the finished
//! value in the parent. Unknown elements are skipped with their subtree.

use crate::config::{CodecConfig, DEFAULT_MAX_DEPTH};
use crate::descriptor::{
    ElementKind, FieldDescriptor, FieldKind, ListSpec, MapSpec, ScalarKind, ShapeDescriptor,
};
use crate::error::{CodecError, CodecResult};
use crate::format::parse_scalar;
use crate::value::{Record, Scalar, Value};

/// Largest explicit list index accepted from the wire.
const MAX_LIST_INDEX: usize = 100_000;

/// One step of a streamed element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementEvent {
    /// An element opens. `index` is the explicit 1-based list/map position, if
    /// the source carries one.
    Enter {
        /// Local element name.
        name: String,
        /// Explicit 1-based position.
        index: Option<usize>,
    },
    /// Text content of the innermost open element.
    Text(String),
    /// The innermost open element closes.
    Exit,
}

impl ElementEvent {
    /// An unindexed `Enter`.
    pub fn enter(name: impl Into<String>) -> Self {
        Self::Enter {
            name: name.into(),
            index: None,
        }
    }

    /// An indexed `Enter`.
    pub fn enter_indexed(name: impl Into<String>, index: usize) -> Self {
        Self::Enter {
            name: name.into(),
            index: Some(index),
        }
    }

    /// A `Text` event.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Where element events come from, which decides how lists are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementLayout {
    /// XML bodies: flattened lists put their items directly in the parent.
    #[default]
    Xml,
    /// Query parameters: every list is wrapped and indexed.
    Query,
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Element layout of the source.
    pub layout: ElementLayout,
    /// Maximum element nesting below the root.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            layout: ElementLayout::Xml,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Options for XML sources.
    #[must_use]
    pub fn xml(config: &CodecConfig) -> Self {
        Self {
            layout: ElementLayout::Xml,
            max_depth: config.max_depth,
        }
    }

    /// Options for query parameter sources.
    #[must_use]
    pub fn query(config: &CodecConfig) -> Self {
        Self {
            layout: ElementLayout::Query,
            max_depth: config.max_depth,
        }
    }
}

/// Decode a record of `descriptor` from element events.
///
/// The whole decode fails on the first error; no partial record is returned.
/// Source errors are passed through unchanged.
pub fn decode_events<I, E>(
    descriptor: &'static ShapeDescriptor,
    events: I,
    options: DecodeOptions,
) -> Result<Record, E>
where
    I: IntoIterator<Item = Result<ElementEvent, E>>,
    E: From<CodecError>,
{
    let mut decoder = Decoder::new(descriptor, options);
    for event in events {
        decoder.handle(event?)?;
    }
    let record = decoder.finish()?;

    tracing::debug!(
        shape = descriptor.name,
        fields = record.len(),
        "decoded shape"
    );
    Ok(record)
}

/// Owner shape and field wire name, for error messages.
#[derive(Debug, Clone, Copy)]
struct Origin {
    shape: &'static str,
    field: &'static str,
}

#[derive(Debug)]
enum Frame {
    Shape {
        shape: &'static ShapeDescriptor,
        record: Record,
    },
    Scalar {
        kind: ScalarKind,
        origin: Origin,
        text: String,
    },
    List {
        spec: &'static ListSpec,
        origin: Origin,
        items: Vec<Option<Value>>,
    },
    Map {
        spec: &'static MapSpec,
        origin: Origin,
        entries: Vec<(String, Value)>,
    },
    Entry {
        spec: &'static MapSpec,
        origin: Origin,
        key: Option<String>,
        value: Option<Value>,
    },
    Skip,
}

/// Where a finished frame's value goes in its parent.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Root,
    Field(&'static str),
    Flattened(&'static str),
    Item(Option<usize>),
    EntryKey,
    EntryValue,
}

#[derive(Debug)]
struct Open {
    frame: Frame,
    slot: Slot,
}

enum Finished {
    Value(Value),
    Entry(String, Value),
    Nothing,
}

struct Decoder {
    stack: Vec<Open>,
    options: DecodeOptions,
}

impl Decoder {
    fn new(descriptor: &'static ShapeDescriptor, options: DecodeOptions) -> Self {
        Self {
            stack: vec![Open {
                frame: Frame::Shape {
                    shape: descriptor,
                    record: Record::new(),
                },
                slot: Slot::Root,
            }],
            options,
        }
    }

    fn handle(&mut self, event: ElementEvent) -> CodecResult<()> {
        match event {
            ElementEvent::Enter { name, index } => self.enter(&name, index),
            ElementEvent::Text(text) => {
                if let Some(Open {
                    frame: Frame::Scalar { text: buf, .. },
                    ..
                }) = self.stack.last_mut()
                {
                    buf.push_str(&text);
                }
                Ok(())
            }
            ElementEvent::Exit => self.exit(),
        }
    }

    fn enter(&mut self, name: &str, index: Option<usize>) -> CodecResult<()> {
        if self.stack.len() > self.options.max_depth {
            return Err(CodecError::TooDeep(self.options.max_depth));
        }

        let top = &self.stack[self.stack.len() - 1].frame;
        let open = match top {
            Frame::Shape { shape, .. } => self.open_field(*shape, name),
            Frame::List { spec, origin, .. } => {
                if index.is_some() || name == spec.item_name {
                    element_frame(spec.element, *origin, Slot::Item(index))
                } else {
                    skip()
                }
            }
            Frame::Map { spec, origin, .. } => {
                if index.is_some() || name == MapSpec::XML_ENTRY {
                    Open {
                        frame: Frame::Entry {
                            spec: *spec,
                            origin: *origin,
                            key: None,
                            value: None,
                        },
                        slot: Slot::Item(index),
                    }
                } else {
                    skip()
                }
            }
            Frame::Entry { spec, origin, .. } => {
                if name == spec.key_name {
                    element_frame(
                        ElementKind::Scalar(ScalarKind::String),
                        *origin,
                        Slot::EntryKey,
                    )
                } else if name == spec.value_name {
                    element_frame(spec.value, *origin, Slot::EntryValue)
                } else {
                    skip()
                }
            }
            Frame::Scalar { .. } | Frame::Skip => skip(),
        };

        self.stack.push(open);
        Ok(())
    }

    fn open_field(&self, shape: &'static ShapeDescriptor, name: &str) -> Open {
        let Some(field) = shape.field_by_wire_name(name) else {
            tracing::trace!(shape = shape.name, element = name, "skipping unknown element");
            return skip();
        };
        let origin = Origin {
            shape: shape.name,
            field: field.wire_name,
        };

        if self.options.layout == ElementLayout::Xml {
            if let FieldKind::List(spec) = &field.kind {
                if spec.flattened {
                    return element_frame(spec.element, origin, Slot::Flattened(field.name));
                }
            }
        }
        field_frame(field, origin)
    }

    fn exit(&mut self) -> CodecResult<()> {
        if self.stack.len() <= 1 {
            return Err(CodecError::MalformedStream(
                "element closed without a matching open".to_owned(),
            ));
        }
        let Some(Open { frame, slot }) = self.stack.pop() else {
            return Ok(());
        };
        let finished = close_frame(frame)?;
        let parent = self
            .stack
            .last_mut()
            .map(|open| &mut open.frame)
            .ok_or_else(|| CodecError::MalformedStream("no parent element".to_owned()))?;
        deliver(parent, slot, finished)
    }

    fn finish(mut self) -> CodecResult<Record> {
        if self.stack.len() > 1 {
            return Err(CodecError::MalformedStream(format!(
                "stream ended with {} unclosed element(s)",
                self.stack.len() - 1
            )));
        }
        match self.stack.pop() {
            Some(Open {
                frame: Frame::Shape { record, .. },
                ..
            }) => Ok(record),
            _ => Err(CodecError::MalformedStream("missing root shape".to_owned())),
        }
    }
}

fn skip() -> Open {
    Open {
        frame: Frame::Skip,
        slot: Slot::Root,
    }
}

fn field_frame(field: &'static FieldDescriptor, origin: Origin) -> Open {
    let slot = Slot::Field(field.name);
    let frame = match &field.kind {
        FieldKind::Scalar(kind) => Frame::Scalar {
            kind: *kind,
            origin,
            text: String::new(),
        },
        FieldKind::Shape(shape) => Frame::Shape {
            shape: *shape,
            record: Record::new(),
        },
        FieldKind::List(spec) => Frame::List {
            spec,
            origin,
            items: Vec::new(),
        },
        FieldKind::Map(spec) => Frame::Map {
            spec,
            origin,
            entries: Vec::new(),
        },
    };
    Open { frame, slot }
}

fn element_frame(element: ElementKind, origin: Origin, slot: Slot) -> Open {
    let frame = match element {
        ElementKind::Scalar(kind) => Frame::Scalar {
            kind,
            origin,
            text: String::new(),
        },
        ElementKind::Shape(shape) => Frame::Shape {
            shape,
            record: Record::new(),
        },
    };
    Open { frame, slot }
}

fn close_frame(frame: Frame) -> CodecResult<Finished> {
    Ok(match frame {
        Frame::Shape { record, .. } => Finished::Value(Value::Shape(record)),
        Frame::Scalar { kind, origin, text } => {
            let scalar = parse_scalar(kind, &text).map_err(|reason| {
                CodecError::parse(origin.shape, origin.field, kind, &text, reason)
            })?;
            Finished::Value(Value::Scalar(scalar))
        }
        Frame::List { items, .. } => Finished::Value(Value::List(items)),
        Frame::Map { entries, .. } => Finished::Value(Value::Map(entries)),
        Frame::Entry {
            spec,
            origin,
            key,
            value,
        } => {
            let key = key.ok_or_else(|| {
                CodecError::MalformedStream(format!(
                    "entry of {}.{} has no {}",
                    origin.shape, origin.field, spec.key_name
                ))
            })?;
            match (value, spec.value) {
                (Some(value), _) => Finished::Entry(key, value),
                (None, ElementKind::Shape(_)) => {
                    Finished::Entry(key, Value::Shape(Record::new()))
                }
                (None, ElementKind::Scalar(_)) => Finished::Nothing,
            }
        }
        Frame::Skip => Finished::Nothing,
    })
}

fn deliver(parent: &mut Frame, slot: Slot, finished: Finished) -> CodecResult<()> {
    match (parent, slot, finished) {
        (_, _, Finished::Nothing) => {}
        (Frame::Shape { record, .. }, Slot::Field(name), Finished::Value(value)) => {
            record.set(name, value);
        }
        (Frame::Shape { record, .. }, Slot::Flattened(name), Finished::Value(value)) => {
            match record.get_mut(name) {
                Some(Value::List(items)) => items.push(Some(value)),
                _ => record.set(name, Value::List(vec![Some(value)])),
            }
        }
        (Frame::List { items, origin, .. }, Slot::Item(index), Finished::Value(value)) => {
            place(items, index, value, *origin)?;
        }
        (Frame::Map { entries, .. }, Slot::Item(_), Finished::Entry(key, value)) => {
            entries.push((key, value));
        }
        (Frame::Entry { key, .. }, Slot::EntryKey, Finished::Value(Value::Scalar(Scalar::String(k)))) => {
            *key = Some(k);
        }
        (Frame::Entry { value: slot_value, .. }, Slot::EntryValue, Finished::Value(value)) => {
            *slot_value = Some(value);
        }
        _ => {
            return Err(CodecError::MalformedStream(
                "element finished in an unexpected position".to_owned(),
            ));
        }
    }
    Ok(())
}

/// Store a list item: by explicit 1-based index when present, else appended.
fn place(
    items: &mut Vec<Option<Value>>,
    index: Option<usize>,
    value: Value,
    origin: Origin,
) -> CodecResult<()> {
    let Some(index) = index else {
        items.push(Some(value));
        return Ok(());
    };
    if index == 0 || index > MAX_LIST_INDEX {
        return Err(CodecError::MalformedStream(format!(
            "list index {index} of {}.{} is out of range",
            origin.shape, origin.field
        )));
    }
    if items.len() < index {
        items.resize(index, None);
    }
    items[index - 1] = Some(value);
    Ok(())
}
