//! Query parameters as an element source.
//!
//! Paths are split on `.` and folded into a tree; `member.N` / `entry.N` and
//! bare `N` segments become indexed item elements. Walking the tree depth
//! first yields the element events the path decoder consumes, so anything the
//! encoder writes decodes back through the same descriptor.

use crate::config::CodecConfig;
use crate::decoder::{DecodeOptions, ElementEvent, decode_events};
use crate::descriptor::{ListConvention, MapConvention, ShapeDescriptor};
use crate::error::{CodecError, CodecResult};
use crate::params::ParameterSet;
use crate::shape::Shape;
use crate::value::Record;

/// Decode a typed shape from parameters written under `prefix`.
pub fn from_parameters<T: Shape>(params: &ParameterSet, prefix: &str) -> CodecResult<T> {
    let options = DecodeOptions::query(&CodecConfig::default());
    let record = decode_parameters(T::descriptor(), params, prefix, options)?;
    T::from_record(record)
}

/// Decode a record of `descriptor` from parameters written under `prefix`.
///
/// Parameters outside `prefix` are ignored.
pub fn decode_parameters(
    descriptor: &'static ShapeDescriptor,
    params: &ParameterSet,
    prefix: &str,
    options: DecodeOptions,
) -> CodecResult<Record> {
    let events = element_events(params, prefix);
    decode_events(descriptor, events.into_iter().map(Ok::<_, CodecError>), options)
}

/// Fold parameters under `prefix` into element events, in first-seen order.
#[must_use]
pub fn element_events(params: &ParameterSet, prefix: &str) -> Vec<ElementEvent> {
    let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
    let mut root = Node::default();

    for (path, value) in params.iter() {
        let relative = if prefix.is_empty() {
            path
        } else {
            match path
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('.'))
            {
                Some(rest) => rest,
                None => continue,
            }
        };
        root.insert(relative, value);
    }

    let mut events = Vec::new();
    for child in &root.children {
        child.emit(&mut events);
    }
    events
}

#[derive(Debug, Default)]
struct Node {
    name: String,
    index: Option<usize>,
    value: Option<String>,
    children: Vec<Node>,
}

impl Node {
    fn insert(&mut self, path: &str, value: &str) {
        let segments: Vec<&str> = path.split('.').collect();
        let mut node = self;
        let mut i = 0;
        while i < segments.len() {
            let segment = segments[i];
            let next_index = segments.get(i + 1).and_then(|s| s.parse::<usize>().ok());
            let (name, index, width) = match next_index {
                Some(n) if is_item_token(segment) => (segment, Some(n), 2),
                _ => (segment, segment.parse::<usize>().ok(), 1),
            };
            node = node.child(name, index);
            i += width;
        }
        node.value = Some(value.to_owned());
    }

    fn child(&mut self, name: &str, index: Option<usize>) -> &mut Node {
        let pos = match self
            .children
            .iter()
            .position(|c| c.name == name && c.index == index)
        {
            Some(pos) => pos,
            None => {
                self.children.push(Node {
                    name: name.to_owned(),
                    index,
                    ..Node::default()
                });
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    fn emit(&self, events: &mut Vec<ElementEvent>) {
        events.push(ElementEvent::Enter {
            name: self.name.clone(),
            index: self.index,
        });
        if let Some(value) = &self.value {
            events.push(ElementEvent::Text(value.clone()));
        }
        for child in &self.children {
            child.emit(events);
        }
        events.push(ElementEvent::Exit);
    }
}

fn is_item_token(segment: &str) -> bool {
    ListConvention::Member.token() == Some(segment) || MapConvention::Entry.token() == Some(segment)
}
