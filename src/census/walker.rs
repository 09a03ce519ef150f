use log::debug;
use serde_json::Value;
use std::collections::HashMap;

use super::path::{KeyPath, Segment};
use crate::json::{TypeTag, classify, short_repr};
use crate::stats::Tally;

/// Census record for one key path
#[derive(Debug, Clone)]
pub struct PathEntry {
    pub path: KeyPath,
    /// Times the path was reached
    pub count: usize,
    /// Value types seen at the path; counts sum to `count`
    pub types: Tally<TypeTag>,
    /// First scalar value seen at the path, truncated
    pub example: Option<String>,
}

impl PathEntry {
    fn new(path: KeyPath) -> Self {
        Self {
            path,
            count: 0,
            types: Tally::new(),
            example: None,
        }
    }
}

/// Every key path of a document with its occurrence data
///
/// Entries keep first-reached order so ranking ties are stable.
#[derive(Debug, Clone)]
pub struct Census {
    entries: Vec<PathEntry>,
    index: HashMap<KeyPath, usize>,
    example_len: usize,
}

impl Census {
    /// Empty census whose examples are cut at `example_len` characters
    pub fn new(example_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            example_len,
        }
    }

    /// Walk `document` from the root and return the filled census
    pub fn of(document: &Value, example_len: usize) -> Self {
        let mut census = Self::new(example_len);
        let mut path = Vec::new();
        census.walk(document, &mut path);
        debug!(
            "Census walk finished: {} distinct paths",
            census.entries.len()
        );
        census
    }

    /// Visit `value` reached at `path`, recording every field below it
    ///
    /// `path` is used as a stack and is restored before returning. Nesting is
    /// tracked on the heap, so document depth is not bounded by the call stack.
    pub fn walk<'v>(&mut self, value: &'v Value, path: &mut Vec<Segment>) {
        let mut frames: Vec<Frame<'v>> = Vec::new();
        descend(value, 0, path, &mut frames);

        while let Some(frame) = frames.last_mut() {
            match frame.children.next_child() {
                Some((Some(key), child)) => {
                    path.push(Segment::Key(key.clone()));
                    self.record(path, child);
                    descend(child, 1, path, &mut frames);
                }
                Some((None, child)) => descend(child, 0, path, &mut frames),
                None => {
                    if let Some(done) = frames.pop() {
                        path.truncate(path.len() - done.pops);
                    }
                }
            }
        }
    }

    fn record(&mut self, path: &[Segment], value: &Value) {
        let slot = match self.index.get(path) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(PathEntry::new(KeyPath::from(path)));
                self.index.insert(KeyPath::from(path), slot);
                slot
            }
        };

        let tag = classify(value);
        let entry = &mut self.entries[slot];
        entry.count += 1;
        entry.types.add(tag);
        if entry.example.is_none() && !tag.is_container() {
            entry.example = Some(short_repr(value, self.example_len));
        }
    }

    /// Number of distinct key paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &[Segment]) -> Option<&PathEntry> {
        self.index.get(path).map(|&slot| &self.entries[slot])
    }

    /// Entries in first-reached order
    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    /// The `n` most frequent paths, ties in first-reached order
    pub fn top_paths(&self, n: usize) -> Vec<&PathEntry> {
        let mut ranked: Vec<&PathEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    /// Occurrence counts summed by each path's final field name
    ///
    /// Approximates how often a field name appears anywhere in the document,
    /// regardless of nesting.
    pub fn last_segment_tally(&self) -> Tally<String> {
        let mut tally = Tally::new();
        for entry in &self.entries {
            if let Some(name) = entry.path.last().and_then(Segment::as_key) {
                tally.add_n(name.to_string(), entry.count);
            }
        }
        tally
    }
}

/// Children still to visit in one container
enum Children<'v> {
    Object(serde_json::map::Iter<'v>),
    Array(std::slice::Iter<'v, Value>),
}

impl<'v> Children<'v> {
    /// Next child, with its key when the container is an object
    fn next_child(&mut self) -> Option<(Option<&'v String>, &'v Value)> {
        match self {
            Children::Object(fields) => {
                fields.next().map(|(key, child)| (Some(key), child))
            }
            Children::Array(items) => items.next().map(|child| (None, child)),
        }
    }
}

/// A container being walked and the path segments to drop once it is done
struct Frame<'v> {
    children: Children<'v>,
    pops: usize,
}

/// Open a frame for a container, or drop `pending` segments for a leaf
fn descend<'v>(
    value: &'v Value,
    pending: usize,
    path: &mut Vec<Segment>,
    frames: &mut Vec<Frame<'v>>,
) {
    match value {
        Value::Object(map) => frames.push(Frame {
            children: Children::Object(map.iter()),
            pops: pending,
        }),
        Value::Array(items) => {
            path.push(Segment::Wildcard);
            frames.push(Frame {
                children: Children::Array(items.iter()),
                pops: pending + 1,
            });
        }
        _ => path.truncate(path.len() - pending),
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod walker_tests;
