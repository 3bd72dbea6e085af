use crate::parser::{NodeExt, NodeRef};
use crate::utils::node_key;
use std::collections::HashSet;

/// The highlight marks a search placed in the document, kept as explicit
/// references so clearing never has to look them up by class or tag.
///
/// Marks are stored in the order they were inserted, which is document
/// order for a single search pass.
#[derive(Default, Debug, Clone)]
pub struct HighlightSet {
    marks: Vec<NodeRef>,
    keys: HashSet<usize>,
}

impl HighlightSet {
    /// Record a mark.  Recording the same node twice is a no-op.
    pub fn insert(&mut self, mark: NodeRef) {
        if self.keys.insert(node_key(&mark)) {
            self.marks.push(mark);
        }
    }

    pub fn contains(&self, node: &NodeRef) -> bool {
        self.keys.contains(&node_key(node))
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeRef> {
        self.marks.iter()
    }

    /// Replace every recorded mark that is still attached with a text node
    /// holding the same characters, forget all marks, and return the distinct
    /// parents that now need their text children merged, in first-seen order.
    pub fn unwrap_all(&mut self) -> Vec<NodeRef> {
        let mut parents = vec![];
        let mut seen = HashSet::new();
        for mark in self.marks.drain(..) {
            let Some(parent) = mark.parent() else {
                continue;
            };
            let text = mark.text_contents();
            mark.insert_before(NodeRef::new_text(text));
            mark.detach();
            if seen.insert(node_key(&parent)) {
                parents.push(parent);
            }
        }
        self.keys.clear();
        parents
    }

    /// Text of every recorded mark, in insertion order.
    pub fn texts(&self) -> Vec<String> {
        self.marks
            .iter()
            .map(|m| {
                m.first_child()
                    .and_then(|c| c.text_value())
                    .unwrap_or_else(|| m.text_contents())
            })
            .collect()
    }
}
