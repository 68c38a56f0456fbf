//! Ordered, growable list of form nodes.

use serde_json::Value;

use crate::node::FormNode;

/// A dynamic list of sub-forms (e.g. one group per address).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormArray {
    items: Vec<FormNode>,
}

impl FormArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(items: Vec<FormNode>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, node: impl Into<FormNode>) {
        self.items.push(node.into());
    }

    /// Remove and return the entry at `index`, or `None` when out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<FormNode> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FormNode> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FormNode> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormNode> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FormNode> {
        self.items.iter_mut()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_valid(&self) -> bool {
        self.items.iter().all(FormNode::is_valid)
    }

    pub fn value(&self) -> Value {
        Value::Array(self.items.iter().map(FormNode::value).collect())
    }

    /// Reset every entry in place; the number of entries does not change.
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.reset();
        }
    }
}
