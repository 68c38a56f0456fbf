//! Named collection of form nodes with optional slots.

use formdesk_core::{DomainError, DomainResult};
use serde_json::{Map, Value};

use crate::array::FormArray;
use crate::control::FormControl;
use crate::node::FormNode;

#[derive(Debug, Clone, PartialEq)]
struct Child {
    name: String,
    node: FormNode,
    present: bool,
}

/// An ordered, named group of form nodes.
///
/// Children are either always present or declared as **slots**: a slot keeps its
/// node in the group but carries a presence flag. An absent slot does not take part
/// in the group's value, validity, reset or traversal, and is reset when it is
/// switched off so it comes back empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormGroup {
    children: Vec<Child>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FormGroup::insert`].
    pub fn with(mut self, name: impl Into<String>, node: impl Into<FormNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Add a present child, replacing any child with the same name.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<FormNode>) {
        self.put(name.into(), node.into(), true);
    }

    /// Declare an absent slot, replacing any child with the same name.
    pub fn declare_slot(&mut self, name: impl Into<String>, node: impl Into<FormNode>) {
        self.put(name.into(), node.into(), false);
    }

    fn put(&mut self, name: String, node: FormNode, present: bool) {
        match self.children.iter_mut().find(|c| c.name == name) {
            Some(child) => {
                child.node = node;
                child.present = present;
            }
            None => self.children.push(Child {
                name,
                node,
                present,
            }),
        }
    }

    /// Switch a child on or off. Returns whether the presence changed.
    pub fn set_present(&mut self, name: &str, present: bool) -> DomainResult<bool> {
        let child = self
            .children
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| DomainError::not_found(format!("form field '{name}'")))?;

        if child.present == present {
            return Ok(false);
        }
        if !present {
            child.node.reset();
        }
        child.present = present;
        Ok(true)
    }

    /// Whether `name` exists and is present.
    pub fn contains(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.present && c.name == name)
    }

    /// Whether `name` is declared at all (present or not).
    pub fn is_declared(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&FormNode> {
        self.children
            .iter()
            .find(|c| c.present && c.name == name)
            .map(|c| &c.node)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormNode> {
        self.children
            .iter_mut()
            .find(|c| c.present && c.name == name)
            .map(|c| &mut c.node)
    }

    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.get(name).and_then(FormNode::as_control)
    }

    pub fn control_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.get_mut(name).and_then(FormNode::as_control_mut)
    }

    /// A declared control regardless of its presence.
    pub fn slot_control(&self, name: &str) -> Option<&FormControl> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.node.as_control())
    }

    pub fn group(&self, name: &str) -> Option<&FormGroup> {
        self.get(name).and_then(FormNode::as_group)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut FormGroup> {
        self.get_mut(name).and_then(FormNode::as_group_mut)
    }

    pub fn array(&self, name: &str) -> Option<&FormArray> {
        self.get(name).and_then(FormNode::as_array)
    }

    pub fn array_mut(&mut self, name: &str) -> Option<&mut FormArray> {
        self.get_mut(name).and_then(FormNode::as_array_mut)
    }

    /// Present children in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormNode)> {
        self.children
            .iter()
            .filter(|c| c.present)
            .map(|c| (c.name.as_str(), &c.node))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FormNode)> {
        self.children
            .iter_mut()
            .filter(|c| c.present)
            .map(|c| (c.name.as_str(), &mut c.node))
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|(name, _)| name).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.iter().all(|(_, node)| node.is_valid())
    }

    /// Present children's values as a JSON object.
    pub fn value(&self) -> Value {
        let mut map = Map::new();
        for (name, node) in self.iter() {
            map.insert(name.to_string(), node.value());
        }
        Value::Object(map)
    }

    pub fn reset(&mut self) {
        for (_, node) in self.iter_mut() {
            node.reset();
        }
    }

    /// Mark every present control below this group touched and dirty.
    pub fn mark_all_as_touched(&mut self) {
        for (_, node) in self.iter_mut() {
            node.mark_all_as_touched();
        }
    }
}
