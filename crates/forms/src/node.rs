//! The form tree: a closed set of node kinds and structural traversal over them.

use serde_json::Value;

use crate::array::FormArray;
use crate::control::FormControl;
use crate::group::FormGroup;

/// A node of the form tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    Control(FormControl),
    Group(FormGroup),
    Array(FormArray),
}

impl FormNode {
    pub fn is_valid(&self) -> bool {
        match self {
            FormNode::Control(c) => c.is_valid(),
            FormNode::Group(g) => g.is_valid(),
            FormNode::Array(a) => a.is_valid(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Current value as JSON (objects for groups, arrays for lists).
    pub fn value(&self) -> Value {
        match self {
            FormNode::Control(c) => c.value().to_json(),
            FormNode::Group(g) => g.value(),
            FormNode::Array(a) => a.value(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            FormNode::Control(c) => c.reset(),
            FormNode::Group(g) => g.reset(),
            FormNode::Array(a) => a.reset(),
        }
    }

    /// Any control below this node was touched.
    pub fn is_touched(&self) -> bool {
        let mut touched = false;
        self.visit_controls(&mut |c| touched |= c.is_touched());
        touched
    }

    /// Any control below this node was edited.
    pub fn is_dirty(&self) -> bool {
        let mut dirty = false;
        self.visit_controls(&mut |c| dirty |= c.is_dirty());
        dirty
    }

    /// Visit every scalar control reachable from this node (absent slots excluded).
    pub fn visit_controls(&self, visit: &mut dyn FnMut(&FormControl)) {
        match self {
            FormNode::Control(c) => visit(c),
            FormNode::Group(g) => {
                for (_, child) in g.iter() {
                    child.visit_controls(visit);
                }
            }
            FormNode::Array(a) => {
                for child in a.iter() {
                    child.visit_controls(visit);
                }
            }
        }
    }

    /// Mutable counterpart of [`FormNode::visit_controls`].
    pub fn visit_controls_mut(&mut self, visit: &mut dyn FnMut(&mut FormControl)) {
        match self {
            FormNode::Control(c) => visit(c),
            FormNode::Group(g) => {
                for (_, child) in g.iter_mut() {
                    child.visit_controls_mut(visit);
                }
            }
            FormNode::Array(a) => {
                for child in a.iter_mut() {
                    child.visit_controls_mut(visit);
                }
            }
        }
    }

    /// Mark every control in the subtree touched and dirty, so that all validation
    /// errors become displayable at once.
    pub fn mark_all_as_touched(&mut self) {
        self.visit_controls_mut(&mut |c| {
            c.mark_as_touched();
            c.mark_as_dirty();
        });
    }

    pub fn as_control(&self) -> Option<&FormControl> {
        match self {
            FormNode::Control(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_control_mut(&mut self) -> Option<&mut FormControl> {
        match self {
            FormNode::Control(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&FormGroup> {
        match self {
            FormNode::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut FormGroup> {
        match self {
            FormNode::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&FormArray> {
        match self {
            FormNode::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut FormArray> {
        match self {
            FormNode::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl From<FormControl> for FormNode {
    fn from(value: FormControl) -> Self {
        FormNode::Control(value)
    }
}

impl From<FormGroup> for FormNode {
    fn from(value: FormGroup) -> Self {
        FormNode::Group(value)
    }
}

impl From<FormArray> for FormNode {
    fn from(value: FormArray) -> Self {
        FormNode::Array(value)
    }
}
