//! `formdesk-forms`: reactive form model.
//!
//! A form is a tree of [`FormNode`]s: scalar [`FormControl`]s, named
//! [`FormGroup`]s (with optional slots) and ordered [`FormArray`]s. Controls carry
//! [`Validator`]s and touched/dirty state; the tree is walked structurally to
//! compute validity and values or to surface every error at once.

pub mod array;
pub mod control;
pub mod group;
pub mod messages;
pub mod node;
pub mod validators;
pub mod value;

pub use array::FormArray;
pub use control::FormControl;
pub use group::FormGroup;
pub use messages::{control_error_message, error_message};
pub use node::FormNode;
pub use validators::{ErrorCode, Pattern, ValidationError, ValidationErrors, Validator};
pub use value::{FormValue, Reference};
