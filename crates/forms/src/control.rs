//! Scalar form control.

use crate::validators::{ErrorCode, ValidationErrors, Validator, run_validators};
use crate::value::FormValue;

/// A single editable field: its value, its validators and its interaction state.
///
/// - **touched**: the user focused and then left the field
/// - **dirty**: the user changed the value through the UI
///
/// Programmatic writes (`set_value`) touch neither flag. Validation is evaluated on
/// every query, so a validator change is reflected immediately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormControl {
    value: FormValue,
    validators: Vec<Validator>,
    touched: bool,
    dirty: bool,
    focused: bool,
}

impl FormControl {
    pub fn new(value: impl Into<FormValue>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_validators(value: impl Into<FormValue>, validators: Vec<Validator>) -> Self {
        Self {
            value: value.into(),
            validators,
            ..Self::default()
        }
    }

    /// An empty control with a single `Required` validator.
    pub fn required() -> Self {
        Self::with_validators(FormValue::text(""), vec![Validator::Required])
    }

    pub fn value(&self) -> &FormValue {
        &self.value
    }

    /// Programmatic write: no interaction flags change.
    pub fn set_value(&mut self, value: impl Into<FormValue>) {
        self.value = value.into();
    }

    /// User edit: writes the value and marks the control dirty.
    pub fn input(&mut self, value: impl Into<FormValue>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Leaving the field marks it touched.
    pub fn blur(&mut self) {
        self.focused = false;
        self.touched = true;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_as_touched(&mut self) {
        self.touched = true;
    }

    pub fn mark_as_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_as_untouched(&mut self) {
        self.touched = false;
    }

    pub fn mark_as_pristine(&mut self) {
        self.dirty = false;
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn set_validators(&mut self, validators: Vec<Validator>) {
        self.validators = validators;
    }

    pub fn add_validator(&mut self, validator: Validator) {
        if !self.validators.contains(&validator) {
            self.validators.push(validator);
        }
    }

    pub fn clear_validators(&mut self) {
        self.validators.clear();
    }

    pub fn has_validator(&self, code: ErrorCode) -> bool {
        self.validators.iter().any(|v| v.code() == code)
    }

    pub fn errors(&self) -> ValidationErrors {
        run_validators(&self.validators, &self.value)
    }

    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors().contains(code)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Clear the value and the interaction state; validators stay.
    pub fn reset(&mut self) {
        self.value = FormValue::Null;
        self.touched = false;
        self.dirty = false;
        self.focused = false;
    }
}
