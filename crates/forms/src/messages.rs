//! Display text for validation failures.

use crate::control::FormControl;
use crate::validators::{ErrorCode, ValidationErrors};

pub const REQUIRED_MESSAGE: &str = "Field is required.";
pub const PATTERN_MESSAGE: &str = "Data is in bad format.";
pub const EMAIL_MESSAGE: &str = "Email is in bad format.";

/// Render the active failures as displayable fragments, one per line.
///
/// Order is fixed (required, pattern, email) regardless of validator order.
/// Length-bound failures are recognized but have no message yet.
pub fn error_message(errors: &ValidationErrors) -> String {
    let mut out = String::new();

    if errors.contains(ErrorCode::Required) {
        push_line(&mut out, REQUIRED_MESSAGE);
    }
    if errors.contains(ErrorCode::Pattern) {
        push_line(&mut out, PATTERN_MESSAGE);
    }
    if errors.contains(ErrorCode::Email) {
        push_line(&mut out, EMAIL_MESSAGE);
    }
    // TODO: render min/max length once the form declares length-bounded fields.
    if errors.contains(ErrorCode::MinLength) || errors.contains(ErrorCode::MaxLength) {
        tracing::trace!("length validation failure has no message");
    }

    out
}

/// [`error_message`] for an optional control; a missing control renders nothing.
pub fn control_error_message(control: Option<&FormControl>) -> String {
    control.map(|c| error_message(&c.errors())).unwrap_or_default()
}

fn push_line(out: &mut String, fragment: &str) {
    out.push_str(fragment);
    out.push('\n');
}
