//! Field validators and the errors they report.

use std::sync::LazyLock;

use formdesk_core::{DomainError, DomainResult};
use regex::Regex;

use crate::value::FormValue;

/// Longest accepted email address.
const EMAIL_MAX_LEN: usize = 254;
/// Longest accepted local part (before `@`).
const EMAIL_LOCAL_MAX_LEN: usize = 64;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is valid")
});

/// Stable identifier of a validation failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Required,
    Pattern,
    Email,
    MinLength,
    MaxLength,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Pattern => "pattern",
            ErrorCode::Email => "email",
            ErrorCode::MinLength => "minlength",
            ErrorCode::MaxLength => "maxlength",
        }
    }
}

/// A single failed validation on a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    Pattern { required_pattern: String, actual: String },
    Email,
    MinLength { required: usize, actual: usize },
    MaxLength { required: usize, actual: usize },
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::Required => ErrorCode::Required,
            ValidationError::Pattern { .. } => ErrorCode::Pattern,
            ValidationError::Email => ErrorCode::Email,
            ValidationError::MinLength { .. } => ErrorCode::MinLength,
            ValidationError::MaxLength { .. } => ErrorCode::MaxLength,
        }
    }
}

/// Active validation failures of a control, in validator order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn contains(&self, code: ErrorCode) -> bool {
        self.0.iter().any(|e| e.code() == code)
    }

    pub fn get(&self, code: ErrorCode) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.code() == code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.0.iter().map(ValidationError::code).collect()
    }
}

/// Compiled, anchored pattern for [`Validator::Pattern`].
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `expr`, anchoring it with `^`/`$` when it is not anchored already.
    pub fn new(expr: &str) -> DomainResult<Self> {
        let mut source = String::with_capacity(expr.len() + 2);
        if !expr.starts_with('^') {
            source.push('^');
        }
        source.push_str(expr);
        if !expr.ends_with('$') {
            source.push('$');
        }

        let regex = Regex::new(&source)
            .map_err(|e| DomainError::validation(format!("invalid pattern {expr:?}: {e}")))?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// A rule attached to a scalar control.
///
/// Only [`Validator::Required`] rejects empty values; every other validator
/// passes on null or `""` so that optional fields stay valid until filled in.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    Required,
    Email,
    Pattern(Pattern),
    MinLength(usize),
    MaxLength(usize),
}

impl Validator {
    pub fn pattern(expr: &str) -> DomainResult<Self> {
        Ok(Self::Pattern(Pattern::new(expr)?))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Validator::Required => ErrorCode::Required,
            Validator::Email => ErrorCode::Email,
            Validator::Pattern(_) => ErrorCode::Pattern,
            Validator::MinLength(_) => ErrorCode::MinLength,
            Validator::MaxLength(_) => ErrorCode::MaxLength,
        }
    }

    pub fn validate(&self, value: &FormValue) -> Option<ValidationError> {
        if let Validator::Required = self {
            return value.is_empty().then_some(ValidationError::Required);
        }
        if value.is_empty() {
            return None;
        }
        let text = value.validation_text()?;

        match self {
            Validator::Required => None,
            Validator::Email => (!is_email(&text)).then_some(ValidationError::Email),
            Validator::Pattern(pattern) => {
                (!pattern.is_match(&text)).then(|| ValidationError::Pattern {
                    required_pattern: pattern.as_str().to_string(),
                    actual: text,
                })
            }
            Validator::MinLength(min) => {
                let actual = text.chars().count();
                (actual < *min).then_some(ValidationError::MinLength {
                    required: *min,
                    actual,
                })
            }
            Validator::MaxLength(max) => {
                let actual = text.chars().count();
                (actual > *max).then_some(ValidationError::MaxLength {
                    required: *max,
                    actual,
                })
            }
        }
    }
}

/// Run every validator against `value`, collecting failures in order.
pub fn run_validators(validators: &[Validator], value: &FormValue) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for validator in validators {
        if let Some(error) = validator.validate(value) {
            errors.push(error);
        }
    }
    errors
}

fn is_email(text: &str) -> bool {
    if text.len() > EMAIL_MAX_LEN {
        return false;
    }
    match text.split_once('@') {
        Some((local, _)) if local.len() <= EMAIL_LOCAL_MAX_LEN => EMAIL_RE.is_match(text),
        _ => false,
    }
}
