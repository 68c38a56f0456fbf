//! Values held by scalar form controls.

use chrono::NaiveDate;
use formdesk_core::ValueObject;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A selected reference (e.g. an autocomplete pick): backend id plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub id: i64,
    pub label: String,
}

impl Reference {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl ValueObject for Reference {}

/// Current value of a scalar control.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FormValue {
    /// No value (fresh or reset control).
    #[default]
    Null,
    Text(String),
    Date(NaiveDate),
    Reference(Reference),
}

impl FormValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Null or the empty string. Whitespace is a value.
    pub fn is_empty(&self) -> bool {
        match self {
            FormValue::Null => true,
            FormValue::Text(s) => s.is_empty(),
            FormValue::Date(_) | FormValue::Reference(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FormValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            FormValue::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// String form seen by text validators (pattern, email, length).
    ///
    /// Dates use ISO `YYYY-MM-DD`; references their label.
    pub fn validation_text(&self) -> Option<String> {
        match self {
            FormValue::Null => None,
            FormValue::Text(s) => Some(s.clone()),
            FormValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            FormValue::Reference(r) => Some(r.label.clone()),
        }
    }

    /// Text content, or `None` when null/empty. Used when mapping to DTOs.
    pub fn non_empty_text(&self) -> Option<String> {
        match self {
            FormValue::Text(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FormValue::Null => Value::Null,
            FormValue::Text(s) => Value::String(s.clone()),
            FormValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FormValue::Reference(r) => json!({ "id": r.id, "label": r.label }),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FormValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Option<NaiveDate>> for FormValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(Self::Null, Self::Date)
    }
}

impl From<Reference> for FormValue {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}
