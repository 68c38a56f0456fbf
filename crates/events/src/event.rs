use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "form.field.changed").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (wall-clock time of the edit).
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Event: a form field received a new value.
///
/// Published for fields that have listeners (e.g. the doctor autocomplete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChanged<V> {
    /// Path of the field inside the form tree (e.g. `"doctor"`).
    pub field: String,
    pub value: V,
    pub occurred_at: DateTime<Utc>,
}

impl<V> FieldChanged<V> {
    pub fn new(field: impl Into<String>, value: V, occurred_at: DateTime<Utc>) -> Self {
        Self {
            field: field.into(),
            value,
            occurred_at,
        }
    }
}

impl<V> Event for FieldChanged<V>
where
    V: Clone + core::fmt::Debug + Send + Sync + 'static,
{
    fn event_type(&self) -> &'static str {
        "form.field.changed"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
