//! Create/edit mode of the form, decided once from the route.

use serde::{Deserialize, Serialize};

/// Route parameter value that opens an empty form.
pub const NEW_ROUTE_ID: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum DetailMode {
    /// No route parameter seen yet.
    Uninitialized,
    /// Empty form; saving creates a new entity.
    Create,
    /// Existing entity identified by the route parameter; its data loads externally.
    Edit(String),
}

impl DetailMode {
    pub fn from_route(id: &str) -> Self {
        if id == NEW_ROUTE_ID {
            DetailMode::Create
        } else {
            DetailMode::Edit(id.to_string())
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, DetailMode::Create)
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, DetailMode::Uninitialized)
    }

    /// Edit mode waits for the entity, so it starts with the progress indicator on.
    pub fn initial_progress(&self) -> bool {
        matches!(self, DetailMode::Edit(_))
    }
}
