//! Outbound collaborators of the form: persistence and navigation.

use std::sync::Mutex;

use formdesk_core::{DomainError, DomainResult};
use formdesk_patients::Entity;

/// Persists entities produced by the form.
pub trait EntityService: Send + Sync {
    /// Submit a new entity. `Err` means the backend refused it.
    fn create(&self, entity: &Entity) -> DomainResult<()>;
}

/// Moves the UI elsewhere once a submission succeeded.
pub trait Navigator: Send + Sync {
    fn navigate_to_root(&self);
}

/// In-memory `EntityService` that records every created entity.
///
/// Refuses a second entity with the same email, as the backend does.
#[derive(Debug, Default)]
pub struct InMemoryEntityService {
    created: Mutex<Vec<Entity>>,
}

impl InMemoryEntityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> Vec<Entity> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl EntityService for InMemoryEntityService {
    fn create(&self, entity: &Entity) -> DomainResult<()> {
        let mut created = self
            .created
            .lock()
            .map_err(|_| DomainError::invariant("entity store lock poisoned"))?;

        if created.iter().any(|e| e.email == entity.email) {
            return Err(DomainError::conflict(format!(
                "entity with email {} already exists",
                entity.email
            )));
        }

        created.push(entity.clone());
        tracing::info!("created entity {}", entity.full_name());
        Ok(())
    }
}

/// `Navigator` that counts navigations.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    root_visits: Mutex<usize>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_visits(&self) -> usize {
        self.root_visits.lock().map(|n| *n).unwrap_or(0)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_root(&self) {
        if let Ok(mut n) = self.root_visits.lock() {
            *n += 1;
        }
        tracing::debug!("navigating to root view");
    }
}
