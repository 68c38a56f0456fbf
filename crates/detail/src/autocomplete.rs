//! Doctor autocomplete hook fed by the debounced doctor-field stream.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use formdesk_core::{DomainError, DomainResult};
use formdesk_events::{Debounced, FieldChanged};
use formdesk_forms::FormValue;

/// Receives settled doctor-field queries.
pub trait DoctorLookup: Send + Sync {
    fn lookup(&self, query: &str);
}

impl<L: DoctorLookup + ?Sized> DoctorLookup for Arc<L> {
    fn lookup(&self, query: &str) {
        (**self).lookup(query)
    }
}

/// Lookup that only logs the query.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDoctorLookup;

impl DoctorLookup for NoopDoctorLookup {
    fn lookup(&self, query: &str) {
        tracing::debug!(query, "doctor autocomplete query");
    }
}

/// Run `lookup` on a background thread for every settled doctor change.
///
/// The thread ends when the bus feeding `changes` is dropped.
pub fn spawn_listener<L>(
    changes: Debounced<FieldChanged<FormValue>>,
    lookup: L,
) -> DomainResult<JoinHandle<()>>
where
    L: DoctorLookup + 'static,
{
    thread::Builder::new()
        .name("doctor-autocomplete".to_string())
        .spawn(move || {
            for change in changes {
                if let Some(query) = change.value.validation_text() {
                    lookup.lookup(&query);
                }
            }
            tracing::debug!("doctor autocomplete listener stopped");
        })
        .map_err(|e| DomainError::invariant(format!("failed to spawn doctor listener: {e}")))
}
