//! Collaborators injected into the form.

use std::sync::Arc;

use formdesk_core::{Clock, SystemClock};

use crate::autocomplete::{DoctorLookup, NoopDoctorLookup};
use crate::service::{EntityService, Navigator};

/// Shared handles the form talks to.
///
/// Service and navigator are mandatory; the clock defaults to the local date and
/// the doctor lookup to one that only logs.
#[derive(Clone)]
pub struct DetailDeps {
    pub service: Arc<dyn EntityService>,
    pub navigator: Arc<dyn Navigator>,
    pub clock: Arc<dyn Clock>,
    pub doctor_lookup: Arc<dyn DoctorLookup>,
}

impl DetailDeps {
    pub fn new(service: Arc<dyn EntityService>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            service,
            navigator,
            clock: Arc::new(SystemClock),
            doctor_lookup: Arc::new(NoopDoctorLookup),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_doctor_lookup(mut self, lookup: Arc<dyn DoctorLookup>) -> Self {
        self.doctor_lookup = lookup;
        self
    }
}
