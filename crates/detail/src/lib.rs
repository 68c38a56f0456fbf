//! Entity detail form: create/edit an entity with its addresses.
//!
//! - [`FormDetail`]: the form component and its UI operations
//! - [`DetailMode`]: create vs. edit, decided from the route parameter
//! - [`address_form`]: the address sub-form factory
//! - [`EntityService`] / [`Navigator`] / [`DoctorLookup`]: outbound collaborators
//! - [`DraftEntity`]: JSON drafts replayed through the form (CLI)

pub mod address_form;
pub mod autocomplete;
pub mod config;
pub mod deps;
pub mod draft;
pub mod form_detail;
pub mod mode;
pub mod service;

pub use autocomplete::{DoctorLookup, NoopDoctorLookup};
pub use config::DetailConfig;
pub use deps::DetailDeps;
pub use draft::{DraftAddress, DraftDoctor, DraftEntity};
pub use form_detail::{FormDetail, SaveOutcome};
pub use mode::{DetailMode, NEW_ROUTE_ID};
pub use service::{EntityService, InMemoryEntityService, Navigator, RecordingNavigator};
