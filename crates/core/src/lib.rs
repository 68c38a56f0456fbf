//! `formdesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the form model and the
//! entity form (no UI, no IO).

pub mod clock;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use id::{DoctorId, EntityId};
pub use value_object::ValueObject;
