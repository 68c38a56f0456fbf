//! Patient-like entity model edited by the detail form.
//!
//! Plain data and pure rules (no IO, no form state): the DTO shapes sent to the
//! backend, the address categories and the age computation behind conditional
//! validation.

pub mod address_type;
pub mod age;
pub mod entity;

pub use address_type::{AddressType, AddressTypeOption};
pub use age::{age_on, is_older_than};
pub use entity::{Entity, EntityAddress};
