use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use formdesk_core::{DoctorId, EntityId, ValueObject};

use crate::address_type::AddressType;

/// The edited record: a person, their doctor and their addresses.
///
/// Built fresh from form values at submission time; not cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub doctor: Option<DoctorId>,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub vat_code: String,
    pub addresses: Vec<EntityAddress>,
}

/// One address of an [`Entity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAddress {
    #[serde(rename = "type")]
    pub address_type: Option<AddressType>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
    pub zip_code: String,
}

impl ValueObject for EntityAddress {}

impl Entity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}
