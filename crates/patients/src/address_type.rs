use serde::{Deserialize, Serialize};

use formdesk_core::{DomainError, DomainResult};

/// Address category, integer-tagged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AddressType {
    Home,
    Work,
    CloseRelative,
}

/// One entry of the address-type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressTypeOption {
    pub id: i64,
    pub name: &'static str,
}

impl AddressType {
    /// Selector options in display order, built once.
    pub const OPTIONS: [AddressTypeOption; 3] = [
        AddressTypeOption { id: 0, name: "Home" },
        AddressTypeOption { id: 1, name: "Work" },
        AddressTypeOption { id: 2, name: "Close relative" },
    ];

    pub const ALL: [AddressType; 3] = [
        AddressType::Home,
        AddressType::Work,
        AddressType::CloseRelative,
    ];

    pub fn id(self) -> i64 {
        match self {
            AddressType::Home => 0,
            AddressType::Work => 1,
            AddressType::CloseRelative => 2,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AddressType::Home => "Home",
            AddressType::Work => "Work",
            AddressType::CloseRelative => "Close relative",
        }
    }

    pub fn from_id(id: i64) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| DomainError::invalid_id(format!("AddressType: unknown id {id}")))
    }

    /// Addresses of this type must name the person or company they belong to.
    pub fn requires_name(self) -> bool {
        matches!(self, AddressType::Work | AddressType::CloseRelative)
    }
}

impl TryFrom<i64> for AddressType {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_id(value)
    }
}

impl From<AddressType> for i64 {
    fn from(value: AddressType) -> Self {
        value.id()
    }
}

impl core::fmt::Display for AddressType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}
