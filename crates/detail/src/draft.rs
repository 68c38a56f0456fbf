//! JSON drafts replayed through the form as if typed by a user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use formdesk_core::DomainResult;
use formdesk_forms::Reference;
use formdesk_patients::AddressType;

use crate::address_form::{CITY, COUNTRY, NAME, PHONE, STREET, ZIP_CODE};
use crate::form_detail::{
    BIRTH_DATE, DOCTOR, EMAIL, FIRST_NAME, FormDetail, LAST_NAME, VAT_CODE,
};

/// Doctor picked from the autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftDoctor {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftAddress {
    /// Address type id (`0` home, `1` work, `2` close relative).
    #[serde(rename = "type")]
    pub type_id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
}

/// What a user would type into the form, field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftEntity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub doctor: Option<DraftDoctor>,
    pub birth_date: Option<NaiveDate>,
    pub vat_code: String,
    pub addresses: Vec<DraftAddress>,
}

impl DraftEntity {
    /// Replay the draft through the form's UI operations (focus, input, blur,
    /// selections), growing the address list as needed.
    pub fn apply_to(&self, detail: &mut FormDetail) -> DomainResult<()> {
        type_into(detail, FIRST_NAME, &self.first_name)?;
        type_into(detail, LAST_NAME, &self.last_name)?;
        type_into(detail, EMAIL, &self.email)?;

        if let Some(doctor) = &self.doctor {
            detail.focus(DOCTOR)?;
            detail.input(DOCTOR, doctor.label.as_str())?;
            detail.select_doctor(Reference::new(doctor.id, doctor.label.as_str()))?;
            detail.blur(DOCTOR)?;
        }

        detail.on_birth_date_selected(self.birth_date)?;
        detail.blur(BIRTH_DATE)?;
        type_into(detail, VAT_CODE, &self.vat_code)?;

        for (index, address) in self.addresses.iter().enumerate() {
            if index >= detail.address_count() {
                detail.add_address()?;
            }
            apply_address(detail, index, address)?;
        }
        Ok(())
    }
}

fn type_into(detail: &mut FormDetail, name: &str, value: &str) -> DomainResult<()> {
    detail.focus(name)?;
    detail.input(name, value)?;
    detail.blur(name)
}

fn apply_address(detail: &mut FormDetail, index: usize, address: &DraftAddress) -> DomainResult<()> {
    match address.type_id {
        Some(id) if index > 0 => detail.on_address_type_selected(index, AddressType::from_id(id)?)?,
        Some(id) => tracing::warn!(index, type_id = id, "first address has no type selector"),
        None => {}
    }

    if let Some(phone) = &address.phone {
        detail.on_phone_focus(index)?;
        detail.input_address(index, PHONE, phone.as_str())?;
        detail.on_phone_blur(index)?;
    }

    for (field, value) in [
        (STREET, &address.street),
        (CITY, &address.city),
        (ZIP_CODE, &address.zip_code),
        (COUNTRY, &address.country),
    ] {
        detail.input_address(index, field, value.as_str())?;
        detail.blur_address(index, field)?;
    }

    if let Some(name) = &address.name {
        if detail.shows_address_name(index) {
            detail.input_address(index, NAME, name.as_str())?;
            detail.blur_address(index, NAME)?;
        } else {
            tracing::warn!(index, "address name ignored: no name field for this address type");
        }
    }
    Ok(())
}
