//! Address sub-form factory.

use formdesk_core::DomainResult;
use formdesk_forms::{FormControl, FormGroup, FormValue, Validator};

pub const PHONE: &str = "phoneNumber";
pub const STREET: &str = "street";
pub const CITY: &str = "city";
pub const ZIP_CODE: &str = "zipCode";
pub const COUNTRY: &str = "country";
pub const TYPE: &str = "type";
pub const NAME: &str = "name";

/// Optional leading `+`, then digits and whitespace only.
pub const PHONE_PATTERN: &str = r"^\+?[0-9\s]+$";

pub fn phone_validator() -> DomainResult<Validator> {
    Validator::pattern(PHONE_PATTERN)
}

/// Build an address sub-form for a list that currently holds `existing_len` entries.
///
/// The `type` selector is only switched on when the list already has an entry, so
/// the first address of a form never gets one. The `name` slot starts absent and
/// follows the selected type.
pub fn build(existing_len: usize, phone_validator: &Validator) -> FormGroup {
    let mut group = FormGroup::new()
        .with(
            PHONE,
            FormControl::with_validators(FormValue::text(""), vec![phone_validator.clone()]),
        )
        .with(STREET, FormControl::required())
        .with(CITY, FormControl::required())
        .with(ZIP_CODE, FormControl::required())
        .with(COUNTRY, FormControl::required());

    if existing_len > 0 {
        group.insert(TYPE, FormControl::required());
    } else {
        group.declare_slot(TYPE, FormControl::required());
    }
    group.declare_slot(NAME, FormControl::required());

    group
}
