//! Entity create/edit form.
//!
//! `FormDetail` owns the form tree for one [`Entity`] and its addresses and reacts
//! to UI events (input, focus, blur, selections). It decides create vs. edit mode
//! from the route parameter, keeps the conditional validators in sync, surfaces
//! errors, and maps the form to an `Entity` DTO on save.

use std::thread::JoinHandle;

use chrono::{NaiveDate, Utc};
use formdesk_core::{DoctorId, DomainError, DomainResult};
use formdesk_events::{Debounced, EventBus, FieldChanged, InMemoryEventBus};
use formdesk_forms::{
    FormArray, FormControl, FormGroup, FormNode, FormValue, Reference, Validator,
    control_error_message,
};
use formdesk_patients::{AddressType, AddressTypeOption, Entity, EntityAddress, is_older_than};

use crate::address_form::{self, CITY, NAME, PHONE, STREET, TYPE, ZIP_CODE};
use crate::autocomplete;
use crate::config::DetailConfig;
use crate::deps::DetailDeps;
use crate::mode::DetailMode;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const BIRTH_DATE: &str = "birthDate";
pub const VAT_CODE: &str = "vatCode";
pub const EMAIL: &str = "email";
pub const DOCTOR: &str = "doctor";
pub const PHONE_NUMBER: &str = "phoneNumber";
pub const ADDRESSES: &str = "addresses";

/// Result of [`FormDetail::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The form had errors; every field is now marked touched and dirty.
    Invalid,
    /// Create mode: the entity service accepted the DTO.
    Submitted(Entity),
    /// Create mode: the entity service refused the DTO.
    Rejected { entity: Entity, error: DomainError },
    /// Edit mode: the DTO is ready; nothing was sent.
    Prepared(Entity),
}

/// Editable form state for one entity.
pub struct FormDetail {
    form: FormGroup,
    config: DetailConfig,
    mode: DetailMode,
    progress_bar: bool,
    vat_required: bool,
    address_types: Vec<AddressTypeOption>,
    phone_validator: Validator,
    deps: DetailDeps,
    changes: InMemoryEventBus<FieldChanged<FormValue>>,
    _doctor_listener: JoinHandle<()>,
}

impl FormDetail {
    /// Build the form and start listening to doctor-field changes.
    ///
    /// The mode stays undecided until [`FormDetail::on_route_param`].
    pub fn new(config: DetailConfig, deps: DetailDeps) -> DomainResult<Self> {
        let phone_validator = address_form::phone_validator()?;
        let form = build_form(&phone_validator);

        let changes: InMemoryEventBus<FieldChanged<FormValue>> = InMemoryEventBus::new();
        let debounced = Debounced::new(changes.subscribe(), config.doctor_debounce);
        let doctor_listener = autocomplete::spawn_listener(debounced, deps.doctor_lookup.clone())?;

        Ok(Self {
            form,
            config,
            mode: DetailMode::Uninitialized,
            progress_bar: false,
            vat_required: false,
            address_types: AddressType::OPTIONS.to_vec(),
            phone_validator,
            deps,
            changes,
            _doctor_listener: doctor_listener,
        })
    }

    /// [`FormDetail::new`] followed by [`FormDetail::on_route_param`].
    pub fn open(route_id: &str, config: DetailConfig, deps: DetailDeps) -> DomainResult<Self> {
        let mut detail = Self::new(config, deps)?;
        detail.on_route_param(route_id)?;
        Ok(detail)
    }

    /// Decide create vs. edit mode from the `id` route parameter. Only once.
    pub fn on_route_param(&mut self, id: &str) -> DomainResult<()> {
        if self.mode.is_decided() {
            return Err(DomainError::invariant(format!(
                "form mode already decided ({:?}); got route id {id:?}",
                self.mode
            )));
        }

        self.mode = DetailMode::from_route(id);
        self.progress_bar = self.mode.initial_progress();
        tracing::info!(mode = ?self.mode, progress = self.progress_bar, "form mode decided");
        Ok(())
    }

    pub fn mode(&self) -> &DetailMode {
        &self.mode
    }

    pub fn is_new(&self) -> bool {
        self.mode.is_new()
    }

    pub fn progress_bar(&self) -> bool {
        self.progress_bar
    }

    pub fn vat_required(&self) -> bool {
        self.vat_required
    }

    pub fn address_types(&self) -> &[AddressTypeOption] {
        &self.address_types
    }

    pub fn config(&self) -> &DetailConfig {
        &self.config
    }

    pub fn form(&self) -> &FormGroup {
        &self.form
    }

    pub fn is_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.form.control(name)
    }

    fn control_mut(&mut self, name: &str) -> DomainResult<&mut FormControl> {
        self.form
            .control_mut(name)
            .ok_or_else(|| DomainError::not_found(format!("form field '{name}'")))
    }

    // -------------------------
    // Top-level fields
    // -------------------------

    /// User edit of a top-level field. Doctor edits feed the autocomplete stream.
    pub fn input(&mut self, name: &str, value: impl Into<FormValue>) -> DomainResult<()> {
        let value = value.into();
        if name == DOCTOR {
            self.publish_change(name, value.clone());
        }
        self.control_mut(name)?.input(value);
        Ok(())
    }

    pub fn focus(&mut self, name: &str) -> DomainResult<()> {
        self.control_mut(name)?.focus();
        Ok(())
    }

    pub fn blur(&mut self, name: &str) -> DomainResult<()> {
        self.control_mut(name)?.blur();
        Ok(())
    }

    /// Pick a doctor from the autocomplete suggestions.
    pub fn select_doctor(&mut self, doctor: Reference) -> DomainResult<()> {
        self.input(DOCTOR, doctor)
    }

    fn publish_change(&self, field: &str, value: FormValue) {
        if let Err(e) = self.changes.publish(FieldChanged::new(field, value, Utc::now())) {
            tracing::warn!("dropping {field} change notification: {e}");
        }
    }

    /// Birth date picked (or cleared) in the date picker.
    ///
    /// The VAT code becomes required when the person is older than the configured
    /// adult age; otherwise (or with no date) the requirement is lifted.
    pub fn on_birth_date_selected(&mut self, date: Option<NaiveDate>) -> DomainResult<()> {
        self.control_mut(BIRTH_DATE)?.input(date);
        self.apply_vat_rule(date)
    }

    fn apply_vat_rule(&mut self, birth_date: Option<NaiveDate>) -> DomainResult<()> {
        let today = self.deps.clock.today();
        let adult_age = self.config.adult_age;
        let required = birth_date.is_some_and(|d| is_older_than(d, today, adult_age));

        let vat = self.control_mut(VAT_CODE)?;
        if required {
            vat.set_validators(vec![Validator::Required]);
        } else {
            vat.clear_validators();
        }

        if required != self.vat_required {
            tracing::info!(required, "vat code requirement changed");
        }
        self.vat_required = required;
        Ok(())
    }

    // -------------------------
    // Addresses
    // -------------------------

    pub fn addresses(&self) -> DomainResult<&FormArray> {
        self.form
            .array(ADDRESSES)
            .ok_or_else(|| DomainError::not_found(format!("form field '{ADDRESSES}'")))
    }

    fn addresses_mut(&mut self) -> DomainResult<&mut FormArray> {
        self.form
            .array_mut(ADDRESSES)
            .ok_or_else(|| DomainError::not_found(format!("form field '{ADDRESSES}'")))
    }

    pub fn address_count(&self) -> usize {
        self.addresses().map(FormArray::len).unwrap_or(0)
    }

    pub fn address(&self, index: usize) -> DomainResult<&FormGroup> {
        self.addresses()?
            .get(index)
            .and_then(FormNode::as_group)
            .ok_or_else(|| DomainError::not_found(format!("address #{index}")))
    }

    fn address_mut(&mut self, index: usize) -> DomainResult<&mut FormGroup> {
        self.addresses_mut()?
            .get_mut(index)
            .and_then(FormNode::as_group_mut)
            .ok_or_else(|| DomainError::not_found(format!("address #{index}")))
    }

    fn address_control_mut(&mut self, index: usize, field: &str) -> DomainResult<&mut FormControl> {
        self.address_mut(index)?
            .control_mut(field)
            .ok_or_else(|| DomainError::not_found(format!("address #{index} field '{field}'")))
    }

    /// Append an empty address sub-form.
    pub fn add_address(&mut self) -> DomainResult<()> {
        let phone_validator = self.phone_validator.clone();
        let addresses = self.addresses_mut()?;
        let group = address_form::build(addresses.len(), &phone_validator);
        addresses.push(group);
        tracing::info!(count = addresses.len(), "address added");
        Ok(())
    }

    /// Remove the address at `index`; the last remaining address is reset instead.
    pub fn remove_address(&mut self, index: usize) -> DomainResult<()> {
        let addresses = self.addresses_mut()?;
        if index >= addresses.len() {
            return Err(DomainError::not_found(format!("address #{index}")));
        }

        if addresses.len() > 1 {
            addresses.remove_at(index);
            tracing::info!(index, count = addresses.len(), "address removed");
        } else {
            addresses.reset();
            tracing::info!("sole address reset");
        }
        Ok(())
    }

    pub fn input_address(
        &mut self,
        index: usize,
        field: &str,
        value: impl Into<FormValue>,
    ) -> DomainResult<()> {
        self.address_control_mut(index, field)?.input(value);
        Ok(())
    }

    pub fn blur_address(&mut self, index: usize, field: &str) -> DomainResult<()> {
        self.address_control_mut(index, field)?.blur();
        Ok(())
    }

    /// An empty phone field gets the default country prefix when focused.
    pub fn on_phone_focus(&mut self, index: usize) -> DomainResult<()> {
        let prefix = self.config.default_phone_prefix.clone();
        let phone = self.address_control_mut(index, PHONE)?;
        phone.focus();
        if phone.value().is_empty() {
            phone.set_value(prefix);
        }
        Ok(())
    }

    /// Leaving the phone field strips every whitespace character.
    pub fn on_phone_blur(&mut self, index: usize) -> DomainResult<()> {
        let phone = self.address_control_mut(index, PHONE)?;
        if let Some(text) = phone.value().as_text() {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            phone.set_value(compact);
        }
        phone.blur();
        Ok(())
    }

    /// Address type picked: work and close-relative addresses need a name.
    pub fn on_address_type_selected(&mut self, index: usize, ty: AddressType) -> DomainResult<()> {
        let group = self.address_mut(index)?;
        if let Some(selector) = group.control_mut(TYPE) {
            selector.input(Reference::new(ty.id(), ty.display_name()));
        }

        if group.set_present(NAME, ty.requires_name())? {
            tracing::debug!(index, %ty, name_field = ty.requires_name(), "address name field toggled");
        }
        Ok(())
    }

    /// Whether the name input is shown for the address at `index` (never for the first).
    pub fn shows_address_name(&self, index: usize) -> bool {
        index != 0 && self.address(index).is_ok_and(|g| g.contains(NAME))
    }

    // -------------------------
    // Validation state
    // -------------------------

    /// Mark every field of the form touched and dirty so all errors show.
    pub fn mark_touched(&mut self) {
        self.form.mark_all_as_touched();
    }

    /// A top-level field is invalid and the user has interacted with it.
    pub fn check_control_state(&self, name: &str) -> bool {
        self.form
            .get(name)
            .is_some_and(|node| node.is_invalid() && (node.is_touched() || node.is_dirty()))
    }

    pub fn control_error_message(&self, name: &str) -> String {
        control_error_message(self.form.control(name))
    }

    pub fn address_error_message(&self, index: usize, field: &str) -> String {
        control_error_message(self.address(index).ok().and_then(|g| g.control(field)))
    }

    // -------------------------
    // Data
    // -------------------------

    /// Validate, map and (in create mode) submit the form.
    pub fn save(&mut self) -> SaveOutcome {
        if !self.form.is_valid() {
            self.mark_touched();
            tracing::warn!("save blocked: form has validation errors");
            return SaveOutcome::Invalid;
        }

        self.progress_bar = true;
        let entity = self.patch_form_to_object();

        if !self.is_new() {
            tracing::info!(mode = ?self.mode, "entity prepared; nothing sent outside create mode");
            return SaveOutcome::Prepared(entity);
        }

        let result = self.deps.service.create(&entity);
        self.progress_bar = false;

        match result {
            Ok(()) => {
                tracing::info!("entity submitted");
                self.deps.navigator.navigate_to_root();
                SaveOutcome::Submitted(entity)
            }
            Err(error) => {
                tracing::warn!("entity submission rejected: {error}");
                SaveOutcome::Rejected { entity, error }
            }
        }
    }

    /// Map the current form values to an `Entity` DTO.
    ///
    /// Addresses carry street, city, zip code and (when shown) name; their type and
    /// phone are left unmapped, as are the entity id and birth date.
    pub fn patch_form_to_object(&self) -> Entity {
        let text = |name: &str| {
            self.form
                .control(name)
                .map(|c| text_value(c.value()))
                .unwrap_or_default()
        };

        let doctor = self
            .form
            .control(DOCTOR)
            .and_then(|c| c.value().as_reference())
            .map(|r| DoctorId::new(r.id));

        let addresses = self
            .form
            .array(ADDRESSES)
            .map(|arr| {
                arr.iter()
                    .filter_map(FormNode::as_group)
                    .map(address_to_object)
                    .collect()
            })
            .unwrap_or_default();

        Entity {
            id: None,
            first_name: text(FIRST_NAME),
            last_name: text(LAST_NAME),
            doctor,
            email: text(EMAIL),
            birth_date: None,
            vat_code: text(VAT_CODE),
            addresses,
        }
    }

    /// Fill the form with an existing entity (edit mode) and stop the progress indicator.
    pub fn load_entity(&mut self, entity: &Entity) -> DomainResult<()> {
        self.control_mut(FIRST_NAME)?.set_value(entity.first_name.clone());
        self.control_mut(LAST_NAME)?.set_value(entity.last_name.clone());
        self.control_mut(EMAIL)?.set_value(entity.email.clone());
        self.control_mut(VAT_CODE)?.set_value(entity.vat_code.clone());
        self.control_mut(BIRTH_DATE)?.set_value(entity.birth_date);

        let doctor = entity
            .doctor
            .map_or(FormValue::Null, |id| Reference::new(id.get(), id.to_string()).into());
        self.control_mut(DOCTOR)?.set_value(doctor);

        let phone_validator = self.phone_validator.clone();
        let addresses = self.addresses_mut()?;
        addresses.clear();
        for address in &entity.addresses {
            let mut group = address_form::build(addresses.len(), &phone_validator);
            fill_address(&mut group, address)?;
            addresses.push(group);
        }
        if addresses.is_empty() {
            addresses.push(address_form::build(0, &phone_validator));
        }

        self.apply_vat_rule(entity.birth_date)?;
        self.progress_bar = false;
        tracing::info!(
            addresses = entity.addresses.len(),
            "entity {} loaded into form",
            entity.full_name()
        );
        Ok(())
    }
}

fn build_form(phone_validator: &Validator) -> FormGroup {
    let mut addresses = FormArray::new();
    addresses.push(address_form::build(addresses.len(), phone_validator));

    FormGroup::new()
        .with(FIRST_NAME, FormControl::required())
        .with(LAST_NAME, FormControl::required())
        .with(BIRTH_DATE, FormControl::required())
        .with(VAT_CODE, FormControl::new(""))
        .with(
            EMAIL,
            FormControl::with_validators("", vec![Validator::Required, Validator::Email]),
        )
        .with(DOCTOR, FormControl::required())
        .with(PHONE_NUMBER, FormControl::new(""))
        .with(ADDRESSES, addresses)
}

fn text_value(value: &FormValue) -> String {
    value.validation_text().unwrap_or_default()
}

fn address_to_object(group: &FormGroup) -> EntityAddress {
    let text = |name: &str| {
        group
            .control(name)
            .map(|c| text_value(c.value()))
            .unwrap_or_default()
    };

    EntityAddress {
        address_type: None,
        name: group.control(NAME).map(|c| text_value(c.value())),
        phone: None,
        street: text(STREET),
        city: text(CITY),
        zip_code: text(ZIP_CODE),
    }
}

fn fill_address(group: &mut FormGroup, address: &EntityAddress) -> DomainResult<()> {
    for (field, value) in [
        (STREET, &address.street),
        (CITY, &address.city),
        (ZIP_CODE, &address.zip_code),
    ] {
        if let Some(control) = group.control_mut(field) {
            control.set_value(value.clone());
        }
    }

    if let (Some(phone), Some(control)) = (&address.phone, group.control_mut(PHONE)) {
        control.set_value(phone.clone());
    }

    if let Some(ty) = address.address_type {
        if let Some(selector) = group.control_mut(TYPE) {
            selector.set_value(Reference::new(ty.id(), ty.display_name()));
        }
        group.set_present(NAME, ty.requires_name())?;
    }

    if let (Some(name), Some(control)) = (&address.name, group.control_mut(NAME)) {
        control.set_value(name.clone());
    }
    Ok(())
}
