use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use formdesk_core::{DoctorId, DomainError, FixedClock};
use formdesk_detail::address_form::{CITY, COUNTRY, NAME, PHONE, STREET, TYPE, ZIP_CODE};
use formdesk_detail::form_detail::{
    ADDRESSES, DOCTOR, EMAIL, FIRST_NAME, LAST_NAME, VAT_CODE,
};
use formdesk_detail::{
    DetailConfig, DetailDeps, DetailMode, DoctorLookup, DraftEntity, FormDetail,
    InMemoryEntityService, RecordingNavigator, SaveOutcome,
};
use formdesk_forms::{ErrorCode, FormValue, Reference};
use formdesk_patients::{AddressType, Entity, EntityAddress};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Default)]
struct RecordingLookup {
    queries: Mutex<Vec<String>>,
}

impl RecordingLookup {
    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl DoctorLookup for RecordingLookup {
    fn lookup(&self, query: &str) {
        self.queries.lock().unwrap().push(query.to_string());
    }
}

struct Harness {
    service: Arc<InMemoryEntityService>,
    navigator: Arc<RecordingNavigator>,
    lookup: Arc<RecordingLookup>,
}

impl Harness {
    fn new() -> Self {
        Self {
            service: Arc::new(InMemoryEntityService::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            lookup: Arc::new(RecordingLookup::default()),
        }
    }

    fn deps(&self) -> DetailDeps {
        DetailDeps::new(self.service.clone(), self.navigator.clone())
            .with_clock(Arc::new(FixedClock(date(2024, 6, 1))))
            .with_doctor_lookup(self.lookup.clone())
    }

    fn open(&self, route_id: &str) -> FormDetail {
        self.open_with(route_id, DetailConfig::default())
    }

    fn open_with(&self, route_id: &str, config: DetailConfig) -> FormDetail {
        FormDetail::open(route_id, config, self.deps()).unwrap()
    }
}

fn fill_valid(detail: &mut FormDetail) {
    detail.input(FIRST_NAME, "Anna").unwrap();
    detail.input(LAST_NAME, "Rossi").unwrap();
    detail.input(EMAIL, "anna.rossi@example.com").unwrap();
    detail.select_doctor(Reference::new(7, "Dr. Bianchi")).unwrap();
    detail.on_birth_date_selected(Some(date(2010, 3, 1))).unwrap();
    for (field, value) in [
        (STREET, "Via Roma 1"),
        (CITY, "Milano"),
        (ZIP_CODE, "20100"),
        (COUNTRY, "IT"),
    ] {
        detail.input_address(0, field, value).unwrap();
    }
}

// -------------------------
// Mode
// -------------------------

#[test]
fn new_route_opens_create_mode_without_progress() {
    let h = Harness::new();
    let detail = h.open("new");

    assert_eq!(detail.mode(), &DetailMode::Create);
    assert!(detail.is_new());
    assert!(!detail.progress_bar());
}

#[test]
fn other_route_opens_edit_mode_with_progress() {
    let h = Harness::new();
    let detail = h.open("42");

    assert_eq!(detail.mode(), &DetailMode::Edit("42".to_string()));
    assert!(!detail.is_new());
    assert!(detail.progress_bar());
}

#[test]
fn mode_is_decided_only_once() {
    let h = Harness::new();
    let mut detail = FormDetail::new(DetailConfig::default(), h.deps()).unwrap();
    assert_eq!(detail.mode(), &DetailMode::Uninitialized);

    detail.on_route_param("new").unwrap();
    match detail.on_route_param("42") {
        Err(DomainError::InvariantViolation(_)) => {}
        other => panic!("Expected InvariantViolation, got {other:?}"),
    }
    assert_eq!(detail.mode(), &DetailMode::Create);
}

// -------------------------
// Initial form
// -------------------------

#[test]
fn fresh_form_has_one_untyped_address_and_is_invalid() {
    let h = Harness::new();
    let detail = h.open("new");

    assert_eq!(detail.address_count(), 1);
    assert!(!detail.address(0).unwrap().contains(TYPE));
    assert!(!detail.address(0).unwrap().contains(NAME));
    assert!(!detail.is_valid());
    assert_eq!(detail.address_types().len(), 3);
    assert_eq!(detail.address_types()[2].name, "Close relative");
}

#[test]
fn filled_form_is_valid_without_phone_or_vat() {
    let h = Harness::new();
    let mut detail = h.open("new");
    fill_valid(&mut detail);

    assert!(detail.is_valid());
}

// -------------------------
// Conditional VAT validation
// -------------------------

#[test]
fn vat_code_required_only_above_adult_age() {
    let h = Harness::new();
    let mut detail = h.open("new");
    fill_valid(&mut detail);

    detail.on_birth_date_selected(Some(date(1990, 1, 1))).unwrap();
    assert!(detail.vat_required());
    assert!(detail.control(VAT_CODE).unwrap().has_error(ErrorCode::Required));
    assert!(!detail.is_valid());

    detail.input(VAT_CODE, "RSSNNA90A41F205X").unwrap();
    assert!(detail.is_valid());

    // Exactly 18 on the clock date is not older than 18.
    detail.on_birth_date_selected(Some(date(2006, 6, 1))).unwrap();
    assert!(!detail.vat_required());
    assert!(!detail.control(VAT_CODE).unwrap().has_validator(ErrorCode::Required));
}

#[test]
fn clearing_birth_date_lifts_vat_requirement() {
    let h = Harness::new();
    let mut detail = h.open("new");

    detail.on_birth_date_selected(Some(date(1970, 5, 5))).unwrap();
    assert!(detail.vat_required());

    detail.on_birth_date_selected(None).unwrap();
    assert!(!detail.vat_required());
    assert!(detail.control(VAT_CODE).unwrap().is_valid());
}

#[test]
fn adult_age_comes_from_config() {
    let h = Harness::new();
    let config = DetailConfig {
        adult_age: 30,
        ..DetailConfig::default()
    };
    let mut detail = h.open_with("new", config);

    detail.on_birth_date_selected(Some(date(2000, 1, 1))).unwrap();
    assert!(!detail.vat_required());
}

// -------------------------
// Address list
// -------------------------

#[test]
fn added_addresses_require_a_type() {
    let h = Harness::new();
    let mut detail = h.open("new");
    fill_valid(&mut detail);

    detail.add_address().unwrap();

    assert_eq!(detail.address_count(), 2);
    assert!(detail.address(1).unwrap().contains(TYPE));
    assert!(!detail.is_valid());
}

#[test]
fn removing_keeps_at_least_one_address() {
    let h = Harness::new();
    let mut detail = h.open("new");
    detail.add_address().unwrap();
    detail.input_address(1, STREET, "Via Po 2").unwrap();

    detail.remove_address(0).unwrap();
    assert_eq!(detail.address_count(), 1);
    assert_eq!(
        detail.address(0).unwrap().control(STREET).unwrap().value(),
        &FormValue::text("Via Po 2")
    );

    detail.remove_address(0).unwrap();
    assert_eq!(detail.address_count(), 1);
    let street = detail.address(0).unwrap().control(STREET).unwrap();
    assert_eq!(street.value(), &FormValue::Null);
    assert!(!street.is_dirty());
}

#[test]
fn removing_out_of_range_is_not_found() {
    let h = Harness::new();
    let mut detail = h.open("new");

    match detail.remove_address(3) {
        Err(DomainError::NotFound(msg)) => assert!(msg.contains('3')),
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert_eq!(detail.address_count(), 1);
}

#[test]
fn phone_focus_prefills_prefix_only_when_empty() {
    let h = Harness::new();
    let mut detail = h.open("new");

    detail.on_phone_focus(0).unwrap();
    assert_eq!(
        detail.address(0).unwrap().control(PHONE).unwrap().value(),
        &FormValue::text("+39")
    );

    detail.input_address(0, PHONE, "+41 79").unwrap();
    detail.on_phone_focus(0).unwrap();
    assert_eq!(
        detail.address(0).unwrap().control(PHONE).unwrap().value(),
        &FormValue::text("+41 79")
    );
}

#[test]
fn phone_blur_strips_whitespace_and_touches() {
    let h = Harness::new();
    let mut detail = h.open("new");

    detail.on_phone_focus(0).unwrap();
    detail.input_address(0, PHONE, "+39 02\t1234 567").unwrap();
    detail.on_phone_blur(0).unwrap();

    let phone = detail.address(0).unwrap().control(PHONE).unwrap();
    assert_eq!(phone.value(), &FormValue::text("+39021234567"));
    assert!(phone.is_touched());
    assert!(phone.is_valid());
}

#[test]
fn phone_blur_on_reset_field_is_harmless() {
    let h = Harness::new();
    let mut detail = h.open("new");
    detail.remove_address(0).unwrap();

    detail.on_phone_blur(0).unwrap();
    assert_eq!(
        detail.address(0).unwrap().control(PHONE).unwrap().value(),
        &FormValue::Null
    );
}

#[test]
fn address_type_toggles_name_field() {
    let h = Harness::new();
    let mut detail = h.open("new");
    detail.add_address().unwrap();

    detail.on_address_type_selected(1, AddressType::Work).unwrap();
    assert!(detail.shows_address_name(1));
    assert_eq!(
        detail.address(1).unwrap().control(TYPE).unwrap().value(),
        &FormValue::Reference(Reference::new(1, "Work"))
    );
    detail.input_address(1, NAME, "ACME").unwrap();

    detail.on_address_type_selected(1, AddressType::Home).unwrap();
    assert!(!detail.shows_address_name(1));

    detail.on_address_type_selected(1, AddressType::CloseRelative).unwrap();
    assert!(detail.shows_address_name(1));
    assert_eq!(
        detail.address(1).unwrap().control(NAME).unwrap().value(),
        &FormValue::Null
    );
}

#[test]
fn first_address_never_shows_name() {
    let h = Harness::new();
    let mut detail = h.open("new");

    detail.on_address_type_selected(0, AddressType::Work).unwrap();
    assert!(!detail.shows_address_name(0));
}

// -------------------------
// Validation state
// -------------------------

#[test]
fn control_state_needs_interaction() {
    let h = Harness::new();
    let mut detail = h.open("new");

    assert!(!detail.check_control_state(FIRST_NAME));

    detail.focus(FIRST_NAME).unwrap();
    detail.blur(FIRST_NAME).unwrap();
    assert!(detail.check_control_state(FIRST_NAME));

    detail.input(FIRST_NAME, "Anna").unwrap();
    assert!(!detail.check_control_state(FIRST_NAME));
    assert!(!detail.check_control_state("unknown"));
}

#[test]
fn mark_touched_reaches_nested_addresses() {
    let h = Harness::new();
    let mut detail = h.open("new");
    detail.add_address().unwrap();

    detail.mark_touched();

    assert!(detail.check_control_state(EMAIL));
    assert!(detail.check_control_state(ADDRESSES));
    let second = detail.address(1).unwrap();
    assert!(second.control(TYPE).unwrap().is_touched());
    assert!(second.control(COUNTRY).unwrap().is_dirty());
}

#[test]
fn error_messages() {
    let h = Harness::new();
    let mut detail = h.open("new");

    assert_eq!(detail.control_error_message(EMAIL), "Field is required.\n");
    detail.input(EMAIL, "not-an-email").unwrap();
    assert_eq!(detail.control_error_message(EMAIL), "Email is in bad format.\n");
    detail.input(EMAIL, "a@b.it").unwrap();
    assert_eq!(detail.control_error_message(EMAIL), "");

    detail.input_address(0, PHONE, "02-1234").unwrap();
    assert_eq!(detail.address_error_message(0, PHONE), "Data is in bad format.\n");
    assert_eq!(detail.address_error_message(0, NAME), "");
    assert_eq!(detail.address_error_message(9, STREET), "");
    assert_eq!(detail.control_error_message("unknown"), "");
}

// -------------------------
// Save
// -------------------------

#[test]
fn invalid_save_marks_everything_and_sends_nothing() {
    let h = Harness::new();
    let mut detail = h.open("new");

    assert_eq!(detail.save(), SaveOutcome::Invalid);

    assert!(h.service.created().is_empty());
    assert_eq!(h.navigator.root_visits(), 0);
    assert!(detail.check_control_state(FIRST_NAME));
    assert!(!detail.progress_bar());
}

#[test]
fn create_save_submits_mapped_entity_and_navigates() {
    let h = Harness::new();
    let mut detail = h.open("new");
    fill_valid(&mut detail);
    detail.add_address().unwrap();
    detail.on_address_type_selected(1, AddressType::Work).unwrap();
    for (field, value) in [
        (NAME, "ACME"),
        (PHONE, "+39 02 99"),
        (STREET, "Corso Como 5"),
        (CITY, "Milano"),
        (ZIP_CODE, "20154"),
        (COUNTRY, "IT"),
    ] {
        detail.input_address(1, field, value).unwrap();
    }

    let entity = match detail.save() {
        SaveOutcome::Submitted(entity) => entity,
        other => panic!("Expected Submitted, got {other:?}"),
    };

    assert_eq!(entity.first_name, "Anna");
    assert_eq!(entity.last_name, "Rossi");
    assert_eq!(entity.email, "anna.rossi@example.com");
    assert_eq!(entity.doctor, Some(DoctorId::new(7)));
    assert_eq!(entity.vat_code, "");
    assert_eq!(entity.id, None);
    assert_eq!(entity.birth_date, None);
    assert_eq!(
        entity.addresses,
        vec![
            EntityAddress {
                street: "Via Roma 1".to_string(),
                city: "Milano".to_string(),
                zip_code: "20100".to_string(),
                ..EntityAddress::default()
            },
            EntityAddress {
                name: Some("ACME".to_string()),
                street: "Corso Como 5".to_string(),
                city: "Milano".to_string(),
                zip_code: "20154".to_string(),
                ..EntityAddress::default()
            },
        ]
    );

    assert_eq!(h.service.created(), vec![entity]);
    assert_eq!(h.navigator.root_visits(), 1);
    assert!(!detail.progress_bar());
}

#[test]
fn rejected_create_clears_progress_without_navigation() {
    let h = Harness::new();
    let mut first = h.open("new");
    fill_valid(&mut first);
    assert!(matches!(first.save(), SaveOutcome::Submitted(_)));

    let mut second = h.open("new");
    fill_valid(&mut second);
    match second.save() {
        SaveOutcome::Rejected {
            error: DomainError::Conflict(_),
            entity,
        } => assert_eq!(entity.email, "anna.rossi@example.com"),
        other => panic!("Expected Rejected conflict, got {other:?}"),
    }

    assert!(!second.progress_bar());
    assert_eq!(h.navigator.root_visits(), 1);
}

#[test]
fn edit_save_prepares_without_sending() {
    let h = Harness::new();
    let mut detail = h.open("42");
    fill_valid(&mut detail);

    match detail.save() {
        SaveOutcome::Prepared(entity) => assert_eq!(entity.last_name, "Rossi"),
        other => panic!("Expected Prepared, got {other:?}"),
    }
    assert!(h.service.created().is_empty());
    assert_eq!(h.navigator.root_visits(), 0);
    assert!(detail.progress_bar());
}

// -------------------------
// Edit-mode loading
// -------------------------

#[test]
fn load_entity_patches_form_and_round_trips_mapped_fields() {
    let h = Harness::new();
    let mut detail = h.open("42");

    let entity = Entity {
        first_name: "Luca".to_string(),
        last_name: "Verdi".to_string(),
        doctor: Some(DoctorId::new(3)),
        email: "luca@example.com".to_string(),
        birth_date: Some(date(1980, 2, 29)),
        vat_code: "VRDLCU80B29F205Z".to_string(),
        addresses: vec![
            EntityAddress {
                street: "Via Roma 1".to_string(),
                city: "Torino".to_string(),
                zip_code: "10100".to_string(),
                phone: Some("+39011".to_string()),
                ..EntityAddress::default()
            },
            EntityAddress {
                address_type: Some(AddressType::CloseRelative),
                name: Some("Maria Verdi".to_string()),
                street: "Via Po 9".to_string(),
                city: "Asti".to_string(),
                zip_code: "14100".to_string(),
                ..EntityAddress::default()
            },
        ],
        ..Entity::default()
    };

    detail.load_entity(&entity).unwrap();

    assert!(!detail.progress_bar());
    assert!(detail.vat_required());
    assert_eq!(detail.address_count(), 2);
    assert!(!detail.address(0).unwrap().contains(TYPE));
    assert!(detail.shows_address_name(1));

    let mapped = detail.patch_form_to_object();
    assert_eq!(mapped.first_name, entity.first_name);
    assert_eq!(mapped.last_name, entity.last_name);
    assert_eq!(mapped.email, entity.email);
    assert_eq!(mapped.doctor, entity.doctor);
    assert_eq!(mapped.vat_code, entity.vat_code);
    assert_eq!(mapped.addresses[0].street, "Via Roma 1");
    assert_eq!(mapped.addresses[0].phone, None);
    assert_eq!(mapped.addresses[1].name.as_deref(), Some("Maria Verdi"));
    assert_eq!(mapped.addresses[1].address_type, None);
}

#[test]
fn load_entity_without_addresses_keeps_one() {
    let h = Harness::new();
    let mut detail = h.open("42");

    detail.load_entity(&Entity::default()).unwrap();

    assert_eq!(detail.address_count(), 1);
    assert!(!detail.vat_required());
}

// -------------------------
// Doctor autocomplete
// -------------------------

#[test]
fn doctor_typing_is_debounced_to_last_value() {
    let h = Harness::new();
    let config = DetailConfig {
        doctor_debounce: Duration::from_millis(50),
        ..DetailConfig::default()
    };
    let mut detail = h.open_with("new", config);

    for query in ["B", "Bi", "Bia"] {
        detail.input(DOCTOR, query).unwrap();
    }
    detail.input(FIRST_NAME, "Anna").unwrap();

    let deadline = Instant::now() + Duration::from_secs(2);
    while h.lookup.queries().is_empty() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    thread::sleep(Duration::from_millis(150));

    assert_eq!(h.lookup.queries(), vec!["Bia".to_string()]);
}

// -------------------------
// Drafts
// -------------------------

#[test]
fn draft_replay_produces_submittable_form() {
    let h = Harness::new();
    let mut detail = h.open("new");
    let draft: DraftEntity = serde_json::from_str(
        r#"{
            "firstName": "Anna",
            "lastName": "Rossi",
            "email": "anna@example.com",
            "doctor": { "id": 7, "label": "Dr. Bianchi" },
            "birthDate": "1990-04-02",
            "vatCode": "RSSNNA90D42F205X",
            "addresses": [
                { "phone": "02 1234", "street": "Via Roma 1", "city": "Milano",
                  "zipCode": "20100", "country": "IT" },
                { "type": 1, "name": "ACME", "street": "Corso Como 5", "city": "Milano",
                  "zipCode": "20154", "country": "IT" }
            ]
        }"#,
    )
    .unwrap();

    draft.apply_to(&mut detail).unwrap();

    assert_eq!(
        detail.address(0).unwrap().control(PHONE).unwrap().value(),
        &FormValue::text("021234")
    );
    match detail.save() {
        SaveOutcome::Submitted(entity) => {
            assert_eq!(entity.addresses.len(), 2);
            assert_eq!(entity.addresses[1].name.as_deref(), Some("ACME"));
        }
        other => panic!("Expected Submitted, got {other:?}"),
    }
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Add), (0usize..6).prop_map(Op::Remove)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: the list never empties and its length follows add/remove.
        #[test]
        fn address_list_invariants(ops in proptest::collection::vec(op(), 0..20)) {
            let h = Harness::new();
            let mut detail = h.open("new");
            let mut expected = 1usize;

            for op in ops {
                match op {
                    Op::Add => {
                        detail.add_address().unwrap();
                        expected += 1;
                    }
                    Op::Remove(i) => {
                        let result = detail.remove_address(i);
                        if i >= expected {
                            prop_assert!(result.is_err());
                        } else if expected > 1 {
                            expected -= 1;
                        }
                    }
                }
                prop_assert_eq!(detail.address_count(), expected);
                prop_assert!(detail.address_count() >= 1);
            }
        }
    }
}
