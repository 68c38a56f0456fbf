//! `formdesk <route-id> <draft.json>`: replay a draft through the entity form and
//! print the resulting DTO, or the field errors.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};

use formdesk_detail::address_form::{CITY, COUNTRY, NAME, PHONE, STREET, TYPE, ZIP_CODE};
use formdesk_detail::form_detail::{
    BIRTH_DATE, DOCTOR, EMAIL, FIRST_NAME, LAST_NAME, PHONE_NUMBER, VAT_CODE,
};
use formdesk_detail::{
    DetailConfig, DetailDeps, DraftEntity, FormDetail, InMemoryEntityService, RecordingNavigator,
    SaveOutcome,
};

const TOP_LEVEL_FIELDS: [&str; 7] = [
    FIRST_NAME,
    LAST_NAME,
    BIRTH_DATE,
    VAT_CODE,
    EMAIL,
    DOCTOR,
    PHONE_NUMBER,
];
const ADDRESS_FIELDS: [&str; 7] = [TYPE, NAME, PHONE, STREET, CITY, ZIP_CODE, COUNTRY];

fn main() -> anyhow::Result<ExitCode> {
    formdesk_observability::init();

    let mut args = std::env::args().skip(1);
    let (Some(route_id), Some(draft_path)) = (args.next(), args.next()) else {
        bail!("usage: formdesk <route-id> <draft.json>");
    };

    let raw = std::fs::read_to_string(&draft_path)
        .with_context(|| format!("failed to read draft {draft_path}"))?;
    let draft: DraftEntity = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse draft {draft_path}"))?;

    let config = DetailConfig::from_env();
    let deps = DetailDeps::new(
        Arc::new(InMemoryEntityService::new()),
        Arc::new(RecordingNavigator::new()),
    );
    let mut detail = FormDetail::open(&route_id, config, deps).context("failed to open form")?;
    draft.apply_to(&mut detail).context("failed to apply draft")?;

    match detail.save() {
        SaveOutcome::Submitted(entity) | SaveOutcome::Prepared(entity) => {
            println!("{}", serde_json::to_string_pretty(&entity)?);
            Ok(ExitCode::SUCCESS)
        }
        SaveOutcome::Rejected { error, .. } => {
            eprintln!("rejected: {error}");
            Ok(ExitCode::FAILURE)
        }
        SaveOutcome::Invalid => {
            print_field_errors(&detail);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_field_errors(detail: &FormDetail) {
    for field in TOP_LEVEL_FIELDS {
        let message = detail.control_error_message(field);
        if !message.is_empty() {
            eprint!("{field}: {message}");
        }
    }
    for index in 0..detail.address_count() {
        for field in ADDRESS_FIELDS {
            let message = detail.address_error_message(index, field);
            if !message.is_empty() {
                eprint!("addresses[{index}].{field}: {message}");
            }
        }
    }
}
