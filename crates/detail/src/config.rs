//! Form detail configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables of the entity form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailConfig {
    /// Quiet period before a doctor-field edit reaches the autocomplete lookup.
    pub doctor_debounce: Duration,
    /// Written into an empty phone field when it gains focus.
    pub default_phone_prefix: String,
    /// Above this age (in whole years) the VAT code becomes required.
    pub adult_age: i32,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            doctor_debounce: Duration::from_millis(200),
            default_phone_prefix: "+39".to_string(),
            adult_age: 18,
        }
    }
}

impl DetailConfig {
    /// Defaults, overridden by `FORMDESK_DOCTOR_DEBOUNCE_MS`, `FORMDESK_PHONE_PREFIX`
    /// and `FORMDESK_ADULT_AGE` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("FORMDESK_DOCTOR_DEBOUNCE_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.doctor_debounce = Duration::from_millis(ms),
                Err(e) => tracing::warn!("ignoring FORMDESK_DOCTOR_DEBOUNCE_MS={raw:?}: {e}"),
            }
        }

        if let Some(prefix) = lookup("FORMDESK_PHONE_PREFIX") {
            config.default_phone_prefix = prefix;
        }

        if let Some(raw) = lookup("FORMDESK_ADULT_AGE") {
            match raw.trim().parse::<i32>() {
                Ok(age) => config.adult_age = age,
                Err(e) => tracing::warn!("ignoring FORMDESK_ADULT_AGE={raw:?}: {e}"),
            }
        }

        config
    }
}
