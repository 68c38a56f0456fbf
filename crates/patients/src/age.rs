//! Age computation for date-dependent validation.

use chrono::{Datelike, NaiveDate};

/// Age in whole years on `today`.
///
/// Year difference, minus one when `today` falls before this year's birthday.
/// A birth date after `today` yields a negative age.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Strictly older than `threshold` years on `today`.
pub fn is_older_than(birth_date: NaiveDate, today: NaiveDate, threshold: i32) -> bool {
    age_on(birth_date, today) > threshold
}
