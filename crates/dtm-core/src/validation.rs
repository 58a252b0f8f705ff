//! Field validation for row drafts.

use std::sync::LazyLock;

use regex::Regex;

use dtm_model::{AGE, CellValue, Column, EMAIL, Row};

pub const AGE_RANGE_MESSAGE: &str = "Age must be a valid number between 0 and 150";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Lowest and highest accepted age, inclusive.
pub const AGE_BOUNDS: (f64, f64) = (0.0, 150.0);

/// `local@domain.tld`: no whitespace and exactly one `@`.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn is_valid_age(age: f64) -> bool {
    (AGE_BOUNDS.0..=AGE_BOUNDS.1).contains(&age)
}

/// Check one field value; `None` is an absent field.
///
/// Age must be a number in range (0 included), email must look like an
/// address, and everything else must be non-blank.
pub fn validate_field(column_id: &str, value: Option<&CellValue>) -> Option<&'static str> {
    match column_id {
        AGE => {
            let age = match value {
                Some(CellValue::Number(n)) => *n,
                Some(CellValue::Text(text)) => CellValue::coerce_number(text),
                None => f64::NAN,
            };
            (!is_valid_age(age)).then_some(AGE_RANGE_MESSAGE)
        }
        EMAIL => {
            let valid = value.is_some_and(|value| is_valid_email(&value.to_string()));
            (!valid).then_some(INVALID_EMAIL_MESSAGE)
        }
        _ => value
            .is_none_or(CellValue::is_blank)
            .then_some(REQUIRED_MESSAGE),
    }
}

/// Validate every visible column of `row`. Hidden columns are exempt.
///
/// Returns `(column id, message)` pairs in column order.
pub fn validate_row<'c>(row: &Row, columns: &'c [Column]) -> Vec<(&'c str, &'static str)> {
    columns
        .iter()
        .filter(|column| column.visible)
        .filter_map(|column| {
            validate_field(&column.id, row.get(&column.id).as_deref())
                .map(|message| (column.id.as_str(), message))
        })
        .collect()
}
