//! Add-row form.

use std::collections::BTreeMap;

use dtm_model::{AGE, CellValue, Column, EMAIL, NAME, ROLE, Row, RowId, is_default_column};

use crate::validation::{is_valid_age, is_valid_email};

/// Roles offered by the add-row form.
pub const ROLES: [&str; 4] = ["Developer", "Designer", "Manager", "Analyst"];

pub const DEFAULT_ROLE: &str = "Developer";

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Valid email is required";
pub const AGE_OUT_OF_RANGE: &str = "Age must be a number between 0 and 150";
pub const ROLE_REQUIRED: &str = "Role is required";

/// Per-field form errors keyed by column id.
pub type FormErrors = BTreeMap<&'static str, &'static str>;

/// Raw input for a new row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRowForm {
    pub name: String,
    pub email: String,
    /// Age as typed; parsed on submit.
    pub age: String,
    pub role: String,
    /// Values for custom columns, keyed by column id.
    pub fields: BTreeMap<String, String>,
}

impl Default for NewRowForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            age: String::new(),
            role: DEFAULT_ROLE.to_string(),
            fields: BTreeMap::new(),
        }
    }
}

impl NewRowForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: age.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, column_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column_id.into(), value.into());
        self
    }

    /// Check the four default fields.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(NAME, NAME_REQUIRED);
        }
        if !is_valid_email(self.email.trim()) {
            errors.insert(EMAIL, EMAIL_REQUIRED);
        }
        if !is_valid_age(CellValue::coerce_number(&self.age)) {
            errors.insert(AGE, AGE_OUT_OF_RANGE);
        }
        if self.role.trim().is_empty() {
            errors.insert(ROLE, ROLE_REQUIRED);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and build the row.
    ///
    /// Every custom column gets a value, empty text when the form has none.
    /// Form fields for ids that are not custom columns are dropped.
    pub fn build_row(&self, id: RowId, columns: &[Column]) -> Result<Row, FormErrors> {
        self.validate()?;
        let mut row = Row::new(
            id,
            self.name.trim(),
            self.email.trim(),
            CellValue::coerce_number(&self.age),
            self.role.as_str(),
        );
        for column in columns.iter().filter(|column| !is_default_column(&column.id)) {
            let value = self.fields.get(&column.id).cloned().unwrap_or_default();
            row = row.with_field(column.id.as_str(), CellValue::Text(value));
        }
        Ok(row)
    }
}
