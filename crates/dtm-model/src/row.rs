//! Table rows.
//!
//! A row carries the four default fields as typed members and every other
//! column in an open extension map keyed by column identifier.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::{AGE, EMAIL, ID, NAME, ROLE, is_default_column};
use crate::error::{ModelError, Result};
use crate::value::{CellValue, non_finite_as_null};

/// Row identifier. Unique across the table and immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Create a row id, rejecting empty identifiers.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::EmptyRowId);
        }
        Ok(Self(id))
    }

    /// Numeric id, as assigned to rows created through the add-row form.
    pub fn from_counter(counter: usize) -> Self {
        Self(counter.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One record of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    pub name: String,
    pub email: String,
    #[serde(with = "non_finite_as_null")]
    pub age: f64,
    pub role: String,
    /// Custom columns (and imported fields without a column), keyed by column
    /// id. Never holds `id` or a default column; writes go through `set`.
    #[serde(flatten)]
    extra: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(
        id: RowId,
        name: impl Into<String>,
        email: impl Into<String>,
        age: f64,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            age,
            role: role.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style helper for setting a field, with the rules of `set`.
    ///
    /// A value for `id` is ignored; the identifier keeps its value.
    #[must_use]
    pub fn with_field(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        let _ = self.set(&column_id.into(), value.into());
        self
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Fields outside the identifier and the four default columns.
    pub fn extra(&self) -> &BTreeMap<String, CellValue> {
        &self.extra
    }

    /// Look up a field by column identifier.
    ///
    /// `"id"` resolves to the row identifier so that search and export treat
    /// it like any other field.
    pub fn get(&self, column_id: &str) -> Option<Cow<'_, CellValue>> {
        let value = match column_id {
            ID => CellValue::Text(self.id.0.clone()),
            NAME => CellValue::Text(self.name.clone()),
            EMAIL => CellValue::Text(self.email.clone()),
            AGE => CellValue::Number(self.age),
            ROLE => CellValue::Text(self.role.clone()),
            other => return self.extra.get(other).map(Cow::Borrowed),
        };
        Some(Cow::Owned(value))
    }

    /// Set a field by column identifier.
    ///
    /// Text written to `age` is coerced to a number (NaN when unparseable).
    /// The identifier itself cannot be changed.
    pub fn set(&mut self, column_id: &str, value: CellValue) -> Result<()> {
        match column_id {
            ID => return Err(ModelError::ImmutableId),
            NAME => self.name = value.to_string(),
            EMAIL => self.email = value.to_string(),
            ROLE => self.role = value.to_string(),
            AGE => {
                self.age = match value {
                    CellValue::Number(n) => n,
                    CellValue::Text(text) => CellValue::coerce_number(&text),
                }
            }
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
        Ok(())
    }

    /// Remove a custom field. Returns the removed value.
    ///
    /// Default fields and the identifier are structural and cannot be removed.
    pub fn remove(&mut self, column_id: &str) -> Result<Option<CellValue>> {
        if column_id == ID || is_default_column(column_id) {
            return Err(ModelError::ProtectedField {
                field: column_id.to_string(),
            });
        }
        Ok(self.extra.remove(column_id))
    }

    /// True when the row carries a value for `column_id`.
    pub fn has_field(&self, column_id: &str) -> bool {
        column_id == ID || is_default_column(column_id) || self.extra.contains_key(column_id)
    }

    /// Iterate over every field as `(column id, value)`: the identifier, the
    /// default fields, then custom fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Cow<'_, CellValue>)> {
        [ID, NAME, EMAIL, AGE, ROLE]
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .chain(
                self.extra
                    .iter()
                    .map(|(key, value)| (key.as_str(), Cow::Borrowed(value))),
            )
    }
}
