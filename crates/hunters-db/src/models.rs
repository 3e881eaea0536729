//! Rust models matching the hunters table.

use hunters_common::{Error, HunterId, Result};
use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of the `name` and `unit` columns.
pub const MAX_TEXT_LEN: usize = 50;

/// A hunter row as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hunter {
    pub id: HunterId,
    pub name: String,
    pub age: i32,
    pub unit: String,
}

/// Column values for a hunter that has not been assigned an id yet.
///
/// Also used as the replacement values of an update, since an update
/// overwrites every column except `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewHunter {
    pub name: String,
    pub age: i32,
    pub unit: String,
}

impl NewHunter {
    pub fn new(name: impl Into<String>, age: i32, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            unit: unit.into(),
        }
    }

    /// Check the column constraints before the row is sent to the store.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, self.age, &self.unit)
    }

    /// Attach the id the store assigned to this row.
    pub fn with_id(self, id: HunterId) -> Hunter {
        Hunter {
            id,
            name: self.name,
            age: self.age,
            unit: self.unit,
        }
    }
}

/// Check `name`, `age` and `unit` against the table's constraints.
pub fn validate_fields(name: &str, age: i32, unit: &str) -> Result<()> {
    check_text("name", name)?;
    check_text("unit", unit)?;
    if age < 0 {
        return Err(Error::invalid_input(format!("age must not be negative, got {age}")));
    }
    Ok(())
}

fn check_text(column: &str, value: &str) -> Result<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(Error::invalid_input(format!("{column} must not be empty")));
    }
    if len > MAX_TEXT_LEN {
        return Err(Error::invalid_input(format!(
            "{column} is {len} characters, at most {MAX_TEXT_LEN} allowed"
        )));
    }
    Ok(())
}
