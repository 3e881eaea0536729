//! Column identifiers for the hunters table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer column that a filtered select may compare against a bound.
///
/// Column names cannot be bound as statement parameters, so filters pick a
/// column from this closed set and only its static identifier reaches the SQL
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HunterColumn {
    /// The primary key.
    Id,
    /// The hunter's age.
    Age,
}

impl HunterColumn {
    /// SQL identifier of the column.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Age => "age",
        }
    }
}

impl fmt::Display for HunterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
