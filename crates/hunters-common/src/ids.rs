//! Typed row identifier for the hunters table.
//!
//! The store assigns ids; this wrapper keeps them from being mixed up with
//! ages or affected-row counts, which are also plain integers.

use serde::{Deserialize, Serialize};

/// Primary key of a hunter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HunterId(i64);

impl HunterId {
    /// Wrap a raw id as assigned by the store.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value, for binding into statements.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for HunterId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<HunterId> for i64 {
    fn from(id: HunterId) -> Self {
        id.0
    }
}

impl std::fmt::Display for HunterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
