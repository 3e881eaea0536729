use hunters_common::{HunterColumn, HunterId};
use hunters_db::NewHunter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Connection settings read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Directory hosting the database file
    pub host: String,

    /// Session user, recorded in logs
    pub user: String,

    /// Session password, never logged
    pub password: String,

    /// Database name; the file is `<host>/<database>.db`
    pub database: String,
}

impl DbConfig {
    /// Location of the SQLite file this configuration points at.
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.host).join(format!("{}.db", self.database))
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Sample rows and query bounds for one exerciser run.
///
/// Missing fields in a plan file fall back to the built-in demo values.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ExercisePlan {
    /// Remove existing rows and restart ids before inserting
    pub clear_table: bool,

    /// Row inserted with positional binding
    pub positional: NewHunter,

    /// Row inserted with named binding
    pub named: NewHunter,

    /// Rows inserted in one named-binding batch
    pub bulk_named: Vec<NewHunter>,

    /// Rows inserted in one positional-binding batch
    pub bulk_positional: Vec<NewHunter>,

    pub filter: FilterPlan,

    pub range: RangePlan,

    /// Row removed by the delete step
    pub delete_id: HunterId,

    pub update: UpdatePlan,
}

impl Default for ExercisePlan {
    fn default() -> Self {
        Self {
            clear_table: true,
            positional: NewHunter::new("Yoruichi", 25, "Avis"),
            named: NewHunter::new("Ichigo", 15, "Avis"),
            bulk_named: vec![
                NewHunter::new("Rukia", 150, "Thirteenth Division"),
                NewHunter::new("Byakuya", 170, "Sixth Division"),
            ],
            bulk_positional: vec![
                NewHunter::new("Kisuke", 210, "Twelfth Division"),
                NewHunter::new("Renji", 40, "Sixth Division"),
            ],
            filter: FilterPlan::default(),
            range: RangePlan::default(),
            delete_id: HunterId::new(5),
            update: UpdatePlan::default(),
        }
    }
}

/// Filtered select: rows where `column > greater_than`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct FilterPlan {
    pub column: HunterColumn,
    pub greater_than: i64,
}

impl Default for FilterPlan {
    fn default() -> Self {
        Self {
            column: HunterColumn::Id,
            greater_than: 1,
        }
    }
}

/// Ranged select over ids, both ends inclusive.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct RangePlan {
    pub low: HunterId,
    pub high: HunterId,
}

impl Default for RangePlan {
    fn default() -> Self {
        Self {
            low: HunterId::new(2),
            high: HunterId::new(4),
        }
    }
}

/// Update step: overwrite every non-key column of row `id`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UpdatePlan {
    pub id: HunterId,
    pub values: NewHunter,
}

impl Default for UpdatePlan {
    fn default() -> Self {
        Self {
            id: HunterId::new(2),
            values: NewHunter::new("Ichigo Kurosaki", 17, "Substitute"),
        }
    }
}
