mod types;

pub use types::*;

use std::path::{Path, PathBuf};

/// Directory hosting the database file.
pub const HOST_VAR: &str = "HUNTERS_DB_HOST";
/// Session user.
pub const USER_VAR: &str = "HUNTERS_DB_USER";
/// Session password.
pub const PASSWORD_VAR: &str = "HUNTERS_DB_PASSWORD";
/// Database name.
pub const DATABASE_VAR: &str = "HUNTERS_DB_NAME";
/// Optional TOML file replacing the built-in sample plan.
pub const PLAN_FILE_VAR: &str = "HUNTERS_PLAN_FILE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("failed to read plan file {path:?}: {source}")]
    ReadPlan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan file {path:?}: {source}")]
    ParsePlan {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read the connection settings from the process environment.
pub fn db_config_from_env() -> Result<DbConfig, ConfigError> {
    db_config_from_lookup(|key| std::env::var(key).ok())
}

/// Read the connection settings through `lookup`.
///
/// All four values are required; an unset or blank value is an error naming
/// the first variable that is missing. Values are stored as given.
pub fn db_config_from_lookup<F>(lookup: F) -> Result<DbConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |key: &'static str| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(key))
    };

    Ok(DbConfig {
        host: require(HOST_VAR)?,
        user: require(USER_VAR)?,
        password: require(PASSWORD_VAR)?,
        database: require(DATABASE_VAR)?,
    })
}

/// Plan file named by the environment, if any.
pub fn plan_path_from_env() -> Option<PathBuf> {
    std::env::var_os(PLAN_FILE_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load an exercise plan from a TOML file.
pub fn load_plan(path: &Path) -> Result<ExercisePlan, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadPlan {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::ParsePlan {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the plan at `custom_path`, or the built-in demo plan if none is given.
pub fn load_plan_or_default(custom_path: Option<&Path>) -> Result<ExercisePlan, ConfigError> {
    match custom_path {
        Some(path) => {
            tracing::info!("Loading plan from {}", path.display());
            load_plan(path)
        }
        None => Ok(ExercisePlan::default()),
    }
}
