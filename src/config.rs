use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment prefix for every setting, e.g. `INVADM_DATABASE_PATH`.
pub const ENV_PREFIX: &str = "INVADM_";

/// Table the spreadsheet importer writes to.
pub const INVENTORY_TABLE: &str = "inventory";

/// Users table created by `init` when none is configured.
pub const DEFAULT_USERS_TABLE: &str = "users";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Plaintext,
    Argon2,
}

/// Runtime settings. CLI arguments take precedence over everything here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database used when `--database` is not given.
    pub database_path: Option<PathBuf>,
    /// Users table for `create-admin`/`promote`; prompted for when unset.
    pub users_table: Option<String>,
    pub loglevel: String,
    pub password_scheme: PasswordScheme,
    pub busy_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            users_table: None,
            loglevel: "warn".to_string(),
            password_scheme: PasswordScheme::Plaintext,
            busy_timeout_secs: 5,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Defaults overlaid with `INVADM_*` variables. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}
