use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "LEDGER_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basic: BasicConfig,
    /// Account created at startup when absent.
    #[serde(default)]
    pub seed_account: Option<SeedAccount>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Master key for the private session cookie; at least 64 bytes.
    /// Empty means a random key per process, which logs everyone out on restart.
    pub cookie_secret: String,
    /// Drop the `Secure` cookie attribute so sessions work over plain HTTP.
    pub insecure_cookie: bool,
    pub session_ttl_minutes: i64,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:clothing.db".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: String::new(),
            insecure_cookie: false,
            session_ttl_minutes: 12 * 60,
        }
    }
}

impl fmt::Debug for BasicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicConfig")
            .field("listen_addr", &self.listen_addr)
            .field("database_url", &self.database_url)
            .field("loglevel", &self.loglevel)
            .field("cookie_secret", &"<redacted>")
            .field("insecure_cookie", &self.insecure_cookie)
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SeedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedAccount")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `LEDGER_*` environment variables
    /// (`__` separates nesting, e.g. `LEDGER_BASIC__DATABASE_URL`).
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
