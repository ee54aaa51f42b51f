use std::{str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
    pub disable_auth: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub rebuild_region_tree_on_startup: bool,
}

impl ApplicationSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

/// Tuning for the proximity search.
#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    pub radius_km: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { radius_km: 3.0 }
    }
}

impl SearchSettings {
    pub fn radius_meters(&self) -> f64 {
        self.radius_km * 1_000.0
    }
}

/// Region hierarchy cache behaviour. Both durations are optional; without them
/// the cached tree lives until the next explicit rebuild. A TTL needs a shorter
/// refresh interval, otherwise the tree expires and is never rebuilt.
#[derive(Deserialize, Clone, Debug)]
pub struct CacheSettings {
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    pub region_tree_ttl_secs: Option<u64>,
    pub refresh_interval_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: default_cache_capacity(),
            region_tree_ttl_secs: None,
            refresh_interval_secs: None,
        }
    }
}

impl CacheSettings {
    pub fn region_tree_ttl(&self) -> Option<Duration> {
        self.region_tree_ttl_secs.map(Duration::from_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let Some(ttl) = self.region_tree_ttl() else {
            return Ok(());
        };
        match self.refresh_interval() {
            Some(interval) if interval < ttl => Ok(()),
            _ => Err(SettingsError::ExpiringRegionTree),
        }
    }
}

fn default_cache_capacity() -> u64 {
    64
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
    #[error("unknown APP_ENVIRONMENT '{0}'")]
    UnknownEnvironment(String),
    #[error("cache.region_tree_ttl_secs requires a shorter cache.refresh_interval_secs")]
    ExpiringRegionTree,
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub fn read_config() -> Result<Settings, SettingsError> {
    let base_path = std::env::current_dir()?;
    let config_directory = base_path.join("config");

    let environment_name = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&environment_name)
        .map_err(|_| SettingsError::UnknownEnvironment(environment_name))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(config_directory.join(environment_filename)).required(false))
        .add_source(
            config::Environment::with_prefix("JOBSEARCH")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings.cache.validate()?;
    Ok(settings)
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
