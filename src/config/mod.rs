use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Where records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Rest,
}

/// How transactional mail leaves the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    #[default]
    Outbox,
    Resend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub provider: MailProvider,
    #[serde(default = "default_mail_from")]
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default = "default_mail_api_url")]
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Outbox,
            from: default_mail_from(),
            reply_to: None,
            api_url: default_mail_api_url(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<RestConfig>,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_key: Option<String>,
    #[serde(default = "default_organisation")]
    pub organisation: String,
}

fn default_mail_from() -> String {
    "Youth Outreach <events@example.org>".to_string()
}
fn default_mail_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_organisation() -> String {
    "Youth Outreach Programme".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            backend: Backend::Sqlite,
            rest: None,
            mail: MailConfig::default(),
            server: ServerConfig::default(),
            portal_key: None,
            organisation: default_organisation(),
        }
    }
}

impl Config {
    /// Configuration directory: `$OUTREACH_HOME`, else `~/.outreach`.
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var("OUTREACH_HOME")
            && !dir.trim().is_empty()
        {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".outreach")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("outreach.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("outreach.sqlite")
    }

    /// Load the configuration file (defaults when missing), then apply
    /// environment overrides.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| {
                AppError::Config(format!("cannot parse {}: {e}", path.display()))
            })?
        } else {
            Config::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    /// Secrets and the port may come from the environment instead of the file.
    fn apply_env(&mut self) {
        if let Some(key) = secret_var("OUTREACH_PORTAL_KEY") {
            self.portal_key = Some(key);
        }
        if let Some(key) = secret_var("OUTREACH_MAIL_KEY") {
            self.mail.api_key = Some(key);
        }
        if let Some(key) = secret_var("OUTREACH_REST_KEY")
            && let Some(rest) = self.rest.as_mut()
        {
            rest.api_key = Some(key);
        }
        if let Some(port) = try_load::<u16>("OUTREACH_PORT") {
            self.server.port = port;
        }
    }

    /// Copy safe to print: secrets masked.
    pub fn redacted(&self) -> Self {
        let mut c = self.clone();
        c.portal_key = c.portal_key.as_ref().map(|_| "********".to_string());
        c.mail.api_key = c.mail.api_key.as_ref().map(|_| "********".to_string());
        if let Some(rest) = c.rest.as_mut() {
            rest.api_key = rest.api_key.as_ref().map(|_| "********".to_string());
        }
        c
    }

    /// Create the config directory, the config file (with a fresh portal
    /// key) and an empty database file. Returns the database path.
    ///
    /// In test mode nothing is written except the database file.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) if Path::new(name).is_absolute() => PathBuf::from(name),
            Some(name) => dir.join(name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            portal_key: Some(generate_portal_key()),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("cannot serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        } else {
            info("Test mode: configuration file not written");
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}

/// Random 32-hex-char key for the staff portal.
pub fn generate_portal_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn secret_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn try_load<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = env::var(key).ok()?;
    raw.trim()
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value '{raw}': {e}, ignoring");
        })
        .ok()
}
