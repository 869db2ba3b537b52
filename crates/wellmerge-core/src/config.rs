//! Runtime configuration read from the process environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How client and rig names are compared against the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Reference value contains the file value as a substring.
    #[default]
    Contains,
    /// Reference value equals the file value.
    Exact,
}

impl FromStr for MatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contains" | "like" => Ok(MatchMode::Contains),
            "exact" => Ok(MatchMode::Exact),
            other => Err(Error::Config(format!("unknown MATCH_MODE '{other}'"))),
        }
    }
}

/// How several candidate well names are reduced to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the last row the store returned.
    #[default]
    Last,
    /// Fail when the candidates disagree.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" => Ok(DuplicatePolicy::Last),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(Error::Config(format!("unknown DUPLICATE_POLICY '{other}'"))),
        }
    }
}

/// Verbosity requested through `LOGLEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    /// Anything else: no level chosen by the deployment.
    Unset,
}

impl LogLevel {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("INFO") => LogLevel::Info,
            Some("DEBUG") => LogLevel::Debug,
            _ => LogLevel::Unset,
        }
    }
}

/// Reference database connection settings.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Table holding `client_name`, `rig_name`, `job_date`, `well_name`.
    pub table: String,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("table", &self.table)
            .field("connect_timeout", &self.connect_timeout)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

/// Object storage backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `s3://`, `file:///root/dir` or `memory://`.
    pub uri: String,
    pub aws_region: Option<String>,
    pub retry_max_retries: usize,
    pub retry_initial_backoff_ms: u64,
    pub retry_max_backoff_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uri: "s3://".to_string(),
            aws_region: None,
            retry_max_retries: 3,
            retry_initial_backoff_ms: 200,
            retry_max_backoff_ms: 5_000,
        }
    }
}

impl StorageConfig {
    pub fn scheme(&self) -> Option<&str> {
        self.uri
            .split("://")
            .next()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Everything after `scheme://`.
    pub fn root(&self) -> &str {
        self.uri
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(self.uri.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct EnricherConfig {
    pub log_level: LogLevel,
    pub db: DbConfig,
    pub output_bucket: String,
    pub match_mode: MatchMode,
    pub duplicate_policy: DuplicatePolicy,
    pub storage: StorageConfig,
}

impl EnricherConfig {
    /// Read the configuration from the process environment.
    ///
    /// Required: `HOSTNAME`, `DBUSER`, `DBPWD`, `DBNAME`, `OUTPUT_BUCKET`.
    /// Optional: `LOGLEVEL`, `DBPORT`, `REFERENCE_TABLE`, `MATCH_MODE`,
    /// `DUPLICATE_POLICY`, `DB_CONNECT_TIMEOUT_SECS`, `DB_QUERY_TIMEOUT_SECS`,
    /// `STORAGE_URI`, `AWS_REGION`, `STORAGE_RETRY_MAX_RETRIES`,
    /// `STORAGE_RETRY_INITIAL_MS`, `STORAGE_RETRY_MAX_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{name} must be set")))
        };

        let db = DbConfig {
            host: required("HOSTNAME")?,
            port: parse_or(&lookup, "DBPORT", 3306)?,
            user: required("DBUSER")?,
            password: required("DBPWD")?,
            database: required("DBNAME")?,
            table: validate_table(lookup("REFERENCE_TABLE").as_deref().unwrap_or("client_master"))?,
            connect_timeout: Duration::from_secs(parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECS", 5)?),
            query_timeout: Duration::from_secs(parse_or(&lookup, "DB_QUERY_TIMEOUT_SECS", 10)?),
        };

        let defaults = StorageConfig::default();
        let storage = StorageConfig {
            uri: lookup("STORAGE_URI").unwrap_or(defaults.uri),
            aws_region: lookup("AWS_REGION"),
            retry_max_retries: parse_or(&lookup, "STORAGE_RETRY_MAX_RETRIES", defaults.retry_max_retries)?,
            retry_initial_backoff_ms: parse_or(
                &lookup,
                "STORAGE_RETRY_INITIAL_MS",
                defaults.retry_initial_backoff_ms,
            )?,
            retry_max_backoff_ms: parse_or(&lookup, "STORAGE_RETRY_MAX_MS", defaults.retry_max_backoff_ms)?,
        };

        Ok(Self {
            log_level: LogLevel::parse(lookup("LOGLEVEL").as_deref()),
            db,
            output_bucket: required("OUTPUT_BUCKET")?,
            match_mode: match lookup("MATCH_MODE") {
                Some(s) => s.parse()?,
                None => MatchMode::default(),
            },
            duplicate_policy: match lookup("DUPLICATE_POLICY") {
                Some(s) => s.parse()?,
                None => DuplicatePolicy::default(),
            },
            storage,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| Error::Config(format!("{name} has invalid value '{s}'"))),
        None => Ok(default),
    }
}

/// Table names cannot be bound as query parameters, so only plain
/// identifiers (optionally `schema.table`) are accepted.
fn validate_table(name: &str) -> Result<String> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|p| {
            !p.is_empty()
                && p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !p.starts_with(|c: char| c.is_ascii_digit())
        });
    if valid {
        Ok(name.to_string())
    } else {
        Err(Error::Config(format!("REFERENCE_TABLE '{name}' is not a valid table name")))
    }
}
