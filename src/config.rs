//! Configuration file support for event-planner.
//!
//! Provides YAML-based configuration through `event-planner.config.yml`
//! files, and the resolution of the effective settings from the command
//! line, the environment, the file and the defaults, in that order.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::filesystem::default_session_path;
use crate::adapters::outbound::network::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::application::dto::OutputFormat;
use crate::application::stores::DEFAULT_POLL_INTERVAL;
use crate::planning::services::Locale;
use crate::shared::error::PlannerError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "event-planner.config.yml";
pub const API_URL_ENV: &str = "EVENT_PLANNER_API_URL";
pub const TOKEN_ENV: &str = "EVENT_PLANNER_TOKEN";

const MIN_POLL_MS: u64 = 100;

/// Where the authentication token lives between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStorage {
    /// Session file on disk
    #[default]
    Local,
    /// In memory, gone when the process exits
    Session,
}

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub session_file: Option<PathBuf>,
    pub session_storage: Option<SessionStorage>,
    pub history_poll_ms: Option<u64>,
    pub locale: Option<Locale>,
    pub format: Option<OutputFormat>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(url) = &config.api_url {
        validate_api_url(url)?;
    }
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default of {} seconds.",
            DEFAULT_TIMEOUT.as_secs()
        );
    }
    if let Some(poll) = config.history_poll_ms {
        if poll < MIN_POLL_MS {
            bail!(
                "Invalid config: history_poll_ms must be at least {} (got {}).",
                MIN_POLL_MS,
                poll
            );
        }
    }
    Ok(())
}

fn validate_api_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(PlannerError::InvalidConfig {
            message: format!(
                "api_url must start with http:// or https:// (got '{}')",
                url
            ),
        }
        .into())
    }
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub format: Option<OutputFormat>,
    pub locale: Option<Locale>,
    pub session_file: Option<PathBuf>,
}

/// Effective settings of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub session_file: PathBuf,
    pub session_storage: SessionStorage,
    pub history_poll: Duration,
    pub locale: Locale,
    pub format: OutputFormat,
    /// Token from the environment, used instead of the stored session
    pub token: Option<String>,
}

impl ResolvedConfig {
    /// Command line first, then the environment, then the file, then defaults
    pub fn resolve(
        file: Option<ConfigFile>,
        cli: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let api_url = cli
            .api_url
            .or_else(|| non_empty(API_URL_ENV))
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_api_url(&api_url)?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            session_file: cli
                .session_file
                .or(file.session_file)
                .unwrap_or_else(default_session_path),
            session_storage: file.session_storage.unwrap_or_default(),
            history_poll: file
                .history_poll_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            locale: cli.locale.or(file.locale).unwrap_or_default(),
            format: cli.format.or(file.format).unwrap_or_default(),
            token: non_empty(TOKEN_ENV),
        })
    }

    /// Reads the real process environment
    pub fn from_env(file: Option<ConfigFile>, cli: CliOverrides) -> Result<Self> {
        Self::resolve(file, cli, |key| std::env::var(key).ok())
    }
}
