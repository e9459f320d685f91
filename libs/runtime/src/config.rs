//! Layered application configuration: built-in defaults, then an optional
//! YAML file, then `APP__`-prefixed environment variables
//! (`APP__SERVER__PORT=9000` sets `server.port`).

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::paths::resolve_home_dir;

pub const ENV_PREFIX: &str = "APP__";
const HOME_SUBDIR: &str = ".students-admin";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Raw per-module sections; each module deserializes its own.
    #[serde(default)]
    pub modules: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Empty means `$HOME/.students-admin`; absolute after loading.
    pub home_dir: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Target prefix → levels. `default` applies to everything else.
pub type LoggingConfig = BTreeMap<String, LogSection>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSection {
    pub console_level: String,
    /// Relative to the home dir; empty disables the file sink.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

pub fn default_logging_config() -> LoggingConfig {
    BTreeMap::from([(
        "default".to_string(),
        LogSection {
            console_level: "info".to_string(),
            file: "logs/students-admin.log".to_string(),
            file_level: "debug".to_string(),
            max_size_mb: Some(100),
        },
    )])
}

/// Flags that win over every configuration layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    /// 1 = debug, 2 or more = trace on the console.
    pub verbose: u8,
}

impl AppConfig {
    /// Defaults (with the stock logging section), then the file when given,
    /// then the environment. The home dir is resolved and created.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = AppConfig {
            logging: default_logging_config(),
            ..Default::default()
        };
        let mut figment = Figment::from(Serialized::defaults(defaults));

        if let Some(path) = file {
            // figment reads a missing file as empty
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let mut config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| match file {
                Some(path) => format!("Failed to load config from {}", path.display()),
                None => "Failed to load config from the environment".to_string(),
            })?;

        let configured = Some(config.server.home_dir.trim())
            .filter(|h| !h.is_empty())
            .map(str::to_string);
        let home = resolve_home_dir(configured, HOME_SUBDIR, true)
            .context("Failed to resolve server.home_dir")?;
        config.server.home_dir = home.to_string_lossy().into_owned();

        Ok(config)
    }

    /// Typed section of one module; absent sections yield `T::default()`.
    pub fn module<T>(&self, name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.modules
            .get(name)
            .map(|raw| {
                serde_json::from_value(raw.clone())
                    .with_context(|| format!("Invalid configuration for module '{name}'"))
            })
            .unwrap_or_else(|| Ok(T::default()))
    }

    pub fn apply_overrides(&mut self, cli: CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        let level = match cli.verbose {
            0 => return,
            1 => "debug",
            _ => "trace",
        };
        self.logging
            .entry("default".to_string())
            .or_insert_with(|| LogSection {
                console_level: String::new(),
                file: String::new(),
                file_level: String::new(),
                max_size_mb: None,
            })
            .console_level = level.to_string();
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }
}
