// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use diskpick_core::Importance;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_DIR: &str = "diskpick";
const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid min_importance in config: {0}")]
    Importance(#[from] diskpick_core::CoreError),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Minimum importance (0 through 3) of listed devices
    pub min_importance: u32,
    /// Output format of `blockdevs`
    pub format: String,
    /// Line format of `menu`
    pub menu_format: String,
    /// Menu program and its arguments, used when none is given on the command line
    pub menu: Vec<String>,
    pub log_level: LoggingLevel,
    pub log_to_disk: bool,
    /// User-named line templates
    pub formats: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_importance: 0,
            format: "json".to_string(),
            menu_format: "tabular".to_string(),
            menu: Vec::new(),
            log_level: LoggingLevel::Warn,
            log_to_disk: false,
            formats: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::parse(&path, &contents)
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.min_importance()?;
        Ok(config)
    }

    pub fn min_importance(&self) -> Result<Importance, ConfigError> {
        Ok(Importance::try_from(self.min_importance)?)
    }
}

/// `$XDG_CONFIG_HOME/diskpick/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join(CONFIG_DIR).join(CONFIG_FILE));
    }

    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    })
}
