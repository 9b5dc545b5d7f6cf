use crate::error::ShellError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable naming an alternative user config file.
pub const CONFIG_ENV_VAR: &str = "LINESHELL_CONFIG";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub prompt: String,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_level(),
            file: None,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

// User config: every field optional, merged over the defaults.

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    prompt: Option<String>,
    #[serde(default)]
    log: LogOverlay,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LogOverlay {
    level: Option<String>,
    file: Option<PathBuf>,
}

impl Config {
    /// Parse the embedded defaults.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load defaults, then merge the user's config file if there is one.
    ///
    /// A user file that fails to parse is reported and ignored.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        let Some(path) = Self::user_config_path() else {
            return config;
        };
        if !path.exists() {
            return config;
        }
        match Self::read_overlay(&path) {
            Ok(overlay) => config.apply_overlay(overlay),
            Err(e) => eprintln!("lineshell: {e}"),
        }
        config
    }

    /// `$LINESHELL_CONFIG`, else `~/.config/lineshell/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join(".config/lineshell/config.toml"))
    }

    fn read_overlay(path: &Path) -> Result<ConfigOverlay, ShellError> {
        let config_error = |message: String| ShellError::Config {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(prompt) = overlay.prompt {
            self.prompt = prompt;
        }
        if let Some(level) = overlay.log.level {
            self.log.level = level;
        }
        if let Some(file) = overlay.log.file {
            self.log.file = Some(file);
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
