use crate::error::{QuoteError, Result};
use crate::render::Theme;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_QUOTES_DIR: &str = "quotes";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Overrides the data directory (favorites and config).
pub const HOME_ENV: &str = "QUOTEBOOK_HOME";

/// Settable keys, as used by `quotebook config <key> <value>`.
pub const CONFIG_KEYS: [&str; 4] = ["quotes-dir", "font", "theme", "bind"];

/// Configuration for quotebook, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotebookConfig {
    /// Directory holding the quote Markdown files. Relative paths resolve
    /// against the working directory.
    #[serde(default = "default_quotes_dir")]
    pub quotes_dir: PathBuf,

    /// Font used for exported images. Without one, text is drawn as blocks.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    #[serde(default = "default_theme")]
    pub default_theme: String,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_quotes_dir() -> PathBuf {
    PathBuf::from(DEFAULT_QUOTES_DIR)
}

fn default_theme() -> String {
    Theme::default().name().to_string()
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

impl Default for QuotebookConfig {
    fn default() -> Self {
        Self {
            quotes_dir: default_quotes_dir(),
            font_path: None,
            default_theme: default_theme(),
            bind_addr: default_bind_addr(),
        }
    }
}

impl QuotebookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuoteError::Io)?;
        let config: QuotebookConfig =
            serde_json::from_str(&content).map_err(QuoteError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QuoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QuoteError::Serialization)?;
        fs::write(config_path, content).map_err(QuoteError::Io)?;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        Theme::resolve(&self.default_theme)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "quotes-dir" => Some(self.quotes_dir.display().to_string()),
            "font" => Some(
                self.font_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "theme" => Some(self.default_theme.clone()),
            "bind" => Some(self.bind_addr.clone()),
            _ => None,
        }
    }

    /// Sets `key`, validating the value. An empty font value clears the font.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "quotes-dir" => {
                if value.trim().is_empty() {
                    return Err("quotes-dir cannot be empty".to_string());
                }
                self.quotes_dir = PathBuf::from(value);
            }
            "font" => {
                self.font_path = (!value.trim().is_empty()).then(|| PathBuf::from(value));
            }
            "theme" => {
                let theme: Theme = value.parse().map_err(|e: QuoteError| e.to_string())?;
                self.default_theme = theme.name().to_string();
            }
            "bind" => {
                value
                    .parse::<SocketAddr>()
                    .map_err(|e| format!("Invalid bind address '{}': {}", value, e))?;
                self.bind_addr = value.to_string();
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

/// The data directory: `$QUOTEBOOK_HOME` if set, else the platform data dir.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "quotebook", "quotebook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| QuoteError::Config("Could not determine data directory".to_string()))
}
