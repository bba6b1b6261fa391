//! MKML configuration
//!
//! Settings are read from `mkml.toml` in the working directory, then
//! overridden by `MKML_*` environment variables. Every field has a default,
//! so a missing file or a partial one is never an error on the default path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "mkml.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MkmlConfig {
    pub window: WindowConfig,
    pub text: TextConfig,
    pub scroll: ScrollConfig,
    pub style: StyleConfig,
}

/// Host window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Text measurement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// TrueType/OpenType font used for measurement. Without one, a fixed
    /// advance per grapheme is assumed.
    pub font: Option<PathBuf>,
    /// Advance per grapheme as a fraction of the font size (fallback measurer).
    pub advance_ratio: f32,
    /// Line height as a fraction of the font size (fallback measurer).
    pub line_height_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Pixels per wheel line.
    pub speed: f32,
    /// Fraction of the distance to a boundary recovered per step near it.
    pub damping: f32,
    pub scrollbar_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Stylesheet applied on startup.
    pub stylesheet: Option<PathBuf>,
    /// Reject the whole sheet on a malformed numeric value instead of
    /// skipping the offending rule.
    pub strict: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "MKML Application".to_string(), width: 800, height: 600 }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { font: None, advance_ratio: 0.6, line_height_ratio: 1.2 }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { speed: 30.0, damping: 0.3, scrollbar_width: 8.0 }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self { stylesheet: None, strict: true }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

impl MkmlConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Load `mkml.toml` from the working directory. A missing file yields the
    /// defaults silently; an unreadable or malformed one is logged and also
    /// yields the defaults.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(err) => {
                tracing::warn!(error = %err, "using default configuration");
                Self::default()
            }
        }
    }

    /// Environment variables take precedence over file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(title) = std::env::var("MKML_TITLE") {
            self.window.title = title;
        }
        if let Some(w) = env_parse("MKML_WIDTH") {
            self.window.width = w;
        }
        if let Some(h) = env_parse("MKML_HEIGHT") {
            self.window.height = h;
        }

        if let Ok(font) = std::env::var("MKML_FONT") {
            self.text.font = Some(PathBuf::from(font));
        }
        if let Some(r) = env_parse("MKML_ADVANCE_RATIO") {
            self.text.advance_ratio = r;
        }
        if let Some(r) = env_parse("MKML_LINE_HEIGHT_RATIO") {
            self.text.line_height_ratio = r;
        }

        if let Some(s) = env_parse("MKML_SCROLL_SPEED") {
            self.scroll.speed = s;
        }
        if let Some(d) = env_parse("MKML_SCROLL_DAMPING") {
            self.scroll.damping = d;
        }
        if let Some(w) = env_parse("MKML_SCROLLBAR_WIDTH") {
            self.scroll.scrollbar_width = w;
        }

        if let Ok(path) = std::env::var("MKML_STYLESHEET") {
            self.style.stylesheet = Some(PathBuf::from(path));
        }
        if let Ok(val) = std::env::var("MKML_STRICT_CSS") {
            self.style.strict = env_flag(&val);
        }
    }

    /// Defaults, then `mkml.toml`, then the environment.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
