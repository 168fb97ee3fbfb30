//! Shared configuration loader for texttype.
//!
//! `defaults/texttype.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. Applications layer
//! the user's file, an explicit `--config` file and per-flag overrides on top
//! via [`Loader`] before deserializing into [`TexttypeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use texttype_core::texttype::TypingOptions;

pub use config::{ConfigError, ValueKind};

const DEFAULT_TOML: &str = include_str!("../defaults/texttype.default.toml");

/// Top-level configuration consumed by texttype applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TexttypeConfig {
    pub typing: TypingOptions,
    pub slides: SlidesConfig,
    pub viewer: ViewerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlidesConfig {
    pub header_marker: String,
}

/// Terminal player presentation.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    pub cursor: String,
    pub gray_color: String,
    pub show_title: bool,
    pub advance: AdvanceMode,
    pub slide_gap_ms: u64,
}

impl ViewerConfig {
    /// `gray_color` as an RGB triple, `None` unless it is `#rrggbb`.
    pub fn gray_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.gray_color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// How the player moves from one slide to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvanceMode {
    Key,
    Auto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer the per-user file if one can be located.
    pub fn with_user_file(self) -> Self {
        match user_config_path() {
            Some(path) => self.with_optional_file(path),
            None => self,
        }
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TexttypeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TexttypeConfig, ConfigError> {
    Loader::new().build()
}

/// `texttype/config.toml` under the platform config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("texttype").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.typing, TypingOptions::default());
        assert_eq!(config.slides.header_marker, "СЛАЙД");
        assert_eq!(config.viewer.advance, AdvanceMode::Key);
        assert_eq!(config.viewer.cursor, "|");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("typing.typing_speed", 10i64)
            .expect("override to apply")
            .set_override("typing.random_jitter", 0.0)
            .expect("override to apply")
            .set_override("viewer.advance", "auto")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.typing.typing_speed, 10);
        assert_eq!(config.typing.random_jitter, 0.0);
        assert_eq!(config.typing.deleting_speed, 28);
        assert_eq!(config.viewer.advance, AdvanceMode::Auto);
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[typing]\nseed = 7\n\n[slides]\nheader_marker = \"## \"").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.typing.seed, Some(7));
        assert_eq!(config.typing.typing_speed, 55);
        assert_eq!(config.slides.header_marker, "## ");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/texttype.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/texttype.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.viewer.slide_gap_ms, 1500);
    }

    #[test]
    fn user_config_lives_under_the_platform_config_dir() {
        let path = user_config_path();
        if let Some(path) = &path {
            assert!(path.ends_with("texttype/config.toml"));
        }
        assert_eq!(
            path.as_deref().and_then(Path::parent).and_then(Path::parent),
            dirs::config_dir().as_deref()
        );
    }

    #[test]
    fn parses_gray_color() {
        let mut viewer = load_defaults().unwrap().viewer;
        assert_eq!(viewer.gray_rgb(), Some((0x8a, 0x8a, 0x8a)));
        viewer.gray_color = "gray".into();
        assert_eq!(viewer.gray_rgb(), None);
        viewer.gray_color = "#12345z".into();
        assert_eq!(viewer.gray_rgb(), None);
    }
}
