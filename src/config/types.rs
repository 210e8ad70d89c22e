use serde::Deserialize;
use std::path::Path;

use crate::frame::{FrameTreeOptions, LastFramePolicy, SplitFocus};

const VALID_SPLIT_FOCUS: &[&str] = &["if_target_active", "always"];
const VALID_LAST_FRAME: &[&str] = &["reject", "ignore"];

const DEFAULT_CONFIG: &str = r#"# frametree configuration

[frames]
# Pane type given to the root frame on startup and after a reset.
default_pane_type = "cm"
# Which frame is active after a split: "if_target_active" or "always".
split_focus = "if_target_active"
# Closing the only remaining frame: "reject" or "ignore".
last_frame = "reject"
"#;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub frames: FramesConfig,
}

/// Frame tree behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct FramesConfig {
    pub default_pane_type: String,
    pub split_focus: String,
    pub last_frame: String,
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs (unknown keys are ignored) ───────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    frames: RawFramesConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawFramesConfig {
    default_pane_type: String,
    split_focus: String,
    last_frame: String,
}

impl Default for RawFramesConfig {
    fn default() -> Self {
        let frames = FramesConfig::default();
        Self {
            default_pane_type: frames.default_pane_type,
            split_focus: frames.split_focus,
            last_frame: frames.last_frame,
        }
    }
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            default_pane_type: "cm".to_string(),
            split_focus: "if_target_active".to_string(),
            last_frame: "reject".to_string(),
        }
    }
}

// ── Config implementation ───────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let config = Self {
            frames: FramesConfig {
                default_pane_type: raw.frames.default_pane_type,
                split_focus: raw.frames.split_focus,
                last_frame: raw.frames.last_frame,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames.default_pane_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_pane_type must not be empty".to_string(),
            ));
        }

        if !VALID_SPLIT_FOCUS.contains(&self.frames.split_focus.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown split_focus '{}', valid values: {}",
                self.frames.split_focus,
                VALID_SPLIT_FOCUS.join(", ")
            )));
        }

        if !VALID_LAST_FRAME.contains(&self.frames.last_frame.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown last_frame '{}', valid values: {}",
                self.frames.last_frame,
                VALID_LAST_FRAME.join(", ")
            )));
        }

        Ok(())
    }

    /// Options for a frame tree manager built from this config.
    pub fn frame_options(&self) -> FrameTreeOptions {
        let split_focus = match self.frames.split_focus.as_str() {
            "always" => SplitFocus::Always,
            _ => SplitFocus::IfTargetActive,
        };
        let last_frame = match self.frames.last_frame.as_str() {
            "ignore" => LastFramePolicy::Ignore,
            _ => LastFramePolicy::Reject,
        };
        FrameTreeOptions {
            default_pane_type: self.frames.default_pane_type.clone(),
            split_focus,
            last_frame,
        }
    }

    /// The default config file, with comments.
    pub fn print_default() -> &'static str {
        DEFAULT_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── Default tests ───────────────────────────────────────────────

    #[test]
    fn default_pane_type() {
        let config = Config::default();
        assert_eq!(config.frames.default_pane_type, "cm");
    }

    #[test]
    fn default_policies() {
        let config = Config::default();
        assert_eq!(config.frames.split_focus, "if_target_active");
        assert_eq!(config.frames.last_frame, "reject");
    }

    #[test]
    fn default_frame_options_match_manager_defaults() {
        assert_eq!(Config::default().frame_options(), FrameTreeOptions::default());
    }

    #[test]
    fn printed_default_parses_to_default() {
        let config = Config::from_toml(Config::print_default()).unwrap();
        assert_eq!(config, Config::default());
    }

    // ── TOML parsing tests ──────────────────────────────────────────

    #[test]
    fn parse_complete_toml() {
        let toml = r#"
[frames]
default_pane_type = "terminal"
split_focus = "always"
last_frame = "ignore"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.frames.default_pane_type, "terminal");
        let options = config.frame_options();
        assert_eq!(options.default_pane_type, "terminal");
        assert_eq!(options.split_focus, SplitFocus::Always);
        assert_eq!(options.last_frame, LastFramePolicy::Ignore);
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let toml = r#"
[frames]
last_frame = "ignore"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.frames.last_frame, "ignore");
        assert_eq!(config.frames.default_pane_type, "cm");
        assert_eq!(config.frames.split_focus, "if_target_active");
    }

    #[test]
    fn parse_empty_toml_uses_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_unknown_keys_ignored() {
        let toml = r#"
[frames]
default_pane_type = "cm"
unknown_key = "value"

[unknown_section]
foo = "bar"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.frames.default_pane_type, "cm");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::from_toml("[frames\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    // ── Validation tests ────────────────────────────────────────────

    #[test]
    fn invalid_empty_pane_type() {
        let toml = r#"
[frames]
default_pane_type = "  "
"#;
        let result = Config::from_toml(toml);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn invalid_split_focus() {
        let toml = r#"
[frames]
split_focus = "sometimes"
"#;
        let result = Config::from_toml(toml);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_last_frame() {
        let toml = r#"
[frames]
last_frame = "explode"
"#;
        let result = Config::from_toml(toml);
        assert!(result.is_err());
    }

    // ── File loading tests ──────────────────────────────────────────

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frametree.toml");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            f.write_all(b"[frames]\ndefault_pane_type = \"markdown\"\n").unwrap();
        }
        let config = Config::load(&path).unwrap();
        assert_eq!(config.frames.default_pane_type, "markdown");
        assert_eq!(config.frames.last_frame, "reject");
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    // ── ConfigError display test ────────────────────────────────────

    #[test]
    fn config_error_display() {
        let err = ConfigError::Validation("default_pane_type must not be empty".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("default_pane_type must not be empty"));
    }
}
