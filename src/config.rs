//! Configuration file support for channelscope
//!
//! Reads from .channelscope/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Input document locations
    #[serde(default)]
    pub input: InputConfig,

    /// Viewer server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Rendered dashboard output
    #[serde(default)]
    pub output: OutputConfig,
}

/// Paths to the JSON exports
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InputConfig {
    /// Channel analysis export
    #[serde(default = "default_analysis_path")]
    pub analysis: PathBuf,

    /// Media-kit export
    #[serde(default = "default_media_kit_path")]
    pub media_kit: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Viewer port. Default: 8640
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Directory for rendered dashboards. Default: "reports"
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_analysis_path() -> PathBuf {
    PathBuf::from("youtube_analysis_ui.json")
}

fn default_media_kit_path() -> PathBuf {
    PathBuf::from("youtube_media_kit.json")
}

fn default_port() -> u16 {
    8640
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            analysis: default_analysis_path(),
            media_kit: default_media_kit_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Load config from .channelscope/config.toml
    /// Returns default config if file doesn't exist
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_path() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str(&contents) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Find config.toml by walking up directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut dir = current_dir.as_path();

        loop {
            let config_path = dir.join(".channelscope").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.analysis, PathBuf::from("youtube_analysis_ui.json"));
        assert_eq!(config.server.port, 8640);
        assert_eq!(config.output.dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[input]
analysis = "data/analysis.json"

[server]
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.analysis, PathBuf::from("data/analysis.json"));
        // Unspecified fields keep their defaults
        assert_eq!(config.input.media_kit, PathBuf::from("youtube_media_kit.json"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.output.dir, PathBuf::from("reports"));
    }
}
