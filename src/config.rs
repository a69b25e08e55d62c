//! Runtime settings: JSON file, then command-line overrides, then defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub assets: PathBuf,
    /// Window size; `None` uses the scene's own preference
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub show_fps: bool,
    /// Seconds between frame-rate reports
    pub fps_interval: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("assets"),
            width: None,
            height: None,
            title: None,
            show_fps: true,
            fps_interval: 1.0,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File named by `--config` (if any) with command-line flags on top
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_cli(cli);
        Ok(settings)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(assets) = &cli.assets {
            self.assets = assets.clone();
        }
        if cli.width.is_some() {
            self.width = cli.width;
        }
        if cli.height.is_some() {
            self.height = cli.height;
        }
        if cli.no_fps {
            self.show_fps = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "assets": "media", "width": 640 }"#).unwrap();
        assert_eq!(settings.assets, PathBuf::from("media"));
        assert_eq!(settings.width, Some(640));
        assert_eq!(settings.height, None);
        assert!(settings.show_fps);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut settings = Settings {
            assets: PathBuf::from("media"),
            width: Some(640),
            ..Settings::default()
        };
        let cli = Cli::try_parse_from(["scene-sketches", "--width", "1280", "--no-fps"]).unwrap();
        settings.apply_cli(&cli);
        assert_eq!(settings.assets, PathBuf::from("media"));
        assert_eq!(settings.width, Some(1280));
        assert!(!settings.show_fps);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/no/such/settings.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
