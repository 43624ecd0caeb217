// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration loaded from a RON file.
//!
//! Looks for `nodeflow.ron` in the working directory unless
//! `NODEFLOW_CONFIG` names another file. Every field is optional.

use nodeflow_editor_graph::evaluation::DEFAULT_STATEMENT_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "nodeflow.ron";

/// Environment variable overriding the config path
pub const CONFIG_ENV_VAR: &str = "NODEFLOW_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid RON for this schema
    #[error("Invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Window title
    pub window_title: String,
    /// Initial window size (logical pixels)
    pub window_size: [u32; 2],
    /// Minimum window size (logical pixels)
    pub min_window_size: [u32; 2],
    /// Height of the toolbar above the canvas
    pub toolbar_height: f32,
    /// Width of the output panel beside the canvas
    pub output_panel_width: f32,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Maximum statements the interpreter runs per program
    pub statement_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_title: "Nodeflow Editor".to_string(),
            window_size: [1280, 720],
            min_window_size: [640, 400],
            toolbar_height: 36.0,
            output_panel_width: 320.0,
            log_filter: "nodeflow_editor_app=debug,nodeflow_editor_graph=debug,wgpu=warn,naga=warn"
                .to_string(),
            statement_limit: DEFAULT_STATEMENT_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Path the config is read from
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load from [`EditorConfig::path`]
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_ron(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse from RON text
    pub fn from_ron(contents: &str) -> Result<Self> {
        Ok(ron::from_str(contents)?)
    }

    /// Space taken by the toolbar and output panel
    pub fn chrome(&self) -> egui::Vec2 {
        egui::vec2(self.output_panel_width, self.toolbar_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EditorConfig::from_ron("(window_title: \"Graphs\", statement_limit: 5)").unwrap();
        assert_eq!(config.window_title, "Graphs");
        assert_eq!(config.statement_limit, 5);
        assert_eq!(config.window_size, EditorConfig::default().window_size);
        assert_eq!(config.output_panel_width, 320.0);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let err = EditorConfig::from_ron("(window_size: \"big\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("nodeflow-config-that-does-not-exist.ron");
        let config = EditorConfig::load_from(&path).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("nodeflow-config-{}.ron", std::process::id()));
        std::fs::write(&path, "(toolbar_height: 50.0, output_panel_width: 200.0)").unwrap();

        let config = EditorConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.chrome(), egui::vec2(200.0, 50.0));
    }
}
