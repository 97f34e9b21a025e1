use crate::analysis::kwic::DEFAULT_WINDOW_SIZE;
use crate::math::DEFAULT_DECIMALS;
use crate::parser::preprocess::{
    DEFAULT_ENTRY_MARKER, DEFAULT_METADATA_PREFIXES, DEFAULT_SAMPLE_LENGTH,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const LOCAL_CONFIG_FILE: &str = ".corpuskit.toml";
const MAX_DECIMALS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("entry_marker must not be empty")]
    EmptyMarker,
    #[error("ngram_size must be at least 1")]
    ZeroNgramSize,
    #[error("top_n must be at least 1")]
    ZeroTopN,
    #[error("decimals must be at most 20, got {0}")]
    TooManyDecimals(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Characters of context on each side of a KWIC match
    pub window_size: usize,
    pub entry_marker: String,
    pub metadata_prefixes: Vec<String>,
    pub sample_length: usize,
    pub ngram_size: usize,
    pub top_n: usize,
    pub decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            entry_marker: DEFAULT_ENTRY_MARKER.to_string(),
            metadata_prefixes: DEFAULT_METADATA_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            sample_length: DEFAULT_SAMPLE_LENGTH,
            ngram_size: 2,
            top_n: 20,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

/// One config file as written: only the keys it sets are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigLayer {
    pub window_size: Option<usize>,
    pub entry_marker: Option<String>,
    pub metadata_prefixes: Option<Vec<String>>,
    pub sample_length: Option<usize>,
    pub ngram_size: Option<usize>,
    pub top_n: Option<usize>,
    pub decimals: Option<usize>,
}

impl ConfigLayer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Config {
    /// Load configuration with priority: explicit file or local config > global config > defaults.
    /// CLI flags are applied by the caller afterwards.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut paths = Vec::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                paths.push(global_path);
            }
        }

        match explicit {
            Some(path) => paths.push(path.to_path_buf()),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_path.exists() {
                    paths.push(local_path);
                }
            }
        }

        Self::from_layers(&paths)
    }

    /// Defaults overlaid by each file in turn; later files win.
    pub fn from_layers<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Self::default();
        for path in paths {
            let path = path.as_ref();
            debug!("loading config from {}", path.display());
            config.apply(ConfigLayer::from_file(path)?);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_layers(&[path])
    }

    /// Overwrite every field the layer sets, even with a default value.
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(window_size) = layer.window_size {
            self.window_size = window_size;
        }
        if let Some(entry_marker) = layer.entry_marker {
            self.entry_marker = entry_marker;
        }
        if let Some(metadata_prefixes) = layer.metadata_prefixes {
            self.metadata_prefixes = metadata_prefixes;
        }
        if let Some(sample_length) = layer.sample_length {
            self.sample_length = sample_length;
        }
        if let Some(ngram_size) = layer.ngram_size {
            self.ngram_size = ngram_size;
        }
        if let Some(top_n) = layer.top_n {
            self.top_n = top_n;
        }
        if let Some(decimals) = layer.decimals {
            self.decimals = decimals;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entry_marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        if self.ngram_size == 0 {
            return Err(ConfigError::ZeroNgramSize);
        }
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::TooManyDecimals(self.decimals));
        }
        Ok(())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "corpuskit").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
