use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use crate::errors::AppError;
use crate::subtitle::{ParseOptions, ResolveOptions};

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Tag assignment and parsing options
    #[serde(default)]
    pub positioning: PositioningConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Maximum number of files processed at once
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Options handed to the parser and the resolver
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct PositioningConfig {
    /// Strip every position marker before assigning tags
    #[serde(default)]
    pub clean: bool,

    /// Keep tags already present in the source
    #[serde(default)]
    pub ignore_existing: bool,

    /// Leave blocks with the default position unmarked
    #[serde(default)]
    pub omit_default: bool,

    /// Keep a pure white style color in ASS conversions
    #[serde(default)]
    pub keep_white: bool,
}

impl PositioningConfig {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            clean: self.clean,
            ignore_existing: self.ignore_existing,
            omit_default: self.omit_default,
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            keep_white: self.keep_white,
        }
    }
}

/// Where and how results are written
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Inserted between the input stem and `.srt`
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Write outputs here instead of next to each input
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Replace outputs that already exist
    #[serde(default)]
    pub force_overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            output_dir: None,
            force_overwrite: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_jobs() -> usize {
    4
}

fn default_suffix() -> String {
    ".pos".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("Config file not found at '{}', using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jobs == 0 {
            return Err(AppError::Config("jobs must be at least 1".to_string()));
        }

        let suffix = &self.output.suffix;
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(AppError::Config(format!("suffix must not contain path separators: {}", suffix)));
        }

        if suffix.is_empty() && self.output.output_dir.is_none() {
            return Err(AppError::Config(
                "an empty suffix requires an output directory".to_string()
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            positioning: PositioningConfig::default(),
            output: OutputConfig::default(),
            jobs: default_jobs(),
            log_level: LogLevel::default(),
        }
    }
}
