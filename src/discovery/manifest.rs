//! Project manifest (npconvert.yaml) parsing.
//!
//! The manifest holds project defaults for the CLI: where to look for save
//! files, which plugin format they are in, and where and how converted
//! files are written. Command-line flags override every field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::convert::{ConvertOptions, MalformedPolicy, SourceFormat};
use crate::error::{ConvertError, Result};

/// File format of converted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// FancyNPCs `npcs.yml` document.
    #[default]
    Yaml,
    /// JSON response envelope with data and stats.
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yml",
            OutputFormat::Json => "json",
        }
    }
}

/// Project manifest loaded from npconvert.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Files or directories to scan for save files.
    /// Defaults to current directory if empty.
    pub sources: Vec<String>,

    /// Plugin format of the save files.
    pub source: SourceFormat,

    /// Output directory for converted files.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Output file format.
    pub format: OutputFormat,

    /// What to do with NPC entries missing required fields.
    pub on_malformed: MalformedPolicy,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("converted")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            source: SourceFormat::default(),
            output: default_output(),
            format: OutputFormat::default(),
            on_malformed: MalformedPolicy::default(),
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from an npconvert.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| ConvertError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check npconvert.yaml syntax".to_string()),
        })
    }

    /// Conversion options described by this manifest.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            on_malformed: self.on_malformed,
        }
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.contains(&format!("/{}/", dir))
                    || path.starts_with(&format!("{}/", dir));
            }
            return path.contains(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }

    /// Get effective source paths, defaulting to current directory.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }
}
