//! clozegen configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::GeneratorConfig;
use crate::quiz::{QuizSettings, TextFormat, DEFAULT_CATEGORY};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE: &str = "clozegen.toml";

/// Top-level clozegen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozegenConfig {
    /// Moodle category the questions are imported into.
    #[serde(default = "default_category")]
    pub category: String,
    /// Format of the question text.
    #[serde(default)]
    pub text_format: TextFormat,
    /// Penalty factor per wrong try.
    #[serde(default)]
    pub penalty: f64,
    /// Suffix of the first question name.
    #[serde(default)]
    pub first_index: usize,
    /// Optional cap on questions per problem.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Directory the XML files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ClozegenConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            text_format: TextFormat::default(),
            penalty: 0.0,
            first_index: 0,
            limit: None,
            output_dir: default_output_dir(),
        }
    }
}

impl ClozegenConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.penalty),
            "penalty must be between 0.0 and 1.0, got {}",
            self.penalty
        );
        anyhow::ensure!(!self.category.trim().is_empty(), "category must not be empty");
        Ok(())
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            quiz: QuizSettings {
                category: self.category.clone(),
                text_format: self.text_format,
                penalty: self.penalty,
            },
            first_index: self.first_index,
            limit: self.limit,
        }
    }
}

/// Load configuration from `./clozegen.toml`, or defaults when absent.
pub fn load_config() -> Result<ClozegenConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or fall back to the default location.
///
/// An explicit path must exist.
pub fn load_config_from(path: Option<&Path>) -> Result<ClozegenConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        local.exists().then_some(local)
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ClozegenConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => {
            tracing::debug!("no {CONFIG_FILE} found, using defaults");
            ClozegenConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}
