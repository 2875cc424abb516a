use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Content transformations applied before emptiness filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreprocessConfig {
    /// Strip fenced code blocks from every message
    #[serde(rename = "removeCodeBlocks", default)]
    pub remove_code_blocks: bool,
}

impl PreprocessConfig {
    /// Parse a JSON config document such as `{"removeCodeBlocks": true}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid preprocess config")
    }

    /// Load config from a JSON file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Flags given on the command line take precedence over the file
    pub fn with_overrides(self, remove_code_blocks: Option<bool>) -> Self {
        Self { remove_code_blocks: remove_code_blocks.unwrap_or(self.remove_code_blocks) }
    }
}
