//! Extraction settings.
//!
//! ```toml
//! include_declaration_files = false
//! type_declarations = true
//! example_language = "ts"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Also extract `.d.ts` files.
    pub include_declaration_files: bool,
    /// Emit records for classes, interfaces, enums and type aliases.
    pub type_declarations: bool,
    /// Info string of the fence put around unfenced `@example` bodies.
    pub example_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_declaration_files: false,
            type_declarations: false,
            example_language: "js".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("invalid docparser settings")
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }
}
