//! Generator configuration (`compactgen.toml`)
//!
//! ```toml
//! [generator]
//! language = "rust"
//! output_dir = "generated"
//!
//! [java]
//! hints = true
//!
//! [rust]
//! runtime_crate = "compactgen_runtime"
//! emit_mod = true
//!
//! [rust.externals]
//! "com.example.money.Money" = "crate::external::Money"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use crate::error::{EmissionError, EmissionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Target language of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Rust,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Rust => "rust",
        }
    }
}

impl FromStr for Language {
    type Err = EmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "rust" => Ok(Language::Rust),
            _ => Err(EmissionError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of `compactgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub java: JavaConfig,

    #[serde(default)]
    pub rust: RustConfig,
}

/// `[generator]`: settings shared by every backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    /// Language used when the command line does not name one
    #[serde(default)]
    pub language: Option<Language>,

    /// Output directory, relative to the configuration file
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// `[java]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JavaConfig {
    /// Print serializer registration hints after generation
    #[serde(default = "default_true")]
    pub hints: bool,
}

/// `[rust]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RustConfig {
    /// Path under which generated code reaches the runtime crate
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Rust paths for external schema types, keyed by qualified name
    #[serde(default)]
    pub externals: BTreeMap<String, String>,

    /// Emit `mod.rs` declaring every generated module
    #[serde(default = "default_true")]
    pub emit_mod: bool,
}

fn default_true() -> bool {
    true
}

fn default_runtime_crate() -> String {
    "compactgen_runtime".to_string()
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            hints: default_true(),
        }
    }
}

impl Default for RustConfig {
    fn default() -> Self {
        Self {
            runtime_crate: default_runtime_crate(),
            externals: BTreeMap::new(),
            emit_mod: default_true(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text. Empty text yields the defaults.
    pub fn from_toml_str(text: &str) -> EmissionResult<Self> {
        Self::parse_toml(text).map_err(|err| EmissionError::Config(err.to_string()))
    }

    fn parse_toml(text: &str) -> Result<Self, toml::de::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(text)
    }

    /// Load configuration from a file.
    ///
    /// A relative `output_dir` is taken relative to the file's directory.
    pub fn load(path: &Path) -> EmissionResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| EmissionError::Config(format!("{}: {err}", path.display())))?;
        let mut config = Self::parse_toml(&text)
            .map_err(|err| EmissionError::Config(format!("{}: {err}", path.display())))?;

        if let Some(output_dir) = &config.generator.output_dir
            && output_dir.is_relative()
            && let Some(base) = path.parent()
        {
            config.generator.output_dir = Some(base.join(output_dir));
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
