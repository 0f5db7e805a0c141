//! Configuration file support
//!
//! ```toml
//! [repl]
//! prompt = "aaa> "
//! history_file = ".aaa_history"
//!
//! [globals]
//! pi = 3.141592653589793
//! answer = 42
//! ```

use indexmap::IndexMap;
use miette::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::interp::{SharedSymbolTable, SymbolTable, Value};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub repl: ReplConfig,
    /// Variables defined before any input runs
    pub globals: IndexMap<String, Number>,
}

/// REPL settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    pub prompt: String,
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "aaa> ".to_string(),
            history_file: None,
        }
    }
}

/// A numeric config value; TOML integers stay integers
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl Config {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read config {}: {}", path.display(), e))?;
        let config = Self::parse(&text)
            .map_err(|e| miette::miette!("Invalid config {}: {}", path.display(), e))?;
        tracing::debug!(
            "Loaded config {} ({} globals)",
            path.display(),
            config.globals.len()
        );
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Fresh symbol table holding the configured globals
    pub fn globals_table(&self) -> SharedSymbolTable {
        let mut table = SymbolTable::new();
        for (name, value) in &self.globals {
            table.set(name.clone(), (*value).into());
        }
        table.shared()
    }
}
