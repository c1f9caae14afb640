//! Parse options and named processing configurations
//!
//! [ParseOptions] are the knobs the scanner consults while building text and comment
//! children. [ConfigRegistry] maps preset names to option sets so that the CLI (and
//! anything else that takes a name from the user) can select one with `--config`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options consulted while scanning markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Keep text runs verbatim. When off, runs are trimmed and whitespace-only runs dropped.
    pub preserve_whitespace: bool,
    /// Keep `<!-- -->` comments as children
    pub keep_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            preserve_whitespace: false,
            keep_comments: true,
        }
    }
}

impl ParseOptions {
    pub fn preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }

    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }
}

/// A named option preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub name: String,
    pub description: String,
    pub options: ParseOptions,
}

/// Registry of processing configurations
pub struct ConfigRegistry {
    configs: HashMap<String, ProcessingConfig>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        ConfigRegistry {
            configs: HashMap::new(),
        }
    }

    /// Register a configuration, replacing any with the same name
    pub fn register(&mut self, config: ProcessingConfig) {
        self.configs.insert(config.name.clone(), config);
    }

    pub fn get(&self, name: &str) -> Option<&ProcessingConfig> {
        self.configs.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// All configurations, sorted by name
    pub fn list_all(&self) -> Vec<&ProcessingConfig> {
        let mut configs: Vec<_> = self.configs.values().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ProcessingConfig {
            name: "default".into(),
            description: "Trim insignificant whitespace, keep comments".into(),
            options: ParseOptions::default(),
        });

        registry.register(ProcessingConfig {
            name: "verbatim".into(),
            description: "Keep every text run exactly as written".into(),
            options: ParseOptions::default().preserve_whitespace(true),
        });

        registry.register(ProcessingConfig {
            name: "compact".into(),
            description: "Trim whitespace and drop markup comments".into(),
            options: ParseOptions::default().keep_comments(false),
        });

        registry
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
