use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{KeyClassifier, KeyMatcher};

pub const CONFIG_FILE_NAME: &str = ".l10nrc.json";

/// Custom key group with an optional whole-value regex.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomPatternConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    pub keys: Vec<String>,
}

/// What to run for keys no category matches.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DefaultValidatorKind {
    /// Trailing-whitespace and parameter checks only.
    #[default]
    None,
    /// Treat the value as plain text.
    Text,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_property_dir")]
    pub property_dir: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_html_keys")]
    pub html_keys: Vec<String>,
    #[serde(default = "default_js_keys")]
    pub js_keys: Vec<String>,
    #[serde(default = "default_url_keys")]
    pub url_keys: Vec<String>,
    #[serde(default = "default_text_keys")]
    pub text_keys: Vec<String>,
    #[serde(default = "default_parametric_keys")]
    pub parametric_keys: Vec<String>,
    #[serde(default)]
    pub custom_patterns: Vec<CustomPatternConfig>,
    #[serde(default)]
    pub excluded_keys: Vec<String>,
    #[serde(default = "default_xhtml_schema")]
    pub xhtml_schema: String,
    #[serde(default = "default_js_double_quoted")]
    pub js_double_quoted: bool,
    #[serde(default)]
    pub default_validator: DefaultValidatorKind,
    #[serde(default)]
    pub dictionaries: Vec<String>,
    #[serde(default)]
    pub ignore_failure: bool,
}

fn default_property_dir() -> String {
    "src/main/resources".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["**/*.properties".to_string()]
}

fn default_html_keys() -> Vec<String> {
    vec![".text.".to_string()]
}

fn default_js_keys() -> Vec<String> {
    vec![".js.".to_string()]
}

fn default_url_keys() -> Vec<String> {
    vec![".url.".to_string()]
}

fn default_text_keys() -> Vec<String> {
    vec![".title.".to_string()]
}

fn default_parametric_keys() -> Vec<String> {
    vec![".param.".to_string()]
}

fn default_xhtml_schema() -> String {
    "xhtml1-transitional".to_string()
}

fn default_js_double_quoted() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            property_dir: default_property_dir(),
            includes: default_includes(),
            ignores: Vec::new(),
            html_keys: default_html_keys(),
            js_keys: default_js_keys(),
            url_keys: default_url_keys(),
            text_keys: default_text_keys(),
            parametric_keys: default_parametric_keys(),
            custom_patterns: Vec::new(),
            excluded_keys: Vec::new(),
            xhtml_schema: default_xhtml_schema(),
            js_double_quoted: default_js_double_quoted(),
            default_validator: DefaultValidatorKind::default(),
            dictionaries: Vec::new(),
            ignore_failure: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob in `includes`/`ignores`, any `/regex/` key
    /// pattern, or any custom value regex is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        KeyClassifier::from_config(self).context("Invalid key pattern configuration")?;
        KeyMatcher::new(&self.excluded_keys).context("Invalid pattern in 'excludedKeys'")?;
        KeyMatcher::new(&self.parametric_keys).context("Invalid pattern in 'parametricKeys'")?;

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
