//! Loader for source profiles with YAML + environment overlays.
//!
//! A config file lists the chat-share platforms the extractor knows about.
//! Each entry carries an `id`, an optional `enabled` flag and the flattened
//! [`SourceProfile`] fields; anything left out falls back to the DeepSeek
//! defaults:
//!
//! ```yaml
//! version: "1"
//! sources:
//!   - id: deepseek
//!   - id: deepseek-next
//!     display_name: DeepSeek
//!     markers:
//!       question: "div.user-bubble"
//! ```
//!
//! `SHARESCRAPE_`-prefixed environment variables (separator `__`) are merged
//! first, files and inline snippets are layered on top, and `${VAR}`
//! placeholders in any string are expanded last.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use sharescrape_common::{SharescrapeError, SourceProfile};
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SharescrapeConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

/// One configured platform.
#[derive(Debug, Deserialize)]
pub struct SourceSpec {
    pub id: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub profile: SourceProfile,
}

impl SourceSpec {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

impl SharescrapeConfig {
    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Like [`source`](Self::source) but reports missing or disabled ids as errors.
    pub fn require_source(&self, id: &str) -> sharescrape_common::Result<&SourceSpec> {
        match self.source(id) {
            Some(spec) if spec.is_enabled() => Ok(spec),
            Some(_) => Err(SharescrapeError::Config(format!("source `{id}` is disabled"))),
            None => Err(SharescrapeError::Config(format!("unknown source `{id}`"))),
        }
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = &SourceSpec> {
        self.sources.iter().filter(|s| s.is_enabled())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct SharescrapeConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for SharescrapeConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SharescrapeConfigLoader {
    /// Start from `SHARESCRAPE_` env overrides only.
    ///
    /// ```
    /// use sharescrape_config::SharescrapeConfigLoader;
    ///
    /// let config = SharescrapeConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nsources: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.sources.is_empty());
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("SHARESCRAPE").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use sharescrape_config::SharescrapeConfigLoader;
    ///
    /// let cfg = SharescrapeConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// sources:
    ///   - id: "deepseek"
    ///     markers:
    ///       question: "div.prompt"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// let spec = cfg.source("deepseek").unwrap();
    /// assert_eq!(spec.profile.model, "deepSeek");
    /// assert_eq!(spec.profile.markers.question, "div.prompt");
    /// assert_eq!(spec.profile.markers.paragraph, "p.ds-markdown-paragraph");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// `${VAR}` placeholders are expanded before the typed structs are built,
    /// so marker strings can be injected at deploy time.
    ///
    /// ```
    /// use sharescrape_config::SharescrapeConfigLoader;
    ///
    /// unsafe { std::env::set_var("DS_QUESTION_CLASS", "a1b2c3"); }
    ///
    /// let config = SharescrapeConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// version: "1"
    /// sources:
    ///   - id: "deepseek"
    ///     markers:
    ///       question: "div.${DS_QUESTION_CLASS}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.sources[0].profile.markers.question, "div.a1b2c3");
    ///
    /// unsafe { std::env::remove_var("DS_QUESTION_CLASS"); }
    /// ```
    pub fn load(self) -> Result<SharescrapeConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: SharescrapeConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        tracing::debug!(
            version = ?typed.version,
            sources = typed.sources.len(),
            "loaded sharescrape config"
        );
        Ok(typed)
    }
}
