//! Declarative policy configuration loaded from TOML.
//!
//! ```toml
//! strict = false
//! preflight_status = 200
//!
//! [defaults."*"]
//! allow_headers = "*"
//!
//! [resources."/hello"."http://client.example.org"]
//! allow_credentials = true
//! expose_headers = ["X-Custom-Server-Header"]
//! allow_headers = ["X-Requested-With", "Content-Type"]
//! max_age = 3600
//!
//! [methods."/hello".POST."http://client.example.org"]
//! allow_headers = ["Content-Type"]
//! ```

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::builder::CorsBuilder;
use crate::constants::value;
use crate::exposed_headers::ExposedHeaders;
use crate::options::ResourceOptions;
use crate::policy::OriginRules;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CORS config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CORS config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A list option: either `"*"` or an array of names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawListSetting")]
pub enum ListSetting {
    Any,
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawListSetting {
    Token(String),
    List(Vec<String>),
}

impl TryFrom<RawListSetting> for ListSetting {
    type Error = String;

    fn try_from(raw: RawListSetting) -> Result<Self, Self::Error> {
        match raw {
            RawListSetting::Token(token) if token == value::WILDCARD => Ok(Self::Any),
            RawListSetting::Token(token) => Err(format!(
                "expected \"*\" or a list of names, found \"{token}\""
            )),
            RawListSetting::List(values) => Ok(Self::List(values)),
        }
    }
}

/// One origin rule as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    pub allow_credentials: bool,
    pub expose_headers: Option<ListSetting>,
    pub allow_headers: Option<ListSetting>,
    /// Omitted means the methods routed to the resource.
    pub allow_methods: Option<ListSetting>,
    pub max_age: Option<u64>,
}

impl From<OptionsConfig> for ResourceOptions {
    fn from(config: OptionsConfig) -> Self {
        Self {
            allow_credentials: config.allow_credentials,
            expose_headers: match config.expose_headers {
                Some(ListSetting::Any) => ExposedHeaders::any(),
                Some(ListSetting::List(values)) => ExposedHeaders::list(values),
                None => ExposedHeaders::default(),
            },
            allow_headers: match config.allow_headers {
                Some(ListSetting::Any) => AllowedHeaders::any(),
                Some(ListSetting::List(values)) => AllowedHeaders::list(values),
                None => AllowedHeaders::default(),
            },
            allow_methods: config.allow_methods.map(|methods| match methods {
                ListSetting::Any => AllowedMethods::any(),
                ListSetting::List(values) => AllowedMethods::list(values),
            }),
            max_age: config.max_age,
        }
    }
}

/// Whole-engine configuration. Origin keys are patterns: a literal origin or `"*"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub strict: bool,
    pub reflect_wildcards: bool,
    pub preflight_status: u16,
    pub defaults: IndexMap<String, OptionsConfig>,
    pub resources: IndexMap<String, IndexMap<String, OptionsConfig>>,
    /// Resource, then method, then origin pattern.
    pub methods: IndexMap<String, IndexMap<String, IndexMap<String, OptionsConfig>>>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            strict: false,
            reflect_wildcards: false,
            preflight_status: 200,
            defaults: IndexMap::new(),
            resources: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }
}

impl CorsConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

fn origin_rules(origins: IndexMap<String, OptionsConfig>) -> OriginRules {
    origins
        .into_iter()
        .map(|(origin, options)| (origin, ResourceOptions::from(options)))
        .collect()
}

impl From<CorsConfig> for CorsBuilder {
    fn from(config: CorsConfig) -> Self {
        let mut builder = CorsBuilder::new()
            .strict(config.strict)
            .reflect_wildcards(config.reflect_wildcards)
            .preflight_status(config.preflight_status)
            .defaults(origin_rules(config.defaults));
        for (resource, origins) in config.resources {
            builder = builder.resource(resource, origin_rules(origins));
        }
        for (resource, methods) in config.methods {
            for (method, origins) in methods {
                builder = builder.method_rules(resource.as_str(), method, origin_rules(origins));
            }
        }
        builder
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
