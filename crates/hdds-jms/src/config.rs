// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Destination set configuration.
//!
//! Supports both programmatic and file-based configuration.

use crate::destination::{Destination, TOPIC_TYPE};
use crate::error::ManagementError;
use crate::naming::{normalize_name, NamingContext};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Destination '{name}': {source}")]
    Destination {
        name: String,
        #[source]
        source: ManagementError,
    },
}

/// A set of destinations to manage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationsConfig {
    /// Object name domain for registered destinations.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Destinations to configure.
    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
}

fn default_domain() -> String {
    "hdds.jms".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_type() -> String {
    TOPIC_TYPE.to_string()
}

impl Default for DestinationsConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            log_level: default_log_level(),
            destinations: Vec::new(),
        }
    }
}

impl DestinationsConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration as a whole.
    ///
    /// Per-destination attribute checks happen in [`build`](Self::build).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destinations.is_empty() {
            return Err(ConfigError::Invalid("No destinations configured".into()));
        }
        if self.domain.trim().is_empty() {
            return Err(ConfigError::Invalid("Domain must not be empty".into()));
        }

        let mut names = HashSet::new();
        let mut jndi_names = HashSet::new();
        for (i, dest) in self.destinations.iter().enumerate() {
            if dest.name.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Destination {} has empty name",
                    i
                )));
            }
            if !names.insert(dest.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Duplicate destination name '{}'",
                    dest.name
                )));
            }
            // Names that normalize to the same binding would collide at start.
            if let Ok(key) = normalize_name(&dest.jndi_name) {
                if !jndi_names.insert(key) {
                    return Err(ConfigError::Invalid(format!(
                        "Duplicate JNDI name '{}' (destination '{}')",
                        dest.jndi_name, dest.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Add a destination.
    pub fn add_destination(&mut self, dest: DestinationConfig) {
        self.destinations.push(dest);
    }

    /// Build stopped destinations bound to `naming`.
    ///
    /// Every value goes through the destination setters, so the same
    /// per-field rules apply as for management clients.
    pub fn build(&self, naming: Arc<dyn NamingContext>) -> Result<Vec<Destination>, ConfigError> {
        self.destinations
            .iter()
            .map(|cfg| {
                cfg.build(naming.clone())
                    .map_err(|source| ConfigError::Destination {
                        name: cfg.name.clone(),
                        source,
                    })
            })
            .collect()
    }

    /// Example configuration written by `hdds-jms gen-config`.
    pub fn example() -> Self {
        let mut config = Self::default();
        config.add_destination(
            DestinationConfig::new("OrderEvents", "jms/OrderEvents")
                .data_writer_qos("reliability.kind=reliable;history.depth=10"),
        );
        config.add_destination(
            DestinationConfig::new("PriceTicks", "jms/PriceTicks")
                .data_reader_qos("time_based_filter.minimum_separation=100ms")
                .topic_qos("durability.kind=transient_local"),
        );
        config
    }
}

/// Configuration for a single destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Destination (DDS topic) name.
    pub name: String,

    /// Destination type. Only "Topic" is supported.
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,

    /// Name the topic is bound under.
    pub jndi_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_reader_qos: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_writer_qos: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_qos: Option<String>,
}

impl DestinationConfig {
    /// Create a topic destination.
    pub fn new(name: impl Into<String>, jndi_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: default_type(),
            jndi_name: jndi_name.into(),
            data_reader_qos: None,
            data_writer_qos: None,
            topic_qos: None,
        }
    }

    pub fn data_reader_qos(mut self, qos: impl Into<String>) -> Self {
        self.data_reader_qos = Some(qos.into());
        self
    }

    pub fn data_writer_qos(mut self, qos: impl Into<String>) -> Self {
        self.data_writer_qos = Some(qos.into());
        self
    }

    pub fn topic_qos(mut self, qos: impl Into<String>) -> Self {
        self.topic_qos = Some(qos.into());
        self
    }

    fn build(&self, naming: Arc<dyn NamingContext>) -> Result<Destination, ManagementError> {
        let mut dest = Destination::new(naming);
        dest.set_destination_type(&self.kind)?;
        dest.set_destination_name(self.name.clone())?;
        dest.set_jndi_name(Some(&self.jndi_name))?;
        dest.set_data_reader_policy(self.data_reader_qos.clone());
        dest.set_data_writer_policy(self.data_writer_qos.clone());
        dest.set_topic_policy(self.topic_qos.clone());
        Ok(dest)
    }
}
