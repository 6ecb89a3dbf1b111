// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Destination service.
//!
//! Deploys a [`DestinationsConfig`] into a [`ManagementRegistry`] and drives
//! the lifecycle of every registered destination, the way a container
//! would at boot and shutdown.

use crate::config::{ConfigError, DestinationsConfig};
use crate::error::ManagementError;
use crate::management::{AttributeValue, ManagementRegistry, ObjectName};
use crate::naming::NamingContext;
use std::sync::Arc;

/// Owns the registry and naming context for a deployed destination set.
pub struct DestinationService {
    registry: ManagementRegistry,
    naming: Arc<dyn NamingContext>,
    deployed: Vec<ObjectName>,
}

impl DestinationService {
    pub fn new(domain: impl Into<String>, naming: Arc<dyn NamingContext>) -> Self {
        Self {
            registry: ManagementRegistry::new(domain),
            naming,
            deployed: Vec::new(),
        }
    }

    /// Build and register every destination in `config` (stopped).
    ///
    /// All or nothing: if any destination cannot be registered, those
    /// registered by this call are unregistered again.
    pub fn deploy(&mut self, config: &DestinationsConfig) -> Result<Vec<ObjectName>, ConfigError> {
        config.validate()?;
        let destinations = config.build(self.naming.clone())?;

        let mut names = Vec::with_capacity(destinations.len());
        for dest in destinations {
            let label = dest.destination_name().unwrap_or_default().to_string();
            match self.registry.register(Box::new(dest)) {
                Ok(name) => names.push(name),
                Err(source) => {
                    for name in names.iter().rev() {
                        if let Err(e) = self.registry.unregister(name) {
                            tracing::warn!(
                                "Failed to unregister {} after aborted deploy: {}",
                                name,
                                e
                            );
                        }
                    }
                    return Err(ConfigError::Destination { name: label, source });
                }
            }
        }
        self.deployed.extend(names.iter().cloned());
        Ok(names)
    }

    /// Start every deployed destination in deployment order.
    ///
    /// On the first failure, destinations started by this call are stopped
    /// again and the error is returned.
    pub fn start_all(&self) -> Result<(), ManagementError> {
        let mut started: Vec<&ObjectName> = Vec::new();
        for name in &self.deployed {
            if let Err(e) = self.registry.invoke(name, "start") {
                tracing::error!("Failed to start {}: {}", name, e);
                for done in started.iter().rev() {
                    if let Err(stop_err) = self.registry.invoke(done, "stop") {
                        tracing::warn!("Failed to stop {} after aborted start: {}", done, stop_err);
                    }
                }
                return Err(e);
            }
            tracing::info!("Started {}", name);
            started.push(name);
        }
        Ok(())
    }

    /// Stop every started destination in reverse deployment order.
    ///
    /// Keeps going past failures and returns them; failed destinations stay
    /// started.
    pub fn stop_all(&self) -> Vec<(ObjectName, ManagementError)> {
        let mut failures = Vec::new();
        for name in self.deployed.iter().rev() {
            match self.registry.get_attribute(name, "Started") {
                Ok(AttributeValue::Bool(true)) => {}
                _ => continue,
            }
            match self.registry.invoke(name, "stop") {
                Ok(()) => tracing::info!("Stopped {}", name),
                Err(e) => {
                    tracing::error!("Failed to stop {}: {}", name, e);
                    failures.push((name.clone(), e));
                }
            }
        }
        failures
    }

    pub fn registry(&self) -> &ManagementRegistry {
        &self.registry
    }

    pub fn naming(&self) -> &Arc<dyn NamingContext> {
        &self.naming
    }

    pub fn deployed(&self) -> &[ObjectName] {
        &self.deployed
    }
}
