// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Naming context abstraction.
//!
//! Destinations publish their topic under a JNDI-style name. The
//! [`NamingContext`] trait is the only thing a destination needs from the
//! directory; [`InMemoryContext`] is the in-process implementation used by
//! the CLI and tests.
//!
//! Names are `/`-separated (`jms/OrderEvents`). Leading and trailing
//! separators are ignored; empty components are rejected.

use crate::topic::TopicHandle;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use thiserror::Error;

/// Naming context errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("Name already bound: {0}")]
    AlreadyBound(String),

    #[error("Name not bound: {0}")]
    NotBound(String),

    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Naming service unavailable: {0}")]
    Unavailable(String),
}

/// Directory the destinations bind their topics into.
pub trait NamingContext: Send + Sync {
    /// Bind `resource` under `name`. Fails if the name is already bound.
    fn bind(&self, name: &str, resource: TopicHandle) -> Result<(), NamingError>;

    /// Remove the binding for `name`. Fails if the name is not bound.
    fn unbind(&self, name: &str) -> Result<(), NamingError>;

    /// Resolve `name`.
    fn lookup(&self, name: &str) -> Result<TopicHandle, NamingError>;

    /// All bound names, sorted.
    fn list(&self) -> Vec<String>;
}

/// Normalize a name: trim separators, reject empty components.
pub fn normalize_name(name: &str) -> Result<String, NamingError> {
    let trimmed = name.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.split('/').any(|c| c.trim().is_empty()) {
        return Err(NamingError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

/// In-process naming context.
#[derive(Default)]
pub struct InMemoryContext {
    bindings: RwLock<BTreeMap<String, TopicHandle>>,
}

impl InMemoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}

impl NamingContext for InMemoryContext {
    fn bind(&self, name: &str, resource: TopicHandle) -> Result<(), NamingError> {
        let key = normalize_name(name)?;
        let mut bindings = self.bindings.write();
        if bindings.contains_key(&key) {
            return Err(NamingError::AlreadyBound(key));
        }
        tracing::debug!("Bound '{}' -> topic '{}'", key, resource.name());
        bindings.insert(key, resource);
        Ok(())
    }

    fn unbind(&self, name: &str) -> Result<(), NamingError> {
        let key = normalize_name(name)?;
        match self.bindings.write().remove(&key) {
            Some(_) => {
                tracing::debug!("Unbound '{}'", key);
                Ok(())
            }
            None => Err(NamingError::NotBound(key)),
        }
    }

    fn lookup(&self, name: &str) -> Result<TopicHandle, NamingError> {
        let key = normalize_name(name)?;
        self.bindings
            .read()
            .get(&key)
            .cloned()
            .ok_or(NamingError::NotBound(key))
    }

    fn list(&self) -> Vec<String> {
        self.bindings.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qos::{DataReaderQosPolicy, DataWriterQosPolicy, TopicQosPolicy};
    use crate::topic::{DefaultTopicFactory, TopicFactory};

    fn topic(name: &str) -> TopicHandle {
        DefaultTopicFactory
            .construct(
                name,
                DataReaderQosPolicy::default(),
                DataWriterQosPolicy::default(),
                TopicQosPolicy::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("jms/OrderEvents").unwrap(), "jms/OrderEvents");
        assert_eq!(normalize_name("/jms/OrderEvents/").unwrap(), "jms/OrderEvents");
        assert!(normalize_name("").is_err());
        assert!(normalize_name("/").is_err());
        assert!(normalize_name("jms//OrderEvents").is_err());
    }

    #[test]
    fn test_bind_lookup_unbind() {
        let ctx = InMemoryContext::new();
        ctx.bind("jms/OrderEvents", topic("OrderEvents")).unwrap();

        assert_eq!(ctx.lookup("/jms/OrderEvents").unwrap().name(), "OrderEvents");
        assert_eq!(ctx.list(), vec!["jms/OrderEvents".to_string()]);

        ctx.unbind("jms/OrderEvents").unwrap();
        assert!(ctx.is_empty());
        assert_eq!(
            ctx.lookup("jms/OrderEvents").unwrap_err(),
            NamingError::NotBound("jms/OrderEvents".into())
        );
    }

    #[test]
    fn test_bind_twice_fails() {
        let ctx = InMemoryContext::new();
        ctx.bind("jms/A", topic("A")).unwrap();
        assert_eq!(
            ctx.bind("jms/A", topic("B")).unwrap_err(),
            NamingError::AlreadyBound("jms/A".into())
        );
        assert_eq!(ctx.lookup("jms/A").unwrap().name(), "A");
    }

    #[test]
    fn test_unbind_missing_fails() {
        let ctx = InMemoryContext::new();
        assert!(matches!(
            ctx.unbind("jms/missing"),
            Err(NamingError::NotBound(_))
        ));
    }

    #[test]
    fn test_list_sorted() {
        let ctx = InMemoryContext::new();
        ctx.bind("jms/B", topic("B")).unwrap();
        ctx.bind("jms/A", topic("A")).unwrap();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.list(), vec!["jms/A".to_string(), "jms/B".to_string()]);
    }
}
