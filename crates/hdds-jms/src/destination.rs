// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JMS destination descriptor.
//!
//! A [`Destination`] holds the configuration of one messaging destination and
//! binds a [`Topic`](crate::topic::Topic) into a naming context while started.
//!
//! # Lifecycle
//!
//! ```text
//! stopped --start()--> started --stop()--> stopped
//! ```
//!
//! Both transitions are fallible and guarded by the current state. A failed
//! `start` leaves the destination stopped; a failed `stop` leaves it started
//! so the operator can retry.
//!
//! # Example
//!
//! ```
//! use hdds_jms::{Destination, InMemoryContext, NamingContext};
//! use std::sync::Arc;
//!
//! let ctx = Arc::new(InMemoryContext::new());
//! let mut dest = Destination::new(ctx.clone());
//! dest.set_destination_name("OrderEvents").unwrap();
//! dest.set_destination_type("Topic").unwrap();
//! dest.set_jndi_name(Some("jms/OrderEvents")).unwrap();
//!
//! dest.start().unwrap();
//! assert_eq!(ctx.lookup("jms/OrderEvents").unwrap().name(), "OrderEvents");
//!
//! dest.stop().unwrap();
//! assert!(ctx.is_empty());
//! ```

use crate::error::ManagementError;
use crate::naming::NamingContext;
use crate::qos::{
    DataReaderQosPolicy, DataWriterQosPolicy, PolicyKind, QosParseError, TopicQosPolicy,
};
use crate::topic::{DefaultTopicFactory, TopicFactory};
use std::fmt;
use std::sync::Arc;
use tracing::Span;

/// The only destination type currently supported.
pub const TOPIC_TYPE: &str = "Topic";

/// Configuration and lifecycle of one JMS destination.
pub struct Destination {
    destination_name: Option<String>,
    destination_type: Option<String>,
    jndi_name: Option<String>,
    data_reader_policy: Option<String>,
    data_writer_policy: Option<String>,
    topic_policy: Option<String>,
    started: bool,
    /// Logging scope, present only while started.
    span: Option<Span>,
    naming: Arc<dyn NamingContext>,
    factory: Arc<dyn TopicFactory>,
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("destination_name", &self.destination_name)
            .field("destination_type", &self.destination_type)
            .field("jndi_name", &self.jndi_name)
            .field("data_reader_policy", &self.data_reader_policy)
            .field("data_writer_policy", &self.data_writer_policy)
            .field("topic_policy", &self.topic_policy)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl Destination {
    /// Create an empty, stopped destination using [`DefaultTopicFactory`].
    pub fn new(naming: Arc<dyn NamingContext>) -> Self {
        Self::with_factory(naming, Arc::new(DefaultTopicFactory))
    }

    /// Create an empty, stopped destination with a custom topic factory.
    pub fn with_factory(naming: Arc<dyn NamingContext>, factory: Arc<dyn TopicFactory>) -> Self {
        Self {
            destination_name: None,
            destination_type: None,
            jndi_name: None,
            data_reader_policy: None,
            data_writer_policy: None,
            topic_policy: None,
            started: false,
            span: None,
            naming,
            factory,
        }
    }

    pub fn destination_name(&self) -> Option<&str> {
        self.destination_name.as_deref()
    }

    /// Set the destination name (identity key).
    ///
    /// Any name is accepted; identity keys are fixed while started.
    pub fn set_destination_name(&mut self, name: impl Into<String>) -> Result<(), ManagementError> {
        self.ensure_key_mutable("destination name")?;
        self.destination_name = Some(name.into());
        Ok(())
    }

    pub fn destination_type(&self) -> Option<&str> {
        self.destination_type.as_deref()
    }

    /// Set the destination type (identity key).
    ///
    /// Only `"Topic"` is accepted; queues are not supported.
    pub fn set_destination_type(&mut self, kind: &str) -> Result<(), ManagementError> {
        if kind != TOPIC_TYPE {
            return Err(ManagementError::invalid(format!(
                "unsupported destination type '{}' (only '{}' is supported)",
                kind, TOPIC_TYPE
            )));
        }
        self.ensure_key_mutable("destination type")?;
        self.destination_type = Some(kind.to_string());
        Ok(())
    }

    pub fn jndi_name(&self) -> Option<&str> {
        self.jndi_name.as_deref()
    }

    /// Set the JNDI name the topic is bound under. Must be non-empty.
    pub fn set_jndi_name(&mut self, name: Option<&str>) -> Result<(), ManagementError> {
        match name {
            Some(n) if !n.is_empty() => {
                self.jndi_name = Some(n.to_string());
                Ok(())
            }
            _ => Err(ManagementError::invalid("JNDI name must not be empty")),
        }
    }

    pub fn data_reader_policy(&self) -> Option<&str> {
        self.data_reader_policy.as_deref()
    }

    pub fn set_data_reader_policy(&mut self, policy: Option<String>) {
        self.data_reader_policy = policy;
    }

    pub fn data_writer_policy(&self) -> Option<&str> {
        self.data_writer_policy.as_deref()
    }

    pub fn set_data_writer_policy(&mut self, policy: Option<String>) {
        self.data_writer_policy = policy;
    }

    pub fn topic_policy(&self) -> Option<&str> {
        self.topic_policy.as_deref()
    }

    pub fn set_topic_policy(&mut self, policy: Option<String>) {
        self.topic_policy = policy;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Check that every required attribute is set.
    ///
    /// Per-field format checks happen in the setters; this only checks
    /// completeness before activation.
    pub fn verify(&self) -> Result<(), ManagementError> {
        self.required().map(|_| ())
    }

    /// Destination name and JNDI name, once every required attribute is set.
    fn required(&self) -> Result<(&str, &str), ManagementError> {
        let missing =
            |attr: &str| ManagementError::invalid(format!("required attribute {} is not set", attr));

        let name = self
            .destination_name
            .as_deref()
            .ok_or_else(|| missing("destination name"))?;
        if self.destination_type.is_none() {
            return Err(missing("destination type"));
        }
        let jndi_name = self.jndi_name.as_deref().ok_or_else(|| missing("JNDI name"))?;
        Ok((name, jndi_name))
    }

    /// Construct the topic and bind it under the JNDI name.
    pub fn start(&mut self) -> Result<(), ManagementError> {
        if self.started {
            return Err(ManagementError::illegal_state(format!(
                "{} already started",
                self.display_name()
            )));
        }

        let (name, jndi_name) = self.required()?;
        let (name, jndi_name) = (name.to_string(), jndi_name.to_string());

        let span = tracing::info_span!("destination", name = %name);
        let entered = span.enter();
        tracing::info!("Binding to JNDI name: {}", jndi_name);

        let reader_qos = DataReaderQosPolicy::parse(self.data_reader_policy.as_deref())
            .map_err(|e| qos_error(PolicyKind::DataReader, e))?;
        let writer_qos = DataWriterQosPolicy::parse(self.data_writer_policy.as_deref())
            .map_err(|e| qos_error(PolicyKind::DataWriter, e))?;
        let topic_qos = TopicQosPolicy::parse(self.topic_policy.as_deref())
            .map_err(|e| qos_error(PolicyKind::Topic, e))?;

        let topic = self
            .factory
            .construct(&name, reader_qos, writer_qos, topic_qos)
            .map_err(|e| ManagementError::invalid(e.to_string()))?;

        self.naming.bind(&jndi_name, topic)?;

        drop(entered);
        self.span = Some(span);
        self.started = true;
        Ok(())
    }

    /// Unbind the topic and release the logging scope.
    pub fn stop(&mut self) -> Result<(), ManagementError> {
        if !self.started {
            return Err(ManagementError::illegal_state(format!(
                "{} already stopped",
                self.display_name()
            )));
        }

        let jndi_name = self.jndi_name.clone().unwrap_or_default();
        {
            let _enter = self.span.as_ref().map(Span::enter);
            tracing::info!("Unbinding JNDI name: {}", jndi_name);
            self.naming.unbind(&jndi_name)?;
        }

        self.span = None;
        self.started = false;
        Ok(())
    }

    fn ensure_key_mutable(&self, attr: &str) -> Result<(), ManagementError> {
        if self.started {
            return Err(ManagementError::illegal_state(format!(
                "cannot change {} of {} while started",
                attr,
                self.display_name()
            )));
        }
        Ok(())
    }

    fn display_name(&self) -> &str {
        self.destination_name.as_deref().unwrap_or("<unnamed>")
    }
}

fn qos_error(kind: PolicyKind, err: QosParseError) -> ManagementError {
    ManagementError::invalid(format!("{} QoS policy: {}", kind, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::naming::InMemoryContext;

    fn configured(ctx: &Arc<InMemoryContext>) -> Destination {
        let mut dest = Destination::new(ctx.clone());
        dest.set_destination_name("OrderEvents").unwrap();
        dest.set_destination_type("Topic").unwrap();
        dest.set_jndi_name(Some("jms/OrderEvents")).unwrap();
        dest
    }

    #[test]
    fn test_new_is_empty_and_stopped() {
        let dest = Destination::new(Arc::new(InMemoryContext::new()));
        assert!(!dest.is_started());
        assert_eq!(dest.destination_name(), None);
        assert_eq!(dest.destination_type(), None);
        assert_eq!(dest.jndi_name(), None);
        assert_eq!(dest.topic_policy(), None);
    }

    #[test]
    fn test_set_destination_type_rejects_non_topic() {
        let mut dest = Destination::new(Arc::new(InMemoryContext::new()));
        for bad in ["Queue", "topic", "", " Topic"] {
            let err = dest.set_destination_type(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(dest.destination_type(), None);
        }

        dest.set_destination_type("Topic").unwrap();
        assert!(dest.set_destination_type("Queue").is_err());
        assert_eq!(dest.destination_type(), Some("Topic"));
    }

    #[test]
    fn test_set_jndi_name_rejects_empty() {
        let mut dest = Destination::new(Arc::new(InMemoryContext::new()));
        assert_eq!(
            dest.set_jndi_name(Some("")).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            dest.set_jndi_name(None).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(dest.jndi_name(), None);
    }

    #[test]
    fn test_policy_setters_store_unvalidated() {
        let mut dest = Destination::new(Arc::new(InMemoryContext::new()));
        dest.set_data_reader_policy(Some("not a policy".into()));
        dest.set_data_writer_policy(Some("history.depth=3".into()));
        dest.set_topic_policy(None);
        assert_eq!(dest.data_reader_policy(), Some("not a policy"));
        assert_eq!(dest.data_writer_policy(), Some("history.depth=3"));
        assert_eq!(dest.topic_policy(), None);
    }

    #[test]
    fn test_verify_reports_missing_attribute() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut dest = Destination::new(ctx.clone());
        dest.set_destination_type("Topic").unwrap();
        dest.set_jndi_name(Some("jms/X")).unwrap();

        let err = dest.start().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("destination name"));
        assert!(!dest.is_started());
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_verify_checks_in_order() {
        let mut dest = Destination::new(Arc::new(InMemoryContext::new()));
        assert!(dest.verify().unwrap_err().to_string().contains("destination name"));

        dest.set_destination_name("OrderEvents").unwrap();
        assert!(dest.verify().unwrap_err().to_string().contains("destination type"));

        dest.set_destination_type("Topic").unwrap();
        assert!(dest.verify().unwrap_err().to_string().contains("JNDI name"));

        dest.set_jndi_name(Some("jms/OrderEvents")).unwrap();
        dest.verify().unwrap();
        assert!(!dest.is_started());
    }

    #[test]
    fn test_start_stop_cycle() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut dest = configured(&ctx);

        dest.start().unwrap();
        assert!(dest.is_started());
        assert_eq!(ctx.list(), vec!["jms/OrderEvents".to_string()]);

        let err = dest.start().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert!(err.to_string().contains("OrderEvents already started"));

        dest.stop().unwrap();
        assert!(!dest.is_started());
        assert!(ctx.is_empty());

        let err = dest.stop().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert!(err.to_string().contains("already stopped"));
    }

    #[test]
    fn test_restart_after_stop() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut dest = configured(&ctx);
        dest.start().unwrap();
        dest.stop().unwrap();
        dest.start().unwrap();
        assert!(dest.is_started());
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_bad_qos_fails_start() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut dest = configured(&ctx);
        dest.set_data_writer_policy(Some("reliability.kind=maybe".into()));

        let err = dest.start().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("data writer QoS policy"));
        assert!(!dest.is_started());
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_inconsistent_qos_fails_start() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut dest = configured(&ctx);
        dest.set_topic_policy(Some(
            "history.depth=20;resource_limits.max_samples_per_instance=10".into(),
        ));

        assert_eq!(
            dest.start().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(!dest.is_started());
    }

    #[test]
    fn test_bind_conflict_leaves_stopped() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut first = configured(&ctx);
        let mut second = configured(&ctx);
        first.start().unwrap();

        let err = second.start().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Naming);
        assert!(!second.is_started());
        assert!(second.stop().is_err());
    }

    #[test]
    fn test_identity_keys_fixed_while_started() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut dest = configured(&ctx);
        dest.start().unwrap();

        let err = dest.set_destination_name("Other").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert_eq!(dest.destination_name(), Some("OrderEvents"));
        assert_eq!(
            dest.set_destination_type("Topic").unwrap_err().kind(),
            ErrorKind::IllegalState
        );

        dest.stop().unwrap();
        dest.set_destination_name("Other").unwrap();
        assert_eq!(dest.destination_name(), Some("Other"));
    }

    #[test]
    fn test_stop_uses_current_jndi_name() {
        let ctx = Arc::new(InMemoryContext::new());
        let mut dest = configured(&ctx);
        dest.start().unwrap();

        dest.set_jndi_name(Some("jms/Renamed")).unwrap();
        assert_eq!(dest.stop().unwrap_err().kind(), ErrorKind::Naming);
        assert!(dest.is_started());

        dest.set_jndi_name(Some("jms/OrderEvents")).unwrap();
        dest.stop().unwrap();
        assert!(!dest.is_started());
    }
}
