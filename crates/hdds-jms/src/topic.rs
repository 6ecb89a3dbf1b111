// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Topic resources published into the naming context.
//!
//! A [`Topic`] is the administered object clients look up by JNDI name: the
//! DDS topic name plus the QoS its readers, writers and the topic itself are
//! created with.

use crate::qos::{
    DataReaderQosPolicy, DataWriterQosPolicy, History, PolicyKind, ResourceLimits, TopicQosPolicy,
};
use std::sync::Arc;
use thiserror::Error;

/// Topic construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicError {
    #[error("Topic name must not be empty")]
    EmptyName,

    #[error("Inconsistent {kind} QoS: {reason}")]
    InconsistentQos { kind: PolicyKind, reason: String },
}

/// Administered topic object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
    reader_qos: DataReaderQosPolicy,
    writer_qos: DataWriterQosPolicy,
    topic_qos: TopicQosPolicy,
}

impl Topic {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reader_qos(&self) -> &DataReaderQosPolicy {
        &self.reader_qos
    }

    pub fn writer_qos(&self) -> &DataWriterQosPolicy {
        &self.writer_qos
    }

    pub fn topic_qos(&self) -> &TopicQosPolicy {
        &self.topic_qos
    }
}

/// Shared handle stored in the naming context.
pub type TopicHandle = Arc<Topic>;

/// Builds topic resources from a name and parsed policies.
pub trait TopicFactory: Send + Sync {
    fn construct(
        &self,
        name: &str,
        reader_qos: DataReaderQosPolicy,
        writer_qos: DataWriterQosPolicy,
        topic_qos: TopicQosPolicy,
    ) -> Result<TopicHandle, TopicError>;
}

/// Factory that checks each policy set for internal consistency.
///
/// Rejects:
/// - keep-last history with depth 0
/// - keep-last depth above a bounded `max_samples_per_instance`
/// - `max_samples < max_samples_per_instance` when both are bounded
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTopicFactory;

impl TopicFactory for DefaultTopicFactory {
    fn construct(
        &self,
        name: &str,
        reader_qos: DataReaderQosPolicy,
        writer_qos: DataWriterQosPolicy,
        topic_qos: TopicQosPolicy,
    ) -> Result<TopicHandle, TopicError> {
        if name.trim().is_empty() {
            return Err(TopicError::EmptyName);
        }

        check_history(
            PolicyKind::DataReader,
            reader_qos.common.history,
            &reader_qos.common.resource_limits,
        )?;
        check_history(
            PolicyKind::DataWriter,
            writer_qos.common.history,
            &writer_qos.common.resource_limits,
        )?;
        check_history(
            PolicyKind::Topic,
            topic_qos.common.history,
            &topic_qos.common.resource_limits,
        )?;
        check_history(
            PolicyKind::Topic,
            topic_qos.durability_service.history,
            &topic_qos.durability_service.resource_limits,
        )?;

        Ok(Arc::new(Topic {
            name: name.to_string(),
            reader_qos,
            writer_qos,
            topic_qos,
        }))
    }
}

fn check_history(
    kind: PolicyKind,
    history: History,
    limits: &ResourceLimits,
) -> Result<(), TopicError> {
    let inconsistent = |reason: String| TopicError::InconsistentQos { kind, reason };

    if let Some(depth) = history.effective_depth() {
        if depth == 0 {
            return Err(inconsistent("history depth must be > 0".into()));
        }
        if let Some(per_instance) = limits.max_samples_per_instance {
            if depth as usize > per_instance {
                return Err(inconsistent(format!(
                    "history depth ({}) exceeds max_samples_per_instance ({})",
                    depth, per_instance
                )));
            }
        }
    }

    if let (Some(max), Some(per_instance)) = (limits.max_samples, limits.max_samples_per_instance)
    {
        if max < per_instance {
            return Err(inconsistent(format!(
                "max_samples ({}) must be >= max_samples_per_instance ({})",
                max, per_instance
            )));
        }
    }

    Ok(())
}
