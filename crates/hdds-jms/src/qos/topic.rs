// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::parser::Entry;
use super::policy::{apply_history, apply_resource_limits, CommonQos, DurabilityService};
use super::{parse_with, unsupported, PolicyKind, QosParseError};
use std::str::FromStr;
use std::time::Duration;

/// Topic QoS parsed from a policy string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicQosPolicy {
    pub common: CommonQos,
    pub durability_service: DurabilityService,
    pub transport_priority: i32,
    pub lifespan: Duration,
    pub topic_data: Vec<u8>,
}

impl Default for TopicQosPolicy {
    fn default() -> Self {
        Self {
            common: CommonQos::default(),
            durability_service: DurabilityService::default(),
            transport_priority: 0,
            lifespan: Duration::MAX,
            topic_data: Vec::new(),
        }
    }
}

impl TopicQosPolicy {
    /// Parse a policy string. `None` or blank yields the defaults.
    pub fn parse(input: Option<&str>) -> Result<Self, QosParseError> {
        parse_with(input, Self::default(), Self::apply)
    }

    fn apply(&mut self, entry: &Entry) -> Result<(), QosParseError> {
        if self.common.apply(entry)? {
            return Ok(());
        }
        match (entry.policy.as_str(), entry.field.as_str()) {
            ("durability_service", "service_cleanup_delay") => {
                self.durability_service.service_cleanup_delay = entry.duration()?;
            }
            ("durability_service", field) => {
                let service = &mut self.durability_service;
                match field.strip_prefix("history_") {
                    Some(sub @ ("kind" | "depth")) => {
                        let renamed = Entry {
                            field: sub.to_string(),
                            ..entry.clone()
                        };
                        apply_history(&mut service.history, &renamed)
                            .map_err(|_| entry.invalid_value())?;
                    }
                    Some(_) => return Err(entry.unknown_field()),
                    None => apply_resource_limits(&mut service.resource_limits, entry)?,
                }
            }
            ("transport_priority", "value") => self.transport_priority = entry.i32()?,
            ("lifespan", "duration") => self.lifespan = entry.duration()?,
            ("topic_data", "value") => self.topic_data = entry.value.as_bytes().to_vec(),
            ("transport_priority" | "lifespan" | "topic_data", _) => {
                return Err(entry.unknown_field());
            }
            _ => return Err(unsupported(PolicyKind::Topic, entry)),
        }
        Ok(())
    }
}

impl FromStr for TopicQosPolicy {
    type Err = QosParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qos::History;

    #[test]
    fn test_topic_durability_service() {
        let qos = TopicQosPolicy::parse(Some(
            "durability.kind=persistent;durability_service.history_kind=keep_last;\
             durability_service.history_depth=50;durability_service.max_samples=500;\
             durability_service.service_cleanup_delay=2s",
        ))
        .unwrap();

        assert_eq!(qos.durability_service.history, History::keep_last(50));
        assert_eq!(qos.durability_service.resource_limits.max_samples, Some(500));
        assert_eq!(
            qos.durability_service.service_cleanup_delay,
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_topic_durability_service_errors() {
        let err = TopicQosPolicy::parse(Some("durability_service.history_depth=many")).unwrap_err();
        assert!(matches!(err, QosParseError::InvalidValue { .. }));

        let err = TopicQosPolicy::parse(Some("durability_service.history_color=red")).unwrap_err();
        assert!(matches!(err, QosParseError::UnknownField { .. }));

        let err = TopicQosPolicy::parse(Some("durability_service.depth=3")).unwrap_err();
        assert!(matches!(err, QosParseError::UnknownField { .. }));
    }

    #[test]
    fn test_topic_data() {
        let qos = TopicQosPolicy::parse(Some("topic_data.value=region=eu")).unwrap();
        assert_eq!(qos.topic_data, b"region=eu".to_vec());
    }

    #[test]
    fn test_topic_rejects_ownership_strength() {
        let err = TopicQosPolicy::parse(Some("ownership_strength.value=1")).unwrap_err();
        assert!(matches!(
            err,
            QosParseError::UnsupportedPolicy {
                kind: PolicyKind::Topic,
                ..
            }
        ));
    }
}
