// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::parser::Entry;
use super::policy::{CommonQos, Reliability};
use super::{parse_with, unsupported, PolicyKind, QosParseError};
use std::str::FromStr;
use std::time::Duration;

/// Data writer QoS parsed from a policy string.
///
/// Writers default to reliable delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataWriterQosPolicy {
    pub common: CommonQos,
    pub transport_priority: i32,
    pub lifespan: Duration,
    pub ownership_strength: i32,
    pub autodispose_unregistered_instances: bool,
    pub user_data: Vec<u8>,
}

impl Default for DataWriterQosPolicy {
    fn default() -> Self {
        Self {
            common: CommonQos {
                reliability: Reliability::reliable(),
                ..CommonQos::default()
            },
            transport_priority: 0,
            lifespan: Duration::MAX,
            ownership_strength: 0,
            autodispose_unregistered_instances: true,
            user_data: Vec::new(),
        }
    }
}

impl DataWriterQosPolicy {
    /// Parse a policy string. `None` or blank yields the defaults.
    pub fn parse(input: Option<&str>) -> Result<Self, QosParseError> {
        parse_with(input, Self::default(), Self::apply)
    }

    fn apply(&mut self, entry: &Entry) -> Result<(), QosParseError> {
        if self.common.apply(entry)? {
            return Ok(());
        }
        match (entry.policy.as_str(), entry.field.as_str()) {
            ("transport_priority", "value") => self.transport_priority = entry.i32()?,
            ("lifespan", "duration") => self.lifespan = entry.duration()?,
            ("ownership_strength", "value") => self.ownership_strength = entry.i32()?,
            ("writer_data_lifecycle", "autodispose_unregistered_instances") => {
                self.autodispose_unregistered_instances = entry.bool()?;
            }
            ("user_data", "value") => self.user_data = entry.value.as_bytes().to_vec(),
            (
                "transport_priority" | "lifespan" | "ownership_strength" | "writer_data_lifecycle"
                | "user_data",
                _,
            ) => return Err(entry.unknown_field()),
            _ => return Err(unsupported(PolicyKind::DataWriter, entry)),
        }
        Ok(())
    }
}

impl FromStr for DataWriterQosPolicy {
    type Err = QosParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qos::ReliabilityKind;

    #[test]
    fn test_writer_defaults() {
        let qos = DataWriterQosPolicy::parse(None).unwrap();
        assert_eq!(qos.common.reliability.kind, ReliabilityKind::Reliable);
        assert_eq!(
            qos.common.reliability.max_blocking_time,
            Duration::from_millis(100)
        );
        assert!(qos.autodispose_unregistered_instances);
        assert_eq!(qos.lifespan, Duration::MAX);
    }

    #[test]
    fn test_writer_specific_policies() {
        let qos: DataWriterQosPolicy = "transport_priority.value=7;lifespan.duration=30s;\
             writer_data_lifecycle.autodispose_unregistered_instances=false;\
             user_data.value=orders"
            .parse()
            .unwrap();

        assert_eq!(qos.transport_priority, 7);
        assert_eq!(qos.lifespan, Duration::from_secs(30));
        assert!(!qos.autodispose_unregistered_instances);
        assert_eq!(qos.user_data, b"orders".to_vec());
    }

    #[test]
    fn test_writer_rejects_reader_policy() {
        let err = DataWriterQosPolicy::parse(Some("time_based_filter.minimum_separation=1s"))
            .unwrap_err();
        assert_eq!(
            err,
            QosParseError::UnsupportedPolicy {
                kind: PolicyKind::DataWriter,
                policy: "time_based_filter".into()
            }
        );
    }
}
