// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::parser::Entry;
use super::policy::CommonQos;
use super::{parse_with, unsupported, PolicyKind, QosParseError};
use std::str::FromStr;
use std::time::Duration;

/// Data reader QoS parsed from a policy string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataReaderQosPolicy {
    pub common: CommonQos,
    /// Minimum separation between delivered samples.
    pub time_based_filter: Duration,
    pub autopurge_nowriter_samples_delay: Duration,
    pub autopurge_disposed_samples_delay: Duration,
    pub user_data: Vec<u8>,
}

impl Default for DataReaderQosPolicy {
    fn default() -> Self {
        Self {
            common: CommonQos::default(),
            time_based_filter: Duration::ZERO,
            autopurge_nowriter_samples_delay: Duration::MAX,
            autopurge_disposed_samples_delay: Duration::MAX,
            user_data: Vec::new(),
        }
    }
}

impl DataReaderQosPolicy {
    /// Parse a policy string. `None` or blank yields the defaults.
    pub fn parse(input: Option<&str>) -> Result<Self, QosParseError> {
        parse_with(input, Self::default(), Self::apply)
    }

    fn apply(&mut self, entry: &Entry) -> Result<(), QosParseError> {
        if self.common.apply(entry)? {
            return Ok(());
        }
        match (entry.policy.as_str(), entry.field.as_str()) {
            ("time_based_filter", "minimum_separation") => {
                self.time_based_filter = entry.duration()?;
            }
            ("reader_data_lifecycle", "autopurge_nowriter_samples_delay") => {
                self.autopurge_nowriter_samples_delay = entry.duration()?;
            }
            ("reader_data_lifecycle", "autopurge_disposed_samples_delay") => {
                self.autopurge_disposed_samples_delay = entry.duration()?;
            }
            ("user_data", "value") => self.user_data = entry.value.as_bytes().to_vec(),
            ("time_based_filter" | "reader_data_lifecycle" | "user_data", _) => {
                return Err(entry.unknown_field());
            }
            _ => return Err(unsupported(PolicyKind::DataReader, entry)),
        }
        Ok(())
    }
}

impl FromStr for DataReaderQosPolicy {
    type Err = QosParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qos::{Durability, ReliabilityKind};

    #[test]
    fn test_reader_defaults() {
        assert_eq!(
            DataReaderQosPolicy::parse(Some("   ")).unwrap(),
            DataReaderQosPolicy::default()
        );
        let qos = DataReaderQosPolicy::default();
        assert_eq!(qos.common.reliability.kind, ReliabilityKind::BestEffort);
        assert_eq!(qos.time_based_filter, Duration::ZERO);
    }

    #[test]
    fn test_reader_specific_policies() {
        let qos = DataReaderQosPolicy::parse(Some(
            "durability.kind=TRANSIENT_LOCAL_DURABILITY_QOS\n\
             time_based_filter.minimum_separation=50ms\n\
             reader_data_lifecycle.autopurge_disposed_samples_delay=10s",
        ))
        .unwrap();

        assert_eq!(qos.common.durability, Durability::TransientLocal);
        assert_eq!(qos.time_based_filter, Duration::from_millis(50));
        assert_eq!(qos.autopurge_disposed_samples_delay, Duration::from_secs(10));
        assert_eq!(qos.autopurge_nowriter_samples_delay, Duration::MAX);
    }

    #[test]
    fn test_reader_rejects_writer_policy() {
        let err = DataReaderQosPolicy::parse(Some("lifespan.duration=1s")).unwrap_err();
        assert!(matches!(
            err,
            QosParseError::UnsupportedPolicy {
                kind: PolicyKind::DataReader,
                ..
            }
        ));
    }

    #[test]
    fn test_reader_invalid_value() {
        let err = DataReaderQosPolicy::parse(Some("reliability.kind=sometimes")).unwrap_err();
        assert!(matches!(err, QosParseError::InvalidValue { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid value 'sometimes' for reliability.kind"
        );
    }
}
