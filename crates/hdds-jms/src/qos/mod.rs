// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS policy strings for JMS destinations.
//!
//! Each destination carries three opaque policy strings (data reader, data
//! writer, topic). They are parsed when the destination starts; an absent or
//! blank string yields the DDS defaults for that entity kind.
//!
//! # Examples
//!
//! ```
//! use hdds_jms::qos::{DataWriterQosPolicy, History, ReliabilityKind};
//!
//! let qos = DataWriterQosPolicy::parse(Some("history.depth=25;ownership_strength.value=3"))
//!     .unwrap();
//! assert_eq!(qos.common.history, History::keep_last(25));
//! assert_eq!(qos.common.reliability.kind, ReliabilityKind::Reliable);
//! assert_eq!(qos.ownership_strength, 3);
//! ```

pub mod parser;
pub mod policy;
mod reader;
mod topic;
mod writer;

pub use policy::{
    CommonQos, DestinationOrder, Durability, DurabilityService, History, HistoryKind, Liveliness,
    LivelinessKind, Ownership, Reliability, ReliabilityKind, ResourceLimits,
};
pub use reader::DataReaderQosPolicy;
pub use topic::TopicQosPolicy;
pub use writer::DataWriterQosPolicy;

use std::fmt;
use thiserror::Error;

/// Entity kind a policy string applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    DataReader,
    DataWriter,
    Topic,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataReader => write!(f, "data reader"),
            Self::DataWriter => write!(f, "data writer"),
            Self::Topic => write!(f, "topic"),
        }
    }
}

/// QoS policy string parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QosParseError {
    #[error("Malformed entry '{0}' (expected policy.field=value)")]
    MalformedEntry(String),

    #[error("Policy '{policy}' is not supported for {kind} QoS")]
    UnsupportedPolicy { kind: PolicyKind, policy: String },

    #[error("Unknown field '{field}' for policy '{policy}'")]
    UnknownField { policy: String, field: String },

    #[error("Invalid value '{value}' for {policy}.{field}")]
    InvalidValue {
        policy: String,
        field: String,
        value: String,
    },
}

/// Run every entry of `input` through `apply`.
pub(crate) fn parse_with<T>(
    input: Option<&str>,
    mut qos: T,
    mut apply: impl FnMut(&mut T, &parser::Entry) -> Result<(), QosParseError>,
) -> Result<T, QosParseError> {
    if let Some(input) = input {
        for entry in parser::entries(input)? {
            apply(&mut qos, &entry)?;
        }
    }
    Ok(qos)
}

pub(crate) fn unsupported(kind: PolicyKind, entry: &parser::Entry) -> QosParseError {
    QosParseError::UnsupportedPolicy {
        kind,
        policy: entry.policy.clone(),
    }
}
