// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Policy value types shared by reader, writer and topic QoS.

use super::parser::Entry;
use super::QosParseError;
use std::time::Duration;

/// Reliability policy kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReliabilityKind {
    /// Fire-and-forget.
    #[default]
    BestEffort,
    /// NACK-driven retransmission.
    Reliable,
}

/// Reliability policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reliability {
    pub kind: ReliabilityKind,
    /// How long a reliable write may block on a full history.
    pub max_blocking_time: Duration,
}

impl Reliability {
    pub fn best_effort() -> Self {
        Self {
            kind: ReliabilityKind::BestEffort,
            max_blocking_time: Duration::from_millis(100),
        }
    }

    pub fn reliable() -> Self {
        Self {
            kind: ReliabilityKind::Reliable,
            max_blocking_time: Duration::from_millis(100),
        }
    }
}

/// Durability policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Durability {
    #[default]
    Volatile,
    TransientLocal,
    Transient,
    Persistent,
}

/// History kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryKind {
    /// Keep the last `depth` samples per instance.
    KeepLast,
    /// Keep everything within resource limits.
    KeepAll,
}

/// History policy.
///
/// `depth` is kept even under keep-all so that switching back to keep-last
/// restores the configured value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct History {
    pub kind: HistoryKind,
    pub depth: u32,
}

impl History {
    pub fn keep_last(depth: u32) -> Self {
        Self {
            kind: HistoryKind::KeepLast,
            depth,
        }
    }

    pub fn keep_all() -> Self {
        Self {
            kind: HistoryKind::KeepAll,
            depth: 1,
        }
    }

    /// Depth in effect, `None` under keep-all.
    pub fn effective_depth(&self) -> Option<u32> {
        match self.kind {
            HistoryKind::KeepLast => Some(self.depth),
            HistoryKind::KeepAll => None,
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::keep_last(1)
    }
}

/// Resource limits. `None` means unlimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ResourceLimits {
    pub max_samples: Option<usize>,
    pub max_instances: Option<usize>,
    pub max_samples_per_instance: Option<usize>,
}

/// Liveliness assertion kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LivelinessKind {
    #[default]
    Automatic,
    ManualByParticipant,
    ManualByTopic,
}

/// Liveliness policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Liveliness {
    pub kind: LivelinessKind,
    pub lease_duration: Duration,
}

impl Default for Liveliness {
    fn default() -> Self {
        Self {
            kind: LivelinessKind::Automatic,
            lease_duration: Duration::MAX,
        }
    }
}

/// Destination order policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DestinationOrder {
    #[default]
    ByReceptionTimestamp,
    BySourceTimestamp,
}

/// Ownership policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ownership {
    #[default]
    Shared,
    Exclusive,
}

/// Durability service policy (topic only).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurabilityService {
    pub service_cleanup_delay: Duration,
    pub history: History,
    pub resource_limits: ResourceLimits,
}

impl Default for DurabilityService {
    fn default() -> Self {
        Self {
            service_cleanup_delay: Duration::ZERO,
            history: History::default(),
            resource_limits: ResourceLimits::default(),
        }
    }
}

const RELIABILITY_KINDS: &[(&str, &str, ReliabilityKind)] = &[
    ("best_effort", "BEST_EFFORT_RELIABILITY_QOS", ReliabilityKind::BestEffort),
    ("reliable", "RELIABLE_RELIABILITY_QOS", ReliabilityKind::Reliable),
];

const DURABILITY_KINDS: &[(&str, &str, Durability)] = &[
    ("volatile", "VOLATILE_DURABILITY_QOS", Durability::Volatile),
    (
        "transient_local",
        "TRANSIENT_LOCAL_DURABILITY_QOS",
        Durability::TransientLocal,
    ),
    ("transient", "TRANSIENT_DURABILITY_QOS", Durability::Transient),
    ("persistent", "PERSISTENT_DURABILITY_QOS", Durability::Persistent),
];

const HISTORY_KINDS: &[(&str, &str, HistoryKind)] = &[
    ("keep_last", "KEEP_LAST_HISTORY_QOS", HistoryKind::KeepLast),
    ("keep_all", "KEEP_ALL_HISTORY_QOS", HistoryKind::KeepAll),
];

const LIVELINESS_KINDS: &[(&str, &str, LivelinessKind)] = &[
    ("automatic", "AUTOMATIC_LIVELINESS_QOS", LivelinessKind::Automatic),
    (
        "manual_by_participant",
        "MANUAL_BY_PARTICIPANT_LIVELINESS_QOS",
        LivelinessKind::ManualByParticipant,
    ),
    (
        "manual_by_topic",
        "MANUAL_BY_TOPIC_LIVELINESS_QOS",
        LivelinessKind::ManualByTopic,
    ),
];

const DESTINATION_ORDER_KINDS: &[(&str, &str, DestinationOrder)] = &[
    (
        "by_reception_timestamp",
        "BY_RECEPTION_TIMESTAMP_DESTINATIONORDER_QOS",
        DestinationOrder::ByReceptionTimestamp,
    ),
    (
        "by_source_timestamp",
        "BY_SOURCE_TIMESTAMP_DESTINATIONORDER_QOS",
        DestinationOrder::BySourceTimestamp,
    ),
];

const OWNERSHIP_KINDS: &[(&str, &str, Ownership)] = &[
    ("shared", "SHARED_OWNERSHIP_QOS", Ownership::Shared),
    ("exclusive", "EXCLUSIVE_OWNERSHIP_QOS", Ownership::Exclusive),
];

/// Apply a `history.kind` / `history.depth` entry.
///
/// Kind and depth are independent; the depth must be at least 1.
pub(crate) fn apply_history(history: &mut History, entry: &Entry) -> Result<(), QosParseError> {
    match entry.field.as_str() {
        "kind" => history.kind = entry.keyword(HISTORY_KINDS)?,
        "depth" => {
            let depth = entry.u32()?;
            if depth == 0 {
                return Err(entry.invalid_value());
            }
            history.depth = depth;
        }
        _ => return Err(entry.unknown_field()),
    }
    Ok(())
}

pub(crate) fn apply_resource_limits(
    limits: &mut ResourceLimits,
    entry: &Entry,
) -> Result<(), QosParseError> {
    match entry.field.as_str() {
        "max_samples" => limits.max_samples = entry.limit()?,
        "max_instances" => limits.max_instances = entry.limit()?,
        "max_samples_per_instance" => limits.max_samples_per_instance = entry.limit()?,
        _ => return Err(entry.unknown_field()),
    }
    Ok(())
}

/// Policies common to topics, data writers and data readers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonQos {
    pub durability: Durability,
    pub deadline: Duration,
    pub latency_budget: Duration,
    pub liveliness: Liveliness,
    pub reliability: Reliability,
    pub destination_order: DestinationOrder,
    pub history: History,
    pub resource_limits: ResourceLimits,
    pub ownership: Ownership,
}

impl Default for CommonQos {
    fn default() -> Self {
        Self {
            durability: Durability::Volatile,
            deadline: Duration::MAX,
            latency_budget: Duration::ZERO,
            liveliness: Liveliness::default(),
            reliability: Reliability::best_effort(),
            destination_order: DestinationOrder::ByReceptionTimestamp,
            history: History::default(),
            resource_limits: ResourceLimits::default(),
            ownership: Ownership::Shared,
        }
    }
}

impl CommonQos {
    /// Apply an entry if it names a common policy.
    ///
    /// Returns `Ok(false)` when the policy is not one of the common ones, so
    /// the caller can try its own policies.
    pub(crate) fn apply(&mut self, entry: &Entry) -> Result<bool, QosParseError> {
        match (entry.policy.as_str(), entry.field.as_str()) {
            ("durability", "kind") => self.durability = entry.keyword(DURABILITY_KINDS)?,
            ("deadline", "period") => self.deadline = entry.duration()?,
            ("latency_budget", "duration") => self.latency_budget = entry.duration()?,
            ("liveliness", "kind") => self.liveliness.kind = entry.keyword(LIVELINESS_KINDS)?,
            ("liveliness", "lease_duration") => {
                self.liveliness.lease_duration = entry.duration()?;
            }
            ("reliability", "kind") => self.reliability.kind = entry.keyword(RELIABILITY_KINDS)?,
            ("reliability", "max_blocking_time") => {
                self.reliability.max_blocking_time = entry.duration()?;
            }
            ("destination_order", "kind") => {
                self.destination_order = entry.keyword(DESTINATION_ORDER_KINDS)?;
            }
            ("history", _) => apply_history(&mut self.history, entry)?,
            ("resource_limits", _) => apply_resource_limits(&mut self.resource_limits, entry)?,
            ("ownership", "kind") => self.ownership = entry.keyword(OWNERSHIP_KINDS)?,
            (
                "durability" | "deadline" | "latency_budget" | "liveliness" | "reliability"
                | "destination_order" | "ownership",
                _,
            ) => return Err(entry.unknown_field()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
