// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HDDS JMS Destination Management
//!
//! Administers JMS-style destinations backed by DDS topics: each destination
//! is configured with a name, a type, a JNDI name and three QoS policy
//! strings, and while started its topic is bound into a naming context where
//! clients look it up.
//!
//! # Features
//!
//! - **Destination Lifecycle**: Two-state start/stop with bind/unbind
//! - **QoS Policy Strings**: Data reader, data writer and topic policies
//! - **Management Table**: Declarative attributes, key properties, operations
//! - **File Configuration**: TOML destination sets
//!
//! # Quick Start
//!
//! ```bash
//! # Write an example configuration
//! hdds-jms gen-config --output destinations.toml
//!
//! # Bind every destination until Ctrl+C
//! hdds-jms run --config destinations.toml
//! ```
//!
//! # Configuration File
//!
//! ```toml
//! domain = "hdds.jms"
//!
//! [[destinations]]
//! name = "OrderEvents"
//! type = "Topic"
//! jndi_name = "jms/OrderEvents"
//! data_writer_qos = "reliability.kind=reliable;history.depth=10"
//! ```

pub mod config;
pub mod destination;
pub mod error;
pub mod management;
pub mod naming;
pub mod qos;
pub mod service;
pub mod topic;

pub use config::{ConfigError, DestinationConfig, DestinationsConfig};
pub use destination::{Destination, TOPIC_TYPE};
pub use error::{ErrorKind, ManagementError};
pub use management::{AttributeValue, Managed, ManagementRegistry, ObjectName};
pub use naming::{InMemoryContext, NamingContext, NamingError};
pub use service::DestinationService;
pub use topic::{DefaultTopicFactory, Topic, TopicError, TopicFactory, TopicHandle};
