// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Management table for [`Destination`].

use super::{
    Access, AttributeInfo, AttributeValue, Managed, ManagementInfo, ObjectName, OperationInfo,
};
use crate::destination::Destination;
use crate::error::ManagementError;
use crate::naming::NamingContext;
use std::sync::Arc;

/// Key property holding the destination name.
pub const DESTINATION_KEY: &str = "destination";
/// Key property holding the destination type.
pub const TYPE_KEY: &str = "type";

/// Attributes and operations exposed for every destination.
pub static DESTINATION_INFO: ManagementInfo = ManagementInfo {
    description: "HDDS JMS Destination",
    attributes: &[
        AttributeInfo {
            name: "Destination",
            description: "Destination name",
            access: Access::ReadOnly,
            required: true,
            key: Some(DESTINATION_KEY),
        },
        AttributeInfo {
            name: "Type",
            description: "Destination type (Topic)",
            access: Access::ReadOnly,
            required: true,
            key: Some(TYPE_KEY),
        },
        AttributeInfo {
            name: "JndiName",
            description: "Name the topic is bound under",
            access: Access::ReadWrite,
            required: true,
            key: None,
        },
        AttributeInfo {
            name: "DataReaderQosPolicy",
            description: "Data reader QoS policy string",
            access: Access::ReadWrite,
            required: false,
            key: None,
        },
        AttributeInfo {
            name: "DataWriterQosPolicy",
            description: "Data writer QoS policy string",
            access: Access::ReadWrite,
            required: false,
            key: None,
        },
        AttributeInfo {
            name: "TopicQosPolicy",
            description: "Topic QoS policy string",
            access: Access::ReadWrite,
            required: false,
            key: None,
        },
        AttributeInfo {
            name: "Started",
            description: "Whether the topic is currently bound",
            access: Access::ReadOnly,
            required: false,
            key: None,
        },
    ],
    operations: &[
        OperationInfo {
            name: "start",
            description: "Bind the topic under its JNDI name",
        },
        OperationInfo {
            name: "stop",
            description: "Unbind the topic",
        },
    ],
};

impl Destination {
    /// Create a destination from the key properties of `name`
    /// (`destination=<name>,type=Topic`).
    pub fn from_object_name(
        name: &ObjectName,
        naming: Arc<dyn NamingContext>,
    ) -> Result<Self, ManagementError> {
        let missing =
            |key: &str| ManagementError::invalid(format!("object name {} has no '{}' key", name, key));

        let destination = name
            .property(DESTINATION_KEY)
            .ok_or_else(|| missing(DESTINATION_KEY))?;
        let kind = name.property(TYPE_KEY).ok_or_else(|| missing(TYPE_KEY))?;

        let mut dest = Self::new(naming);
        dest.set_destination_type(kind)?;
        dest.set_destination_name(destination)?;
        Ok(dest)
    }
}

impl Managed for Destination {
    fn management_info(&self) -> &'static ManagementInfo {
        &DESTINATION_INFO
    }

    fn get_attribute(&self, name: &str) -> Result<AttributeValue, ManagementError> {
        Ok(match name {
            "Destination" => self.destination_name().into(),
            "Type" => self.destination_type().into(),
            "JndiName" => self.jndi_name().into(),
            "DataReaderQosPolicy" => self.data_reader_policy().into(),
            "DataWriterQosPolicy" => self.data_writer_policy().into(),
            "TopicQosPolicy" => self.topic_policy().into(),
            "Started" => self.is_started().into(),
            _ => return Err(ManagementError::invalid(format!("unknown attribute {}", name))),
        })
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), ManagementError> {
        let text = match value {
            AttributeValue::Str(s) => s,
            AttributeValue::Bool(_) => {
                return Err(ManagementError::invalid(format!(
                    "attribute {} expects a string",
                    name
                )))
            }
        };

        match name {
            "JndiName" => self.set_jndi_name(text.as_deref()),
            "DataReaderQosPolicy" => {
                self.set_data_reader_policy(text);
                Ok(())
            }
            "DataWriterQosPolicy" => {
                self.set_data_writer_policy(text);
                Ok(())
            }
            "TopicQosPolicy" => {
                self.set_topic_policy(text);
                Ok(())
            }
            "Destination" | "Type" | "Started" => Err(ManagementError::invalid(format!(
                "attribute {} is read-only",
                name
            ))),
            _ => Err(ManagementError::invalid(format!("unknown attribute {}", name))),
        }
    }

    fn invoke(&mut self, operation: &str) -> Result<(), ManagementError> {
        match operation {
            "start" => self.start(),
            "stop" => self.stop(),
            _ => Err(ManagementError::invalid(format!(
                "unknown operation {}",
                operation
            ))),
        }
    }
}
