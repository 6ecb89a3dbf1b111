// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Management surface for destinations.
//!
//! Managed objects describe themselves with a static [`ManagementInfo`]
//! table (attributes, access, key properties, operations) instead of being
//! discovered by reflection. The [`ManagementRegistry`] holds registered
//! objects by [`ObjectName`] and serializes access to each one, so console
//! or container callers on different threads never run two lifecycle
//! operations on the same object at once.
//!
//! # Example
//!
//! ```
//! use hdds_jms::management::{AttributeValue, ManagementRegistry, ObjectName};
//! use hdds_jms::{Destination, InMemoryContext};
//! use std::sync::Arc;
//!
//! let ctx = Arc::new(InMemoryContext::new());
//! let registry = ManagementRegistry::new("hdds.jms");
//!
//! let name: ObjectName = "hdds.jms:destination=OrderEvents,type=Topic".parse().unwrap();
//! let dest = Destination::from_object_name(&name, ctx.clone()).unwrap();
//! registry.register(Box::new(dest)).unwrap();
//!
//! registry
//!     .set_attribute(&name, "JndiName", AttributeValue::from("jms/OrderEvents"))
//!     .unwrap();
//! registry.invoke(&name, "start").unwrap();
//! assert_eq!(
//!     registry.get_attribute(&name, "Started").unwrap(),
//!     AttributeValue::Bool(true)
//! );
//! ```

mod destination;

pub use destination::{DESTINATION_INFO, DESTINATION_KEY, TYPE_KEY};

use crate::error::ManagementError;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Attribute access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// One attribute in a management table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub access: Access,
    /// Must be set before the object can start.
    pub required: bool,
    /// Part of the object's identity; also named in its [`ObjectName`].
    pub key: Option<&'static str>,
}

impl AttributeInfo {
    pub fn is_writable(&self) -> bool {
        self.access == Access::ReadWrite
    }
}

/// One remotely invokable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Declarative description of a managed object type.
#[derive(Debug, Clone, Copy)]
pub struct ManagementInfo {
    pub description: &'static str,
    pub attributes: &'static [AttributeInfo],
    pub operations: &'static [OperationInfo],
}

impl ManagementInfo {
    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn operation(&self, name: &str) -> Option<&OperationInfo> {
        self.operations.iter().find(|o| o.name == name)
    }

    /// Key attributes, in table order.
    pub fn key_attributes(&self) -> impl Iterator<Item = &AttributeInfo> {
        self.attributes.iter().filter(|a| a.key.is_some())
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &AttributeInfo> {
        self.attributes.iter().filter(|a| a.required)
    }
}

/// Attribute value exchanged with the management surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Str(Option<String>),
    Bool(bool),
}

impl AttributeValue {
    /// String contents, if this is a set string attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => s.as_deref(),
            Self::Bool(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Str(Some(s.to_string()))
    }
}

impl From<Option<String>> for AttributeValue {
    fn from(s: Option<String>) -> Self {
        Self::Str(s)
    }
}

impl From<Option<&str>> for AttributeValue {
    fn from(s: Option<&str>) -> Self {
        Self::Str(s.map(str::to_string))
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(Some(s)) => write!(f, "{}", s),
            Self::Str(None) => write!(f, "<unset>"),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Identity of a managed object: `domain:key=value,key=value`.
///
/// Key properties are kept sorted by key, so two names with the same
/// properties compare equal regardless of the order they were given in.
/// Values containing `,`, `=`, `:`, `"`, `\` or surrounding whitespace are
/// written quoted, with `"` and `\` escaped by a backslash.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectName {
    domain: String,
    properties: Vec<(String, String)>,
}

impl ObjectName {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            properties: Vec::new(),
        }
    }

    /// Add a key property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self.properties.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain)?;
        for (i, (k, v)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}=", k)?;
            write_value(f, v)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectName {
    type Err = ManagementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ManagementError::invalid(format!("malformed object name '{}'", s));

        let (domain, props) = s.split_once(':').ok_or_else(invalid)?;
        if domain.trim().is_empty() || props.trim().is_empty() {
            return Err(invalid());
        }

        let mut name = Self::new(domain.trim());
        let mut rest = props;
        loop {
            let (k, tail) = rest.split_once('=').ok_or_else(invalid)?;
            let k = k.trim();
            let (v, tail) = read_value(tail).ok_or_else(invalid)?;
            if k.is_empty() || v.is_empty() || name.property(k).is_some() {
                return Err(invalid());
            }
            name = name.with_property(k, v);

            match tail {
                None => break,
                Some(next) => rest = next,
            }
        }
        Ok(name)
    }
}

fn needs_quoting(value: &str) -> bool {
    value.trim() != value || value.contains([',', '=', ':', '"', '\\'])
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if !needs_quoting(value) {
        return write!(f, "{}", value);
    }
    write!(f, "\"")?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "\"")
}

/// Read one property value, plain or quoted, up to the next `,`.
///
/// Returns the value and the text after the separator, if any.
fn read_value(input: &str) -> Option<(String, Option<&str>)> {
    let trimmed = input.trim_start();
    let Some(quoted) = trimmed.strip_prefix('"') else {
        return Some(match input.split_once(',') {
            Some((v, tail)) => (v.trim().to_string(), Some(tail)),
            None => (input.trim().to_string(), None),
        });
    };

    let mut value = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => value.push(chars.next()?.1),
            '"' => {
                let after = quoted[i + 1..].trim_start();
                return match after.strip_prefix(',') {
                    Some(tail) => Some((value, Some(tail))),
                    None if after.is_empty() => Some((value, None)),
                    None => None,
                };
            }
            _ => value.push(c),
        }
    }
    None
}

/// An object exposed through the management surface.
pub trait Managed: Send {
    fn management_info(&self) -> &'static ManagementInfo;

    fn get_attribute(&self, name: &str) -> Result<AttributeValue, ManagementError>;

    fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), ManagementError>;

    fn invoke(&mut self, operation: &str) -> Result<(), ManagementError>;

    /// Build the object name from the key attributes.
    fn object_name(&self, domain: &str) -> Result<ObjectName, ManagementError> {
        let mut name = ObjectName::new(domain);
        for attr in self.management_info().key_attributes() {
            let value = self.get_attribute(attr.name)?;
            let value = value.as_str().ok_or_else(|| {
                ManagementError::invalid(format!("key attribute {} is not set", attr.name))
            })?;
            if let Some(key) = attr.key {
                name = name.with_property(key, value);
            }
        }
        Ok(name)
    }
}

/// Registry of managed objects keyed by object name.
pub struct ManagementRegistry {
    domain: String,
    objects: RwLock<BTreeMap<ObjectName, Mutex<Box<dyn Managed>>>>,
}

impl ManagementRegistry {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Register an object under the name derived from its key attributes.
    pub fn register(&self, object: Box<dyn Managed>) -> Result<ObjectName, ManagementError> {
        let name = object.object_name(&self.domain)?;
        let mut objects = self.objects.write();
        if objects.contains_key(&name) {
            return Err(ManagementError::AlreadyRegistered(name.to_string()));
        }
        tracing::debug!("Registered {}", name);
        objects.insert(name.clone(), Mutex::new(object));
        Ok(name)
    }

    /// Remove an object and hand it back to the caller.
    pub fn unregister(&self, name: &ObjectName) -> Result<Box<dyn Managed>, ManagementError> {
        let object = self
            .objects
            .write()
            .remove(name)
            .ok_or_else(|| ManagementError::NotRegistered(name.to_string()))?;
        tracing::debug!("Unregistered {}", name);
        Ok(object.into_inner())
    }

    pub fn is_registered(&self, name: &ObjectName) -> bool {
        self.objects.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<ObjectName> {
        self.objects.read().keys().cloned().collect()
    }

    pub fn get_attribute(
        &self,
        name: &ObjectName,
        attribute: &str,
    ) -> Result<AttributeValue, ManagementError> {
        self.with_object(name, |object| {
            lookup_attribute(object.management_info(), attribute)?;
            object.get_attribute(attribute)
        })
    }

    /// Set an attribute. Read-only attributes are rejected here, before the
    /// object sees the value.
    pub fn set_attribute(
        &self,
        name: &ObjectName,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<(), ManagementError> {
        self.with_object(name, |object| {
            let info = lookup_attribute(object.management_info(), attribute)?;
            if !info.is_writable() {
                return Err(ManagementError::invalid(format!(
                    "attribute {} is read-only",
                    attribute
                )));
            }
            object.set_attribute(attribute, value)
        })
    }

    pub fn invoke(&self, name: &ObjectName, operation: &str) -> Result<(), ManagementError> {
        self.with_object(name, |object| {
            if object.management_info().operation(operation).is_none() {
                return Err(ManagementError::invalid(format!(
                    "unknown operation {}",
                    operation
                )));
            }
            object.invoke(operation)
        })
    }

    fn with_object<T>(
        &self,
        name: &ObjectName,
        f: impl FnOnce(&mut dyn Managed) -> Result<T, ManagementError>,
    ) -> Result<T, ManagementError> {
        let objects = self.objects.read();
        let object = objects
            .get(name)
            .ok_or_else(|| ManagementError::NotRegistered(name.to_string()))?;
        let mut guard = object.lock();
        f(&mut **guard)
    }
}

fn lookup_attribute<'a>(
    info: &'a ManagementInfo,
    attribute: &str,
) -> Result<&'a AttributeInfo, ManagementError> {
    info.attribute(attribute)
        .ok_or_else(|| ManagementError::invalid(format!("unknown attribute {}", attribute)))
}
