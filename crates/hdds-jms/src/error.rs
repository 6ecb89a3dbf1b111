// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Management errors.

use crate::naming::NamingError;
use thiserror::Error;

/// Errors surfaced by managed objects and the management registry.
#[derive(Debug, Error)]
pub enum ManagementError {
    /// Malformed or missing configuration value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Lifecycle operation invoked in the wrong state.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Bind/unbind failure reported by the naming context.
    #[error("Naming error: {0}")]
    Naming(#[from] NamingError),

    /// No managed object registered under this name.
    #[error("Object not registered: {0}")]
    NotRegistered(String),

    /// Another managed object is already registered under this name.
    #[error("Object already registered: {0}")]
    AlreadyRegistered(String),
}

/// Coarse classification of a [`ManagementError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    IllegalState,
    Naming,
    NotRegistered,
    AlreadyRegistered,
}

impl ManagementError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::IllegalState(_) => ErrorKind::IllegalState,
            Self::Naming(_) => ErrorKind::Naming,
            Self::NotRegistered(_) => ErrorKind::NotRegistered,
            Self::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }
}
