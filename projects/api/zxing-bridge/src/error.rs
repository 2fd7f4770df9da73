//! Error types for the safe layer.
//!
//! Every fallible operation returns [`BridgeResult`]. Errors that come from the
//! native engine always carry the message read from its error channel (see
//! [`crate::last_error`]); errors detected locally never touch that channel.

use crate::allocate::AllocateError;
use thiserror::Error;

/// Broad classification of a [`BridgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A native handle could not be created.
    ConstructionFailure,
    /// Caller-supplied geometry, buffer, payload or name violates a precondition.
    InvalidArgument,
    /// A native call returned its failure sentinel.
    EngineFailure,
    /// The engine produced data in a representation this layer cannot convert.
    UnsupportedFormat,
    /// An operation was attempted on a released handle.
    UsageError,
}

/// Errors produced by the safe layer.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The engine refused to create a handle.
    #[error("failed to create {what}: {message}")]
    ConstructionFailure {
        /// The kind of handle being created.
        what: &'static str,
        /// Message from the engine's error channel.
        message: String,
    },

    /// A precondition on caller input was violated. Detected before any native call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A barcode format name is not in the registry.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// A native call failed.
    #[error("{operation} failed: {message}")]
    EngineFailure {
        /// The native operation that failed.
        operation: &'static str,
        /// Message from the engine's error channel.
        message: String,
    },

    /// The engine handed back data in a layout this layer does not convert.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The engine returned an enum value this layer does not know.
    #[error("engine returned unknown {what} value {value}")]
    UnknownValue {
        /// The enum being read.
        what: &'static str,
        /// The raw value.
        value: i64,
    },

    /// The handle was already released.
    #[error("{0} used after it was closed")]
    UsageError(&'static str),

    /// Allocating an owned buffer failed.
    #[error(transparent)]
    Allocation(#[from] AllocateError),
}

impl BridgeError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::ConstructionFailure { .. } | BridgeError::Allocation(_) => {
                ErrorKind::ConstructionFailure
            }
            BridgeError::InvalidArgument(_) | BridgeError::UnknownFormat(_) => {
                ErrorKind::InvalidArgument
            }
            BridgeError::EngineFailure { .. } => ErrorKind::EngineFailure,
            BridgeError::UnsupportedFormat(_) | BridgeError::UnknownValue { .. } => {
                ErrorKind::UnsupportedFormat
            }
            BridgeError::UsageError(_) => ErrorKind::UsageError,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BridgeError::InvalidArgument(message.into())
    }
}

/// Result type used throughout the crate.
pub type BridgeResult<T> = Result<T, BridgeError>;
