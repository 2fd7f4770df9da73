//! The engine's error channel.
//!
//! The engine keeps a single "last error" message per calling thread. A failing
//! call writes it and nothing correlates it with the call. Wrappers must read it
//! right after a call returns its failure sentinel (null handle, null string or
//! negative count) and before issuing any other native call, otherwise a later
//! call can overwrite or misattribute it.
//!
//! Reading the channel clears it. When the channel is empty at that point, a
//! generic message naming the failed operation is used instead, so callers
//! never see a blank error.

use crate::engine::Engine;
use crate::error::BridgeError;
use crate::marshal::take_string;

/// Reads and clears the pending error message.
///
/// Returns [`None`] when the channel is empty or holds an empty string.
pub fn take_last_error(engine: Engine) -> Option<String> {
    // SAFETY: returns an engine-allocated copy of the message, or null.
    let ptr = unsafe { (engine.api().last_error_msg)() };
    // SAFETY: ownership of `ptr` is transferred to us; `take_string` frees it.
    let message = unsafe { take_string(engine, ptr) }?;
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

/// Reads the error channel for a failed `operation`, synthesising a message if
/// it is empty.
pub(crate) fn failure_message(engine: Engine, operation: &str) -> String {
    match take_last_error(engine) {
        Some(message) => message,
        None => {
            log::warn!("{operation} failed without setting the engine error message");
            format!("{operation} failed without an error message")
        }
    }
}

/// Builds an [`BridgeError::EngineFailure`] for `operation` from the error channel.
pub(crate) fn engine_failure(engine: Engine, operation: &'static str) -> BridgeError {
    BridgeError::EngineFailure {
        operation,
        message: failure_message(engine, operation),
    }
}

/// Builds a [`BridgeError::ConstructionFailure`] for a handle of kind `what`.
pub(crate) fn construction_failure(engine: Engine, what: &'static str) -> BridgeError {
    BridgeError::ConstructionFailure {
        what,
        message: failure_message(engine, what),
    }
}
