//! Inbound host control calls.
//!
//! The host can only toggle the diagnostic sink; nothing here reaches the
//! state machine. Unknown methods are answered with
//! [`ControlError::NotImplemented`] so the host transport can map them to
//! its own not-implemented reply.

use softkey_core::Diagnostics;
use thiserror::Error;

/// Errors answering a host control call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ControlError {
    /// The method name is not part of the control surface.
    #[error("method not implemented: {0}")]
    NotImplemented(String),
}

/// A parsed host control call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    /// Enable the diagnostic logging sink.
    StartLogging,
    /// Disable the diagnostic logging sink.
    StopLogging,
}

impl HostCall {
    /// Parse a raw method name.
    pub fn parse(method: &str) -> Result<Self, ControlError> {
        match method {
            "startLogging" => Ok(Self::StartLogging),
            "stopLogging" => Ok(Self::StopLogging),
            other => Err(ControlError::NotImplemented(other.to_string())),
        }
    }

    /// Apply the call to the engine's diagnostics handle.
    pub fn apply(self, diag: &Diagnostics) {
        match self {
            Self::StartLogging => diag.set_enabled(true),
            Self::StopLogging => diag.set_enabled(false),
        }
        log::debug!("diagnostics {}", if diag.is_enabled() { "enabled" } else { "disabled" });
    }
}

/// Parse and apply a raw host method call in one step.
pub fn handle_call(method: &str, diag: &Diagnostics) -> Result<(), ControlError> {
    HostCall::parse(method).map(|call| call.apply(diag))
}
