//! softkey-bridge: host method-channel edge of the engine.
//!
//! Renders engine emissions into `(method, JSON arguments)` messages the
//! host UI framework understands, and parses the inbound control calls the
//! host may issue (`startLogging` / `stopLogging`).

pub mod channel;
pub mod control;

pub use channel::{ChannelMessage, ChannelSink, message_for};
pub use control::{ControlError, HostCall, handle_call};
