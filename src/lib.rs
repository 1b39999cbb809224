//! softkey: keyboard-visibility tracking for embedded UI hosts.
//!
//! Facade over [`softkey_core`]; see that crate for the engine itself.

pub use softkey_core::{
    BufferSink, Diagnostics, Emission, EmissionSink, KeyboardKind, KeyboardMetrics,
    KeyboardState, KeyboardWatcher, LifecyclePhase, NullSink, RawInsets, ScriptedSource, Signal,
    SignalSource,
};
