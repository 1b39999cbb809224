//! softkey-core: software-keyboard visibility reconciliation engine.
//!
//! Ingests raw, unordered, sometimes-duplicated platform signals
//! (visibility changes, animation progress/completion, app lifecycle
//! transitions) and produces one monotonic, deduplicated sequence of
//! visibility emissions plus metrics normalized to device-independent
//! units.
//!
//! The engine is platform-agnostic: each host supplies a [`SignalSource`]
//! adapter and an [`EmissionSink`] consumer, and drives everything from its
//! single UI sequencing thread.

pub mod diag;
pub mod emit;
pub mod lifecycle;
pub mod reconcile;
pub mod signal;
pub mod state;
pub mod units;

pub use diag::Diagnostics;
pub use emit::{BufferSink, Emission, EmissionSink, NullSink};
pub use lifecycle::KeyboardWatcher;
pub use reconcile::Reconciler;
pub use signal::{RawInsets, ScriptedSource, Signal, SignalSource};
pub use state::{KeyboardKind, KeyboardMetrics, KeyboardState, LifecyclePhase};
