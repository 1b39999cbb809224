//! Emissions produced by the reconciler and their delivery seam.
//!
//! An emission is one step of the deduplicated, ordered visibility sequence.
//! Delivery is fire-and-forget: exactly one registered consumer, emissions
//! handed over in the order the triggering signals were received, and the
//! reconciler never blocks on the consumer.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::state::KeyboardMetrics;

/// One step of the reconciled keyboard-visibility sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Emission {
    /// A show animation began.
    Opening,
    /// The keyboard is fully visible.
    Opened {
        /// Final measured geometry.
        metrics: KeyboardMetrics,
    },
    /// An animation frame updated the geometry; no state transition.
    Progress {
        /// Current measured geometry.
        metrics: KeyboardMetrics,
    },
    /// A hide animation began.
    Closing,
    /// The keyboard is fully hidden. `metrics.height_units` is always `0`.
    Closed {
        /// Geometry with the height forced to zero.
        metrics: KeyboardMetrics,
    },
    /// Fresh ground-truth geometry with no state change (resume path).
    MetricsUpdate {
        /// Re-measured geometry.
        metrics: KeyboardMetrics,
    },
}

impl Emission {
    /// The host method-channel name this emission is delivered under.
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Opening => "keyboardOpening",
            Self::Opened { .. } => "keyboardOpened",
            Self::Progress { .. } => "onProgress",
            Self::Closing => "keyboardClosing",
            Self::Closed { .. } => "keyboardClosed",
            Self::MetricsUpdate { .. } => "metricsUpdate",
        }
    }

    /// The metrics snapshot carried by this emission, if any.
    pub fn metrics(&self) -> Option<KeyboardMetrics> {
        match self {
            Self::Opening | Self::Closing => None,
            Self::Opened { metrics }
            | Self::Progress { metrics }
            | Self::Closed { metrics }
            | Self::MetricsUpdate { metrics } => Some(*metrics),
        }
    }
}

/// Consumer seam for the emission sequence.
///
/// Implementations must not feed back into the reconciler; they only ever
/// receive immutable snapshots.
pub trait EmissionSink {
    /// Deliver one emission. Fire-and-forget: no acknowledgement.
    fn deliver(&mut self, emission: &Emission);
}

/// Default sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EmissionSink for NullSink {
    fn deliver(&mut self, _emission: &Emission) {}
}

/// Buffering sink that retains emissions in order until drained.
#[derive(Debug, Default)]
pub struct BufferSink {
    emissions: VecDeque<Emission>,
}

impl BufferSink {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty()
    }

    /// Get the number of pending emissions.
    pub fn len(&self) -> usize {
        self.emissions.len()
    }

    /// Pop the oldest pending emission.
    pub fn pop(&mut self) -> Option<Emission> {
        self.emissions.pop_front()
    }

    /// Drain all pending emissions in delivery order.
    pub fn drain(&mut self) -> impl Iterator<Item = Emission> + '_ {
        self.emissions.drain(..)
    }
}

impl EmissionSink for BufferSink {
    fn deliver(&mut self, emission: &Emission) {
        self.emissions.push_back(*emission);
    }
}
