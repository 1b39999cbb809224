//! Keyboard state, lifecycle phase, and normalized metrics types.

use serde::{Deserialize, Serialize};

/// The reconciled visibility state of the software keyboard.
///
/// There is exactly one instance per engine, initialized to `Closed` and
/// mutated only by the reconciler and the lifecycle synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardState {
    /// Keyboard is fully hidden.
    #[default]
    Closed,
    /// A show animation is in flight.
    Opening,
    /// Keyboard is fully visible.
    Open,
    /// A hide animation is in flight.
    Closing,
}

impl KeyboardState {
    /// Whether an animation session is in flight.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Host-app lifecycle phase, as reported by the platform.
///
/// Gates whether raw signals are trusted: `Created` means the view exists
/// but is not yet interactive (signals are known-inconsistent on some OS
/// versions), `Paused` means no signals are delivered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    /// View exists but is not interactive yet; signals are suppressed.
    #[default]
    Created,
    /// Foreground; signals are trusted.
    Resumed,
    /// Background; signals are not delivered, last known state is stale truth.
    Paused,
}

/// Keyboard geometry in device-independent units.
///
/// The last measured value is always retained, except that `height_units`
/// is forced to `0` whenever the state becomes [`KeyboardState::Closed`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyboardMetrics {
    /// Keyboard height in device-independent units.
    pub height_units: f64,
    /// Bottom safe-area padding in device-independent units.
    pub bottom_padding_units: f64,
}

impl KeyboardMetrics {
    /// Create metrics from already-normalized values.
    pub fn new(height_units: f64, bottom_padding_units: f64) -> Self {
        Self {
            height_units,
            bottom_padding_units,
        }
    }

    /// Classify the keyboard presentation from its target height.
    pub fn kind(&self) -> KeyboardKind {
        KeyboardKind::from_height(self.height_units)
    }
}

/// Coarse classification of a keyboard presentation by target height.
///
/// Informational only; never feeds the reconciliation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardKind {
    /// No meaningful geometry reported.
    Unknown,
    /// Collapsed presentation (e.g. an accessory-bar-only keyboard).
    Minimized,
    /// Full keyboard.
    Full,
}

impl KeyboardKind {
    /// Classify a height in device-independent units.
    pub fn from_height(height_units: f64) -> Self {
        if height_units <= 0.0 {
            Self::Unknown
        } else if height_units < 100.0 {
            Self::Minimized
        } else {
            Self::Full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_closed() {
        assert_eq!(KeyboardState::default(), KeyboardState::Closed);
        assert_eq!(LifecyclePhase::default(), LifecyclePhase::Created);
    }

    #[test]
    fn test_transient_states() {
        assert!(KeyboardState::Opening.is_transient());
        assert!(KeyboardState::Closing.is_transient());
        assert!(!KeyboardState::Open.is_transient());
        assert!(!KeyboardState::Closed.is_transient());
    }

    #[test]
    fn test_kind_thresholds() {
        assert_eq!(KeyboardKind::from_height(0.0), KeyboardKind::Unknown);
        assert_eq!(KeyboardKind::from_height(-5.0), KeyboardKind::Unknown);
        assert_eq!(KeyboardKind::from_height(44.0), KeyboardKind::Minimized);
        assert_eq!(KeyboardKind::from_height(99.9), KeyboardKind::Minimized);
        assert_eq!(KeyboardKind::from_height(100.0), KeyboardKind::Full);
        assert_eq!(KeyboardKind::from_height(336.0), KeyboardKind::Full);
    }

    #[test]
    fn test_metrics_serialization() {
        let metrics = KeyboardMetrics::new(302.0, 34.0);
        let json = serde_json::to_string(&metrics).unwrap();
        let parsed: KeyboardMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(metrics, parsed);
    }
}
