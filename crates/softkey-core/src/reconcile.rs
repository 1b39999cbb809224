//! Keyboard-visibility reconciliation state machine.
//!
//! The OS delivers "is the keyboard visible" independently from "has the
//! show/hide animation finished"; the two can race, arrive duplicated, or be
//! missing entirely on some OS versions. This module resolves them into a
//! single deduplicated sequence of [`Emission`]s over one closed transition
//! table:
//!
//! - visibility-changed signals are authoritative for *beginning* a
//!   transition (`Opening`/`Closing`);
//! - animation-end signals are authoritative for *ending* one
//!   (`Open`/`Closed`), and are no-ops outside a transient state;
//! - a visibility signal that requires no state change emits nothing, which
//!   absorbs stale duplicates.
//!
//! An earlier prototype sampled the keyboard height on a timer during the
//! animation instead of consuming the discrete completion signal. That
//! approach proved unreliable across OS versions and was removed; completion
//! is driven exclusively by `AnimationEnd` and the resume-time ground-truth
//! measurement.

use crate::diag::Diagnostics;
use crate::emit::Emission;
use crate::signal::{RawInsets, Signal};
use crate::state::{KeyboardMetrics, KeyboardState, LifecyclePhase};
use crate::units;

/// The reconciliation state machine.
///
/// Owns the `(state, metrics, phase)` triple together with the lifecycle
/// synchronizer; nothing else mutates it. Every handler is a synchronous,
/// terminating computation — no locking, no timers.
#[derive(Debug)]
pub struct Reconciler {
    state: KeyboardState,
    metrics: KeyboardMetrics,
    phase: LifecyclePhase,
    diag: Diagnostics,
}

impl Reconciler {
    /// Create a machine in the initial `Closed` state, `Created` phase.
    pub fn new(diag: Diagnostics) -> Self {
        Self {
            state: KeyboardState::Closed,
            metrics: KeyboardMetrics::default(),
            phase: LifecyclePhase::Created,
            diag,
        }
    }

    /// Current reconciled state.
    pub fn state(&self) -> KeyboardState {
        self.state
    }

    /// Last retained metrics.
    pub fn metrics(&self) -> KeyboardMetrics {
        self.metrics
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Move to a new lifecycle phase. Driven by the synchronizer only.
    pub(crate) fn set_phase(&mut self, phase: LifecyclePhase) {
        self.phase = phase;
    }

    /// Consume one raw signal and return the ordered emissions it produces.
    ///
    /// Total over `(state, signal)`: every pair has a defined result, where
    /// an explicit no-op (empty vec) is a valid result. Deterministic given
    /// the current `(state, metrics, phase)` triple.
    pub fn handle(&mut self, signal: Signal, density_factor: f64) -> Vec<Emission> {
        // On some OS versions, visibility reports delivered while the view
        // is being constructed or torn down contradict each other. Nothing
        // received in the Created phase is trusted; the only permitted
        // effect is correcting the machine back to Closed.
        if self.phase == LifecyclePhase::Created {
            return match self.state {
                KeyboardState::Closed => Vec::new(),
                _ => {
                    self.diag.warn(format_args!(
                        "signal {signal:?} received in Created phase; forcing Closed from {:?}",
                        self.state
                    ));
                    vec![self.force_closed()]
                }
            };
        }

        match signal {
            Signal::VisibilityChanged(true) => match self.state {
                KeyboardState::Closed | KeyboardState::Closing => {
                    self.state = KeyboardState::Opening;
                    self.diag.debug(format_args!("keyboard opening"));
                    vec![Emission::Opening]
                }
                // Already opening/open: stale duplicate.
                KeyboardState::Opening | KeyboardState::Open => Vec::new(),
            },
            Signal::VisibilityChanged(false) => match self.state {
                KeyboardState::Opening | KeyboardState::Open => {
                    if self.metrics.height_units == 0.0 {
                        // Some OS versions report "hidden" with fully
                        // collapsed geometry atomically; no AnimationEnd
                        // will ever arrive, so close immediately instead of
                        // hanging in Closing.
                        self.diag.debug(format_args!("keyboard closed (atomic hide)"));
                        vec![self.force_closed()]
                    } else {
                        self.state = KeyboardState::Closing;
                        self.diag.debug(format_args!("keyboard closing"));
                        vec![Emission::Closing]
                    }
                }
                // Already closing/closed: stale duplicate.
                KeyboardState::Closing | KeyboardState::Closed => Vec::new(),
            },
            Signal::AnimationProgress {
                raw_height_px,
                raw_padding_px,
            } => {
                self.metrics = KeyboardMetrics::new(
                    units::normalize(raw_height_px, density_factor),
                    units::normalize(raw_padding_px, density_factor),
                );
                vec![Emission::Progress {
                    metrics: self.metrics,
                }]
            }
            Signal::AnimationEnd => match self.state {
                KeyboardState::Opening => {
                    self.state = KeyboardState::Open;
                    self.diag.debug(format_args!(
                        "keyboard opened at {} units",
                        self.metrics.height_units
                    ));
                    vec![Emission::Opened {
                        metrics: self.metrics,
                    }]
                }
                KeyboardState::Closing => {
                    self.diag.debug(format_args!("keyboard closed"));
                    vec![self.force_closed()]
                }
                // Duplicate or spurious completion signal.
                KeyboardState::Closed | KeyboardState::Open => Vec::new(),
            },
        }
    }

    /// Reconcile against a direct ground-truth measurement (resume path).
    ///
    /// Priority order: a zero measurement forces `Closed`, a nonzero one
    /// forces `Open`, and a measurement that already matches the tracked
    /// state only refreshes the metrics. The post-call state always reflects
    /// the measurement, even if no signal at all was delivered while paused.
    pub fn reconcile_measurement(
        &mut self,
        insets: RawInsets,
        density_factor: f64,
    ) -> Vec<Emission> {
        let height = units::normalize(insets.height_px, density_factor);
        let padding = units::normalize(insets.padding_px, density_factor);
        // A measurement under half a unit counts as closed, on both sides of
        // the priority check, so convergence cannot flip on rounding.
        let rounded = height.round();

        if rounded == 0.0 && self.state != KeyboardState::Closed {
            self.metrics = KeyboardMetrics::new(0.0, padding);
            self.diag.debug(format_args!(
                "measured height 0 while {:?}; forcing Closed",
                self.state
            ));
            vec![self.force_closed()]
        } else if rounded > 0.0 && self.state != KeyboardState::Open {
            self.state = KeyboardState::Open;
            self.metrics = KeyboardMetrics::new(height, padding);
            self.diag.debug(format_args!(
                "measured height {height} while not Open; forcing Open"
            ));
            vec![Emission::Opened {
                metrics: self.metrics,
            }]
        } else {
            // State already consistent with the measurement. The keyboard
            // may still have moved (padding, sub-unit height drift), so the
            // fresh metrics are still reported.
            if self.state == KeyboardState::Closed {
                self.metrics = KeyboardMetrics::new(0.0, padding);
            } else {
                self.metrics = KeyboardMetrics::new(height, padding);
            }
            vec![Emission::MetricsUpdate {
                metrics: self.metrics,
            }]
        }
    }

    /// Enter `Closed`, actively enforcing the `Closed ⇒ height == 0`
    /// invariant, and return the `closed` emission.
    fn force_closed(&mut self) -> Emission {
        if self.metrics.height_units != 0.0 {
            self.diag.warn(format_args!(
                "closing with nonzero last-measured height {}; forcing 0",
                self.metrics.height_units
            ));
            self.metrics.height_units = 0.0;
        }
        self.state = KeyboardState::Closed;
        Emission::Closed {
            metrics: self.metrics,
        }
    }
}
