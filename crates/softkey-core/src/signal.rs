//! Raw platform signals and the signal-source abstraction.
//!
//! The engine never registers platform callbacks itself; each host supplies
//! an adapter implementing [`SignalSource`] and forwards its raw events as
//! [`Signal`] values. Lifecycle transitions (created/resumed/paused) are not
//! signals — they gate signal delivery and are reported directly to the
//! lifecycle synchronizer.

/// A raw, possibly racy or duplicated platform signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// The OS reported a keyboard visibility change.
    VisibilityChanged(bool),
    /// A show/hide animation frame with current raw geometry.
    AnimationProgress {
        /// Keyboard height in physical pixels.
        raw_height_px: f64,
        /// Bottom safe-area padding in physical pixels.
        raw_padding_px: f64,
    },
    /// The show/hide animation finished.
    AnimationEnd,
}

/// A direct ground-truth read of the current insets, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawInsets {
    /// Keyboard height in physical pixels.
    pub height_px: f64,
    /// Bottom safe-area padding in physical pixels.
    pub padding_px: f64,
}

/// Platform adapter the engine pulls density and ground truth from.
///
/// `attach`/`detach` scope signal delivery around pause/resume: after
/// `detach` returns, the host must not forward any further [`Signal`] until
/// the next `attach`.
pub trait SignalSource {
    /// Physical pixels per device-independent unit. Implementations may
    /// return any value; the engine sanitizes it (see [`crate::units`]).
    fn density_factor(&self) -> f64;

    /// Begin delivering signals.
    fn attach(&mut self);

    /// Stop delivering signals. Hard boundary: no in-flight signal may be
    /// observed after this returns.
    fn detach(&mut self);

    /// Measure current insets directly, bypassing the event path.
    ///
    /// Returns `None` when there is no measurable surface (no window/root
    /// view yet); the caller treats that as an expected transient, not a
    /// fault.
    fn measure(&self) -> Option<RawInsets>;
}

/// In-memory source for tests and scripted demos.
///
/// Ground truth can be mutated at any time (including while detached) to
/// simulate the OS changing keyboard visibility behind a backgrounded app.
#[derive(Debug)]
pub struct ScriptedSource {
    density: f64,
    attached: bool,
    insets: Option<RawInsets>,
}

impl ScriptedSource {
    /// Create a source with the given density and no measurable surface.
    pub fn new(density: f64) -> Self {
        Self {
            density,
            attached: false,
            insets: None,
        }
    }

    /// Set the ground-truth insets the next `measure` call will observe.
    pub fn set_insets(&mut self, height_px: f64, padding_px: f64) {
        self.insets = Some(RawInsets {
            height_px,
            padding_px,
        });
    }

    /// Remove the measurable surface (simulates a torn-down root view).
    pub fn clear_insets(&mut self) {
        self.insets = None;
    }

    /// Whether the engine currently accepts signals from this source.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl SignalSource for ScriptedSource {
    fn density_factor(&self) -> f64 {
        self.density
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn measure(&self) -> Option<RawInsets> {
        self.insets
    }
}
