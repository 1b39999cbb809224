//! Lifecycle synchronizer: the outward face of the engine.
//!
//! Wraps the reconciler together with the platform [`SignalSource`] and the
//! consumer [`EmissionSink`]. While the host app is paused the OS can change
//! keyboard visibility without delivering anything to us, so resume is the
//! one point where ground truth is re-established: the source is re-attached
//! and a direct measurement (bypassing the event path) corrects any drift.

use crate::diag::Diagnostics;
use crate::emit::{Emission, EmissionSink};
use crate::reconcile::Reconciler;
use crate::signal::{Signal, SignalSource};
use crate::state::{KeyboardMetrics, KeyboardState, LifecyclePhase};

/// Keyboard-visibility engine: reconciler + signal source + emission sink.
///
/// All methods are synchronous and must be called from the host's single
/// sequencing thread; the engine holds no locks.
pub struct KeyboardWatcher<S: SignalSource> {
    reconciler: Reconciler,
    source: S,
    sink: Box<dyn EmissionSink>,
    diag: Diagnostics,
}

impl<S: SignalSource> KeyboardWatcher<S> {
    /// Create a watcher in the `Created` phase with the keyboard `Closed`.
    pub fn new(source: S, sink: Box<dyn EmissionSink>, diag: Diagnostics) -> Self {
        Self {
            reconciler: Reconciler::new(diag.clone()),
            source,
            sink,
            diag,
        }
    }

    /// Current reconciled state.
    pub fn state(&self) -> KeyboardState {
        self.reconciler.state()
    }

    /// Last retained metrics.
    pub fn metrics(&self) -> KeyboardMetrics {
        self.reconciler.metrics()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.reconciler.phase()
    }

    /// The diagnostics switch shared with the reconciler.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    /// The platform source (scripted sources are mutated through this in
    /// tests and demos).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// View exists but is not yet interactive. Signals may already arrive
    /// and are untrusted; only the forced-Closed correction stays live.
    pub fn on_created(&mut self) {
        self.diag.debug(format_args!("lifecycle: created"));
        self.reconciler.set_phase(LifecyclePhase::Created);
        self.source.attach();
    }

    /// App moved to the foreground. Re-attaches the source, then reconciles
    /// against a direct measurement. When nothing is measurable (no window
    /// or root view yet) the resume is a silent no-op beyond re-attaching.
    pub fn on_resumed(&mut self) {
        self.diag.debug(format_args!(
            "lifecycle: resumed (state {:?})",
            self.reconciler.state()
        ));
        self.reconciler.set_phase(LifecyclePhase::Resumed);
        self.source.attach();

        let Some(insets) = self.source.measure() else {
            return;
        };
        let density = self.source.density_factor();
        let emissions = self.reconciler.reconcile_measurement(insets, density);
        self.deliver(emissions);
    }

    /// App moved to the background. Detaches the source before flipping the
    /// phase — the hard boundary after which no in-flight signal is
    /// processed. State and metrics are retained as stale truth.
    pub fn on_paused(&mut self) {
        self.diag.debug(format_args!(
            "lifecycle: paused (state {:?})",
            self.reconciler.state()
        ));
        self.source.detach();
        self.reconciler.set_phase(LifecyclePhase::Paused);
    }

    /// Feed one raw signal from the source adapter.
    pub fn signal(&mut self, signal: Signal) {
        if self.reconciler.phase() == LifecyclePhase::Paused {
            // The source is detached while paused; anything that still
            // arrives is out of contract and dropped.
            self.diag.debug(format_args!("dropping {signal:?} while paused"));
            return;
        }
        let density = self.source.density_factor();
        let emissions = self.reconciler.handle(signal, density);
        self.deliver(emissions);
    }

    /// The OS reported a keyboard visibility change.
    pub fn visibility_changed(&mut self, visible: bool) {
        self.signal(Signal::VisibilityChanged(visible));
    }

    /// A show/hide animation frame with raw pixel geometry.
    pub fn animation_progress(&mut self, raw_height_px: f64, raw_padding_px: f64) {
        self.signal(Signal::AnimationProgress {
            raw_height_px,
            raw_padding_px,
        });
    }

    /// The show/hide animation finished.
    pub fn animation_end(&mut self) {
        self.signal(Signal::AnimationEnd);
    }

    fn deliver(&mut self, emissions: Vec<Emission>) {
        for emission in &emissions {
            self.sink.deliver(emission);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ScriptedSource;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink that records delivered method names, shared with the test body.
    #[derive(Default)]
    struct RecordingSink {
        methods: Rc<RefCell<Vec<&'static str>>>,
    }

    impl EmissionSink for RecordingSink {
        fn deliver(&mut self, emission: &Emission) {
            self.methods.borrow_mut().push(emission.method_name());
        }
    }

    fn watcher_with_log() -> (
        KeyboardWatcher<ScriptedSource>,
        Rc<RefCell<Vec<&'static str>>>,
    ) {
        let methods = Rc::new(RefCell::new(Vec::new()));
        let sink = RecordingSink {
            methods: methods.clone(),
        };
        let watcher = KeyboardWatcher::new(
            ScriptedSource::new(2.0),
            Box::new(sink),
            Diagnostics::new(),
        );
        (watcher, methods)
    }

    #[test]
    fn test_resume_measures_ground_truth() {
        let (mut watcher, methods) = watcher_with_log();
        watcher.source_mut().set_insets(604.0, 68.0);

        watcher.on_resumed();
        assert_eq!(watcher.state(), KeyboardState::Open);
        assert_eq!(watcher.metrics().height_units, 302.0);
        assert_eq!(&*methods.borrow(), &["keyboardOpened"]);
    }

    #[test]
    fn test_pause_then_external_close_converges_on_resume() {
        // Scenario D: open, pause, keyboard closes with no signal, resume.
        let (mut watcher, methods) = watcher_with_log();
        watcher.source_mut().set_insets(600.0, 0.0);
        watcher.on_resumed();
        assert_eq!(watcher.state(), KeyboardState::Open);

        watcher.on_paused();
        assert!(!watcher.source_mut().is_attached());
        // External close while backgrounded: ground truth changes, no signal.
        watcher.source_mut().set_insets(0.0, 0.0);

        watcher.on_resumed();
        assert_eq!(watcher.state(), KeyboardState::Closed);
        assert_eq!(watcher.metrics().height_units, 0.0);
        // No `keyboardClosing` was ever emitted.
        assert_eq!(&*methods.borrow(), &["keyboardOpened", "keyboardClosed"]);
    }

    #[test]
    fn test_resume_with_consistent_state_reports_metrics_only() {
        let (mut watcher, methods) = watcher_with_log();
        watcher.source_mut().set_insets(600.0, 40.0);
        watcher.on_resumed();

        watcher.on_paused();
        watcher.source_mut().set_insets(620.0, 40.0);
        watcher.on_resumed();

        assert_eq!(watcher.state(), KeyboardState::Open);
        assert_eq!(watcher.metrics().height_units, 310.0);
        assert_eq!(&*methods.borrow(), &["keyboardOpened", "metricsUpdate"]);
    }

    #[test]
    fn test_resume_without_surface_is_silent() {
        let (mut watcher, methods) = watcher_with_log();

        watcher.on_resumed();
        assert!(watcher.source_mut().is_attached());
        assert!(methods.borrow().is_empty());
        assert_eq!(watcher.state(), KeyboardState::Closed);
    }

    #[test]
    fn test_signals_dropped_while_paused() {
        let (mut watcher, methods) = watcher_with_log();
        watcher.source_mut().set_insets(0.0, 0.0);
        watcher.on_resumed();
        methods.borrow_mut().clear();

        watcher.on_paused();
        watcher.visibility_changed(true);
        watcher.animation_progress(300.0, 0.0);
        watcher.animation_end();

        assert!(methods.borrow().is_empty());
        assert_eq!(watcher.state(), KeyboardState::Closed);
    }

    #[test]
    fn test_created_phase_correction_through_watcher() {
        let (mut watcher, methods) = watcher_with_log();
        watcher.source_mut().set_insets(600.0, 0.0);
        watcher.on_resumed();
        assert_eq!(watcher.state(), KeyboardState::Open);
        methods.borrow_mut().clear();

        // Conflicting visibility reports while the view is torn down.
        watcher.on_created();
        watcher.visibility_changed(false);
        assert_eq!(watcher.state(), KeyboardState::Closed);
        assert_eq!(&*methods.borrow(), &["keyboardClosed"]);
    }

    #[test]
    fn test_full_open_close_delivery_order() {
        let (mut watcher, methods) = watcher_with_log();
        watcher.source_mut().set_insets(0.0, 0.0);
        watcher.on_resumed();
        methods.borrow_mut().clear();

        watcher.visibility_changed(true);
        watcher.animation_progress(300.0, 0.0);
        watcher.animation_progress(600.0, 0.0);
        watcher.animation_end();
        watcher.visibility_changed(false);
        watcher.animation_progress(0.0, 0.0);
        watcher.animation_end();

        assert_eq!(
            &*methods.borrow(),
            &[
                "keyboardOpening",
                "onProgress",
                "onProgress",
                "keyboardOpened",
                "keyboardClosing",
                "onProgress",
                "keyboardClosed",
            ]
        );
    }
}
