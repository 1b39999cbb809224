//! FFI exports for embedding the softkey engine in native host apps.
//!
//! This crate provides C-compatible functions so a platform shell
//! (Android/iOS/desktop embedder) can forward its raw keyboard signals and
//! receive the reconciled emission stream through a registered callback.

pub mod ffi;

use std::cell::RefCell;
use std::ffi::{c_char, CString};

use softkey_bridge::message_for;
use softkey_core::{
    Diagnostics, Emission, EmissionSink, KeyboardWatcher, RawInsets, SignalSource,
};
use softkey_config::SoftkeyConfig;

/// Host callback receiving one channel message per emission. `args_json` is
/// null for payload-less methods.
pub type EmitFn = extern "C" fn(method: *const c_char, args_json: *const c_char);

/// Host callback for direct ground-truth measurement, in physical pixels.
/// Returns `false` when no surface is measurable.
pub type MeasureFn = extern "C" fn(out_height_px: *mut f64, out_padding_px: *mut f64) -> bool;

/// Signal source backed by the host's registered callbacks.
pub struct HostSource {
    density: f64,
    measure: Option<MeasureFn>,
    attached: bool,
}

impl HostSource {
    fn new(density: f64, measure: Option<MeasureFn>) -> Self {
        Self {
            density,
            measure,
            attached: false,
        }
    }
}

impl SignalSource for HostSource {
    fn density_factor(&self) -> f64 {
        self.density
    }

    fn attach(&mut self) {
        if !self.attached {
            log::debug!("host source attached");
            self.attached = true;
        }
    }

    fn detach(&mut self) {
        if self.attached {
            log::debug!("host source detached");
            self.attached = false;
        }
    }

    fn measure(&self) -> Option<RawInsets> {
        let measure = self.measure?;
        let mut height_px = 0.0;
        let mut padding_px = 0.0;
        if measure(&mut height_px, &mut padding_px) {
            Some(RawInsets {
                height_px,
                padding_px,
            })
        } else {
            None
        }
    }
}

/// Sink that renders emissions to channel messages and invokes the host
/// callback with C strings.
struct CallbackSink {
    emit: EmitFn,
}

impl EmissionSink for CallbackSink {
    fn deliver(&mut self, emission: &Emission) {
        let message = message_for(emission);
        let Ok(method) = CString::new(message.method) else {
            return;
        };

        let args = message
            .arguments
            .as_ref()
            .map(|value| value.to_string())
            .and_then(|json| CString::new(json).ok());

        match args {
            Some(args) => (self.emit)(method.as_ptr(), args.as_ptr()),
            None => (self.emit)(method.as_ptr(), std::ptr::null()),
        }
    }
}

/// The per-thread engine instance owned by the FFI layer.
pub struct HostEngine {
    watcher: KeyboardWatcher<HostSource>,
}

impl HostEngine {
    /// Build an engine from host parameters plus `softkey.toml` / env config.
    pub fn new(density: f64, emit: EmitFn, measure: Option<MeasureFn>) -> Self {
        let config = SoftkeyConfig::load();
        let density = config.metrics.density_override.unwrap_or(density);
        let diag = Diagnostics::with_enabled(config.diagnostics.enabled);

        let watcher = KeyboardWatcher::new(
            HostSource::new(density, measure),
            Box::new(CallbackSink { emit }),
            diag,
        );
        Self { watcher }
    }

    /// The wrapped watcher.
    pub fn watcher_mut(&mut self) -> &mut KeyboardWatcher<HostSource> {
        &mut self.watcher
    }
}

// The engine is bound to the host's UI sequencing thread; thread_local
// storage enforces that structurally.
thread_local! {
    static ENGINE: RefCell<Option<HostEngine>> = const { RefCell::new(None) };
}

/// Run `f` against the current engine, if one is initialized.
pub fn with_engine<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut HostEngine) -> R,
{
    ENGINE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Install or clear the current engine.
pub fn set_engine(engine: Option<HostEngine>) {
    ENGINE.with(|cell| *cell.borrow_mut() = engine);
}

#[cfg(test)]
mod tests {
    use super::*;
    use softkey_core::KeyboardState;
    use std::sync::Mutex;

    static RECORDED: Mutex<Vec<(String, Option<String>)>> = Mutex::new(Vec::new());

    extern "C" fn record_emit(method: *const c_char, args_json: *const c_char) {
        let method = unsafe { std::ffi::CStr::from_ptr(method) }
            .to_string_lossy()
            .into_owned();
        let args = if args_json.is_null() {
            None
        } else {
            Some(
                unsafe { std::ffi::CStr::from_ptr(args_json) }
                    .to_string_lossy()
                    .into_owned(),
            )
        };
        RECORDED.lock().unwrap().push((method, args));
    }

    extern "C" fn measure_open(out_height: *mut f64, out_padding: *mut f64) -> bool {
        unsafe {
            *out_height = 604.0;
            *out_padding = 68.0;
        }
        true
    }

    extern "C" fn measure_unavailable(_out_height: *mut f64, _out_padding: *mut f64) -> bool {
        false
    }

    static SILENT_COUNT: Mutex<usize> = Mutex::new(0);

    extern "C" fn count_emit(_method: *const c_char, _args_json: *const c_char) {
        *SILENT_COUNT.lock().unwrap() += 1;
    }

    #[test]
    fn test_engine_delivers_channel_messages() {
        let mut engine = HostEngine::new(2.0, record_emit, Some(measure_open));
        engine.watcher_mut().on_resumed();
        assert_eq!(engine.watcher_mut().state(), KeyboardState::Open);

        let recorded = RECORDED.lock().unwrap();
        let (method, args) = recorded.last().unwrap();
        assert_eq!(method, "keyboardOpened");
        let args: serde_json::Value = serde_json::from_str(args.as_deref().unwrap()).unwrap();
        assert_eq!(args["height"], 302.0);
        assert_eq!(args["bottomPadding"], 34.0);
    }

    #[test]
    fn test_unmeasurable_surface_resumes_silently() {
        let mut engine = HostEngine::new(2.0, count_emit, Some(measure_unavailable));
        engine.watcher_mut().on_resumed();
        assert_eq!(*SILENT_COUNT.lock().unwrap(), 0);
        assert_eq!(engine.watcher_mut().state(), KeyboardState::Closed);
    }
}
