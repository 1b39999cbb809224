//! C exports for the softkey engine.
//!
//! All functions must be called from the host's UI sequencing thread (the
//! engine instance is thread-local) and are panic-free: anything called
//! before `softkey_init` is a no-op.

use std::ffi::{c_char, CStr};

use softkey_bridge::handle_call;

use crate::{set_engine, with_engine, EmitFn, HostEngine, MeasureFn};

/// Initialize the engine.
///
/// # Arguments
/// * `density` - Physical pixels per device-independent unit (e.g. 2.0 for
///   Retina). Values <= 0 fall back to 1.0 inside the engine.
/// * `emit` - Callback receiving each channel message.
/// * `measure` - Optional ground-truth measurement callback used on resume
///   (null when the host cannot measure directly).
///
/// # Returns
/// `true` on success, `false` if no emit callback was supplied.
#[no_mangle]
pub extern "C" fn softkey_init(
    density: f64,
    emit: Option<EmitFn>,
    measure: Option<MeasureFn>,
) -> bool {
    // Initialize logging
    let _ = env_logger::try_init();

    log::info!("softkey_init: density={}", density);

    let Some(emit) = emit else {
        log::error!("softkey_init: emit callback is null");
        return false;
    };

    set_engine(Some(HostEngine::new(density, emit, measure)));
    true
}

/// Shutdown the engine and release resources.
#[no_mangle]
pub extern "C" fn softkey_shutdown() {
    log::info!("softkey_shutdown");
    set_engine(None);
}

/// The host view was created but is not yet interactive.
#[no_mangle]
pub extern "C" fn softkey_created() {
    with_engine(|engine| engine.watcher_mut().on_created());
}

/// The host app moved to the foreground.
#[no_mangle]
pub extern "C" fn softkey_resumed() {
    with_engine(|engine| engine.watcher_mut().on_resumed());
}

/// The host app moved to the background.
#[no_mangle]
pub extern "C" fn softkey_paused() {
    with_engine(|engine| engine.watcher_mut().on_paused());
}

/// The OS reported a keyboard visibility change.
#[no_mangle]
pub extern "C" fn softkey_visibility_changed(visible: bool) {
    with_engine(|engine| engine.watcher_mut().visibility_changed(visible));
}

/// A show/hide animation frame, in physical pixels.
#[no_mangle]
pub extern "C" fn softkey_animation_progress(raw_height_px: f64, raw_padding_px: f64) {
    with_engine(|engine| {
        engine
            .watcher_mut()
            .animation_progress(raw_height_px, raw_padding_px)
    });
}

/// The show/hide animation finished.
#[no_mangle]
pub extern "C" fn softkey_animation_end() {
    with_engine(|engine| engine.watcher_mut().animation_end());
}

/// Toggle the diagnostic logging sink.
#[no_mangle]
pub extern "C" fn softkey_set_logging(enabled: bool) {
    with_engine(|engine| engine.watcher_mut().diagnostics().set_enabled(enabled));
}

/// Handle a raw host control call by method name.
///
/// # Returns
/// `false` for unknown methods (host should answer not-implemented), `true`
/// when the call was applied. Calls before init return `false`.
#[no_mangle]
pub extern "C" fn softkey_control(method: *const c_char) -> bool {
    if method.is_null() {
        return false;
    }
    let Ok(method) = (unsafe { CStr::from_ptr(method) }).to_str() else {
        return false;
    };

    with_engine(|engine| handle_call(method, engine.watcher_mut().diagnostics()).is_ok())
        .unwrap_or(false)
}
