//! Injected diagnostics capability.
//!
//! The engine takes a [`Diagnostics`] handle at construction instead of an
//! ambient process flag. Disabled (the default) costs one relaxed atomic
//! load per call; enabled output goes through the `log` facade, so whatever
//! logger the embedding installs (the demo and FFI use `env_logger`)
//! receives it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable on/off switch over the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    enabled: Arc<AtomicBool>,
}

impl Diagnostics {
    /// Create a disabled handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle with the given initial switch position.
    pub fn with_enabled(enabled: bool) -> Self {
        let diag = Self::new();
        diag.set_enabled(enabled);
        diag
    }

    /// Flip the switch. Takes effect for all clones of this handle.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Current switch position.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Verbose trace of signal handling. Dropped while disabled.
    pub fn debug(&self, args: std::fmt::Arguments<'_>) {
        if self.is_enabled() {
            log::debug!("{}", args);
        }
    }

    /// Inconsistency reports (forced-invariant corrections). Dropped while
    /// disabled, like everything else on this handle.
    pub fn warn(&self, args: std::fmt::Arguments<'_>) {
        if self.is_enabled() {
            log::warn!("{}", args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let diag = Diagnostics::new();
        assert!(!diag.is_enabled());
    }

    #[test]
    fn test_toggle_is_shared_across_clones() {
        let diag = Diagnostics::new();
        let clone = diag.clone();

        diag.set_enabled(true);
        assert!(clone.is_enabled());

        clone.set_enabled(false);
        assert!(!diag.is_enabled());
    }
}
