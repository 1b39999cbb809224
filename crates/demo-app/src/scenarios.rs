//! Scripted signal scenarios for the demo binary.
//!
//! Each scenario replays a real-world signal pattern against the engine:
//! the racy and duplicated shapes come straight from observed platform
//! behavior.

use softkey::{KeyboardWatcher, ScriptedSource};

/// Selectable demo scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Ordinary open/close with animation frames.
    OpenClose,
    /// Keyboard hidden atomically with collapsed geometry (no animation).
    AtomicHide,
    /// Keyboard closes while the app is backgrounded; resume reconciles.
    BackgroundClose,
    /// Duplicated and out-of-order signals.
    RacyDuplicates,
}

impl ScenarioKind {
    /// Look up a scenario by CLI/config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "open-close" => Some(Self::OpenClose),
            "atomic-hide" => Some(Self::AtomicHide),
            "background-close" => Some(Self::BackgroundClose),
            "racy-duplicates" => Some(Self::RacyDuplicates),
            _ => None,
        }
    }

    /// All scenario names, for usage output.
    pub fn names() -> &'static [&'static str] {
        &[
            "open-close",
            "atomic-hide",
            "background-close",
            "racy-duplicates",
        ]
    }

    /// Replay this scenario's signals against the watcher.
    pub fn run(self, kb: &mut KeyboardWatcher<ScriptedSource>) {
        kb.source_mut().set_insets(0.0, 0.0);
        kb.on_resumed();

        match self {
            Self::OpenClose => {
                kb.visibility_changed(true);
                kb.animation_progress(180.0, 68.0);
                kb.animation_progress(420.0, 68.0);
                kb.animation_progress(604.0, 68.0);
                kb.animation_end();
                kb.visibility_changed(false);
                kb.animation_progress(300.0, 68.0);
                kb.animation_progress(0.0, 68.0);
                kb.animation_end();
            }
            Self::AtomicHide => {
                kb.visibility_changed(true);
                kb.animation_progress(604.0, 68.0);
                kb.animation_end();
                // Hidden reported with already-collapsed geometry.
                kb.animation_progress(0.0, 68.0);
                kb.visibility_changed(false);
            }
            Self::BackgroundClose => {
                kb.visibility_changed(true);
                kb.animation_progress(604.0, 68.0);
                kb.animation_end();
                kb.on_paused();
                // Focus moves elsewhere while backgrounded; nothing is
                // delivered, only ground truth changes.
                kb.source_mut().set_insets(0.0, 68.0);
                kb.on_resumed();
            }
            Self::RacyDuplicates => {
                kb.animation_end();
                kb.visibility_changed(true);
                kb.visibility_changed(true);
                kb.animation_progress(604.0, 68.0);
                kb.animation_end();
                kb.animation_end();
                kb.visibility_changed(false);
                kb.animation_progress(0.0, 68.0);
                kb.animation_end();
            }
        }
    }
}
