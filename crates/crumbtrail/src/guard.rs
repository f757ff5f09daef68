//! Transition guard.
//!
//! While a page transition or the initial hydration is in progress the
//! visible trail must not change, otherwise the client flickers or disagrees
//! with the server-rendered markup. The guard is a paused flag; readers that
//! see it set serve the last committed trail instead of a fresh one.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Shared state key under which the last committed trail of list `id` is kept.
pub fn state_key(id: &str) -> String {
    format!("crumbtrail:breadcrumb:{id}")
}

/// Paused/live flag for one breadcrumb list.
#[derive(Debug, Default)]
pub struct TransitionGuard {
    paused: AtomicBool,
}

impl TransitionGuard {
    pub fn new(paused: bool) -> Self {
        Self {
            paused: AtomicBool::new(paused),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Pause publication. Returns `true` if the guard was live.
    pub fn pause(&self) -> bool {
        let changed = !self.paused.swap(true, Ordering::SeqCst);
        if changed {
            debug!("breadcrumb updates paused");
        }
        changed
    }

    /// Resume publication. Returns `true` if the guard was paused.
    pub fn resume(&self) -> bool {
        let changed = self.paused.swap(false, Ordering::SeqCst);
        if changed {
            debug!("breadcrumb updates resumed");
        }
        changed
    }
}
