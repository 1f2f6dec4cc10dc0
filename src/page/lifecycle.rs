//! Page lifecycle: attachment states and the transition log.
//!
//! The `LifecycleTracker` holds the current [`LifecycleState`] of a page and
//! keeps a bounded log of recent transitions, so a navigation controller or
//! a test can drain and inspect them. Once the log is full the oldest entry
//! is dropped for each new one.

use std::collections::VecDeque;

/// Transitions kept in the log before the oldest are dropped.
pub const MAX_PENDING_TRANSITIONS: usize = 64;

// ---------------------------------------------------------------------------
// LifecycleState
// ---------------------------------------------------------------------------

/// Where a page is in its attach/load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Created, never attached.
    Constructed,
    /// Native view exists and is part of the hierarchy.
    Attached,
    /// Attached and loaded notifications fired.
    Loaded,
    /// No longer visible; native resources may still be retained.
    Unloaded,
    /// Native resources released.
    Detached,
}

impl LifecycleState {
    /// Whether native resources exist in this state.
    pub fn retains_native(self) -> bool {
        matches!(self, Self::Attached | Self::Loaded | Self::Unloaded)
    }
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// One recorded state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleTransition {
    pub from: LifecycleState,
    pub to: LifecycleState,
}

/// Current state plus the most recent transitions not yet drained.
#[derive(Debug)]
pub struct LifecycleTracker {
    state: LifecycleState,
    pending: VecDeque<LifecycleTransition>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Constructed,
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Move to `to`. Moving to the current state is a no-op and returns `false`.
    pub fn transition(&mut self, to: LifecycleState) -> bool {
        if self.state == to {
            return false;
        }
        if self.pending.len() == MAX_PENDING_TRANSITIONS {
            self.pending.pop_front();
        }
        self.pending.push_back(LifecycleTransition {
            from: self.state,
            to,
        });
        self.state = to;
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LifecycleState::Loaded
    }

    pub fn retains_native(&self) -> bool {
        self.state.retains_native()
    }

    /// Drain and return the recorded transitions, oldest first.
    pub fn pending_transitions(&mut self) -> Vec<LifecycleTransition> {
        self.pending.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}
