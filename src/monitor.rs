//! Cooperative cancellation for enumeration sessions.
//!
//! The search polls the monitor at every candidate expansion; a positive
//! signal makes the session stop and report `Outcome::Interrupted` with
//! whatever has been emitted so far. Polling is an explicit call passed down
//! the search, never a background interrupt.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub trait InterruptMonitor {
    fn is_interrupted(&self) -> bool;
}

/// A monitor that never signals interruption.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyMonitor;

impl InterruptMonitor for DummyMonitor {
    fn is_interrupted(&self) -> bool {
        false
    }
}

/// A monitor backed by an atomic flag. Clones share the flag, so one clone
/// can be handed to another thread to interrupt a running enumeration.
#[derive(Clone, Debug, Default)]
pub struct AtomicMonitor {
    interrupted: Arc<AtomicBool>,
}

impl AtomicMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.interrupted.store(false, Ordering::Relaxed);
    }
}

impl InterruptMonitor for AtomicMonitor {
    fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }
}

impl<M: InterruptMonitor + ?Sized> InterruptMonitor for &M {
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}
