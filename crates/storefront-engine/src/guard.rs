//! Cancellation guard for asynchronous loads.
//!
//! A view that starts a load takes a [`LoadTicket`] from its [`LoadSlot`].
//! Starting another load, or tearing the view down, invalidates every ticket
//! issued before; a result that comes back with an invalid ticket is dropped
//! instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle proving which load a result belongs to.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadTicket {
    /// Whether a newer load or a teardown has superseded this one.
    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }
}

/// Cancels a slot's outstanding loads without borrowing the slot.
#[derive(Debug, Clone)]
pub struct LoadCanceller {
    current: Arc<AtomicU64>,
}

impl LoadCanceller {
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }
}

/// Holds the latest applied result of a guarded load.
#[derive(Debug)]
pub struct LoadSlot<T> {
    current: Arc<AtomicU64>,
    value: Option<T>,
}

impl<T> LoadSlot<T> {
    pub fn new() -> Self {
        Self {
            current: Arc::new(AtomicU64::new(0)),
            value: None,
        }
    }

    /// Start a load, cancelling any that are still in flight.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Cancel every outstanding load. The applied value is kept.
    pub fn teardown(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// A handle that tears down from elsewhere, e.g. while a load holds
    /// the slot mutably.
    pub fn canceller(&self) -> LoadCanceller {
        LoadCanceller {
            current: Arc::clone(&self.current),
        }
    }

    /// Apply a finished load's result. Returns false if it was stale.
    pub fn complete(&mut self, ticket: &LoadTicket, value: T) -> bool {
        if ticket.is_cancelled() || !Arc::ptr_eq(&ticket.current, &self.current) {
            tracing::debug!(generation = ticket.generation, "dropping stale load result");
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T> Default for LoadSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
