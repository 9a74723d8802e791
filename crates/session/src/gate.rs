//! Single-flight gate for scroll-triggered window expansion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Admits at most one holder at a time; later callers are turned away, not queued.
///
/// Clones share the same flag, so the boundary can keep a handle to the gate
/// of the session it is feeding.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    busy: Arc<AtomicBool>,
}

/// Proof that the holder owns the gate. Released on drop.
#[derive(Debug)]
pub struct FlightTicket {
    busy: Arc<AtomicBool>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, or `None` if another flight is in progress
    pub fn try_begin(&self) -> Option<FlightTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(FlightTicket {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for FlightTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
