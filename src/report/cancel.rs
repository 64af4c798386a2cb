//! Ctrl+C coordination between the signal handler and running work
//!
//! While a conversion or compression is in flight the handler only raises a
//! flag; the work stops at the next file boundary so staging directories and
//! partial outputs are cleaned up by their owners. With nothing in flight the
//! handler may exit right away.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Thread-safe handle; one clone goes to the signal handler.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    requested: AtomicBool,
    busy: AtomicUsize,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interrupt. Returns `true` when running work will stop on its
    /// own; `false` means nothing is running (or a stop was already pending)
    /// and the caller should exit.
    pub fn request(&self) -> bool {
        let already = self.inner.requested.swap(true, Ordering::SeqCst);
        !already && self.inner.busy.load(Ordering::SeqCst) > 0
    }

    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Mark work as in flight until the guard is dropped. Guards nest.
    pub fn busy(&self) -> BusyGuard {
        self.inner.busy.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            owner: self.clone(),
        }
    }
}

pub struct BusyGuard {
    owner: Cancellation,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.owner.inner.busy.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_request_asks_caller_to_exit() {
        let cancel = Cancellation::new();
        assert!(!cancel.request());
        assert!(cancel.is_requested());
    }

    #[test]
    fn test_busy_request_defers_to_work() {
        let cancel = Cancellation::new();
        let outer = cancel.busy();
        let inner = cancel.busy();
        drop(inner);

        assert!(cancel.request());
        assert!(cancel.is_requested());
        drop(outer);
    }

    #[test]
    fn test_second_request_forces_exit() {
        let cancel = Cancellation::new();
        let _guard = cancel.busy();

        assert!(cancel.request());
        assert!(!cancel.request());
    }

    #[test]
    fn test_clones_share_state() {
        let cancel = Cancellation::new();
        let handler_copy = cancel.clone();
        let _guard = cancel.busy();

        assert!(handler_copy.request());
        assert!(cancel.is_requested());
    }
}
