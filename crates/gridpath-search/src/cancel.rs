//! Ready-made [`Cancel`] implementations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::traits::Cancel;

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Cancel for Never {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag, so one clone can be handed to an input
/// thread while the search polls another.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }

    /// Clear a previous request so the token can be reused for another run.
    #[inline]
    pub fn reset(&self) {
        self.done.store(false, Ordering::Relaxed);
    }
}

impl Cancel for CancelToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }
}

/// Cancels once a wall-clock instant has passed.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Expire at `at`.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// Expire `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    /// Time left before expiry (zero once expired).
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}

impl Cancel for Deadline {
    #[inline]
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.at
    }
}
