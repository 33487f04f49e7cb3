//! Counting admission gate with FIFO-fair waiters.
//!
//! `AdmissionGate` caps the number of concurrently running logical tasks. An
//! acquirer is admitted immediately while permits are free; otherwise it waits
//! in arrival order until a holder releases.
//!
//! # Implementation
//!
//! Permits are backed by `tokio::sync::Semaphore`, whose waiter queue is
//! first-in first-out. Acquired permits are detached from the semaphore and
//! counted in `held`, so an explicit [`AdmissionGate::release`] can detect an
//! unbalanced release.
//!
//! # Examples
//!
//! ```rust
//! use eitherway::effect::AdmissionGate;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let gate = AdmissionGate::new(2);
//!
//! let value = gate.with_permit(async { 21 * 2 }).await;
//! assert_eq!(value, 42);
//! assert_eq!(gate.held(), 0);
//! # }
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;

use crate::effect::GateError;

/// A counting semaphore with a fixed capacity and FIFO admission.
pub struct AdmissionGate {
    /// Number of permits the gate was created with.
    capacity: NonZeroUsize,

    /// Free permits plus the FIFO queue of waiting acquirers.
    semaphore: Semaphore,

    /// Permits currently handed out.
    held: AtomicUsize,
}

impl fmt::Debug for AdmissionGate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AdmissionGate")
            .field("capacity", &self.capacity)
            .field("held", &self.held())
            .finish_non_exhaustive()
    }
}

impl AdmissionGate {
    /// Creates a gate admitting at most `capacity` holders at once.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use `try_new` for a non-panicking version.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::try_new(capacity).expect("AdmissionGate capacity must be greater than 0")
    }

    /// Tries to create a gate admitting at most `capacity` holders at once.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidCapacity`] if `capacity` is 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::effect::{AdmissionGate, GateError};
    ///
    /// assert!(AdmissionGate::try_new(3).is_ok());
    /// assert_eq!(AdmissionGate::try_new(0).unwrap_err(), GateError::InvalidCapacity);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, GateError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(GateError::InvalidCapacity)
    }

    /// Creates a gate from an already validated capacity.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            semaphore: Semaphore::new(capacity.get()),
            held: AtomicUsize::new(0),
        }
    }

    /// Maximum number of simultaneous holders.
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of permits currently held.
    pub fn held(&self) -> usize {
        self.held.load(Ordering::Acquire)
    }

    /// Number of permits that can be acquired without waiting.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Acquires a permit, waiting in FIFO order while the gate is full.
    ///
    /// Returns without suspending when a permit is free and nobody is queued.
    /// Dropping the returned future while it waits gives up its place in the
    /// queue without taking a permit.
    pub async fn acquire(&self) {
        if self.try_acquire() {
            return;
        }
        tracing::trace!(
            capacity = self.capacity.get(),
            "admission gate full; queueing acquirer"
        );
        match self.semaphore.acquire().await {
            Ok(permit) => permit.forget(),
            Err(_) => unreachable!("admission gate semaphore is never closed"),
        }
        self.held.fetch_add(1, Ordering::AcqRel);
    }

    /// Acquires a permit only if one is free right now.
    pub fn try_acquire(&self) -> bool {
        match self.semaphore.try_acquire() {
            Ok(permit) => {
                permit.forget();
                self.held.fetch_add(1, Ordering::AcqRel);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns a permit, admitting the longest-waiting acquirer if any.
    ///
    /// # Panics
    ///
    /// Panics if no permit is currently held: an unbalanced release is a bug in
    /// the caller's accounting.
    pub fn release(&self) {
        let released = self
            .held
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |held| held.checked_sub(1));
        if released.is_err() {
            panic!("AdmissionGate::release called with no permits held");
        }
        self.semaphore.add_permits(1);
    }

    /// Acquires a permit that is released when the returned guard is dropped.
    pub async fn permit(&self) -> GatePermit<'_> {
        self.acquire().await;
        GatePermit { gate: self }
    }

    /// Runs `action` while holding a permit.
    ///
    /// The permit is released on every exit path, including a panic inside
    /// `action` and dropping the returned future.
    pub async fn with_permit<Fut>(&self, action: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        let _permit = self.permit().await;
        action.await
    }
}

/// RAII guard for a permit of an [`AdmissionGate`].
#[must_use = "the permit is released as soon as the guard is dropped"]
pub struct GatePermit<'gate> {
    gate: &'gate AdmissionGate,
}

impl fmt::Debug for GatePermit<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("GatePermit").finish_non_exhaustive()
    }
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}

static_assertions::assert_impl_all!(AdmissionGate: Send, Sync);
