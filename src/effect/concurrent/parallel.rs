//! Bounded parallel evaluation of fallible producers.
//!
//! [`par_sequence_n`] spawns one task per producer, lets at most `n` of them
//! run at a time through an [`AdmissionGate`], and aggregates the results:
//!
//! - all producers yield `Right`: `Right` of the values in input order,
//!   independent of completion order;
//! - some producer yields `Left`: the first `Left` observed, returned as soon
//!   as it is known. Tasks that are already running are not cancelled; they
//!   finish in the background and their results are discarded.
//!
//! Which `Left` wins when several producers fail close together is not
//! defined.
//!
//! # Examples
//!
//! ```rust
//! use eitherway::control::Either;
//! use eitherway::effect::{Concurrency, par_traverse_n};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let squares = par_traverse_n(
//!     vec![1, 2, 3],
//!     |value| async move { Either::<String, i32>::Right(value * value) },
//!     Concurrency::bounded(2).unwrap(),
//! )
//! .await;
//! assert_eq!(squares, Either::Right(vec![1, 4, 9]));
//! # }
//! ```

use std::num::NonZeroUsize;
use std::panic;
use std::sync::Arc;

use futures::future::try_join_all;

use super::AdmissionGate;
use crate::control::Either;
use crate::control::shift;
use crate::effect::{EffectScope, GateError};

/// How many producers a parallel evaluation may run at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Concurrency {
    /// Every producer may run at once.
    #[default]
    Unbounded,
    /// At most this many producers run at once.
    Bounded(NonZeroUsize),
}

impl Concurrency {
    /// A limit of `limit` concurrently running producers.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidCapacity`] if `limit` is 0.
    pub fn bounded(limit: usize) -> Result<Self, GateError> {
        NonZeroUsize::new(limit)
            .map(Self::Bounded)
            .ok_or(GateError::InvalidCapacity)
    }

    /// Gate capacity to use for `tasks` producers.
    pub fn capacity_for(self, tasks: usize) -> NonZeroUsize {
        match self {
            Self::Bounded(limit) => limit,
            Self::Unbounded => NonZeroUsize::new(tasks).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl From<NonZeroUsize> for Concurrency {
    fn from(limit: NonZeroUsize) -> Self {
        Self::Bounded(limit)
    }
}

/// Runs `producers` concurrently under `concurrency` and collects their values.
///
/// Must be called within a tokio runtime: each producer is spawned as its own
/// task.
///
/// # Panics
///
/// A panic inside a producer is re-raised in the caller.
pub async fn par_sequence_n<L, R, I, P, Fut>(producers: I, concurrency: Concurrency) -> Either<L, Vec<R>>
where
    I: IntoIterator<Item = P>,
    P: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Either<L, R>> + Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    let producers: Vec<P> = producers.into_iter().collect();
    let capacity = concurrency.capacity_for(producers.len());
    let gate = Arc::new(AdmissionGate::with_capacity(capacity));
    let scope = EffectScope::<L>::new();
    let token = scope.token();
    tracing::debug!(
        tasks = producers.len(),
        capacity = capacity.get(),
        ?token,
        "starting bounded parallel evaluation"
    );

    let handles: Vec<_> = producers
        .into_iter()
        .map(|producer| {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                let scope = EffectScope::with_token(token);
                gate.with_permit(async move { scope.bind(producer().await) })
                    .await
            })
        })
        .collect();

    let joined = try_join_all(handles.into_iter().map(|handle| async move {
        match handle.await {
            Ok(outcome) => outcome,
            Err(error) if error.is_panic() => panic::resume_unwind(error.into_panic()),
            Err(error) => panic!("parallel producer task failed: {error}"),
        }
    }))
    .await;

    if joined.is_err() {
        tracing::debug!(?token, "bounded parallel evaluation short-circuited");
    }
    shift::settle(token, joined)
}

/// Maps every value to a producer with `mapper` and runs them with [`par_sequence_n`].
///
/// `mapper` is called once per value, in order, before any producer runs; the
/// futures it returns do nothing until they are polled.
pub async fn par_traverse_n<T, L, R, I, F, Fut>(
    values: I,
    mut mapper: F,
    concurrency: Concurrency,
) -> Either<L, Vec<R>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Either<L, R>> + Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    let producers: Vec<_> = values
        .into_iter()
        .map(|value| {
            let pending = mapper(value);
            move || pending
        })
        .collect();
    par_sequence_n(producers, concurrency).await
}

/// Shorthand for [`par_sequence_n`] without a concurrency limit.
pub async fn par_sequence<L, R, I, P, Fut>(producers: I) -> Either<L, Vec<R>>
where
    I: IntoIterator<Item = P>,
    P: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Either<L, R>> + Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    par_sequence_n(producers, Concurrency::Unbounded).await
}
