//! The non-local exit signal used by comprehension blocks.
//!
//! A [`Shift`] is produced when [`EffectScope::bind`](crate::effect::EffectScope::bind)
//! observes a `Left`. It travels back to the entry point that created the
//! scope through ordinary `?` propagation and carries the [`Token`] of that
//! entry point, so that only the originating entry point converts it back into
//! a `Left`.
//!
//! When a `Shift` reaches an entry point that did not issue its token, the
//! entry point re-raises it as an unwinding panic whose payload is an
//! [`Escape`]. Outer entry points run their blocks under `catch_unwind` and
//! reclaim escapes carrying their own token. Any code in this crate that
//! catches panics must re-raise an `Escape` untouched.

use std::any::Any;
use std::fmt;
use std::num::NonZeroU64;
use std::panic;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Either;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of a single comprehension (or parallel evaluation) invocation.
///
/// Tokens can only be created inside this crate and are never reused within a
/// process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(NonZeroU64);

impl Token {
    pub(crate) fn fresh() -> Self {
        let raw = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
        match NonZeroU64::new(raw) {
            Some(id) => Self(id),
            None => unreachable!("token counter wrapped around"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Token(#{})", self.0)
    }
}

/// Short-circuit signal carrying the `Left` value that stopped a comprehension.
///
/// Values of this type are only produced by [`EffectScope`](crate::effect::EffectScope)
/// and only consumed by the entry point that created the scope. Propagate them
/// with `?`; discarding one silently loses the failure.
#[must_use = "a Shift must be propagated with `?` to the entry point that issued it"]
pub struct Shift<L> {
    token: Token,
    value: L,
}

impl<L> Shift<L> {
    pub(crate) const fn new(token: Token, value: L) -> Self {
        Self { token, value }
    }

    /// The token of the scope that produced this signal.
    pub const fn token(&self) -> Token {
        self.token
    }
}

impl<L> fmt::Debug for Shift<L> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Shift")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// Unwinding payload of a `Shift` that passed through a foreign entry point.
pub(crate) struct Escape {
    token: Token,
    value: Box<dyn Any + Send>,
}

impl Escape {
    pub(crate) fn is_escape(payload: &(dyn Any + Send)) -> bool {
        payload.is::<Self>()
    }
}

/// Resolves the outcome of a block run under `token`.
///
/// A `Shift` issued for `token` becomes `Left`; a foreign one is re-raised as
/// an unwinding [`Escape`].
pub(crate) fn settle<L, T>(token: Token, outcome: Result<T, Shift<L>>) -> Either<L, T>
where
    L: Send + 'static,
{
    match outcome {
        Ok(value) => Either::Right(value),
        Err(shift) if shift.token == token => {
            tracing::trace!(?token, "comprehension short-circuited");
            Either::Left(shift.value)
        }
        Err(shift) => {
            tracing::warn!(
                origin = ?shift.token,
                receiver = ?token,
                "shift reached a foreign entry point; re-raising"
            );
            panic::resume_unwind(Box::new(Escape {
                token: shift.token,
                value: Box::new(shift.value),
            }))
        }
    }
}

/// Reclaims an unwinding payload for the entry point identified by `token`.
///
/// Returns the `Left` value when the payload is an escape issued for `token`;
/// every other payload resumes unwinding unchanged.
pub(crate) fn reclaim<L>(token: Token, payload: Box<dyn Any + Send>) -> L
where
    L: Send + 'static,
{
    let escape = match payload.downcast::<Escape>() {
        Ok(escape) if escape.token == token => escape,
        Ok(foreign) => panic::resume_unwind(foreign),
        Err(other) => panic::resume_unwind(other),
    };
    match escape.value.downcast::<L>() {
        Ok(value) => *value,
        Err(_) => unreachable!("escape payload type does not match its scope"),
    }
}
