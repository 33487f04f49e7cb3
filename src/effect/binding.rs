//! Comprehension blocks over `Either`.
//!
//! [`run_binding`] and [`run_future_binding`] run a block with a fresh
//! [`EffectScope`]. Inside the block, [`EffectScope::bind`] unwraps a `Right`
//! and turns a `Left` into a [`Shift`] that the block propagates with `?`. The
//! entry point converts its own `Shift` back into a `Left`.
//!
//! Every invocation has exactly one outcome: `Right` of the block's value,
//! `Left` of the first bound failure, or a panic propagated to the caller. A
//! panic raised inside the block is never converted into a `Left`; use
//! [`catching`](crate::control::catching) for that.
//!
//! A `Shift` produced by a different scope (for example an outer scope used
//! inside a nested block) is never claimed by the inner entry point. It keeps
//! unwinding until the entry point that issued it reclaims it.
//!
//! # Examples
//!
//! ```rust
//! use eitherway::control::Either;
//! use eitherway::effect::run_binding;
//!
//! fn parse(text: &str) -> Either<String, i32> {
//!     Either::from(text.parse::<i32>()).map_left(|error| error.to_string())
//! }
//!
//! let sum = run_binding(|scope| {
//!     let a = scope.bind(parse("1"))?;
//!     let b = scope.bind(parse("2"))?;
//!     Ok(a + b)
//! });
//! assert_eq!(sum, Either::Right(3));
//!
//! let failed = run_binding(|scope| {
//!     let a = scope.bind(parse("1"))?;
//!     let b = scope.bind(parse("two"))?;
//!     Ok(a + b)
//! });
//! assert!(failed.is_left());
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use crate::control::shift::{self, Shift, Token};
use crate::control::Either;

/// Capability to short-circuit the comprehension block it was handed to.
///
/// A scope is only meaningful while its block runs; a `Shift` produced after
/// the block returned has no entry point left to reclaim it and surfaces as a
/// panic.
pub struct EffectScope<L> {
    token: Token,
    _error: PhantomData<fn() -> L>,
}

impl<L> fmt::Debug for EffectScope<L> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("EffectScope")
            .field("token", &self.token)
            .finish()
    }
}

impl<L> EffectScope<L> {
    pub(crate) fn new() -> Self {
        Self::with_token(Token::fresh())
    }

    pub(crate) const fn with_token(token: Token) -> Self {
        Self {
            token,
            _error: PhantomData,
        }
    }

    /// The token identifying this scope's entry point.
    pub const fn token(&self) -> Token {
        self.token
    }

    /// Unwraps a `Right`, or produces the `Shift` for a `Left`.
    ///
    /// # Errors
    ///
    /// Returns a [`Shift`] carrying the left value; propagate it with `?`.
    pub fn bind<R>(&self, value: Either<L, R>) -> Result<R, Shift<L>> {
        match value {
            Either::Right(value) => Ok(value),
            Either::Left(error) => Err(self.shift(error)),
        }
    }

    /// Like [`bind`](Self::bind), for a `Result`.
    ///
    /// # Errors
    ///
    /// Returns a [`Shift`] carrying the `Err` value.
    pub fn bind_result<R>(&self, value: Result<R, L>) -> Result<R, Shift<L>> {
        self.bind(value.into())
    }

    /// Awaits a pending `Either` and binds it.
    ///
    /// # Errors
    ///
    /// Returns a [`Shift`] if the future resolves to a `Left`.
    #[cfg(feature = "async")]
    pub async fn bind_future<R, Fut>(&self, future: Fut) -> Result<R, Shift<L>>
    where
        Fut: Future<Output = Either<L, R>>,
    {
        self.bind(future.await)
    }

    /// Builds the short-circuit signal for `error` unconditionally.
    pub fn shift(&self, error: L) -> Shift<L> {
        Shift::new(self.token, error)
    }

    /// Short-circuits with `or_left()` unless `condition` holds.
    ///
    /// # Errors
    ///
    /// Returns a [`Shift`] carrying `or_left()` when `condition` is false.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    /// use eitherway::effect::run_binding;
    ///
    /// let checked = run_binding(|scope| {
    ///     let age = 12;
    ///     scope.ensure(age >= 18, || format!("{age} is under age"))?;
    ///     Ok(age)
    /// });
    /// assert_eq!(checked, Either::Left("12 is under age".to_string()));
    /// ```
    pub fn ensure<F>(&self, condition: bool, or_left: F) -> Result<(), Shift<L>>
    where
        F: FnOnce() -> L,
    {
        if condition {
            Ok(())
        } else {
            Err(self.shift(or_left()))
        }
    }

    /// Unwraps a present value, or short-circuits with `or_left()`.
    ///
    /// # Errors
    ///
    /// Returns a [`Shift`] carrying `or_left()` when `value` is `None`.
    pub fn ensure_some<R, F>(&self, value: Option<R>, or_left: F) -> Result<R, Shift<L>>
    where
        F: FnOnce() -> L,
    {
        match value {
            Some(value) => Ok(value),
            None => Err(self.shift(or_left())),
        }
    }
}

/// Runs a synchronous comprehension block.
///
/// Returns `Right` of the block's value, or `Left` of the first value the
/// block's scope short-circuited with.
///
/// # Panics
///
/// Panics raised by `block` propagate unchanged, as does a `Shift` issued by
/// any scope other than the one handed to `block`.
pub fn run_binding<L, T, F>(block: F) -> Either<L, T>
where
    L: Send + 'static,
    F: FnOnce(&EffectScope<L>) -> Result<T, Shift<L>>,
{
    let scope = EffectScope::new();
    let token = scope.token;
    match panic::catch_unwind(AssertUnwindSafe(|| block(&scope))) {
        Ok(outcome) => shift::settle(token, outcome),
        Err(payload) => Either::Left(shift::reclaim(token, payload)),
    }
}

/// Runs an asynchronous comprehension block.
///
/// The block receives its scope by value so the returned future can own it.
/// Short-circuits are recognised whether they happen before the first
/// suspension point or after any number of them.
///
/// # Panics
///
/// Panics raised while polling the block propagate unchanged, as does a
/// `Shift` issued by any scope other than the one handed to `block`.
///
/// # Examples
///
/// ```rust
/// use eitherway::control::Either;
/// use eitherway::effect::run_future_binding;
///
/// async fn lookup(id: u32) -> Either<String, &'static str> {
///     match id {
///         1 => Either::Right("alice"),
///         _ => Either::Left(format!("no user {id}")),
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let names = run_future_binding(|scope| async move {
///     let first = scope.bind(lookup(1).await)?;
///     let second = scope.bind_future(lookup(2)).await?;
///     Ok(format!("{first} and {second}"))
/// })
/// .await;
/// assert_eq!(names, Either::Left("no user 2".to_string()));
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn run_future_binding<L, T, F, Fut>(block: F) -> Either<L, T>
where
    L: Send + 'static,
    F: FnOnce(EffectScope<L>) -> Fut,
    Fut: Future<Output = Result<T, Shift<L>>>,
{
    use futures::FutureExt;

    let scope = EffectScope::new();
    let token = scope.token;
    let running = async move { block(scope).await };
    match AssertUnwindSafe(running).catch_unwind().await {
        Ok(outcome) => shift::settle(token, outcome),
        Err(payload) => Either::Left(shift::reclaim(token, payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn binds_all_rights() {
        let result = run_binding(|scope: &EffectScope<String>| {
            let a = scope.bind(Either::Right(1))?;
            let b = scope.bind(Either::Right(2))?;
            Ok(a + b)
        });
        assert_eq!(result, Either::Right(3));
    }

    #[rstest]
    fn stops_at_first_left() {
        let reached_end = Cell::new(false);
        let result = run_binding(|scope| {
            scope.bind(Either::<&str, i32>::Right(1))?;
            scope.bind(Either::<&str, i32>::Left("boom"))?;
            reached_end.set(true);
            Ok(999)
        });
        assert_eq!(result, Either::Left("boom"));
        assert!(!reached_end.get());
    }

    #[rstest]
    fn bind_result_accepts_results() {
        let result = run_binding(|scope| {
            let parsed = scope.bind_result("41".parse::<i32>().map_err(|error| error.to_string()))?;
            Ok(parsed + 1)
        });
        assert_eq!(result, Either::Right(42));
    }

    #[rstest]
    #[case(Some(4), Either::Right(4))]
    #[case(None, Either::Left("missing"))]
    fn ensure_some_narrows(#[case] input: Option<i32>, #[case] expected: Either<&'static str, i32>) {
        let result = run_binding(|scope| scope.ensure_some(input, || "missing"));
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case(true, Either::Right(()))]
    #[case(false, Either::Left("refused"))]
    fn ensure_checks_condition(#[case] condition: bool, #[case] expected: Either<&'static str, ()>) {
        let result = run_binding(|scope| scope.ensure(condition, || "refused"));
        assert_eq!(result, expected);
    }

    #[rstest]
    fn each_invocation_gets_its_own_token() {
        let first = Cell::new(None);
        let second = Cell::new(None);
        let _ = run_binding(|scope: &EffectScope<()>| {
            first.set(Some(scope.token()));
            Ok(())
        });
        let _ = run_binding(|scope: &EffectScope<()>| {
            second.set(Some(scope.token()));
            Ok(())
        });
        assert_ne!(first.get(), second.get());
    }

    #[rstest]
    fn inner_entry_point_does_not_claim_outer_shift() {
        let inner_observed = Cell::new(false);
        let outer_resumed = Cell::new(false);

        let result = run_binding(|outer: &EffectScope<&'static str>| {
            let inner_result: Either<&'static str, i32> = run_binding(|_inner| {
                outer.bind(Either::<&str, i32>::Left("from outer"))?;
                Ok(0)
            });
            inner_observed.set(inner_result.is_left());
            outer_resumed.set(true);
            Ok(1)
        });

        assert_eq!(result, Either::Left("from outer"));
        assert!(!inner_observed.get());
        assert!(!outer_resumed.get());
    }

    #[rstest]
    fn inner_shift_stays_inside_inner_block() {
        let result = run_binding(|outer: &EffectScope<&'static str>| {
            let inner = run_binding(|inner| {
                inner.bind(Either::<&str, i32>::Left("inner failure"))?;
                Ok(0)
            });
            let recovered = outer.bind_result(Ok(inner.get_or_else_value(-1)))?;
            Ok(recovered)
        });
        assert_eq!(result, Either::Right(-1));
    }

    #[rstest]
    #[should_panic(expected = "unrelated fault")]
    fn block_panics_propagate() {
        let _: Either<String, i32> = run_binding(|_scope| panic!("unrelated fault"));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn async_block_short_circuits_after_suspension() {
        let result = run_future_binding(|scope| async move {
            tokio::task::yield_now().await;
            let a = scope.bind(Either::<String, i32>::Right(1))?;
            tokio::task::yield_now().await;
            scope.bind(Either::<String, i32>::Left("late".to_string()))?;
            Ok(a)
        })
        .await;
        assert_eq!(result, Either::Left("late".to_string()));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn async_block_succeeds() {
        let result = run_future_binding(|scope: EffectScope<String>| async move {
            let a = scope.bind_future(async { Either::Right(20) }).await?;
            let b = scope.bind_future(async { Either::Right(22) }).await?;
            Ok(a + b)
        })
        .await;
        assert_eq!(result, Either::Right(42));
    }
}
