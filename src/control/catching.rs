//! Boundary between panicking code and `Either` values.
//!
//! The `catching` family runs a block, wraps its value in `Right`, and turns a
//! panic raised by the block into a `Left` through a caller-supplied error
//! mapper. Panics that carry a comprehension short-circuit in flight are never
//! converted; they keep unwinding towards the entry point that owns them.
//!
//! # Examples
//!
//! ```rust
//! use eitherway::control::{Either, catching};
//!
//! let parsed: Either<String, u8> = catching(
//!     |failure| failure.message().unwrap_or("unknown").to_string(),
//!     || "300".parse::<u8>().expect("out of range"),
//! );
//! assert!(parsed.is_left());
//! ```

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use super::Either;
use super::shift::Escape;

/// A panic caught at a `catching` boundary.
pub struct Failure {
    payload: Box<dyn Any + Send>,
    backtrace: Backtrace,
}

impl Failure {
    fn new(payload: Box<dyn Any + Send>) -> Self {
        Self {
            payload,
            backtrace: Backtrace::capture(),
        }
    }

    /// The panic message, when the payload is a string.
    pub fn message(&self) -> Option<&str> {
        self.payload
            .downcast_ref::<&'static str>()
            .copied()
            .or_else(|| self.payload.downcast_ref::<String>().map(String::as_str))
    }

    /// The raw panic payload.
    pub fn payload(&self) -> &(dyn Any + Send) {
        self.payload.as_ref()
    }

    /// Consumes the failure and returns the raw panic payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Backtrace captured at the boundary that caught the panic.
    ///
    /// Capturing follows the standard library rules, so the backtrace is only
    /// populated when backtraces are enabled for the process.
    pub const fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Failure")
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(formatter, "panicked: {message}"),
            None => write!(formatter, "panicked with a non-string payload"),
        }
    }
}

fn intercept(payload: Box<dyn Any + Send>) -> Failure {
    if Escape::is_escape(payload.as_ref()) {
        panic::resume_unwind(payload);
    }
    Failure::new(payload)
}

/// Runs `block`, wrapping its value in `Right` and a panic in `Left`.
///
/// A panic that carries an in-flight comprehension short-circuit resumes
/// unwinding. A panic raised by `error_mapper` itself propagates.
///
/// # Examples
///
/// ```rust
/// use eitherway::control::{Either, catching};
///
/// let value: Either<String, i32> = catching(|failure| failure.to_string(), || 40 + 2);
/// assert_eq!(value, Either::Right(42));
/// ```
pub fn catching<L, R, M, B>(error_mapper: M, block: B) -> Either<L, R>
where
    M: FnOnce(Failure) -> L,
    B: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(block)) {
        Ok(value) => Either::Right(value),
        Err(payload) => Either::Left(error_mapper(intercept(payload))),
    }
}

/// Awaits `future`, wrapping its output in `Right` and a panic in `Left`.
///
/// Panics raised at any poll of `future` are caught, with the same
/// short-circuit exemption as [`catching`].
#[cfg(feature = "async")]
pub async fn catching_async<L, R, M, Fut>(error_mapper: M, future: Fut) -> Either<L, R>
where
    M: FnOnce(Failure) -> L,
    Fut: Future<Output = R>,
{
    use futures::FutureExt;

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(value) => Either::Right(value),
        Err(payload) => Either::Left(error_mapper(intercept(payload))),
    }
}

/// Adapts a fallible stream: every `Ok` item becomes `Right`, every `Err`
/// item becomes `Left` through `error_mapper`.
///
/// The adapted stream ends exactly when `source` ends.
///
/// # Examples
///
/// ```rust
/// use eitherway::control::{Either, catching_stream};
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = futures::stream::iter(vec![Ok(1), Err("broken"), Ok(3)]);
/// let adapted: Vec<Either<String, i32>> =
///     catching_stream(|error: &str| error.to_uppercase(), source).collect().await;
/// assert_eq!(
///     adapted,
///     vec![Either::Right(1), Either::Left("BROKEN".to_string()), Either::Right(3)]
/// );
/// # }
/// ```
#[cfg(feature = "async")]
pub fn catching_stream<L, R, E, M, S>(
    mut error_mapper: M,
    source: S,
) -> impl futures::Stream<Item = Either<L, R>>
where
    M: FnMut(E) -> L,
    S: futures::TryStream<Ok = R, Error = E>,
{
    use futures::{StreamExt, TryStreamExt};

    source.into_stream().map(move |item| match item {
        Ok(value) => Either::Right(value),
        Err(error) => Either::Left(error_mapper(error)),
    })
}
