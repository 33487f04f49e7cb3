//! Either type - a value that is exactly one of two variants.
//!
//! `Either<L, R>` is either a `Left(L)` or a `Right(R)`. By convention `Left`
//! carries the undesired outcome (an error) and `Right` the desired one, so
//! every combinator here is right-biased: it transforms the `Right` side and
//! passes a `Left` through untouched.
//!
//! # Examples
//!
//! ```rust
//! use eitherway::control::{Either, left, right};
//!
//! let parsed: Either<String, i32> = right(21);
//! let doubled = parsed.map(|value| value * 2);
//! assert_eq!(doubled, Either::Right(42));
//!
//! let failed: Either<String, i32> = left("not a number".to_string());
//! let rendered = failed.fold(|error| format!("error: {error}"), |value| value.to_string());
//! assert_eq!(rendered, "error: not a number");
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value that is exactly one of two types.
///
/// # Type Parameters
///
/// * `L` - The type of the left (undesired) value
/// * `R` - The type of the right (desired) value
///
/// # Examples
///
/// ```rust
/// use eitherway::control::Either;
///
/// let success: Either<String, i32> = Either::Right(42);
/// let failure: Either<String, i32> = Either::Left("error".to_string());
///
/// assert_eq!(success.map(|x| x * 2), Either::Right(84));
/// assert_eq!(failure.map(|x| x * 2), Either::Left("error".to_string()));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Either<L, R> {
    /// The left variant, conventionally representing failure.
    Left(L),
    /// The right variant, conventionally representing success.
    Right(R),
}

/// Tags a value as the `Left` variant.
///
/// ```rust
/// use eitherway::control::{Either, left};
///
/// let value: Either<&str, i32> = left("missing");
/// assert!(value.is_left());
/// ```
#[inline]
pub const fn left<L, R>(value: L) -> Either<L, R> {
    Either::Left(value)
}

/// Tags a value as the `Right` variant.
///
/// ```rust
/// use eitherway::control::{Either, right};
///
/// let value: Either<&str, i32> = right(7);
/// assert!(value.is_right());
/// ```
#[inline]
pub const fn right<L, R>(value: R) -> Either<L, R> {
    Either::Right(value)
}

impl<R> Either<(), R> {
    /// Lifts an optional value: `Some(r)` becomes `Right(r)`, `None` becomes `Left(())`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// assert_eq!(Either::from_option(Some(5)), Either::Right(5));
    /// assert_eq!(Either::<(), i32>::from_option(None), Either::Left(()));
    /// ```
    #[inline]
    pub fn from_option(value: Option<R>) -> Self {
        match value {
            Some(value) => Self::Right(value),
            None => Self::Left(()),
        }
    }
}

impl<L, R> Either<L, R> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Returns `false` for `Left`, and `predicate(r)` for `Right(r)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// assert!(Either::<&str, i32>::Right(4).exists(|x| *x > 3));
    /// assert!(!Either::<&str, i32>::Left("e").exists(|x| *x > 3));
    /// ```
    #[inline]
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&R) -> bool,
    {
        match self {
            Self::Left(_) => false,
            Self::Right(value) => predicate(value),
        }
    }

    /// Returns `true` for `Left` (vacuously), and `predicate(r)` for `Right(r)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// assert!(Either::<&str, i32>::Left("e").all(|x| *x > 3));
    /// assert!(!Either::<&str, i32>::Right(1).all(|x| *x > 3));
    /// ```
    #[inline]
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&R) -> bool,
    {
        match self {
            Self::Left(_) => true,
            Self::Right(value) => predicate(value),
        }
    }

    // =========================================================================
    // Value Extraction (Consuming)
    // =========================================================================

    /// Converts the `Either` into an `Option<L>`, consuming the either.
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Converts the `Either` into an `Option<R>`, consuming the either.
    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Returns the right value, or `None` for a `Left`.
    ///
    /// Together with [`Either::from_option`] this round-trips optional values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// assert_eq!(Either::from_option(Some(5)).or_none(), Some(5));
    /// assert_eq!(Either::<(), i32>::from_option(None).or_none(), None);
    /// ```
    #[inline]
    pub fn or_none(self) -> Option<R> {
        self.right()
    }

    /// Returns the right value, or evaluates `default` for a `Left`.
    ///
    /// `default` is only called on the `Left` path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// let failure: Either<&str, i32> = Either::Left("e");
    /// assert_eq!(failure.get_or_else(|| 0), 0);
    /// ```
    #[inline]
    pub fn get_or_else<F>(self, default: F) -> R
    where
        F: FnOnce() -> R,
    {
        match self {
            Self::Left(_) => default(),
            Self::Right(value) => value,
        }
    }

    /// Returns the right value, or the eagerly supplied `default` for a `Left`.
    #[inline]
    pub fn get_or_else_value(self, default: R) -> R {
        match self {
            Self::Left(_) => default,
            Self::Right(value) => value,
        }
    }

    /// Returns the right value, or computes one from the left value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// let failure: Either<&str, usize> = Either::Left("four");
    /// assert_eq!(failure.get_or_handle(|error| error.len()), 4);
    /// ```
    #[inline]
    pub fn get_or_handle<F>(self, handler: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Self::Left(value) => handler(value),
            Self::Right(value) => value,
        }
    }

    /// Converts into a `Result`: `Right(r)` becomes `Ok(r)`, `Left(l)` becomes `Err(l)`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        self.into()
    }

    /// Converts into a pair of `Option`s.
    #[inline]
    pub fn into_options(self) -> (Option<L>, Option<R>) {
        match self {
            Self::Left(value) => (Some(value), None),
            Self::Right(value) => (None, Some(value)),
        }
    }

    /// Returns the left value, consuming the either.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Right` value.
    #[inline]
    pub fn unwrap_left(self) -> L {
        match self {
            Self::Left(value) => value,
            Self::Right(_) => panic!("called `Either::unwrap_left()` on a `Right` value"),
        }
    }

    /// Returns the right value, consuming the either.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Left` value.
    #[inline]
    pub fn unwrap_right(self) -> R {
        match self {
            Self::Left(_) => panic!("called `Either::unwrap_right()` on a `Left` value"),
            Self::Right(value) => value,
        }
    }

    // =========================================================================
    // Reference Extraction (Non-consuming)
    // =========================================================================

    /// Returns a reference to the left value if present.
    #[inline]
    pub const fn left_ref(&self) -> Option<&L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Returns a reference to the right value if present.
    #[inline]
    pub const fn right_ref(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Borrows both sides: `&Either<L, R>` to `Either<&L, &R>`.
    #[inline]
    pub const fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(value),
        }
    }

    // =========================================================================
    // Fold Operations
    // =========================================================================

    /// Eliminates the Either by applying exactly one of two functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// let left: Either<i32, String> = Either::Left(42);
    /// assert_eq!(left.fold(|x| x.to_string(), |s| s), "42");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Single-step reduction: `initial` for `Left`, `function(initial, r)` for `Right(r)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// assert_eq!(Either::<&str, i32>::Right(5).fold_left(10, |acc, x| acc + x), 15);
    /// assert_eq!(Either::<&str, i32>::Left("e").fold_left(10, |acc, x| acc + x), 10);
    /// ```
    #[inline]
    pub fn fold_left<B, F>(self, initial: B, function: F) -> B
    where
        F: FnOnce(B, R) -> B,
    {
        match self {
            Self::Left(_) => initial,
            Self::Right(value) => function(initial, value),
        }
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Applies a function to the right value, leaving a `Left` unchanged.
    #[inline]
    pub fn map<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Applies a function to the left value, leaving a `Right` unchanged.
    #[inline]
    pub fn map_left<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Applies the function matching the variant and rewraps the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// let right: Either<i32, String> = Either::Right("hello".to_string());
    /// assert_eq!(right.bimap(|x: i32| x * 2, |s| s.len()), Either::Right(5));
    /// ```
    #[inline]
    pub fn bimap<T, U, F, G>(self, left_function: F, right_function: G) -> Either<T, U>
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> U,
    {
        match self {
            Self::Left(value) => Either::Left(left_function(value)),
            Self::Right(value) => Either::Right(right_function(value)),
        }
    }

    /// Chains a computation that may itself fail.
    ///
    /// `function` is never called for a `Left`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// fn half(value: i32) -> Either<String, i32> {
    ///     if value % 2 == 0 {
    ///         Either::Right(value / 2)
    ///     } else {
    ///         Either::Left(format!("{value} is odd"))
    ///     }
    /// }
    ///
    /// assert_eq!(Either::Right(8).flat_map(half).flat_map(half), Either::Right(2));
    /// assert_eq!(Either::Right(6).flat_map(half).flat_map(half), Either::Left("3 is odd".to_string()));
    /// ```
    #[inline]
    pub fn flat_map<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> Either<L, T>,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => function(value),
        }
    }

    /// Swaps the Left and Right variants.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }

    /// Runs `function` on the right value by reference and returns `self`.
    #[inline]
    #[must_use]
    pub fn tap<F>(self, function: F) -> Self
    where
        F: FnOnce(&R),
    {
        if let Self::Right(value) = &self {
            function(value);
        }
        self
    }

    /// Runs `function` on the left value by reference and returns `self`.
    #[inline]
    #[must_use]
    pub fn tap_left<F>(self, function: F) -> Self
    where
        F: FnOnce(&L),
    {
        if let Self::Left(value) = &self {
            function(value);
        }
        self
    }

    // =========================================================================
    // Recovery Operations
    // =========================================================================

    /// Recovers from a `Left` by computing a right value from it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// let failure: Either<&str, usize> = Either::Left("oops");
    /// assert_eq!(failure.handle_error(|error| error.len()), Either::Right(4));
    /// ```
    #[inline]
    pub fn handle_error<F>(self, handler: F) -> Self
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Self::Left(value) => Self::Right(handler(value)),
            right @ Self::Right(_) => right,
        }
    }

    /// Recovers from a `Left` with a computation that may fail again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// let failure: Either<&str, i32> = Either::Left("retry");
    /// let recovered: Either<String, i32> =
    ///     failure.handle_error_with(|error| Either::Left(error.to_uppercase()));
    /// assert_eq!(recovered, Either::Left("RETRY".to_string()));
    /// ```
    #[inline]
    pub fn handle_error_with<C, F>(self, handler: F) -> Either<C, R>
    where
        F: FnOnce(L) -> Either<C, R>,
    {
        match self {
            Self::Left(value) => handler(value),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Unifies both sides into one success type.
    ///
    /// Equivalent to `self.map(right_function).handle_error(left_function)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// let failure: Either<&str, i32> = Either::Left("bad");
    /// let redeemed: Either<&str, String> =
    ///     failure.redeem(|error| format!("recovered {error}"), |value| value.to_string());
    /// assert_eq!(redeemed, Either::Right("recovered bad".to_string()));
    /// ```
    #[inline]
    pub fn redeem<C, F, G>(self, left_function: F, right_function: G) -> Either<L, C>
    where
        F: FnOnce(L) -> C,
        G: FnOnce(R) -> C,
    {
        Either::Right(self.fold(left_function, right_function))
    }
}

impl<L, R> Either<L, Either<L, R>> {
    /// Removes one level of nesting on the right side.
    #[inline]
    pub fn flatten(self) -> Either<L, R> {
        self.flat_map(|inner| inner)
    }
}

impl<T> Either<T, T> {
    /// Extracts the value regardless of which side holds it.
    #[inline]
    pub fn merge(self) -> T {
        match self {
            Self::Left(value) | Self::Right(value) => value,
        }
    }
}

// =============================================================================
// Default-based Operations
// =============================================================================

impl<L: Default, R> Either<L, R> {
    /// Returns the left value, or default if this is a Right.
    #[inline]
    pub fn left_or_default(self) -> L {
        match self {
            Self::Left(value) => value,
            Self::Right(_) => L::default(),
        }
    }
}

impl<L, R: Default> Either<L, R> {
    /// Returns the right value, or default if this is a Left.
    #[inline]
    pub fn right_or_default(self) -> R {
        match self {
            Self::Left(_) => R::default(),
            Self::Right(value) => value,
        }
    }
}

// =============================================================================
// Async Adapter
// =============================================================================

#[cfg(feature = "async")]
impl<L, R> Either<L, R> {
    /// Converts into an already-resolved future of `Result<R, L>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eitherway::control::Either;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let failure: Either<String, i32> = Either::Left("down".to_string());
    /// assert_eq!(failure.into_future().await, Err("down".to_string()));
    /// # }
    /// ```
    #[inline]
    pub fn into_future(self) -> std::future::Ready<Result<R, L>> {
        std::future::ready(self.into_result())
    }
}

// =============================================================================
// Formatting
// =============================================================================

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => write!(formatter, "Left({value})"),
            Self::Right(value) => write!(formatter, "Right({value})"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<L, R> From<Result<R, L>> for Either<L, R> {
    /// `Ok(r)` becomes `Right(r)`, and `Err(e)` becomes `Left(e)`.
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    /// `Right(r)` becomes `Ok(r)`, and `Left(l)` becomes `Err(l)`.
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(value) => Err(value),
            Either::Right(value) => Ok(value),
        }
    }
}
