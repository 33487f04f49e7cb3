//! The `Either` disjunction and its combinators.
//!
//! - [`Either`]: a value that is exactly one of `Left` (undesired) or `Right` (desired)
//! - [`sequence`] / [`traverse`]: collapse many `Either`s into one, stopping at the first `Left`
//! - [`catching`]: turn a panicking block into an `Either`
//! - [`Shift`] / [`Token`]: the short-circuit signal used by comprehension blocks
//!
//! # Examples
//!
//! ```rust
//! use eitherway::control::{Either, left, right, sequence};
//!
//! let values: Vec<Either<&str, i32>> = vec![right(1), left("boom"), right(3)];
//! assert_eq!(sequence(values), Either::Left("boom"));
//! ```

mod catching;
mod either;
pub(crate) mod shift;
mod traverse;

pub use catching::{Failure, catching};
#[cfg(feature = "async")]
pub use catching::{catching_async, catching_stream};
pub use either::{Either, left, right};
pub use shift::{Shift, Token};
pub use traverse::{sequence, traverse};
