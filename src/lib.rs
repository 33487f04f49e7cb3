//! # eitherway
//!
//! A right-biased `Either` type with comprehension blocks and bounded
//! parallel evaluation, for making failure an explicit part of a function's
//! return type.
//!
//! ## Overview
//!
//! - **Either**: `Either<L, R>` with `map`, `flat_map`, `fold`, recovery and
//!   extraction combinators, plus `sequence`/`traverse` over many values
//! - **Catching**: turn panicking code into `Either` values at an explicit boundary
//! - **Comprehensions**: `run_binding` / `run_future_binding` short-circuit on
//!   the first `Left` bound inside a block
//! - **Bounded Parallelism**: `par_sequence_n` / `par_traverse_n` run many
//!   fallible producers under a FIFO-fair `AdmissionGate`
//!
//! ## Feature Flags
//!
//! - `control`: `Either` and its combinators
//! - `effect`: synchronous comprehension blocks
//! - `async`: asynchronous comprehensions, `AdmissionGate`, parallel evaluation,
//!   async and stream adapters (tokio + futures)
//! - `serde`: `Serialize` / `Deserialize` for `Either`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use eitherway::prelude::*;
//!
//! fn parse(text: &str) -> Either<String, i32> {
//!     Either::from(text.parse::<i32>()).map_left(|error| format!("{text}: {error}"))
//! }
//!
//! let total = run_binding(|scope| {
//!     let a = scope.bind(parse("40"))?;
//!     let b = scope.bind(parse("2"))?;
//!     Ok(a + b)
//! });
//! assert_eq!(total, Either::Right(42));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use eitherway::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "effect")]
pub mod effect;
