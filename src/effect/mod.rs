//! Comprehension blocks and concurrent evaluation over `Either`.
//!
//! # Comprehensions
//!
//! [`run_binding`] runs a block with an [`EffectScope`]. Each
//! [`EffectScope::bind`] unwraps a `Right`; the first `Left` ends the block and
//! becomes the result, without the remaining statements running.
//!
//! ```rust
//! use eitherway::control::Either;
//! use eitherway::effect::run_binding;
//!
//! let result = run_binding(|scope| {
//!     scope.bind(Either::<&str, i32>::Right(1))?;
//!     scope.bind(Either::<&str, i32>::Left("boom"))?;
//!     Ok(999)
//! });
//! assert_eq!(result, Either::Left("boom"));
//! ```
//!
//! [`run_future_binding`] is the asynchronous counterpart; the block may
//! suspend between binds.
//!
//! # Bounded Parallelism
//!
//! [`par_sequence_n`] runs many producers of `Either` values with at most `n`
//! of them in flight, gated by an [`AdmissionGate`], and returns the values in
//! input order or the first `Left`.

// =============================================================================
// Error Types
// =============================================================================

mod error;

pub use error::GateError;

// =============================================================================
// Comprehension Engine
// =============================================================================

mod binding;

pub use binding::{EffectScope, run_binding};

#[cfg(feature = "async")]
pub use binding::run_future_binding;

// =============================================================================
// Concurrency (requires async feature)
// =============================================================================

#[cfg(feature = "async")]
mod concurrent;

#[cfg(feature = "async")]
pub use concurrent::{
    AdmissionGate, Concurrency, GatePermit, par_sequence, par_sequence_n, par_traverse_n,
};
