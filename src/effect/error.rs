//! Error types for the effect system.
//!
//! Domain failures travel as `Left` values and never show up here. These
//! errors describe invalid configuration of the concurrency primitives.

use thiserror::Error;

/// Invalid configuration of an admission gate or a concurrency limit.
///
/// # Examples
///
/// ```rust
/// use eitherway::effect::GateError;
///
/// assert_eq!(
///     GateError::InvalidCapacity.to_string(),
///     "gate capacity must be greater than 0"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    /// A capacity of zero was requested.
    #[error("gate capacity must be greater than 0")]
    InvalidCapacity,
}
