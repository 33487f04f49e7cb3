//! Concurrency primitives for fallible asynchronous work.
//!
//! - [`AdmissionGate`]: a FIFO-fair counting semaphore
//! - [`par_sequence_n`] / [`par_traverse_n`]: run many producers under a
//!   concurrency cap, stopping at the first `Left`

mod gate;
mod parallel;

pub use gate::{AdmissionGate, GatePermit};
pub use parallel::{Concurrency, par_sequence, par_sequence_n, par_traverse_n};
