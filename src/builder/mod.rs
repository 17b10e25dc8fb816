//! Builder API for ergonomic runner construction.
//!
//! The builder is a fluent front for the registration methods on
//! [`Runner`](crate::Runner), with the starting state checked at build time
//! rather than at the first `execute`.

pub mod error;
pub mod runner;

pub use error::BuildError;
pub use runner::RunnerBuilder;
