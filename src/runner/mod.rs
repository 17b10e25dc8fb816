//! Runner: the registry of named states and the execution loop.
//!
//! # Key Concepts
//!
//! - **Registry**: states keyed by name, with last-write-wins overwrite
//! - **Transitions**: ordered, optionally guarded edges per source state
//! - **Execution**: one active state at a time, strictly sequential
//!
//! Registration needs `&mut Runner` while `execute` only needs `&Runner`, so a
//! runner cannot be modified while any run borrowed from it is in flight.
//! Concurrent runs against the same runner are fine.

mod config;
mod error;
mod machine;

pub use config::RunnerConfig;
pub use error::MachineError;
pub use machine::Runner;
