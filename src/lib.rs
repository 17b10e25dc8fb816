//! fsm-runner: an asynchronous finite state machine runner
//!
//! Callers register named states, each an asynchronous unit of work over a
//! shared payload, connect them with ordered and optionally guarded
//! transitions, pick a starting state and run the machine to completion.
//!
//! # Core Concepts
//!
//! - **State**: async work turning a payload into a new payload, via the `State` trait
//! - **Guards**: synchronous predicates evaluated on a throwaway copy of the payload
//! - **Runner**: the registry and the strictly sequential execution loop
//! - **Isolation**: the caller's payload is cloned on entry and every guard
//!   sees its own clone, so no two parties ever share a live payload
//!
//! # Example
//!
//! ```rust
//! use fsm_runner::core::{from_fn, StateFailure};
//! use fsm_runner::{MachineError, Runner};
//! use serde_json::{json, Value};
//!
//! fn bump(mut data: Value) -> Result<Value, StateFailure> {
//!     let i = data["i"].as_i64().ok_or_else(|| StateFailure::new("i is missing"))?;
//!     data["i"] = json!(i + 1);
//!     Ok(data)
//! }
//!
//! let mut runner = Runner::new();
//! runner.register_state(from_fn(|data: Value| async move { bump(data) }), "First");
//! runner.register_state(from_fn(|data: Value| async move { bump(data) }), "Second");
//! runner.register_guarded_transition("First", "Second", |data: &mut Value| data["i"] == 1);
//! runner.set_starting_state("First");
//!
//! let result = futures::executor::block_on(runner.execute(&json!({ "i": 0 }))).unwrap();
//! assert_eq!(result["i"], 2);
//!
//! let err = futures::executor::block_on(runner.execute(&json!({}))).unwrap_err();
//! assert!(matches!(err, MachineError::StateExecution { .. }));
//! ```

pub mod builder;
pub mod core;
pub mod diagnostics;
pub mod runner;

// Re-export commonly used types
pub use builder::{BuildError, RunnerBuilder};
pub use crate::core::{from_fn, BoxError, Guard, State, StateFailure};
pub use runner::{MachineError, Runner, RunnerConfig};
