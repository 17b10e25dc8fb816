//! Core building blocks of a machine.
//!
//! This module contains the pieces a caller plugs into a [`Runner`](crate::Runner):
//! - The asynchronous `State` capability and its closure adapter
//! - Guard predicates that decide whether a transition fires
//! - Transition entries stored per source state
//!
//! Nothing here knows about names or registries; that lives in the runner.

mod guard;
mod state;
mod transition;

pub use guard::Guard;
pub use state::{from_fn, BoxError, FnState, Payload, State, StateFailure};
pub use transition::Transition;
