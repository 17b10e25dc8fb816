//! Build errors for the runner builder.

use thiserror::Error;

/// Errors that can occur when building a runner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Starting state not specified. Call .start(name) before .build()")]
    MissingStartingState,

    #[error("Starting state '{name}' is not registered. Call .state(name, state) for it")]
    UnknownStartingState { name: String },
}
