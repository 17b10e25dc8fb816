//! Configuration issues found by a diagnostic pass.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("No starting state set")]
    StartingStateMissing,

    #[error("Starting state '{name}' is not registered")]
    StartingStateInvalid { name: String },

    #[error("Transition '{from}' -> '{to}' targets an unregistered state")]
    DanglingTransition { from: String, to: String },

    #[error("Transitions registered from '{from}', which is not a registered state")]
    UnregisteredSource { from: String },
}
