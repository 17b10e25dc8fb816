//! Errors surfaced by [`Runner::execute`](super::Runner::execute).

use crate::core::{BoxError, StateFailure};
use thiserror::Error;

/// Failure of a single machine run.
///
/// Every kind is terminal for the run that produced it; nothing is retried.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("starting state was not set - call set_starting_state(...) before execution")]
    StartingStateMissing,

    #[error(
        "starting state given ({}) matches no registered states. List of registered states: {}",
        .name,
        .registered.join(", ")
    )]
    StartingStateInvalid {
        name: String,
        registered: Vec<String>,
    },

    #[error("tried to transition to unregistered state \"{name}\"")]
    DestinationStateMissing { name: String },

    #[error("Error caught during execution: {state} - {message}")]
    StateExecution {
        state: String,
        message: String,
        code: Option<i64>,
        #[source]
        source: BoxError,
    },

    #[error("guard on transition '{from}' -> '{to}' panicked: {message}")]
    GuardFailure {
        from: String,
        to: String,
        message: String,
    },

    #[error("step limit ({limit}) reached before entering state '{state}'")]
    StepLimitExceeded { limit: usize, state: String },
}

impl MachineError {
    pub const STARTING_STATE_MISSING: i64 = 100;
    pub const STARTING_STATE_INVALID: i64 = 101;
    pub const DESTINATION_STATE_MISSING: i64 = 200;
    pub const GUARD_FAILURE: i64 = 201;
    pub const STEP_LIMIT_EXCEEDED: i64 = 300;

    /// Wrap a state's native failure.
    ///
    /// The state's own code is kept when it failed with a [`StateFailure`].
    pub fn state_execution(state: impl Into<String>, source: BoxError) -> Self {
        let code = source
            .downcast_ref::<StateFailure>()
            .and_then(|failure| failure.code);
        Self::StateExecution {
            state: state.into(),
            message: source.to_string(),
            code,
            source,
        }
    }

    /// Numeric code for this failure.
    ///
    /// `StateExecution` reports the failing state's own code, if it had one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::StartingStateMissing => Some(Self::STARTING_STATE_MISSING),
            Self::StartingStateInvalid { .. } => Some(Self::STARTING_STATE_INVALID),
            Self::DestinationStateMissing { .. } => Some(Self::DESTINATION_STATE_MISSING),
            Self::StateExecution { code, .. } => *code,
            Self::GuardFailure { .. } => Some(Self::GUARD_FAILURE),
            Self::StepLimitExceeded { .. } => Some(Self::STEP_LIMIT_EXCEEDED),
        }
    }

    /// Name of the state involved in the failure, if any.
    pub fn state_name(&self) -> Option<&str> {
        match self {
            Self::StartingStateMissing => None,
            Self::StartingStateInvalid { name, .. } => Some(name),
            Self::DestinationStateMissing { name } => Some(name),
            Self::StateExecution { state, .. } => Some(state),
            Self::GuardFailure { from, .. } => Some(from),
            Self::StepLimitExceeded { state, .. } => Some(state),
        }
    }

    /// True for failures detected before any state ran.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::StartingStateMissing | Self::StartingStateInvalid { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn codes_match_taxonomy() {
        assert_eq!(MachineError::StartingStateMissing.code(), Some(100));
        assert_eq!(
            MachineError::StartingStateInvalid {
                name: "Nope".to_string(),
                registered: vec![],
            }
            .code(),
            Some(101)
        );
        assert_eq!(
            MachineError::DestinationStateMissing {
                name: "Gone".to_string()
            }
            .code(),
            Some(200)
        );
    }

    #[test]
    fn invalid_start_lists_registered_states() {
        let err = MachineError::StartingStateInvalid {
            name: "Missing".to_string(),
            registered: vec!["Alpha".to_string(), "Beta".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "starting state given (Missing) matches no registered states. List of registered states: Alpha, Beta"
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn state_execution_keeps_cause_and_code() {
        let source: BoxError = Box::new(StateFailure::new("payment declined").with_code(402));
        let err = MachineError::state_execution("Charge", source);

        assert_eq!(err.code(), Some(402));
        assert_eq!(err.state_name(), Some("Charge"));
        assert_eq!(
            err.to_string(),
            "Error caught during execution: Charge - payment declined"
        );

        let cause = err.source().unwrap();
        assert_eq!(
            cause.downcast_ref::<StateFailure>(),
            Some(&StateFailure::new("payment declined").with_code(402))
        );
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn native_errors_have_no_code() {
        let source: BoxError = "plain failure".into();
        let err = MachineError::state_execution("Fetch", source);

        assert_eq!(err.code(), None);
        match err {
            MachineError::StateExecution { message, .. } => {
                assert_eq!(message, "plain failure")
            }
            other => panic!("Expected StateExecution, got {other:?}"),
        }
    }
}
