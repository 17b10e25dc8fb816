//! Advisory checks over a runner's registrations.
//!
//! Execution only fails when a run actually walks into a problem, so a
//! machine with a dangling transition behind a rarely firing guard can run
//! fine for a long time. `diagnose` reports every such problem up front,
//! accumulating all issues with stillwater's `Validation` instead of stopping
//! at the first one.
//!
//! # Example
//!
//! ```rust
//! use fsm_runner::core::{from_fn, StateFailure};
//! use fsm_runner::diagnostics::ConfigIssue;
//! use fsm_runner::Runner;
//! use stillwater::validation::Validation;
//!
//! let mut runner = Runner::new();
//! runner.register_state(from_fn(|n: u8| async move { Ok::<_, StateFailure>(n) }), "Start");
//! runner.register_transition("Start", "Typo");
//!
//! match runner.diagnose() {
//!     Validation::Failure(issues) => {
//!         assert_eq!(issues.len(), 2);
//!         assert!(issues.iter().any(|i| matches!(i, ConfigIssue::StartingStateMissing)));
//!     }
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

mod issues;

pub use issues::ConfigIssue;

use crate::core::Payload;
use crate::runner::Runner;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a diagnostic pass.
pub type Diagnosis = Validation<(), NonEmptyVec<ConfigIssue>>;

/// Check a runner's configuration, collecting ALL issues.
pub fn diagnose<P: Payload>(runner: &Runner<P>) -> Diagnosis {
    let mut checks: Vec<Diagnosis> = vec![check_start(runner)];

    let mut sources: Vec<&str> = runner.transition_sources().collect();
    sources.sort_unstable();

    for from in sources {
        if !runner.has_state(from) {
            checks.push(Validation::fail(ConfigIssue::UnregisteredSource {
                from: from.to_string(),
            }));
        }

        for transition in runner.transitions_from(from) {
            if !runner.has_state(transition.to()) {
                checks.push(Validation::fail(ConfigIssue::DanglingTransition {
                    from: from.to_string(),
                    to: transition.to().to_string(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_start<P: Payload>(runner: &Runner<P>) -> Diagnosis {
    match runner.starting_state() {
        None => Validation::fail(ConfigIssue::StartingStateMissing),
        Some(name) if !runner.has_state(name) => {
            Validation::fail(ConfigIssue::StartingStateInvalid {
                name: name.to_string(),
            })
        }
        Some(_) => Validation::success(()),
    }
}

impl<P: Payload> Runner<P> {
    /// Report every configuration issue without running anything.
    ///
    /// See [`diagnose`].
    pub fn diagnose(&self) -> Diagnosis {
        diagnose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{from_fn, StateFailure};

    fn identity_runner() -> Runner<u32> {
        let mut runner = Runner::new();
        for name in ["Start", "Middle", "End"] {
            runner.register_state(
                from_fn(|n: u32| async move { Ok::<_, StateFailure>(n) }),
                name,
            );
        }
        runner
    }

    #[test]
    fn healthy_runner_passes() {
        let mut runner = identity_runner();
        runner.register_transition("Start", "Middle");
        runner.register_guarded_transition("Middle", "End", |n| *n > 3);
        runner.set_starting_state("Start");

        assert!(runner.diagnose().is_success());
    }

    #[test]
    fn diagnosis_accumulates_all_issues() {
        let mut runner = identity_runner();
        runner.register_transition("Start", "Nowhere");
        runner.register_transition("Ghost", "End");
        runner.set_starting_state("Missing");

        match runner.diagnose() {
            Validation::Failure(issues) => {
                assert_eq!(issues.len(), 3);

                let has_invalid_start = issues
                    .iter()
                    .any(|i| matches!(i, ConfigIssue::StartingStateInvalid { .. }));
                let has_dangling = issues.iter().any(|i| {
                    matches!(i, ConfigIssue::DanglingTransition { from, to } if from == "Start" && to == "Nowhere")
                });
                let has_orphan = issues
                    .iter()
                    .any(|i| matches!(i, ConfigIssue::UnregisteredSource { from } if from == "Ghost"));

                assert!(has_invalid_start);
                assert!(has_dangling);
                assert!(has_orphan);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn missing_start_is_reported() {
        let runner = identity_runner();

        match runner.diagnose() {
            Validation::Failure(issues) => {
                assert_eq!(issues.len(), 1);
                assert!(issues
                    .iter()
                    .all(|i| matches!(i, ConfigIssue::StartingStateMissing)));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn diagnosis_does_not_block_execution() {
        let mut runner = identity_runner();
        runner.register_guarded_transition("Start", "Nowhere", |_| false);
        runner.set_starting_state("Start");

        assert!(runner.diagnose().is_failure());
        let result = futures::executor::block_on(runner.execute(&9));
        assert_eq!(result.unwrap(), 9);
    }
}
