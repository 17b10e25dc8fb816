//! Builder for constructing runners.

use crate::builder::error::BuildError;
use crate::core::{Guard, Payload, State};
use crate::runner::{Runner, RunnerConfig};
use std::sync::Arc;

/// Builder for constructing runners with a fluent API.
///
/// Calls are applied in order, so the registration semantics of [`Runner`]
/// hold: `.state()` for a name that already has transitions clears them.
///
/// # Example
///
/// ```rust
/// use fsm_runner::builder::RunnerBuilder;
/// use fsm_runner::core::{from_fn, StateFailure};
///
/// let runner = RunnerBuilder::<i32>::new()
///     .state("Validate", from_fn(|n: i32| async move { Ok::<_, StateFailure>(n) }))
///     .state("Reject", from_fn(|_: i32| async move { Ok::<_, StateFailure>(-1) }))
///     .guarded("Validate", "Reject", |n| *n < 0)
///     .start("Validate")
///     .build()
///     .unwrap();
///
/// assert_eq!(futures::executor::block_on(runner.execute(&-5)).unwrap(), -1);
/// assert_eq!(futures::executor::block_on(runner.execute(&5)).unwrap(), 5);
/// ```
pub struct RunnerBuilder<P: Payload> {
    runner: Runner<P>,
}

impl<P: Payload> RunnerBuilder<P> {
    pub fn new() -> Self {
        Self {
            runner: Runner::new(),
        }
    }

    /// Register a state under `name`.
    pub fn state<S: State<P>>(mut self, name: impl Into<String>, state: S) -> Self {
        self.runner.register_state(state, name);
        self
    }

    /// Register a shared state under `name`.
    pub fn shared_state(mut self, name: impl Into<String>, state: Arc<dyn State<P>>) -> Self {
        self.runner.register_shared_state(state, name);
        self
    }

    /// Add an unconditional transition.
    pub fn transition(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.runner.register_transition(from, to);
        self
    }

    /// Add a transition using a predicate closure.
    pub fn guarded<F>(mut self, from: impl Into<String>, to: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&mut P) -> bool + Send + Sync + 'static,
    {
        self.runner.register_guarded_transition(from, to, predicate);
        self
    }

    /// Add a transition using a prebuilt guard.
    pub fn guard(mut self, from: impl Into<String>, to: impl Into<String>, guard: Guard<P>) -> Self {
        self.runner.register_transition_with(from, to, Some(guard));
        self
    }

    /// Set the starting state (required).
    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.runner.set_starting_state(name);
        self
    }

    /// Replace the runner configuration. Registrations made so far are kept.
    pub fn config(mut self, config: RunnerConfig) -> Self {
        self.runner.set_config(config);
        self
    }

    /// Build the runner.
    /// Returns an error if the starting state is unset or unregistered.
    pub fn build(self) -> Result<Runner<P>, BuildError> {
        let start = self
            .runner
            .starting_state()
            .ok_or(BuildError::MissingStartingState)?;

        if !self.runner.has_state(start) {
            return Err(BuildError::UnknownStartingState {
                name: start.to_string(),
            });
        }

        Ok(self.runner)
    }
}

impl<P: Payload> Default for RunnerBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{from_fn, StateFailure};

    fn add(n: i64) -> impl State<i64> {
        from_fn(move |v: i64| async move { Ok::<_, StateFailure>(v + n) })
    }

    #[test]
    fn builder_requires_starting_state() {
        let result = RunnerBuilder::<i64>::new().state("A", add(1)).build();

        assert!(matches!(result, Err(BuildError::MissingStartingState)));
    }

    #[test]
    fn builder_rejects_unknown_starting_state() {
        let result = RunnerBuilder::<i64>::new().state("A", add(1)).start("B").build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::UnknownStartingState {
                name: "B".to_string()
            }
        );
    }

    #[tokio::test]
    async fn fluent_api_builds_runner() {
        let runner = RunnerBuilder::<i64>::new()
            .state("A", add(1))
            .state("B", add(10))
            .state("C", add(100))
            .transition("A", "B")
            .guarded("B", "C", |v| *v > 1000)
            .start("A")
            .build()
            .unwrap();

        assert_eq!(runner.execute(&0).await.unwrap(), 11);
        assert_eq!(runner.execute(&990).await.unwrap(), 1101);
    }

    #[tokio::test]
    async fn config_keeps_earlier_registrations() {
        let runner = RunnerBuilder::<i64>::new()
            .state("Loop", add(1))
            .transition("Loop", "Loop")
            .start("Loop")
            .config(RunnerConfig::new().max_steps(4))
            .build()
            .unwrap();

        assert_eq!(runner.config().max_steps, Some(4));
        assert_eq!(runner.transitions_from("Loop").len(), 1);
        assert!(runner.execute(&0).await.is_err());
    }

    #[tokio::test]
    async fn prebuilt_guard_is_used() {
        let runner = RunnerBuilder::<i64>::new()
            .state("A", add(1))
            .state("B", add(1))
            .guard("A", "B", Guard::new(|v: &mut i64| *v == 1))
            .start("A")
            .build()
            .unwrap();

        assert_eq!(runner.execute(&0).await.unwrap(), 2);
        assert_eq!(runner.execute(&5).await.unwrap(), 6);
    }
}
