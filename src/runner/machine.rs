//! Runner that drives registered states to completion.

use crate::core::{Guard, Payload, State, StateFailure, Transition};
use crate::runner::config::RunnerConfig;
use crate::runner::error::MachineError;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, trace, warn, Instrument};
use uuid::Uuid;

/// Finite state machine runner.
///
/// Holds named states, the ordered transitions leaving each of them and the
/// starting state. Register everything first, then call [`execute`](Self::execute)
/// as many times as needed, concurrently if desired.
///
/// # Example
///
/// ```rust
/// use fsm_runner::core::{from_fn, StateFailure};
/// use fsm_runner::Runner;
///
/// let mut runner = Runner::new();
/// runner.register_state(
///     from_fn(|n: u32| async move { Ok::<_, StateFailure>(n + 1) }),
///     "Increment",
/// );
/// runner.register_state(
///     from_fn(|n: u32| async move { Ok::<_, StateFailure>(n * 10) }),
///     "Scale",
/// );
/// runner.register_transition("Increment", "Scale");
/// runner.set_starting_state("Increment");
///
/// let result = futures::executor::block_on(runner.execute(&4)).unwrap();
/// assert_eq!(result, 50);
/// ```
pub struct Runner<P: Payload> {
    states: HashMap<String, Arc<dyn State<P>>>,
    transitions: HashMap<String, Vec<Transition<P>>>,
    start: Option<String>,
    config: RunnerConfig,
}

impl<P: Payload> Runner<P> {
    /// Create an empty runner with the default (unbounded) configuration.
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create an empty runner with the given configuration.
    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            states: HashMap::new(),
            transitions: HashMap::new(),
            start: None,
            config,
        }
    }

    /// Register `state` under `name`.
    ///
    /// Re-registering a name replaces the previous state and clears every
    /// transition stored for that name so far, including transitions added
    /// before the name was first registered.
    pub fn register_state<S>(&mut self, state: S, name: impl Into<String>)
    where
        S: State<P>,
    {
        self.register_shared_state(Arc::new(state), name);
    }

    /// Register an already shared state, so one instance can serve several names.
    pub fn register_shared_state(&mut self, state: Arc<dyn State<P>>, name: impl Into<String>) {
        let name = name.into();
        if self.states.insert(name.clone(), state).is_some() {
            debug!(state = %name, "Replacing previously registered state");
        }
        self.transitions.insert(name, Vec::new());
    }

    /// Append an unconditional transition from `from` to `to`.
    ///
    /// Neither name has to be registered yet.
    pub fn register_transition(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.push_transition(from.into(), Transition::new(to, None));
    }

    /// Append a transition that only fires when `predicate` returns true.
    pub fn register_guarded_transition<F>(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        predicate: F,
    ) where
        F: Fn(&mut P) -> bool + Send + Sync + 'static,
    {
        self.push_transition(from.into(), Transition::new(to, Some(Guard::new(predicate))));
    }

    /// Append a transition with an optional, prebuilt guard.
    pub fn register_transition_with(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        guard: Option<Guard<P>>,
    ) {
        self.push_transition(from.into(), Transition::new(to, guard));
    }

    fn push_transition(&mut self, from: String, transition: Transition<P>) {
        trace!(from = %from, to = %transition.to(), guarded = transition.is_guarded(), "Registering transition");
        self.transitions.entry(from).or_default().push(transition);
    }

    /// Set the state every run starts in. Existence is checked at execution time.
    pub fn set_starting_state(&mut self, name: impl Into<String>) {
        self.start = Some(name.into());
    }

    /// Name set by [`set_starting_state`](Self::set_starting_state), if any.
    pub fn starting_state(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Limits applied to every run.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: RunnerConfig) {
        self.config = config;
    }

    /// True if a state is registered under `name`.
    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Registered state names, sorted.
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Transitions leaving `name`, in registration order.
    pub fn transitions_from(&self, name: &str) -> &[Transition<P>] {
        self.transitions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names that have transitions stored, registered as states or not.
    pub(crate) fn transition_sources(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }

    /// Run the machine from the starting state until no transition fires.
    ///
    /// The starting state is validated and `initial` is cloned before this
    /// method returns, so the caller may change or drop its payload right
    /// away. Validation failures are still only reported by the returned
    /// future.
    ///
    /// The run holds no locks and spawns nothing: states execute one at a
    /// time, each awaited before any guard is evaluated. There is no timeout;
    /// a state that never completes hangs the run.
    pub fn execute(&self, initial: &P) -> impl Future<Output = Result<P, MachineError>> + Send + '_ {
        let run_id = Uuid::new_v4();
        let prepared = self
            .validate_start()
            .map(|start| (start.to_string(), initial.clone()));
        let span = info_span!("machine_run", %run_id, start = self.start.as_deref().unwrap_or("<unset>"));

        async move {
            let (start, working) = prepared.inspect_err(|e| {
                warn!(error = %e, "Machine run rejected before start");
            })?;
            self.drive(start, working).await
        }
        .instrument(span)
    }

    fn validate_start(&self) -> Result<&str, MachineError> {
        let start = self
            .start
            .as_deref()
            .ok_or(MachineError::StartingStateMissing)?;

        if !self.states.contains_key(start) {
            return Err(MachineError::StartingStateInvalid {
                name: start.to_string(),
                registered: self.state_names().into_iter().map(str::to_string).collect(),
            });
        }

        Ok(start)
    }

    async fn drive(&self, start: String, mut working: P) -> Result<P, MachineError> {
        let mut current = Some(start);
        let mut steps = 0usize;

        while let Some(name) = current.take() {
            let Some(state) = self.states.get(&name) else {
                error!(state = %name, "Tried to transition to unregistered state");
                return Err(MachineError::DestinationStateMissing { name });
            };

            if let Some(limit) = self.config.max_steps {
                if steps >= limit {
                    error!(state = %name, limit, "Step limit reached");
                    return Err(MachineError::StepLimitExceeded { limit, state: name });
                }
            }
            steps += 1;

            debug!(state = %name, step = steps, "Entering state");

            // The working copy is moved into the state: nothing else holds it
            // while the state runs.
            working = match AssertUnwindSafe(state.execute(working)).catch_unwind().await {
                Ok(Ok(next)) => next,
                Ok(Err(source)) => {
                    error!(state = %name, error = %source, "State returned error");
                    return Err(MachineError::state_execution(name, source));
                }
                Err(panic_payload) => {
                    let message = panic_message(panic_payload.as_ref());
                    error!(state = %name, panic_msg = %message, "State panicked");
                    let source = StateFailure::new(format!("state panicked: {message}"));
                    return Err(MachineError::state_execution(name, Box::new(source)));
                }
            };

            current = self.select_transition(&name, &working)?;
        }

        info!(steps, "Machine run completed");
        Ok(working)
    }

    /// First transition out of `from` whose guard fires, in registration order.
    ///
    /// `None` ends the run normally.
    fn select_transition(&self, from: &str, payload: &P) -> Result<Option<String>, MachineError> {
        for transition in self.transitions_from(from) {
            let fires = panic::catch_unwind(AssertUnwindSafe(|| transition.fires(payload)))
                .map_err(|panic_payload| {
                    let message = panic_message(panic_payload.as_ref());
                    error!(from, to = %transition.to(), panic_msg = %message, "Guard panicked");
                    MachineError::GuardFailure {
                        from: from.to_string(),
                        to: transition.to().to_string(),
                        message,
                    }
                })?;

            if fires {
                debug!(from, to = %transition.to(), "Transition selected");
                return Ok(Some(transition.to().to_string()));
            }
            trace!(from, to = %transition.to(), "Guard rejected transition");
        }

        debug!(from, "No transition fired; machine halts");
        Ok(None)
    }
}

impl<P: Payload> Default for Runner<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> fmt::Debug for Runner<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("states", &self.state_names())
            .field("start", &self.start)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
