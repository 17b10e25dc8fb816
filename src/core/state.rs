//! The State capability.
//!
//! A state is a named unit of asynchronous work: given a payload it produces a
//! (possibly mutated) payload or fails. The runner never inspects a state beyond
//! this contract.

use async_trait::async_trait;
use std::future::Future;
use thiserror::Error;

/// Any native failure a state may raise.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Data flowing through a machine.
///
/// `Clone` is the structural copy the runner uses to isolate the caller, the
/// working copy and every guard evaluation from one another. Payloads holding
/// shared handles (`Arc<Mutex<_>>` and the like) share whatever those handles
/// point at; keeping such data isolated is the caller's responsibility.
pub trait Payload: Clone + Send + 'static {}

impl<T: Clone + Send + 'static> Payload for T {}

/// Asynchronous unit of work over a payload.
///
/// Implementations receive the payload by value and own it for the duration of
/// the call. Failing with any error is allowed; the runner wraps it before it
/// reaches the caller of [`Runner::execute`](crate::Runner::execute).
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use fsm_runner::core::{BoxError, State};
///
/// #[derive(Clone)]
/// struct Counter {
///     hits: u32,
/// }
///
/// struct Increment;
///
/// #[async_trait]
/// impl State<Counter> for Increment {
///     async fn execute(&self, mut payload: Counter) -> Result<Counter, BoxError> {
///         payload.hits += 1;
///         Ok(payload)
///     }
/// }
/// ```
#[async_trait]
pub trait State<P: Payload>: Send + Sync + 'static {
    async fn execute(&self, payload: P) -> Result<P, BoxError>;
}

/// Error a state may return to attach a numeric code to its failure.
///
/// The runner copies `code` into
/// [`MachineError::StateExecution`](crate::MachineError::StateExecution).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StateFailure {
    pub message: String,
    pub code: Option<i64>,
}

impl StateFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }
}

/// A [`State`] backed by an async closure. Built with [`from_fn`].
pub struct FnState<F> {
    f: F,
}

/// Adapt an async closure into a [`State`].
///
/// # Example
///
/// ```rust
/// use fsm_runner::core::{from_fn, StateFailure};
///
/// let double = from_fn(|n: u64| async move {
///     n.checked_mul(2).ok_or_else(|| StateFailure::new("overflow"))
/// });
/// # let _ = double;
/// ```
pub fn from_fn<F>(f: F) -> FnState<F> {
    FnState { f }
}

#[async_trait]
impl<P, F, Fut, E> State<P> for FnState<F>
where
    P: Payload,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<P, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    async fn execute(&self, payload: P) -> Result<P, BoxError> {
        (self.f)(payload).await.map_err(Into::into)
    }
}

impl<F> std::fmt::Debug for FnState<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnState").finish_non_exhaustive()
    }
}
