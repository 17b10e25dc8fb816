//! Guard predicates for controlling transitions.
//!
//! Guards are synchronous boolean functions evaluated against a disposable
//! copy of the payload. Whatever a guard does to that copy is thrown away.

use super::state::Payload;
use std::fmt;

/// Predicate deciding whether a transition fires.
///
/// The predicate receives `&mut P`, but always on a fresh clone made by
/// [`Guard::check`], so mutations never reach the payload that moves on to the
/// next state.
///
/// # Example
///
/// ```rust
/// use fsm_runner::core::Guard;
///
/// #[derive(Clone)]
/// struct Order {
///     total: u32,
/// }
///
/// let large = Guard::new(|o: &mut Order| o.total > 100);
///
/// assert!(large.check(&Order { total: 250 }));
/// assert!(!large.check(&Order { total: 20 }));
/// ```
pub struct Guard<P> {
    predicate: Box<dyn Fn(&mut P) -> bool + Send + Sync>,
}

impl<P: Payload> Guard<P> {
    /// Create a guard from a predicate.
    ///
    /// The predicate must be thread-safe (Send + Sync) so runners can be
    /// shared between concurrent runs.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&mut P) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that always fires. Equivalent to registering no guard at all.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Evaluate the predicate against a clone of `payload`.
    pub fn check(&self, payload: &P) -> bool {
        let mut copy = payload.clone();
        (self.predicate)(&mut copy)
    }
}

impl<P> fmt::Debug for Guard<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
