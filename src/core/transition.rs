//! Transition entries.

use super::guard::Guard;
use super::state::Payload;

/// Directed edge stored under its source state name.
///
/// The destination is only a name: it may point at a state that is registered
/// later, or never. That is only an error once a run actually traverses it.
#[derive(Debug)]
pub struct Transition<P> {
    to: String,
    guard: Option<Guard<P>>,
}

impl<P: Payload> Transition<P> {
    pub fn new(to: impl Into<String>, guard: Option<Guard<P>>) -> Self {
        Self {
            to: to.into(),
            guard,
        }
    }

    /// Destination state name.
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Check whether this transition fires for `payload`.
    ///
    /// An absent guard always fires.
    pub fn fires(&self, payload: &P) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unguarded_transition_always_fires() {
        let transition: Transition<u8> = Transition::new("Next", None);

        assert_eq!(transition.to(), "Next");
        assert!(!transition.is_guarded());
        assert!(transition.fires(&0));
        assert!(transition.fires(&255));
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let transition = Transition::new("Big", Some(Guard::new(|n: &mut u8| *n > 100)));

        assert!(transition.is_guarded());
        assert!(transition.fires(&200));
        assert!(!transition.fires(&3));
    }
}
