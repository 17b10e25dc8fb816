//! Runner configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`Runner`](super::Runner).
///
/// The default is unbounded: machines may cycle for as long as their guards
/// keep firing. A cycle whose guards never stop firing hangs the run unless
/// `max_steps` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Upper bound on the number of states one run may execute.
    pub max_steps: Option<usize>,
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail a run with `StepLimitExceeded` once it has executed `n` states
    /// and would enter another.
    pub fn max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        assert_eq!(RunnerConfig::default().max_steps, None);
    }

    #[test]
    fn builder_sets_limit() {
        assert_eq!(RunnerConfig::new().max_steps(5).max_steps, Some(5));
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: RunnerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RunnerConfig::default());

        let config: RunnerConfig = serde_json::from_str(r#"{"max_steps": 12}"#).unwrap();
        assert_eq!(config.max_steps, Some(12));
    }
}
