//! Builder configuration.

use serde::{Deserialize, Serialize};

/// What `start_build` does when the builder already holds a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Fail with `BuildError::AlreadyStarted`.
    #[default]
    Reject,
    /// Discard the collected steps and begin an empty sequence. A plan that
    /// was already installed stays until the next finalize replaces it.
    Restart,
}

/// Configuration for an `ActionSequenceBuilder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Label attached to the builder's log events
    pub label: Option<String>,
    /// Behaviour of a repeated `start_build`
    pub restart_policy: RestartPolicy,
    /// Initial capacity of the action sequence
    pub capacity_hint: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            label: None,
            restart_policy: RestartPolicy::Reject,
            capacity_hint: 4,
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart_policy = policy;
        self
    }

    pub fn with_capacity_hint(mut self, capacity: usize) -> Self {
        self.capacity_hint = capacity;
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
