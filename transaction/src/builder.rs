//! Fluent builder that assembles a transaction's execution plan.

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::{debug, trace};
use weft_core::{DeferredAction, Step, Stm, Transaction, TransactionHandle};

use crate::config::{BuilderConfig, RestartPolicy};
use crate::error::{BuildError, BuildResult};
use crate::sequence::ActionSequence;

/// Where a builder is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// No sequence exists yet.
    Unbuilt,
    /// Steps are being collected.
    Building,
    /// The current sequence has been installed into the handle.
    Finalized,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildPhase::Unbuilt => write!(f, "unbuilt"),
            BuildPhase::Building => write!(f, "building"),
            BuildPhase::Finalized => write!(f, "finalized"),
        }
    }
}

/// Start assembling a transaction against `stm`.
pub fn transaction(stm: &Arc<Stm>) -> ActionSequenceBuilder<Transaction> {
    ActionSequenceBuilder::create(stm)
}

/// Builder that composes steps into a transaction's execution plan.
///
/// The builder owns the handle from creation until [`retrieve`](Self::retrieve).
/// Each appended step is wrapped in a [`DeferredAction`] holding a weak
/// reference to that same handle, so steps composed before the plan exists
/// still run against the transaction the engine receives.
///
/// Every method consumes the builder and hands it back, so one owner drives it
/// from start to finish.
pub struct ActionSequenceBuilder<H: TransactionHandle = Transaction> {
    handle: Arc<H>,
    sequence: Option<ActionSequence>,
    phase: BuildPhase,
    config: BuilderConfig,
}

impl<H: TransactionHandle> ActionSequenceBuilder<H> {
    /// Create a builder around a fresh handle bound to `context`.
    pub fn create(context: &Arc<H::Context>) -> Self {
        Self::with_config(context, BuilderConfig::default())
    }

    /// Create a builder with explicit configuration.
    pub fn with_config(context: &Arc<H::Context>, config: BuilderConfig) -> Self {
        let handle = Arc::new(H::new(context));
        debug!(label = config.label(), "transaction builder created");

        Self {
            handle,
            sequence: None,
            phase: BuildPhase::Unbuilt,
            config,
        }
    }

    /// Get the current lifecycle phase.
    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Get the configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Borrow the handle being built without releasing it.
    pub fn handle(&self) -> &Arc<H> {
        &self.handle
    }

    /// Number of actions collected so far.
    pub fn len(&self) -> usize {
        self.sequence.as_ref().map_or(0, ActionSequence::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========== Composition ==========

    /// Begin collecting steps.
    ///
    /// If a sequence already exists the configured [`RestartPolicy`] decides
    /// whether this fails or starts over with an empty sequence.
    pub fn start_build(mut self) -> BuildResult<Self> {
        if let Some(existing) = &self.sequence {
            match self.config.restart_policy {
                RestartPolicy::Reject => return Err(BuildError::already_started(self.phase)),
                RestartPolicy::Restart => {
                    debug!(
                        label = self.config.label(),
                        discarded = existing.len(),
                        "restarting build"
                    );
                }
            }
        }

        self.sequence = Some(ActionSequence::with_capacity(self.config.capacity_hint));
        self.phase = BuildPhase::Building;
        debug!(label = self.config.label(), "build started");

        Ok(self)
    }

    /// Begin collecting steps, with `step` as the first one.
    pub fn start_build_with<S: Step<H>>(self, step: S) -> BuildResult<Self> {
        self.start_build()?.append(step)
    }

    /// Append a step.
    pub fn append<S: Step<H>>(self, step: S) -> BuildResult<Self> {
        let action = DeferredAction::sequential(self.back_reference(), step);
        self.push("append", action)
    }

    /// Append a choice: run `primary`, and only if it fails run `fallback`.
    ///
    /// The choice is a single action. It succeeds if `primary` succeeds,
    /// otherwise its result is the result of `fallback`. There is no retry.
    pub fn append_choice<P, F>(self, primary: P, fallback: F) -> BuildResult<Self>
    where
        P: Step<H>,
        F: Step<H>,
    {
        let action = DeferredAction::choice(self.back_reference(), primary, fallback);
        self.push("append_choice", action)
    }

    /// Install the collected actions into the handle as its execution plan.
    ///
    /// Replaces any previously installed plan. Calling it again without new
    /// appends installs the same actions again.
    pub fn finalize(mut self) -> BuildResult<Self> {
        let Some(sequence) = &self.sequence else {
            return Err(BuildError::not_started("finalize"));
        };

        let actions = sequence.snapshot();
        debug!(
            label = self.config.label(),
            actions = actions.len(),
            "finalizing transaction"
        );
        self.handle.set_actions(actions);
        self.phase = BuildPhase::Finalized;

        Ok(self)
    }

    /// Release the handle for submission to the engine.
    ///
    /// If `finalize` was never called the handle keeps whatever plan it was
    /// constructed with.
    pub fn retrieve(self) -> Arc<H> {
        if self.phase != BuildPhase::Finalized {
            debug!(
                label = self.config.label(),
                phase = %self.phase,
                "transaction retrieved without a current finalize"
            );
        }
        self.handle
    }

    // ========== Internal Helpers ==========

    fn back_reference(&self) -> Weak<H> {
        Arc::downgrade(&self.handle)
    }

    fn push(mut self, operation: &'static str, action: DeferredAction) -> BuildResult<Self> {
        let sequence = self
            .sequence
            .as_mut()
            .ok_or_else(|| BuildError::not_started(operation))?;

        let kind = action.kind();
        sequence.push(action);
        trace!(
            label = self.config.label(),
            %kind,
            position = sequence.len() - 1,
            "action appended"
        );
        self.phase = BuildPhase::Building;

        Ok(self)
    }
}

impl<H: TransactionHandle> fmt::Debug for ActionSequenceBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSequenceBuilder")
            .field("phase", &self.phase)
            .field("actions", &self.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
