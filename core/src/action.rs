//! Deferred actions: steps bound to the handle they will run against.
//!
//! An action is created while a transaction is still being assembled, so it
//! cannot hold the finished handle by value. It keeps a `Weak` back-reference
//! instead: the handle owns its plan and the plan owns the actions, so a strong
//! reference here would form a cycle.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use tracing::{trace, warn};

use crate::step::Step;

/// The shape of a deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// A single step.
    Sequential,
    /// A primary step with a single-attempt fallback.
    Choice,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Sequential => write!(f, "sequential"),
            ActionKind::Choice => write!(f, "choice"),
        }
    }
}

/// The immutable execution plan installed into a transaction handle.
pub type ActionPlan = Arc<[DeferredAction]>;

type Thunk = dyn Fn() -> bool + Send + Sync;
type Anchor = Weak<dyn Any + Send + Sync>;

/// A zero-argument callable that runs a captured step against a captured handle.
///
/// Cloning is cheap and clones share the same body.
#[derive(Clone)]
pub struct DeferredAction {
    kind: ActionKind,
    thunk: Arc<Thunk>,
    anchor: Option<Anchor>,
}

impl DeferredAction {
    /// Bind a single step to a handle.
    pub fn sequential<H, S>(handle: Weak<H>, step: S) -> Self
    where
        H: Send + Sync + 'static,
        S: Step<H>,
    {
        let anchor: Anchor = handle.clone();
        Self::from_fn(ActionKind::Sequential, move || match handle.upgrade() {
            Some(tx) => step.apply(&tx),
            None => {
                warn!(
                    kind = %ActionKind::Sequential,
                    "transaction dropped before its action ran"
                );
                false
            }
        })
        .anchored(anchor)
    }

    /// Bind a choice between two steps to a handle.
    ///
    /// `primary` runs first. If it succeeds the action succeeds and `fallback`
    /// is never evaluated. Otherwise the result is whatever `fallback` returns.
    /// Side effects of a failed `primary` are left to the engine.
    pub fn choice<H, P, F>(handle: Weak<H>, primary: P, fallback: F) -> Self
    where
        H: Send + Sync + 'static,
        P: Step<H>,
        F: Step<H>,
    {
        let anchor: Anchor = handle.clone();
        Self::from_fn(ActionKind::Choice, move || {
            let Some(tx) = handle.upgrade() else {
                warn!(kind = %ActionKind::Choice, "transaction dropped before its action ran");
                return false;
            };
            if primary.apply(&tx) {
                return true;
            }
            trace!("primary step failed, trying fallback");
            fallback.apply(&tx)
        })
        .anchored(anchor)
    }

    /// Wrap an arbitrary callable. The result is never unbound.
    pub fn from_fn<F>(kind: ActionKind, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            kind,
            thunk: Arc::new(f),
            anchor: None,
        }
    }

    fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Get the action kind.
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Check whether the handle this action runs against is still alive.
    pub fn is_bound(&self) -> bool {
        self.anchor
            .as_ref()
            .map_or(true, |anchor| anchor.strong_count() > 0)
    }

    /// Run the action and report whether it succeeded.
    ///
    /// `false` also comes back when the handle was dropped before the action
    /// ran; no step is evaluated in that case. Use [`is_bound`](Self::is_bound)
    /// to tell the two apart.
    pub fn invoke(&self) -> bool {
        let ok = (self.thunk)();
        trace!(kind = %self.kind, ok, "deferred action invoked");
        ok
    }

    /// Returns true if both values share the same body.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.thunk, &other.thunk)
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("kind", &self.kind)
            .field("bound", &self.is_bound())
            .finish_non_exhaustive()
    }
}
