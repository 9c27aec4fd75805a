//! Transaction handles.
//!
//! `TransactionHandle` is the contract the STM engine exposes to the assembly
//! layer: construct a handle from a context, then install its execution plan
//! through a single setter. `Transaction` is the handle bound to [`Stm`].

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::action::{ActionPlan, DeferredAction};
use crate::context::Stm;
use crate::id::TxnId;

/// One unit of work as seen by the engine.
///
/// The setter takes `&self` because steps hold back-references to the handle
/// before the plan is installed; implementations use interior mutability for
/// the plan.
pub trait TransactionHandle: Send + Sync + Sized + 'static {
    /// The engine context the handle is bound to.
    type Context: ?Sized + Send + Sync;

    /// Construct a handle with no execution plan.
    fn new(context: &Arc<Self::Context>) -> Self;

    /// Replace the execution plan. Actions run in the given order.
    fn set_actions(&self, actions: Vec<DeferredAction>);
}

/// A transaction bound to an [`Stm`] context.
#[derive(Debug)]
pub struct Transaction {
    id: TxnId,
    stm: Arc<Stm>,
    plan: RwLock<Option<ActionPlan>>,
}

impl Transaction {
    /// Get the transaction id.
    pub fn id(&self) -> TxnId {
        self.id
    }

    /// Get the context this transaction operates upon.
    pub fn stm(&self) -> &Arc<Stm> {
        &self.stm
    }

    /// Get the installed execution plan.
    ///
    /// `None` means no plan was ever installed, which is distinct from an
    /// installed plan with no actions. The returned snapshot is detached from
    /// the lock, so actions may be invoked while steps read the handle.
    pub fn plan(&self) -> Option<ActionPlan> {
        self.plan
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Check if a plan has been installed.
    pub fn has_plan(&self) -> bool {
        self.plan
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Number of actions in the installed plan (0 when none is installed).
    pub fn action_count(&self) -> usize {
        self.plan
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |plan| plan.len())
    }
}

impl TransactionHandle for Transaction {
    type Context = Stm;

    fn new(stm: &Arc<Stm>) -> Self {
        Self {
            id: stm.next_txn_id(),
            stm: Arc::clone(stm),
            plan: RwLock::new(None),
        }
    }

    fn set_actions(&self, actions: Vec<DeferredAction>) {
        let plan: ActionPlan = actions.into();
        debug!(
            stm = %self.stm.id(),
            txn = %self.id,
            actions = plan.len(),
            "execution plan installed"
        );
        *self.plan.write().unwrap_or_else(PoisonError::into_inner) = Some(plan);
    }
}
