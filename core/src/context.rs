//! The engine context transactions are bound to.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::id::{StmId, TxnId};

static NEXT_STM_ID: AtomicU64 = AtomicU64::new(0);

/// An STM engine context.
///
/// Every transaction handle is constructed against one context and keeps a
/// reference to it. Versioned memory, conflict detection and the commit
/// protocol belong to the engine; this type only carries identity and hands
/// out transaction ids.
#[derive(Debug)]
pub struct Stm {
    id: StmId,
    name: Option<String>,
    next_txn_id: AtomicU64,
}

impl Stm {
    /// Create a new anonymous context.
    pub fn new() -> Self {
        Self::with_name(None)
    }

    /// Create a new context with a diagnostic name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_name(Some(name.into()))
    }

    fn with_name(name: Option<String>) -> Self {
        Self {
            id: StmId::new(NEXT_STM_ID.fetch_add(1, Ordering::Relaxed)),
            name,
            next_txn_id: AtomicU64::new(0),
        }
    }

    /// Get the context id.
    pub fn id(&self) -> StmId {
        self.id
    }

    /// Get the diagnostic name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Allocate the next transaction id for this context.
    pub fn next_txn_id(&self) -> TxnId {
        TxnId::new(self.next_txn_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Stm {
    fn default() -> Self {
        Self::new()
    }
}
