//! Weft Core Types
//!
//! This crate provides the seam between transaction assembly and the STM engine:
//! - Identity types (StmId, TxnId)
//! - The engine context a transaction is bound to (Stm)
//! - The transaction handle contract and the reference Transaction handle
//! - Steps and the deferred actions that bind them to a handle

mod action;
mod context;
mod handle;
mod id;
mod step;

pub use action::{ActionKind, ActionPlan, DeferredAction};
pub use context::Stm;
pub use handle::{Transaction, TransactionHandle};
pub use id::{StmId, TxnId};
pub use step::Step;
