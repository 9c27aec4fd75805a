//! Ordered collection of deferred actions.

use weft_core::DeferredAction;

/// The actions collected between build start and finalize.
///
/// Order is insertion order. Nothing is reordered or deduplicated.
#[derive(Debug, Clone, Default)]
pub(crate) struct ActionSequence {
    actions: Vec<DeferredAction>,
}

impl ActionSequence {
    /// Create an empty sequence with room for `capacity` actions.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, action: DeferredAction) {
        self.actions.push(action);
    }

    pub(crate) fn len(&self) -> usize {
        self.actions.len()
    }

    /// Copy of the current contents, for installing into a handle.
    ///
    /// Later pushes do not affect the copy.
    pub(crate) fn snapshot(&self) -> Vec<DeferredAction> {
        self.actions.clone()
    }
}
