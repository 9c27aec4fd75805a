//! Caller-supplied units of transactional work.

/// A step run against a transaction handle.
///
/// A step reports `true` when it succeeded. `false` is an ordinary outcome that
/// the engine interprets; it is never an error at the assembly layer.
///
/// Any `Fn(&H) -> bool` closure that is `Send + Sync + 'static` is a step.
pub trait Step<H: ?Sized>: Send + Sync + 'static {
    /// Run the step against the transaction.
    fn apply(&self, tx: &H) -> bool;
}

impl<H, F> Step<H> for F
where
    H: ?Sized,
    F: Fn(&H) -> bool + Send + Sync + 'static,
{
    fn apply(&self, tx: &H) -> bool {
        self(tx)
    }
}
