//! Weft Transaction
//!
//! Fluent assembly of transactions for an STM engine.
//!
//! Responsibilities:
//! - Collect sequential and choice steps in call order
//! - Bind every step to the handle that will eventually run it
//! - Install the finished plan into the handle on finalize
//! - Reject composition calls made outside the build window
//!
//! ```ignore
//! let tx = transaction(&stm)
//!     .start_build_with(|tx: &Transaction| debit(tx))?
//!     .append(|tx: &Transaction| credit(tx))?
//!     .append_choice(|tx: &Transaction| reserve(tx), |tx: &Transaction| backorder(tx))?
//!     .finalize()?
//!     .retrieve();
//! ```

mod builder;
mod config;
mod error;
mod sequence;

pub use builder::{transaction, ActionSequenceBuilder, BuildPhase};
pub use config::{BuilderConfig, RestartPolicy};
pub use error::{BuildError, BuildResult};
