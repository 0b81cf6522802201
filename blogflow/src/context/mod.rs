//! Per-run context: the shared state record and the run identity.

mod identity;
mod state;

pub use identity::RunIdentity;
pub use state::{PipelineState, StateField};
