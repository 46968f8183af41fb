//! Seam between a pipeline orchestrator and its nodes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::state::State;

/// A unit of work that reads from and writes to the shared state.
///
/// Orchestrators own sequencing, retries, and fallbacks; a node runs once
/// per call and either updates its output key or fails without touching
/// the state.
#[async_trait]
pub trait Node: Send + Sync {
    fn name(&self) -> &str;

    async fn execute(&self, state: &mut State) -> Result<()>;
}
