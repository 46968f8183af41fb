//! Markup-to-text cleanup capability.

use crate::error::CleanupResult;

/// Reduces raw markup (plus an optional link list) to normalized text.
///
/// Implementations must be idempotent: cleaning already-cleaned output
/// yields the same text. Strategies rely on this to be safely retried.
pub trait Cleaner: Send + Sync {
    fn clean(&self, markup: &str, links: Option<&[String]>) -> CleanupResult<String>;

    /// Cleaner name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
