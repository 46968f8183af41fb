//! Capability traits at the node's seams.
//!
//! The HTTP client, the headless browser, and the markup cleaner are
//! external collaborators; each sits behind one of these traits so tests
//! can substitute deterministic doubles.

pub mod cleaner;
pub mod fetcher;
pub mod node;
