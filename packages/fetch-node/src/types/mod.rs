//! Data types for documents, state, and configuration.

pub mod config;
pub mod document;
pub mod state;
