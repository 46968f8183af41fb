//! Pass-through loading for content that is already in hand.

use crate::error::Result;
use crate::traits::cleaner::Cleaner;
use crate::types::document::{Document, DocumentBuilder};

/// Wraps literal data or local markup without any network access.
pub struct LocalLoader<'a> {
    cleaner: &'a dyn Cleaner,
}

impl<'a> LocalLoader<'a> {
    pub fn new(cleaner: &'a dyn Cleaner) -> Self {
        Self { cleaner }
    }

    /// Structured data is kept exactly as given.
    pub fn literal(data: &str) -> Document {
        DocumentBuilder::local(data).build()
    }

    /// Local markup goes through the cleaner first.
    pub fn load(&self, markup: &str) -> Result<Document> {
        let content = self.cleaner.clean(markup, None)?;
        Ok(DocumentBuilder::local(content).build())
    }
}
