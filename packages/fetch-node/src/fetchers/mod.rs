//! Default implementations of the fetch capabilities.
//!
//! - `ReqwestFetcher` - plain HTTP GET
//! - `PlaywrightRenderer` - headless Chromium via Playwright, for pages
//!   that need JavaScript

mod http;
mod playwright;

pub use http::ReqwestFetcher;
pub use playwright::PlaywrightRenderer;
