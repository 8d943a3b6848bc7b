//! # Digital Front TUI Library
//!
//! The agency's single-page brochure site rendered in the terminal with
//! Ratatui: a header navigation bar that follows the scroll position, the
//! content sections, and a contact form that hands a pre-filled message to
//! the visitor's mail client.
//!
//! ## Architecture
//!
//! State lives in [`app::App`]; components under [`ui::components`] render it
//! and turn input into state changes plus [`digitalfront_types::Effect`]s.
//! The runtime executes effects through [`cmd`] and feeds the outcomes back
//! as messages.

pub mod app;
pub mod cmd;
pub mod ui;

use std::sync::Arc;

use anyhow::Result;
use digitalfront_util::{SiteConfig, UriOpener};

use crate::app::{App, SharedCtx};

/// Runs the site until the visitor quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be set up, drawn to, or
/// restored.
pub async fn run(config: SiteConfig, opener: Arc<dyn UriOpener>) -> Result<()> {
    let app = App::new(SharedCtx::new(Arc::new(config), opener));
    ui::runtime::run_app(app).await
}
