//! Shared helpers for the Digital Front site: `mailto:` composition, site
//! configuration, and handing URIs to the host.

pub mod mailto;
pub mod opener;
pub mod site_config;
pub mod text_processing;

use std::path::PathBuf;

use dirs_next::home_dir;

pub use mailto::{ContactMessage, MailtoError, MailtoLink, MessageError};
pub use opener::{OpenError, SystemOpener, UriOpener};
pub use site_config::{ContactDetails, NavEntry, SectionContent, SiteConfig, SiteConfigError};
pub use text_processing::{capitalize_first, is_plausible_email, section_label};

/// Expands a leading `~` (Unix or Windows separator) to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}
