//! Site configuration: copy, navigation entries, contact details and timings.
//!
//! The configuration is a JSON document. Every field has a default, so a file
//! only needs to carry what it overrides. Lookup order for the file is an
//! explicit path, then [`SITE_CONFIG_ENV`], then
//! `<config dir>/digitalfront/site.json`; when none exists the embedded
//! defaults are used.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use digitalfront_types::{DEFAULT_DESKTOP_BREAKPOINT_PX, ThemeFlag};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::expand_tilde;
use crate::text_processing::{is_plausible_email, section_label};

/// Environment variable allowing callers to override the site config path.
pub const SITE_CONFIG_ENV: &str = "DIGITALFRONT_SITE_CONFIG";

/// Environment variable selecting the theme (`dark` or `light`).
pub const THEME_ENV: &str = "DIGITALFRONT_THEME";

/// Default filename inside the config directory.
pub const SITE_CONFIG_FILE_NAME: &str = "site.json";

#[derive(Debug, Error)]
pub enum SiteConfigError {
    #[error("site config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("site config at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid site config: {0}")]
    Invalid(String),
}

/// A navigation entry: display name plus same-page anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub name: String,
    pub anchor: String,
}

impl NavEntry {
    pub fn new(name: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anchor: anchor.into(),
        }
    }

    /// Section id the anchor points to (`#services` -> `services`).
    pub fn section_id(&self) -> &str {
        self.anchor.trim_start_matches('#')
    }
}

/// Copy for one page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
}

impl SectionContent {
    fn new(id: &str, title: &str, body: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.iter().map(|line| line.to_string()).collect(),
        }
    }
}

/// Fixed contact details shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    /// Destination of the composed `mailto:` links.
    pub email: String,
    pub phone_label: String,
    pub whatsapp_url: String,
    pub office: String,
    pub heading: String,
    pub pitch: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            email: "team@thedigitalfront.in".into(),
            phone_label: "+91 9284613155".into(),
            whatsapp_url: "https://wa.me/9284613155?text=Hey!%20I'm%20interested%20in%20your%20Web%20Agency%20services".into(),
            office: "Goa, India".into(),
            heading: "Let's Create Something Amazing Together".into(),
            pitch: "Ready to transform your digital presence and boost your business? Get in touch with us today to discuss your project.".into(),
        }
    }
}

/// Effective configuration of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub brand: String,
    pub theme: ThemeFlag,
    pub desktop_breakpoint_px: u32,
    /// Pixel width assumed for one terminal cell when the terminal does not report its pixel size.
    pub cell_width_px: u32,
    pub reset_delay_ms: u64,
    pub toast_duration_ms: u64,
    pub contact: ContactDetails,
    pub navigation: Vec<NavEntry>,
    pub sections: Vec<SectionContent>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand: "The Digital Front".into(),
            theme: ThemeFlag::Dark,
            desktop_breakpoint_px: DEFAULT_DESKTOP_BREAKPOINT_PX,
            cell_width_px: 8,
            reset_delay_ms: 3000,
            toast_duration_ms: 3000,
            contact: ContactDetails::default(),
            navigation: default_navigation(),
            sections: default_sections(),
        }
    }
}

fn default_navigation() -> Vec<NavEntry> {
    vec![
        NavEntry::new("Services", "#services"),
        NavEntry::new("Work", "#case-studies"),
        NavEntry::new("Process", "#process"),
        NavEntry::new("Integrations", "#integrations"),
        NavEntry::new("Testimonials", "#testimonials"),
        NavEntry::new("Contact", "#contact"),
    ]
}

fn default_sections() -> Vec<SectionContent> {
    vec![
        SectionContent::new(
            "hero",
            "We build websites that grow your business",
            &[
                "A digital agency crafting fast, beautiful and conversion-focused web experiences.",
                "Scroll down to see what we do, or jump straight to the contact form.",
            ],
        ),
        SectionContent::new(
            "services",
            "Services",
            &[
                "Web design and development: responsive sites built for speed and search.",
                "E-commerce: storefronts, payments and inventory that scale with you.",
                "Branding: identity systems, copy and visual language that stand out.",
                "Growth: SEO, analytics set-up and landing pages that convert.",
            ],
        ),
        SectionContent::new(
            "case-studies",
            "Our Work",
            &[
                "Hospitality group: a booking-first site that doubled direct reservations.",
                "Boutique retailer: a storefront migration with zero downtime.",
                "SaaS start-up: a marketing site and docs portal shipped in six weeks.",
            ],
        ),
        SectionContent::new(
            "process",
            "Our Process",
            &[
                "1. Discover: we learn your goals, audience and constraints.",
                "2. Design: wireframes and visual design, reviewed together.",
                "3. Build: iterative development with weekly previews.",
                "4. Launch: performance checks, analytics and hand-over.",
            ],
        ),
        SectionContent::new(
            "integrations",
            "Integrations",
            &[
                "Payments, CRMs, email marketing, calendars and messaging.",
                "We connect your site to the tools your team already uses.",
            ],
        ),
        SectionContent::new(
            "testimonials",
            "Testimonials",
            &[
                "\"They understood our business better than we did.\" (Founder, hospitality)",
                "\"Fast, friendly and the site just works.\" (Owner, retail)",
            ],
        ),
        SectionContent::new("contact", "Get in Touch", &[]),
    ]
}

impl SiteConfig {
    /// Loads the configuration following the documented lookup order.
    ///
    /// `explicit` wins over the environment; a missing explicit file is an error,
    /// while a missing default-location file falls back to the embedded defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SiteConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_path(path)?,
            None => {
                let path = default_site_config_path();
                match fs::read_to_string(&path) {
                    Ok(data) => Self::from_json(&data, &path)?,
                    Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                        debug!(path = %path.display(), "no site config found; using defaults");
                        Self::default()
                    }
                    Err(source) => return Err(SiteConfigError::Io { path, source }),
                }
            }
        };

        if let Ok(value) = env::var(THEME_ENV)
            && let Ok(theme) = value.parse::<ThemeFlag>()
        {
            config.theme = theme;
        }

        config.validate()?;
        info!(brand = %config.brand, sections = config.sections.len(), "site config loaded");
        Ok(config)
    }

    /// Reads and parses a specific file.
    pub fn from_path(path: &Path) -> Result<Self, SiteConfigError> {
        let data = fs::read_to_string(path).map_err(|source| SiteConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data, path)
    }

    fn from_json(data: &str, path: &Path) -> Result<Self, SiteConfigError> {
        serde_json::from_str(data).map_err(|source| SiteConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), SiteConfigError> {
        if self.navigation.is_empty() {
            return Err(SiteConfigError::Invalid("at least one navigation entry is required".into()));
        }
        if self.desktop_breakpoint_px == 0 || self.cell_width_px == 0 {
            return Err(SiteConfigError::Invalid("breakpoint and cell width must be positive".into()));
        }
        if !is_plausible_email(self.contact.email.trim()) {
            return Err(SiteConfigError::Invalid(format!(
                "contact email '{}' is not an address",
                self.contact.email
            )));
        }
        for entry in &self.navigation {
            if !entry.anchor.starts_with('#') {
                return Err(SiteConfigError::Invalid(format!(
                    "navigation entry '{}' must use a same-page anchor, got '{}'",
                    entry.name, entry.anchor
                )));
            }
            if self.section(entry.section_id()).is_none() {
                return Err(SiteConfigError::Invalid(format!(
                    "navigation entry '{}' points at unknown section '{}'",
                    entry.name, entry.anchor
                )));
            }
            let expected = section_label(entry.section_id());
            if entry.name != expected {
                return Err(SiteConfigError::Invalid(format!(
                    "navigation entry '{}' for '{}' must be named '{}' so the scroll position can highlight it",
                    entry.name, entry.anchor, expected
                )));
            }
        }
        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&SectionContent> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

/// Resolves the default site config path, honoring [`SITE_CONFIG_ENV`].
pub fn default_site_config_path() -> PathBuf {
    if let Ok(path) = env::var(SITE_CONFIG_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("digitalfront")
        .join(SITE_CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SiteConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.navigation.len(), 6);
        assert_eq!(config.navigation[1].section_id(), "case-studies");
        assert_eq!(config.reset_delay(), Duration::from_secs(3));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "brand": "Acme Web", "reset_delay_ms": 500 }}"#).expect("write");
        let config = SiteConfig::from_path(file.path()).expect("load");
        assert_eq!(config.brand, "Acme Web");
        assert_eq!(config.reset_delay_ms, 500);
        assert_eq!(config.contact.email, "team@thedigitalfront.in");
        assert_eq!(config.navigation, default_navigation());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write");
        let err = SiteConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, SiteConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_external_anchor() {
        let mut config = SiteConfig::default();
        config.navigation.push(NavEntry::new("Blog", "https://blog.example.com"));
        assert!(matches!(config.validate(), Err(SiteConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_anchor_without_section() {
        let mut config = SiteConfig::default();
        config.navigation.push(NavEntry::new("Pricing", "#pricing"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("#pricing"));
    }

    #[test]
    fn rejects_entry_the_scroll_position_cannot_highlight() {
        let mut config = SiteConfig::default();
        config.navigation[1] = NavEntry::new("Our Work", "#case-studies");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be named 'Work'"), "{err}");
    }

    #[test]
    fn missing_default_file_falls_back_and_env_selects_theme() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("site.json");
        temp_env::with_vars(
            [
                (SITE_CONFIG_ENV, Some(missing.to_string_lossy().to_string())),
                (THEME_ENV, Some("light".to_string())),
            ],
            || {
                let config = SiteConfig::load(None).expect("load defaults");
                assert_eq!(config.theme, ThemeFlag::Light);
                assert_eq!(config.brand, "The Digital Front");
            },
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = SiteConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, SiteConfigError::Io { .. }));
    }
}
