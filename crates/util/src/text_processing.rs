//! # Text Processing Utilities
//!
//! Small string helpers shared by the navigation bar and the contact form.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shape accepted by a browser `type="email"` input: a non-empty local part,
/// a single `@`, and a non-empty domain made of dot-separated labels.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// Upper-cases the first character and keeps the rest verbatim.
///
/// # Example
/// ```rust
/// use digitalfront_util::text_processing::capitalize_first;
///
/// assert_eq!(capitalize_first("services"), "Services");
/// assert_eq!(capitalize_first("case-studies"), "Case-studies");
/// assert_eq!(capitalize_first(""), "");
/// ```
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Section ids whose navigation label is not their capitalized id.
const RENAMED_SECTIONS: [(&str, &str); 2] = [("case-studies", "Work"), ("integrations", "Integrations")];

/// Maps a section id to its navigation label.
///
/// `case-studies` and `integrations` are renamed; every other id has its first
/// character upper-cased and the rest kept verbatim.
pub fn section_label(section_id: &str) -> String {
    RENAMED_SECTIONS
        .iter()
        .find(|(id, _)| *id == section_id)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| capitalize_first(section_id))
}

/// Returns `true` when `input` looks like an email address.
pub fn is_plausible_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_unicode_first_letter() {
        assert_eq!(capitalize_first("über"), "Über");
        assert_eq!(capitalize_first("process"), "Process");
        assert_eq!(capitalize_first("Contact"), "Contact");
    }

    #[test]
    fn section_labels() {
        assert_eq!(section_label("case-studies"), "Work");
        assert_eq!(section_label("integrations"), "Integrations");
        assert_eq!(section_label("services"), "Services");
    }

    #[test]
    fn email_shapes() {
        assert!(is_plausible_email("team@thedigitalfront.in"));
        assert!(is_plausible_email("a.b+c@localhost"));
        assert!(!is_plausible_email("team@"));
        assert!(!is_plausible_email("@domain.com"));
        assert!(!is_plausible_email("two@@at.com"));
        assert!(!is_plausible_email("spaces in@x.com"));
    }
}
