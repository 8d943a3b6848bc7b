use std::{error::Error, fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

/// Width (in logical pixels) at and above which the desktop layout is used.
pub const DEFAULT_DESKTOP_BREAKPOINT_PX: u32 = 768;

/// Read-only theme selection injected into the application at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeFlag {
    #[default]
    Dark,
    Light,
}

impl ThemeFlag {
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl FromStr for ThemeFlag {
    type Err = ParseThemeFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(ParseThemeFlagError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseThemeFlagError;

impl fmt::Display for ParseThemeFlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid theme; expected 'dark' or 'light'")
    }
}

impl Error for ParseThemeFlagError {}

/// Responsive layout class derived from the viewport width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Mobile,
    #[default]
    Desktop,
}

impl ViewportClass {
    /// Classifies a viewport width. Widths strictly below the breakpoint are mobile.
    pub fn classify(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px < breakpoint_px { Self::Mobile } else { Self::Desktop }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

/// Lifecycle of a contact form submission.
///
/// `Idle -> Submitting -> Submitted -> (reset timer) -> Idle`, with the error
/// edge `Submitting -> Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// The four inputs of the contact form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Company,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [Self::Name, Self::Email, Self::Company, Self::Message];

    /// Label rendered above the input and used in the composed message body.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Your name",
            Self::Email => "your@email.com",
            Self::Company => "Your company",
            Self::Message => "Tell us about your project...",
        }
    }

    /// Company is the only optional input.
    pub fn is_required(self) -> bool {
        !matches!(self, Self::Company)
    }
}

impl FromStr for ContactField {
    type Err = ParseContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "company" => Ok(Self::Company),
            "message" => Ok(Self::Message),
            _ => Err(ParseContactFieldError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContactFieldError(pub String);

impl fmt::Display for ParseContactFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown contact field '{}'", self.0)
    }
}

impl Error for ParseContactFieldError {}

/// Visual treatment of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient, auto-dismissed notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
            duration,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.variant = ToastVariant::Destructive;
        self
    }
}

/// Identifies one scheduled contact-form reset.
///
/// Each successful submission gets a fresh ticket; a reset that arrives with a
/// stale ticket, or after the form was torn down, is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResetTicket(pub u64);

/// Messages that can be sent to update the application state.
///
/// This enum defines the system events that flow back into the app after
/// input handling: ticks, resizes, section signals and completed side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (toast expiry, highlight animation)
    Tick,
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
    /// The section observer reports a new in-view section id
    SectionInView(String),
    /// The host was asked to open the composed `mailto:` URI
    MailtoDispatched(Result<(), String>),
    /// The host was asked to open an external link
    ExternalLinkOpened(Result<(), String>),
    /// The delayed contact form reset is due
    ContactResetDue(ResetTicket),
}

/// Side effects requested by state changes and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the host to open the composed `mailto:` URI
    OpenMailto(String),
    /// Ask the host to open an external link (e.g. the WhatsApp deep link)
    OpenExternal(String),
    /// Present a toast
    ShowToast(Toast),
    /// Schedule the contact form reset
    ScheduleContactReset { ticket: ResetTicket, delay: Duration },
    /// Scroll the page to a same-page anchor (e.g. `#services`)
    ScrollToAnchor(String),
    /// Leave the application
    Quit,
}

/// Result of executing a command produced from an [`Effect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Feed a message back into the app
    Message(Msg),
    /// Nothing to report beyond a log line
    Log(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_threshold_is_exclusive_for_mobile() {
        assert_eq!(ViewportClass::classify(767, DEFAULT_DESKTOP_BREAKPOINT_PX), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(768, DEFAULT_DESKTOP_BREAKPOINT_PX), ViewportClass::Desktop);
        assert_eq!(ViewportClass::classify(0, DEFAULT_DESKTOP_BREAKPOINT_PX), ViewportClass::Mobile);
    }

    #[test]
    fn contact_field_names_parse() {
        assert_eq!("company".parse::<ContactField>(), Ok(ContactField::Company));
        assert!("phone".parse::<ContactField>().is_err());
        assert!(!ContactField::Company.is_required());
        assert!(ContactField::ALL.iter().filter(|f| f.is_required()).count() == 3);
    }

    #[test]
    fn theme_flag_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeFlag::Light).expect("serialize theme flag");
        assert_eq!(json, "\"light\"");
        assert_eq!(" Dark ".parse::<ThemeFlag>(), Ok(ThemeFlag::Dark));
    }

    #[test]
    fn destructive_toast_keeps_content() {
        let toast = Toast::new("Error", "try again", Duration::from_secs(3)).destructive();
        assert_eq!(toast.variant, ToastVariant::Destructive);
        assert_eq!(toast.title, "Error");
    }
}
