//! `mailto:` composition for contact form submissions.
//!
//! The body is plain text with one labelled line per field. Subject and body
//! are percent-encoded with the same reserved set as a browser's
//! `encodeURIComponent`, so spaces become `%20` and line breaks `%0A`.

use digitalfront_types::ContactField;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::text_processing::is_plausible_email;

/// Substituted for an empty company field.
pub const NOT_PROVIDED: &str = "Not provided";

/// Prefix of every subject line; the sender's name is appended.
pub const SUBJECT_PREFIX: &str = "Contact Form Submission from ";

/// Characters left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error)]
pub enum MailtoError {
    #[error("invalid destination address '{0}'")]
    InvalidAddress(String),
    #[error("composed mailto URI is invalid: {0}")]
    Uri(#[from] url::ParseError),
    #[error("composed URI has unexpected scheme '{0}'")]
    Scheme(String),
}

/// Why a [`ContactMessage`] cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("{} is required", .0.label())]
    MissingRequired(ContactField),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// The four values captured by the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactMessage {
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Company => &self.company,
            ContactField::Message => &self.message,
        }
    }

    /// Required fields must hold more than whitespace and the email must
    /// look like an address.
    pub fn validate(&self) -> Result<(), MessageError> {
        if let Some(field) = ContactField::ALL
            .into_iter()
            .find(|field| field.is_required() && self.value(*field).trim().is_empty())
        {
            return Err(MessageError::MissingRequired(field));
        }
        let email = self.email.trim();
        if !is_plausible_email(email) {
            return Err(MessageError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Company as it appears in the body.
    pub fn company_or_default(&self) -> &str {
        if self.company.is_empty() { NOT_PROVIDED } else { &self.company }
    }
}

/// A composed `mailto:` link with its decoded parts kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailtoLink {
    pub address: String,
    pub subject: String,
    pub body: String,
    pub uri: String,
}

impl MailtoLink {
    /// Builds the link for `message` addressed to `address`.
    pub fn compose(address: &str, message: &ContactMessage) -> Result<Self, MailtoError> {
        let address = address.trim();
        if !is_plausible_email(address) {
            return Err(MailtoError::InvalidAddress(address.to_string()));
        }

        let subject = compose_subject(&message.name);
        let body = compose_body(message);
        let uri = format!(
            "mailto:{address}?subject={}&body={}",
            encode_component(&subject),
            encode_component(&body)
        );

        let parsed = Url::parse(&uri)?;
        if parsed.scheme() != "mailto" {
            return Err(MailtoError::Scheme(parsed.scheme().to_string()));
        }

        Ok(Self {
            address: address.to_string(),
            subject,
            body,
            uri,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

pub fn compose_subject(name: &str) -> String {
    format!("{SUBJECT_PREFIX}{name}")
}

/// Renders the labelled plain-text body, one field per line.
pub fn compose_body(message: &ContactMessage) -> String {
    format!(
        "Name: {}\nEmail: {}\nCompany: {}\nMessage: {}",
        message.name,
        message.email,
        message.company_or_default(),
        message.message
    )
}

/// Percent-encodes `value` like `encodeURIComponent`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
