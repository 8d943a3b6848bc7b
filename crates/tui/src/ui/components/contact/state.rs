use digitalfront_types::{ContactField, Effect, ResetTicket, SubmissionPhase};
use digitalfront_util::{ContactMessage, MailtoError, MailtoLink, MessageError};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use thiserror::Error;
use tracing::{debug, info};

use crate::ui::components::common::TextInputState;

/// Reasons a submit request does not reach the mail handler.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InProgress,
    #[error(transparent)]
    Invalid(#[from] MessageError),
    #[error("could not compose the mail link: {0}")]
    Compose(#[from] MailtoError),
}

/// State for the contact form: four inputs, the submission lifecycle, and
/// the ticket of the pending reset.
///
/// Lifecycle: `Idle -> Submitting -> Submitted -> (reset) -> Idle`, with an
/// error edge `Submitting -> Idle` that keeps the typed values. Once
/// [`unmount`](Self::unmount) has been called every later transition is a no-op.
#[derive(Debug, Clone)]
pub struct ContactFormState {
    name: TextInputState,
    email: TextInputState,
    company: TextInputState,
    message: TextInputState,
    phase: SubmissionPhase,
    mounted: bool,
    pending_reset: Option<ResetTicket>,
    next_ticket: u64,
    validation_hint: Option<String>,

    pub container_focus: FocusFlag,
    pub field_focus: [FocusFlag; 4],
    pub submit_focus: FocusFlag,

    /// Areas recorded during the last render, in page coordinates.
    pub last_area: Rect,
    pub field_areas: [Rect; 4],
    pub submit_area: Rect,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactFormState {
    pub fn new() -> Self {
        Self {
            name: TextInputState::new(),
            email: TextInputState::new(),
            company: TextInputState::new(),
            message: TextInputState::new(),
            phase: SubmissionPhase::Idle,
            mounted: true,
            pending_reset: None,
            next_ticket: 0,
            validation_hint: None,
            container_focus: FocusFlag::named("contact.form"),
            field_focus: [
                FocusFlag::named("contact.name"),
                FocusFlag::named("contact.email"),
                FocusFlag::named("contact.company"),
                FocusFlag::named("contact.message"),
            ],
            submit_focus: FocusFlag::named("contact.submit"),
            last_area: Rect::default(),
            field_areas: [Rect::default(); 4],
            submit_area: Rect::default(),
        }
    }

    // ===== SELECTORS =====

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn field(&self, field: ContactField) -> &str {
        self.input(field).input()
    }

    pub fn input(&self, field: ContactField) -> &TextInputState {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Company => &self.company,
            ContactField::Message => &self.message,
        }
    }

    fn input_mut(&mut self, field: ContactField) -> &mut TextInputState {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Company => &mut self.company,
            ContactField::Message => &mut self.message,
        }
    }

    /// Snapshot of the typed values.
    pub fn message(&self) -> ContactMessage {
        ContactMessage {
            name: self.name.input().to_string(),
            email: self.email.input().to_string(),
            company: self.company.input().to_string(),
            message: self.message.input().to_string(),
        }
    }

    pub fn validation_hint(&self) -> Option<&str> {
        self.validation_hint.as_deref()
    }

    /// Inputs and the submit control only accept interaction while idle.
    pub fn is_editable(&self) -> bool {
        self.mounted && self.phase == SubmissionPhase::Idle
    }

    pub fn focused_field(&self) -> Option<ContactField> {
        self.field_focus
            .iter()
            .position(|flag| flag.get())
            .map(|idx| ContactField::ALL[idx])
    }

    pub fn focus_flag(&self, field: ContactField) -> &FocusFlag {
        &self.field_focus[field_index(field)]
    }

    // ===== REDUCERS =====

    /// Replaces one field's value, leaving the other three untouched.
    pub fn update_field(&mut self, field: ContactField, value: impl Into<String>) {
        if !self.is_editable() {
            return;
        }
        self.input_mut(field).set_input(value);
        self.validation_hint = None;
    }

    /// Applies an in-place edit (typing, cursor movement) to one field.
    pub fn edit_field(&mut self, field: ContactField, edit: impl FnOnce(&mut TextInputState)) {
        if !self.is_editable() {
            return;
        }
        edit(self.input_mut(field));
        self.validation_hint = None;
    }

    /// Moves `Idle -> Submitting` and composes the `mailto:` URI for `destination`.
    ///
    /// Rejected without any state change while a submission is in flight or
    /// when a required field is blank or the email is malformed. A compose
    /// failure returns the form to `Idle` with every field kept.
    pub fn begin_submit(&mut self, destination: &str) -> Result<Effect, SubmitError> {
        if !self.mounted || self.phase != SubmissionPhase::Idle {
            return Err(SubmitError::InProgress);
        }
        let message = self.message();
        if let Err(err) = message.validate() {
            self.validation_hint = Some(err.to_string());
            return Err(err.into());
        }

        self.phase = SubmissionPhase::Submitting;
        self.validation_hint = None;
        match MailtoLink::compose(destination, &message) {
            Ok(link) => {
                debug!(address = %link.address, "contact submission composed");
                Ok(Effect::OpenMailto(link.uri))
            }
            Err(err) => {
                self.phase = SubmissionPhase::Idle;
                Err(SubmitError::Compose(err))
            }
        }
    }

    /// `Submitting -> Submitted`; returns the ticket the delayed reset must present.
    pub fn complete_submit(&mut self) -> Option<ResetTicket> {
        if !self.mounted || self.phase != SubmissionPhase::Submitting {
            return None;
        }
        self.next_ticket += 1;
        let ticket = ResetTicket(self.next_ticket);
        self.phase = SubmissionPhase::Submitted;
        self.pending_reset = Some(ticket);
        info!(ticket = ticket.0, "contact form submitted");
        Some(ticket)
    }

    /// Error edge `Submitting -> Idle`. Field values stay as typed.
    pub fn fail_submit(&mut self) -> bool {
        if !self.mounted || self.phase != SubmissionPhase::Submitting {
            return false;
        }
        self.phase = SubmissionPhase::Idle;
        true
    }

    /// Delayed `Submitted -> Idle` with every field cleared.
    ///
    /// Returns `false` (and changes nothing) for a stale ticket, outside the
    /// `Submitted` phase, or after teardown.
    pub fn apply_reset(&mut self, ticket: ResetTicket) -> bool {
        if !self.mounted {
            debug!(ticket = ticket.0, "ignoring contact reset after teardown");
            return false;
        }
        if self.phase != SubmissionPhase::Submitted || self.pending_reset != Some(ticket) {
            debug!(ticket = ticket.0, "ignoring stale contact reset");
            return false;
        }
        for field in ContactField::ALL {
            self.input_mut(field).clear();
        }
        self.phase = SubmissionPhase::Idle;
        self.pending_reset = None;
        self.validation_hint = None;
        true
    }

    /// Tears the form down; pending resets become no-ops.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pending_reset = None;
    }
}

pub(crate) fn field_index(field: ContactField) -> usize {
    match field {
        ContactField::Name => 0,
        ContactField::Email => 1,
        ContactField::Company => 2,
        ContactField::Message => 3,
    }
}

impl HasFocus for ContactFormState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for flag in &self.field_focus {
            builder.leaf_widget(flag);
        }
        builder.leaf_widget(&self.submit_focus);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESTINATION: &str = "team@thedigitalfront.in";

    fn filled() -> ContactFormState {
        let mut form = ContactFormState::new();
        form.update_field(ContactField::Name, "Asha");
        form.update_field(ContactField::Email, "asha@example.com");
        form.update_field(ContactField::Message, "We need a new storefront.");
        form
    }

    #[test]
    fn editing_one_field_leaves_others_untouched() {
        let mut form = filled();
        form.update_field(ContactField::Company, "Acme");
        form.update_field(ContactField::Name, "Asha R");
        assert_eq!(form.field(ContactField::Name), "Asha R");
        assert_eq!(form.field(ContactField::Email), "asha@example.com");
        assert_eq!(form.field(ContactField::Company), "Acme");
        assert_eq!(form.field(ContactField::Message), "We need a new storefront.");
    }

    #[test]
    fn successful_submission_walks_the_lifecycle() {
        let mut form = filled();
        assert_eq!(form.phase(), SubmissionPhase::Idle);

        let effect = form.begin_submit(DESTINATION).expect("submit");
        assert_eq!(form.phase(), SubmissionPhase::Submitting);
        let Effect::OpenMailto(uri) = effect else {
            panic!("expected OpenMailto, got {effect:?}");
        };
        assert!(uri.starts_with("mailto:team@thedigitalfront.in?subject=Contact%20Form%20Submission%20from%20Asha"));
        assert!(uri.contains("Company%3A%20Not%20provided"));

        let ticket = form.complete_submit().expect("ticket");
        assert_eq!(form.phase(), SubmissionPhase::Submitted);
        assert_eq!(form.field(ContactField::Name), "Asha");

        assert!(form.apply_reset(ticket));
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        for field in ContactField::ALL {
            assert_eq!(form.field(field), "");
        }
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut form = filled();
        form.begin_submit(DESTINATION).expect("first submit");
        assert!(matches!(form.begin_submit(DESTINATION), Err(SubmitError::InProgress)));
        assert_eq!(form.phase(), SubmissionPhase::Submitting);

        form.complete_submit();
        assert!(matches!(form.begin_submit(DESTINATION), Err(SubmitError::InProgress)));
        assert_eq!(form.phase(), SubmissionPhase::Submitted);
    }

    #[test]
    fn failure_returns_to_idle_with_fields_kept() {
        let mut form = filled();
        form.update_field(ContactField::Company, "Acme");
        form.begin_submit(DESTINATION).expect("submit");
        assert!(form.fail_submit());
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.field(ContactField::Company), "Acme");
        assert_eq!(form.field(ContactField::Message), "We need a new storefront.");
        assert!(form.begin_submit(DESTINATION).is_ok());
    }

    #[test]
    fn compose_failure_restores_idle() {
        let mut form = filled();
        let err = form.begin_submit("not an address").unwrap_err();
        assert!(matches!(err, SubmitError::Compose(_)));
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.field(ContactField::Name), "Asha");
    }

    #[test]
    fn blank_required_field_blocks_submit() {
        let mut form = filled();
        form.update_field(ContactField::Message, "   ");
        let err = form.begin_submit(DESTINATION).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(MessageError::MissingRequired(ContactField::Message))));
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.validation_hint(), Some("Message is required"));

        form.update_field(ContactField::Message, "hello");
        assert_eq!(form.validation_hint(), None);
        form.update_field(ContactField::Email, "nope");
        assert!(matches!(
            form.begin_submit(DESTINATION),
            Err(SubmitError::Invalid(MessageError::InvalidEmail(_)))
        ));
    }

    #[test]
    fn reset_after_teardown_is_suppressed() {
        let mut form = filled();
        form.begin_submit(DESTINATION).expect("submit");
        let ticket = form.complete_submit().expect("ticket");
        form.unmount();
        assert!(!form.apply_reset(ticket));
        assert_eq!(form.phase(), SubmissionPhase::Submitted);
        assert_eq!(form.field(ContactField::Name), "Asha");
    }

    #[test]
    fn stale_ticket_does_not_reset() {
        let mut form = filled();
        form.begin_submit(DESTINATION).expect("submit");
        let ticket = form.complete_submit().expect("ticket");
        assert!(!form.apply_reset(ResetTicket(ticket.0 + 7)));
        assert_eq!(form.phase(), SubmissionPhase::Submitted);
    }

    #[test]
    fn inputs_are_frozen_outside_idle() {
        let mut form = filled();
        form.begin_submit(DESTINATION).expect("submit");
        form.update_field(ContactField::Name, "Changed");
        assert_eq!(form.field(ContactField::Name), "Asha");
    }
}
