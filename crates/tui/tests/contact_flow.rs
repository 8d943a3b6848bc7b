use std::sync::{Arc, Mutex};
use std::time::Duration;

use digitalfront_tui::app::{App, SharedCtx};
use digitalfront_tui::cmd;
use digitalfront_types::{ContactField, Effect, ExecOutcome, Msg, SubmissionPhase, ToastVariant};
use digitalfront_util::{OpenError, SiteConfig, UriOpener};

#[derive(Debug, Default)]
struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl UriOpener for RecordingOpener {
    fn open(&self, uri: &str) -> Result<(), OpenError> {
        if self.fail {
            return Err(OpenError::Spawn {
                program: "xdg-open".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            });
        }
        self.opened.lock().expect("lock").push(uri.to_string());
        Ok(())
    }
}

fn app_with(opener: Arc<RecordingOpener>) -> App {
    let mut app = App::new(SharedCtx::new(Arc::new(SiteConfig::default()), opener));
    app.update(&Msg::Resize(140, 40));
    app
}

fn fill(app: &mut App) {
    app.contact.update_field(ContactField::Name, "Asha Rao");
    app.contact.update_field(ContactField::Email, "asha@example.com");
    app.contact.update_field(ContactField::Company, "Rao & Sons");
    app.contact.update_field(ContactField::Message, "Need a new site.\nSoon!");
}

/// Runs effects the way the runtime does and feeds immediate outcomes back.
async fn execute(app: &mut App, effects: Vec<Effect>) -> Vec<tokio::task::JoinHandle<ExecOutcome>> {
    let mut queue = effects;
    let mut pending = Vec::new();
    while !queue.is_empty() {
        let mut commands = Vec::new();
        for effect in std::mem::take(&mut queue) {
            match effect {
                Effect::ShowToast(toast) => app.show_toast(toast),
                Effect::ScrollToAnchor(anchor) => queue.extend(app.scroll_to_anchor(&anchor)),
                Effect::Quit => app.shutdown(),
                other => commands.push(other),
            }
        }
        let batch = cmd::run_from_effects(app, commands);
        pending.extend(batch.pending);
        for outcome in batch.immediate {
            if let ExecOutcome::Message(msg) = outcome {
                queue.extend(app.update(&msg));
            }
        }
    }
    pending
}

#[tokio::test(start_paused = true)]
async fn submission_hands_off_mail_and_resets_after_delay() {
    let opener = Arc::new(RecordingOpener::default());
    let mut app = app_with(Arc::clone(&opener));
    fill(&mut app);

    let effects = app.submit_contact();
    assert_eq!(app.contact.phase(), SubmissionPhase::Submitting);
    let mut pending = execute(&mut app, effects).await;

    let opened = opener.opened.lock().expect("lock").clone();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].starts_with("mailto:team@thedigitalfront.in?subject="));
    assert!(opened[0].contains("Rao%20%26%20Sons"));
    assert_eq!(app.contact.phase(), SubmissionPhase::Submitted);
    assert_eq!(app.toasts.iter().next().map(|t| t.toast.title.as_str()), Some("Message Sent!"));

    assert_eq!(pending.len(), 1);
    let handle = pending.remove(0);
    // let the timer task start its sleep before moving the clock
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(2999)).await;
    assert!(!handle.is_finished());
    assert_eq!(app.contact.phase(), SubmissionPhase::Submitted);

    let outcome = handle.await.expect("reset task");
    let ExecOutcome::Message(msg) = outcome else {
        panic!("expected a message");
    };
    app.update(&msg);
    assert_eq!(app.contact.phase(), SubmissionPhase::Idle);
    for field in ContactField::ALL {
        assert_eq!(app.contact.field(field), "", "{field:?} should be cleared");
    }
}

#[tokio::test(start_paused = true)]
async fn opener_failure_keeps_the_draft() {
    let opener = Arc::new(RecordingOpener {
        fail: true,
        ..Default::default()
    });
    let mut app = app_with(opener);
    fill(&mut app);

    let effects = app.submit_contact();
    let pending = execute(&mut app, effects).await;

    assert!(pending.is_empty());
    assert_eq!(app.contact.phase(), SubmissionPhase::Idle);
    assert_eq!(app.contact.field(ContactField::Company), "Rao & Sons");
    let toast = app.toasts.iter().next().expect("error toast");
    assert_eq!(toast.toast.variant, ToastVariant::Destructive);
    assert_eq!(toast.toast.description, "There was a problem sending your message. Please try again.");
}

#[tokio::test(start_paused = true)]
async fn reset_after_teardown_does_nothing() {
    let opener = Arc::new(RecordingOpener::default());
    let mut app = app_with(opener);
    fill(&mut app);

    let effects = app.submit_contact();
    let mut pending = execute(&mut app, effects).await;
    app.shutdown();

    tokio::time::advance(Duration::from_secs(3)).await;
    let ExecOutcome::Message(msg) = pending.remove(0).await.expect("reset task") else {
        panic!("expected a message");
    };
    app.update(&msg);
    assert_eq!(app.contact.phase(), SubmissionPhase::Submitted);
    assert_eq!(app.contact.field(ContactField::Name), "Asha Rao");
}

#[tokio::test(start_paused = true)]
async fn whatsapp_link_goes_to_the_opener() {
    let opener = Arc::new(RecordingOpener::default());
    let mut app = app_with(Arc::clone(&opener));
    let url = app.ctx.config.contact.whatsapp_url.clone();

    execute(&mut app, vec![Effect::OpenExternal(url.clone())]).await;
    assert_eq!(opener.opened.lock().expect("lock").as_slice(), [url]);
    assert!(app.toasts.is_empty());
}
