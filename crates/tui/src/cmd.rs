//! # Command Execution Layer
//!
//! This module translates application effects (`Effect`) into imperative
//! commands (`Cmd`) and executes them. It is the boundary where the pure
//! state of the app meets the host:
//! - Handing `mailto:` and external links to the platform opener
//! - Scheduling the delayed contact form reset
//!
//! ## Design
//! - [`Cmd`] is the effectful command type.
//! - [`from_effects`] translates state-driven [`Effect`]s into [`Cmd`]s.
//! - [`run_from_effects`] executes them and returns a [`CommandBatch`]:
//!   outcomes known right away plus spawned tasks the runtime awaits.
//!
//! State updates stay pure; every outcome re-enters the app as a [`Msg`].

use std::sync::Arc;
use std::time::Duration;

use digitalfront_types::{Effect, ExecOutcome, Msg, ResetTicket};
use digitalfront_util::UriOpener;
use tokio::task::{JoinHandle, spawn};
use tracing::{debug, info, warn};

use crate::app::App;

/// What kind of URI an [`Cmd::OpenUri`] carries; decides the reply message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriKind {
    Mailto,
    External,
}

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Ask the host to open a URI with its default handler.
    OpenUri { uri: String, kind: UriKind },
    /// Deliver [`Msg::ContactResetDue`] after `delay`.
    ScheduleReset { ticket: ResetTicket, delay: Duration },
}

/// Results of one round of command execution.
#[derive(Debug, Default)]
pub struct CommandBatch {
    /// Outcomes available immediately
    pub immediate: Vec<ExecOutcome>,
    /// Spawned tasks whose outcomes arrive later
    pub pending: Vec<JoinHandle<ExecOutcome>>,
}

/// Convert application [`Effect`]s into [`Cmd`]s.
///
/// Effects the runtime handles itself (toasts, scrolling, quitting) produce
/// no command and are dropped here with a debug line.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    let mut commands = Vec::with_capacity(effects.len());
    for effect in effects {
        match effect {
            Effect::OpenMailto(uri) => commands.push(Cmd::OpenUri {
                uri,
                kind: UriKind::Mailto,
            }),
            Effect::OpenExternal(uri) => commands.push(Cmd::OpenUri {
                uri,
                kind: UriKind::External,
            }),
            Effect::ScheduleContactReset { ticket, delay } => commands.push(Cmd::ScheduleReset { ticket, delay }),
            other => debug!(effect = ?other, "effect has no command"),
        }
    }
    commands
}

/// Translate effects into commands and execute them.
pub fn run_from_effects(app: &App, effects: Vec<Effect>) -> CommandBatch {
    let commands = from_effects(effects);
    run_cmds(Arc::clone(&app.ctx.opener), commands)
}

/// Execute commands against `opener`.
///
/// Opening is synchronous (the launcher is only spawned), so its outcome is
/// immediate. Resets are timers and come back through `pending`.
pub fn run_cmds(opener: Arc<dyn UriOpener>, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::OpenUri { uri, kind } => batch.immediate.push(execute_open(&*opener, &uri, kind)),
            Cmd::ScheduleReset { ticket, delay } => batch.pending.push(schedule_reset(ticket, delay)),
        }
    }
    batch
}

fn execute_open(opener: &dyn UriOpener, uri: &str, kind: UriKind) -> ExecOutcome {
    let result = opener.open(uri).map_err(|error| error.to_string());
    match &result {
        Ok(()) => info!(?kind, "handed URI to host"),
        Err(error) => warn!(?kind, %error, "host could not open URI"),
    }
    let msg = match kind {
        UriKind::Mailto => Msg::MailtoDispatched(result),
        UriKind::External => Msg::ExternalLinkOpened(result),
    };
    ExecOutcome::Message(msg)
}

fn schedule_reset(ticket: ResetTicket, delay: Duration) -> JoinHandle<ExecOutcome> {
    debug!(?ticket, ?delay, "contact reset scheduled");
    spawn(async move {
        tokio::time::sleep(delay).await;
        ExecOutcome::Message(Msg::ContactResetDue(ticket))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitalfront_util::OpenError;

    #[derive(Debug)]
    struct FailingOpener;

    impl UriOpener for FailingOpener {
        fn open(&self, _uri: &str) -> Result<(), OpenError> {
            Err(OpenError::EmptyUri)
        }
    }

    #[test]
    fn local_effects_produce_no_commands() {
        let commands = from_effects(vec![
            Effect::Quit,
            Effect::ScrollToAnchor("#services".into()),
            Effect::OpenExternal("https://wa.me/1".into()),
        ]);
        assert_eq!(
            commands,
            vec![Cmd::OpenUri {
                uri: "https://wa.me/1".into(),
                kind: UriKind::External
            }]
        );
    }

    #[test]
    fn open_failure_becomes_an_error_message() {
        let batch = run_cmds(
            Arc::new(FailingOpener),
            vec![Cmd::OpenUri {
                uri: "mailto:a@b.c".into(),
                kind: UriKind::Mailto,
            }],
        );
        assert!(batch.pending.is_empty());
        assert!(matches!(
            batch.immediate.as_slice(),
            [ExecOutcome::Message(Msg::MailtoDispatched(Err(error)))] if error.contains("empty URI")
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_fires_after_its_delay() {
        let batch = run_cmds(
            Arc::new(FailingOpener),
            vec![Cmd::ScheduleReset {
                ticket: ResetTicket(7),
                delay: Duration::from_secs(3),
            }],
        );
        let start = tokio::time::Instant::now();
        let mut pending = batch.pending;
        let outcome = pending.remove(0).await.expect("reset task");
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert_eq!(outcome, ExecOutcome::Message(Msg::ContactResetDue(ResetTicket(7))));
    }
}
