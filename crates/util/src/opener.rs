//! Hands URIs (`mailto:`, `https:`) to the host's default handler.
//!
//! Opening is fire-and-forget: the launcher process is spawned and reaped by a
//! tokio task, so callers only learn whether the launch itself failed.
//! [`SystemOpener`] must therefore be used from within a tokio runtime.

use std::env;
use std::fmt::Debug;
use std::process::Stdio;

use tokio::process::Command;
use tokio::runtime::Handle;

use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable naming a custom launcher (for example `firefox` or a test script).
pub const OPENER_ENV: &str = "DIGITALFRONT_OPENER";

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("refusing to open an empty URI")]
    EmptyUri,
    #[error("no async runtime available to supervise the launcher")]
    NoRuntime,
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can ask the host environment to open a URI.
pub trait UriOpener: Send + Sync + Debug {
    fn open(&self, uri: &str) -> Result<(), OpenError>;
}

/// Opens URIs with the platform launcher (`open`, `xdg-open`, `FileProtocolHandler`).
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    program_override: Option<String>,
}

impl SystemOpener {
    /// Honors [`OPENER_ENV`] when set and non-empty.
    pub fn from_environment() -> Self {
        let program_override = env::var(OPENER_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { program_override }
    }

    fn command_for(&self, uri: &str) -> Command {
        if let Some(program) = &self.program_override {
            let mut command = Command::new(program);
            command.arg(uri);
            return command;
        }
        platform_command(uri)
    }
}

#[cfg(target_os = "macos")]
fn platform_command(uri: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(uri);
    command
}

#[cfg(target_os = "windows")]
fn platform_command(uri: &str) -> Command {
    // `start` would re-parse `&` in the query string; the protocol handler takes it verbatim.
    let mut command = Command::new("rundll32");
    command.arg("url.dll,FileProtocolHandler").arg(uri);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(uri: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(uri);
    command
}

impl UriOpener for SystemOpener {
    fn open(&self, uri: &str) -> Result<(), OpenError> {
        if uri.trim().is_empty() {
            return Err(OpenError::EmptyUri);
        }
        let runtime = Handle::try_current().map_err(|_| OpenError::NoRuntime)?;
        let mut command = self.command_for(uri);
        let program = command.as_std().get_program().to_string_lossy().into_owned();
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| OpenError::Spawn {
                program: program.clone(),
                source,
            })?;
        debug!(program = %program, pid = child.id(), "launched URI handler");
        runtime.spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => warn!(%status, "URI handler exited with failure"),
                Ok(_) => {}
                Err(error) => warn!(%error, "failed to wait for URI handler"),
            }
        });
        Ok(())
    }
}
