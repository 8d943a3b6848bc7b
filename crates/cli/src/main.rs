use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use digitalfront_types::ThemeFlag;
use digitalfront_util::{ContactMessage, MailtoLink, SiteConfig, SystemOpener, UriOpener};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding where the TUI writes its log file.
const LOG_PATH_ENV: &str = "DIGITALFRONT_LOG_PATH";

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let interactive = matches.subcommand_name().is_none();
    init_tracing(interactive);

    let config = load_config(&matches)?;

    // No subcommands => TUI
    match matches.subcommand() {
        None => {
            let opener: Arc<dyn UriOpener> = Arc::new(SystemOpener::from_environment());
            digitalfront_tui::run(config, opener).await
        }
        Some(("mailto", sub)) => run_mailto(&config, sub),
        Some(("config", _)) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Some((other, _)) => anyhow::bail!("unknown subcommand: {}", other),
    }
}

fn build_cli() -> Command {
    Command::new("digitalfront")
        .about("The Digital Front agency site, in your terminal")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to a site config JSON file"),
        )
        .arg(
            Arg::new("light")
                .long("light")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Use the light theme"),
        )
        .subcommand(
            Command::new("mailto")
                .about("Print the mailto: link the contact form would open")
                .arg(Arg::new("name").long("name").required(true).action(ArgAction::Set))
                .arg(Arg::new("email").long("email").required(true).action(ArgAction::Set))
                .arg(Arg::new("company").long("company").action(ArgAction::Set))
                .arg(Arg::new("message").long("message").required(true).action(ArgAction::Set))
                .arg(
                    Arg::new("open")
                        .long("open")
                        .action(ArgAction::SetTrue)
                        .help("Also hand the link to the default mail client"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective site configuration as JSON"))
}

fn load_config(matches: &ArgMatches) -> Result<SiteConfig> {
    let explicit = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let mut config = SiteConfig::load(explicit).context("failed to load site configuration")?;
    if matches.get_flag("light") {
        config.theme = ThemeFlag::Light;
    }
    Ok(config)
}

fn run_mailto(config: &SiteConfig, m: &ArgMatches) -> Result<()> {
    let value = |key: &str| m.get_one::<String>(key).cloned().unwrap_or_default();
    let message = ContactMessage {
        name: value("name"),
        email: value("email"),
        company: value("company"),
        message: value("message"),
    };
    message.validate().context("invalid contact message")?;
    let link = MailtoLink::compose(&config.contact.email, &message).context("failed to compose mailto link")?;
    println!("{}", link.uri);

    if m.get_flag("open") {
        SystemOpener::from_environment()
            .open(&link.uri)
            .context("failed to open the mail client")?;
        tracing::info!(address = %link.address, "mail client opened");
    }
    Ok(())
}

/// Interactive runs log to a file so the terminal stays clean; everything
/// else logs to stderr.
fn init_tracing(interactive: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if !interactive {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    }

    let path = tui_log_path();
    let file = path
        .parent()
        .map(fs::create_dir_all)
        .transpose()
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
    match file {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        // Without a log file the TUI runs silently rather than writing over the screen.
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .try_init();
        }
    }
}

fn tui_log_path() -> PathBuf {
    if let Ok(path) = std::env::var(LOG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return digitalfront_util::expand_tilde(&path);
    }
    dirs_next::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("digitalfront")
        .join("tui.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailto_matches(args: &[&str]) -> ArgMatches {
        let argv = ["digitalfront", "mailto"].into_iter().chain(args.iter().copied());
        let matches = build_cli().try_get_matches_from(argv).expect("parse");
        let Some(("mailto", sub)) = matches.subcommand() else {
            panic!("expected the mailto subcommand");
        };
        sub.clone()
    }

    #[test]
    fn mailto_rejects_blank_name() {
        let sub = mailto_matches(&["--name", " ", "--email", "ada@example.com", "--message", "hi"]);
        let err = run_mailto(&SiteConfig::default(), &sub).unwrap_err();
        assert_eq!(err.to_string(), "invalid contact message");
        assert!(format!("{err:#}").contains("Name is required"), "{err:#}");
    }

    #[test]
    fn mailto_rejects_malformed_email() {
        let sub = mailto_matches(&["--name", "Ada", "--email", "ada@", "--message", "hi"]);
        let err = run_mailto(&SiteConfig::default(), &sub).unwrap_err();
        assert!(format!("{err:#}").contains("not a valid email address"), "{err:#}");
    }

    #[test]
    fn mailto_accepts_complete_message() {
        let sub = mailto_matches(&["--name", "Ada", "--email", "ada@example.com", "--message", "hi"]);
        run_mailto(&SiteConfig::default(), &sub).expect("valid message");
    }
}
