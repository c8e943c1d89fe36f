//! modbrand CLI
//!
//! Terminal dashboard for Mod Developer Branding submissions.
//! Provides both TUI (ratatui) and headless modes.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use modbrand_cli::app::Route;
use modbrand_cli::headless;
use modbrand_cli::tui::{self, TuiOptions};
use modbrand_client::{BrandClient, BrandClientConfig};
use modbrand_core::config::{load_config, log_file_path, store_session};
use modbrand_core::tracing_init::{init_tracing, init_tracing_to_file};
use modbrand_core::Config;

#[derive(Parser, Debug)]
#[command(name = "modbrand")]
#[command(version, about = "Mod Developer Branding dashboard", long_about = None)]
struct Cli {
    /// Branding service URL (overrides config and `MODBRAND_URL`)
    #[arg(long)]
    url: Option<String>,

    /// `session_id` cookie to send (overrides config and `MODBRAND_SESSION`)
    #[arg(long)]
    session: Option<String>,

    /// Config file to use instead of the global one
    #[arg(long, env = "MODBRAND_CONFIG")]
    config: Option<PathBuf>,

    /// Route the TUI starts at
    #[arg(long, default_value = "/")]
    route: String,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show the signed-in user and role
    Whoami,
    /// List your brand images
    List,
    /// Submit an image file for review
    Submit { path: PathBuf },
    /// List images awaiting review (staff/admin)
    Pending,
    /// Accept a pending image (staff/admin)
    Accept { id: String },
    /// Reject (delete) a pending image (staff/admin)
    Reject { id: String },
    /// Mark a user verified (admin)
    Verify { user: String },
    /// Delete one of your images
    Delete { id: String },
    /// Check the service is reachable
    Ping,
    /// Store the `session_id` cookie obtained from the browser sign-in
    Login {
        #[arg(long)]
        session: String,
    },
    /// End the session and forget the stored cookie
    Logout,
}

impl Cli {
    /// Defaults, then the config file, then the environment, then flags.
    fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = load_config(self.config.as_deref())?;
        self.apply_to(&mut config);
        Ok(config)
    }

    /// Flags win over file and environment.
    fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.base_url.clone_from(url);
        }
        if let Some(session) = &self.session {
            config.session_cookie = Some(session.clone());
        }
        if self.log_json {
            config.log_json = true;
        }
    }
}

fn client(config: &Config) -> anyhow::Result<Arc<BrandClient>> {
    Ok(Arc::new(BrandClient::new(&BrandClientConfig::from(config))?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    let Some(command) = cli.command else {
        // Log to a file so the alternate screen stays clean
        if let Some(path) = log_file_path() {
            init_tracing_to_file("modbrand=info", config.log_json, &path)?;
        }
        info!(version = env!("CARGO_PKG_VERSION"), url = %config.base_url, "Starting modbrand TUI");
        let options = TuiOptions {
            start: Route::from_path(&cli.route),
            login_url: format!("{}/login", config.base_url.trim_end_matches('/')),
            notice_ttl: Duration::from_secs(config.notice_ttl_secs),
        };
        return tui::run(client(&config)?, options).await;
    };

    init_tracing("modbrand=info", config.log_json);
    info!(version = env!("CARGO_PKG_VERSION"), url = %config.base_url, "Starting modbrand");

    let mut out = io::stdout().lock();
    match command {
        Command::Whoami => headless::whoami(&*client(&config)?, &mut out).await?,
        Command::List => headless::list(&*client(&config)?, &mut out).await?,
        Command::Submit { path } => {
            headless::submit(&*client(&config)?, &path, &mut out).await?;
        }
        Command::Pending => headless::pending(&*client(&config)?, &mut out).await?,
        Command::Accept { id } => {
            headless::accept(&*client(&config)?, &id, &mut out).await?;
        }
        Command::Reject { id } => {
            headless::reject(&*client(&config)?, &id, &mut out).await?;
        }
        Command::Verify { user } => {
            headless::verify(&*client(&config)?, &user, &mut out).await?;
        }
        Command::Delete { id } => {
            headless::delete(&*client(&config)?, &id, &mut out).await?;
        }
        Command::Ping => headless::ping(&*client(&config)?, &mut out).await?,
        Command::Login { session } => {
            let candidate = Config {
                session_cookie: Some(session.clone()),
                ..config
            };
            let api = client(&candidate)?;
            headless::login(&*api, cli.config.as_deref(), &session, &mut out).await?;
        }
        Command::Logout => {
            if config.session_cookie.is_some() {
                let api = client(&config)?;
                if let Err(e) = headless::logout(&*api).await {
                    warn!(error = %e, "Server-side logout failed; clearing local session anyway");
                }
            }
            store_session(cli.config.as_deref(), None)?;
            writeln!(out, "Logged out.")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use modbrand_core::config::load_file_layer;

    use super::*;

    #[test]
    fn defaults_to_tui_at_landing() {
        let cli = Cli::try_parse_from(["modbrand"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(Route::from_path(&cli.route), Route::Landing);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["modbrand", "accept", "42"]).unwrap();
        assert_eq!(cli.command, Some(Command::Accept { id: "42".into() }));

        let cli = Cli::try_parse_from(["modbrand", "login", "--session", "abc"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Login {
                session: "abc".into()
            })
        );
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "modbrand",
            "--url",
            "https://brand.example.org",
            "--session",
            "s3cr3t",
            "--log-json",
            "ping",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.base_url, "https://brand.example.org");
        assert_eq!(config.session_cookie.as_deref(), Some("s3cr3t"));
        assert!(config.log_json);
    }

    #[test]
    fn parses_review_commands() {
        let cli = Cli::try_parse_from(["modbrand", "reject", "42"]).unwrap();
        assert_eq!(cli.command, Some(Command::Reject { id: "42".into() }));

        let cli = Cli::try_parse_from(["modbrand", "verify", "583231"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Verify {
                user: "583231".into()
            })
        );
    }

    #[test]
    fn stored_cookie_leaves_flags_out_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let path_arg = path.display().to_string();
        let cli = Cli::try_parse_from([
            "modbrand",
            "--url",
            "http://127.0.0.1:9",
            "--config",
            &path_arg,
            "login",
            "--session",
            "abc",
        ])
        .unwrap();
        assert_eq!(cli.resolve().unwrap().base_url, "http://127.0.0.1:9");

        store_session(cli.config.as_deref(), Some("abc")).unwrap();
        let reloaded = load_file_layer(Some(&path)).unwrap();
        assert_eq!(reloaded.session_cookie.as_deref(), Some("abc"));
        assert_eq!(reloaded.base_url, Config::default().base_url);
    }
}
