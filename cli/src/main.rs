//! Command-line client for the catering auth API.
//!
//! Drives the same `session` auth client the dashboard uses, with the session
//! persisted to a JSON file instead of `localStorage`.

mod file_store;
mod http;


use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use protocol::UserProfile;
use session::auth::{AuthClient, AuthError};
use session::shell::{AppShell, ShellState};
use tracing_subscriber::EnvFilter;

use crate::file_store::FileStore;
use crate::http::ReqwestAuthApi;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("http client failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("not signed in; run `login` first")]
    NotSignedIn,
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
}

#[derive(Parser, Debug)]
#[command(name = "catering-cli", about = "Catering dashboard auth CLI")]
struct Cli {
    #[arg(long, env = "CATERING_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// File holding the persisted session and cookie.
    #[arg(long, env = "CATERING_STATE_FILE", default_value = ".catering-session.json")]
    state_file: PathBuf,

    #[arg(long, env = "CATERING_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CATERING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the session.
    Logout,
    /// Confirm the persisted session with the server.
    Status,
    /// Show the cached user without contacting the server.
    Whoami,
    /// Fetch the full profile from the server.
    Profile,
    UpdateProfile {
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
    },
    ChangePassword {
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        new_password: String,
    },
}

type CliAuth = AuthClient<ReqwestAuthApi<FileStore>, Arc<FileStore>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = Arc::new(FileStore::new(&cli.state_file));
    tracing::debug!(path = %store.path().display(), "using state file");

    let timeout = Duration::from_secs(cli.timeout_secs);
    let api = ReqwestAuthApi::new(&cli.base_url, timeout, store.clone())?;
    let ctx = CliContext { base_url: cli.base_url, timeout, auth: Arc::new(AuthClient::new(api, store)) };
    run(&ctx, cli.command).await
}

struct CliContext {
    base_url: String,
    timeout: Duration,
    auth: Arc<CliAuth>,
}

async fn run(ctx: &CliContext, command: Command) -> Result<(), CliError> {
    let auth = &ctx.auth;
    let mut shell = AppShell::new(auth.clone());
    match command {
        Command::Ping => run_ping(ctx).await,
        Command::Login { username, password } => {
            shell.login(&username, &password).await?;
            match auth.current_user() {
                Some(user) => println!("Signed in as {}", describe_user(&user)),
                None => println!("Signed in"),
            }
            Ok(())
        }
        Command::Logout => {
            shell.logout().await;
            println!("Signed out");
            Ok(())
        }
        Command::Status => {
            let state = shell.init().await;
            println!("{}", status_line(state, auth.current_user().as_ref()));
            Ok(())
        }
        Command::Whoami => {
            let user = auth.current_user().ok_or(CliError::NotSignedIn)?;
            println!("{}", describe_user(&user));
            if auth.is_admin() {
                println!("administrator");
            }
            Ok(())
        }
        Command::Profile => {
            let result = auth.get_profile().await?;
            println!("{}", serde_json::to_string_pretty(&result.user)?);
            Ok(())
        }
        Command::UpdateProfile { email, full_name } => {
            let result = auth.update_profile(&email, &full_name).await?;
            println!("{}", result.message.as_deref().unwrap_or("Profile updated"));
            Ok(())
        }
        Command::ChangePassword { old_password, new_password } => {
            let result = auth.change_password(&old_password, &new_password).await?;
            println!("{}", result.message.as_deref().unwrap_or("Password changed"));
            Ok(())
        }
    }
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::builder().timeout(ctx.timeout).build()?;
    let url = format!("{}/healthz", ctx.base_url.trim_end_matches('/'));
    let status = client.get(url).send().await?.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

fn describe_user(user: &UserProfile) -> String {
    let name = if user.full_name.trim().is_empty() { &user.username } else { &user.full_name };
    format!("{name} <{}> [{}] ({})", user.username, user.role, user.email)
}

fn status_line(state: ShellState, user: Option<&UserProfile>) -> String {
    match (state, user) {
        (ShellState::Authenticated, Some(user)) => format!("Authenticated as {}", describe_user(user)),
        (ShellState::Authenticated, None) => "Authenticated".to_owned(),
        (ShellState::Unauthenticated | ShellState::Loading, _) => "Not signed in".to_owned(),
    }
}
