/// Playlist Manager - command-line client for the playlist collection service
mod args;
mod config;

use crate::args::SongArg;
use crate::config::AppConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use playlist_client::PlaylistClient;
use playlist_core::{DraftError, SongField};
use playlist_store::{ConfirmationGate, LookupState, Notice, PlaylistStore};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "playlist-manager")]
#[command(about = "Manage playlists on a remote collection service", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the service (overrides the configuration)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all playlists
    List,
    /// Show one playlist by name
    Show {
        /// Playlist name
        name: String,
    },
    /// Create a new playlist
    Create {
        /// Playlist name
        #[arg(short, long)]
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
        /// Song as "title|artist|album|year|genre" (repeatable)
        #[arg(short, long = "song")]
        songs: Vec<SongArg>,
    },
    /// Delete a playlist by name
    Delete {
        /// Playlist name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Asks on stderr and reads the answer from stdin
struct StdinPrompt;

impl ConfirmationGate for StdinPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "playlist_manager=info,playlist_store=info,playlist_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
    }
    config.validate()?;

    tracing::debug!(
        base_url = %config.server.base_url,
        username = %config.auth.username,
        "Configuration loaded"
    );

    let client = PlaylistClient::new(config.to_client_config())
        .context("Failed to set up the service client")?;
    let store = PlaylistStore::new(client);

    let ok = match cli.command {
        Commands::List => list(&store).await,
        Commands::Show { name } => show(&store, &name).await?,
        Commands::Create {
            name,
            description,
            songs,
        } => create(&store, name, description, songs).await?,
        Commands::Delete { name, yes } => {
            let notice = if yes {
                store.delete(name, &|_: &str| true).await
            } else {
                store.delete(name, &StdinPrompt).await
            };
            report(&notice)
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn list(store: &PlaylistStore<PlaylistClient>) -> bool {
    let outcome = store.initialize().await;
    if let Some(notice) = outcome.notice() {
        return report(&notice);
    }

    let playlists = store.playlists().await;
    if playlists.is_empty() {
        println!("No playlists yet.");
        return true;
    }

    for playlist in &playlists {
        match playlist.description_text() {
            "" => println!("{}", playlist.name),
            description => println!("{} - {}", playlist.name, description),
        }
    }
    true
}

async fn show(store: &PlaylistStore<PlaylistClient>, name: &str) -> anyhow::Result<bool> {
    let state = store.lookup(name).await;
    let line = lookup_line(&state)?;
    line.print();
    Ok(matches!(line, Line::Out(_)))
}

async fn create(
    store: &PlaylistStore<PlaylistClient>,
    name: String,
    description: Option<String>,
    songs: Vec<SongArg>,
) -> anyhow::Result<bool> {
    store
        .edit_draft(|draft| {
            draft.set_name(name);
            draft.set_description(description.unwrap_or_default());
            for SongArg(song) in songs {
                let index = draft.append_song();
                for field in SongField::ALL {
                    draft.set_song_field(index, field, song.field(field))?;
                }
            }
            Ok::<(), DraftError>(())
        })
        .await?;

    let notice = store.create().await;
    Ok(report(&notice))
}

/// One line of output, tagged with the stream it belongs on
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Out(String),
    Err(String),
}

impl Line {
    fn print(&self) {
        match self {
            Line::Out(text) => println!("{}", text),
            Line::Err(text) => eprintln!("{}", text),
        }
    }
}

/// A found playlist as pretty JSON on stdout, otherwise the state on stderr
fn lookup_line(state: &LookupState) -> serde_json::Result<Line> {
    Ok(match state.playlist() {
        Some(playlist) => Line::Out(serde_json::to_string_pretty(playlist)?),
        None => Line::Err(state.to_string()),
    })
}

/// Failures go to stderr. A mutation that went through but left the list
/// stale is still a success; its refresh alert follows on stderr.
fn notice_lines(notice: &Notice) -> Vec<Line> {
    if notice.is_failure() {
        return vec![Line::Err(notice.to_string())];
    }

    let mut lines = vec![Line::Out(notice.to_string())];
    if let Some(alert) = notice.refresh_alert() {
        lines.push(Line::Err(alert.to_string()));
    }
    lines
}

/// Print a notice; returns false for failures
fn report(notice: &Notice) -> bool {
    for line in notice_lines(notice) {
        line.print();
    }
    !notice.is_failure()
}
