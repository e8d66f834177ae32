//! jotter: command-line client for the jotter notes API.
//!
//! Every invocation logs in, loads the user's notes, runs one command and
//! prints its outcome. Nothing is persisted between runs.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jotter_client::{ClientConfig, JotterClient, Notice, NotesView};
use jotter_core::{Credentials, Note, NoteDraft, NoteId, TagSet};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(author, version, about = "Keep short tagged notes on a jotter server")]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the notes API (overrides JOTTER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Account username
    #[arg(short, long, env = "JOTTER_USERNAME")]
    username: String,

    /// Account password
    #[arg(short, long, env = "JOTTER_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, active ones unless --archived is given
    List {
        /// Show archived notes instead of active ones
        #[arg(short, long)]
        archived: bool,

        /// Only notes with a tag containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a note
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,

        /// Tag for the note (repeat for up to 3)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Edit a note; omitted fields keep their current value
    Edit {
        id: NoteId,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Replacement tags (repeat for up to 3)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Move a note to the archive, or back to the active notes
    Archive { id: NoteId },

    /// Delete a note
    Delete { id: NoteId },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(Some(notice)) => {
            println!("{}", notice);
            if notice.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// Environment variables:
//   LOG_FORMAT  - "json" or "text" (default: "text")
//   LOG_FILE    - path to log file (optional, logs go to stderr otherwise)
//   LOG_ANSI    - "true"/"false" override ANSI colors
//   RUST_LOG    - standard env filter (default: "jotter=info,jotter_client=info")
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jotter=info,jotter_client=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("jotter.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // stdout is reserved for command output
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    debug!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

/// Returns the notice to print, or `None` when the command printed its own
/// output.
async fn run(cli: Cli) -> anyhow::Result<Option<Notice>> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    let mut client = JotterClient::new(config)?;

    let credentials = Credentials::new(cli.username, cli.password);
    let user = match client.login(&credentials).await {
        Ok(user) => user,
        Err(e) => return Ok(Some(Notice::from_error(&e))),
    };
    info!(
        subsystem = "cli",
        op = "login",
        user_id = user.id,
        "Signed in"
    );

    if let Err(e) = client.notes_mut().load().await {
        return Ok(Some(Notice::from_error(&e)));
    }

    let notice = match cli.command {
        Commands::List { archived, search } => {
            let view = if archived {
                NotesView::Archived
            } else {
                NotesView::Active
            };
            let notes = client
                .notes()
                .search(view, search.as_deref().unwrap_or(""));
            print_notes(view, &notes);
            return Ok(None);
        }
        Commands::Create {
            title,
            content,
            tags,
        } => {
            let result = client
                .notes_mut()
                .create(NoteDraft::new(title, content, tags))
                .await;
            Notice::created(&result)
        }
        Commands::Edit {
            id,
            title,
            content,
            tags,
        } => edit(&mut client, id, title, content, tags).await,
        Commands::Archive { id } => {
            let result = client.notes_mut().toggle_archive(id).await;
            Notice::archived(&result)
        }
        Commands::Delete { id } => {
            let result = client.notes_mut().delete(id).await;
            Notice::deleted(&result)
        }
    };

    Ok(Some(notice))
}

async fn edit(
    client: &mut JotterClient,
    id: NoteId,
    title: Option<String>,
    content: Option<String>,
    tags: Vec<String>,
) -> Notice {
    let Some(current) = client.notes().get(id) else {
        return Notice::from_error(&jotter_core::Error::NoteNotFound(id));
    };

    let tags = if tags.is_empty() {
        TagSet::from_note(current)
    } else {
        match TagSet::try_from(tags) {
            Ok(tags) => tags,
            Err(e) => return Notice::error(e.to_string()),
        }
    };
    let title = title.unwrap_or_else(|| current.title.clone());
    let content = content.unwrap_or_else(|| current.content.clone());

    let result = client.notes_mut().edit(id, title, content, tags).await;
    Notice::updated(&result)
}

fn print_notes(view: NotesView, notes: &[&Note]) {
    if notes.is_empty() {
        println!("No {} notes.", view);
        return;
    }
    for note in notes {
        println!(
            "#{:<5} {}  {:<15}  [{}]",
            note.id,
            note.display_date(),
            note.title,
            note.tags.join(", ")
        );
        println!("       {}", note.content);
    }
}
