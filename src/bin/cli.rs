//! Terminal front-end for draftpad.
//!
//! Thin presentation over the client library: pick a document from the
//! manifest, edit it in $EDITOR, search/replace, save back with a commit
//! message. All session state lives in the sync controller.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use inquire::{Confirm, Editor, Select, Text};
use nu_ansi_term::Color;
use tracing::Level;

use draftpad::client::api::ApiClient;
use draftpad::client::cache::CacheStore;
use draftpad::client::controller::{SaveOutcome, SelectOutcome, SessionState, SyncController};
use draftpad::editor;
use draftpad::models::RepoConfig;

const ABOUT: &str =
    "draftpad is a terminal client for editing documents hosted in a GitHub repository.";

const ACTION_EDIT: &str = "Edit";
const ACTION_SEARCH_REPLACE: &str = "Search & replace";
const ACTION_SAVE: &str = "Save";
const ACTION_OPEN: &str = "Open a document";
const ACTION_REFRESH: &str = "Refresh manifest";
const ACTION_QUIT: &str = "Quit";

/// The CLI application for draftpad.
#[derive(Parser, Debug)]
#[command(about = ABOUT, version)]
struct Cli {
    /// Base URL of the deployed draftpad site
    #[arg(long, env = "DRAFTPAD_URL", default_value = "http://127.0.0.1:8080")]
    url: String,
    /// Platform session cookie forwarded with every request
    #[arg(long, env = "DRAFTPAD_SESSION_COOKIE", hide_env_values = true)]
    cookie: Option<String>,
    /// Cache directory (defaults to ~/.draftpad)
    #[arg(long, env = "DRAFTPAD_CACHE_DIR")]
    cache_dir: Option<PathBuf>,
    /// Verbosity level (0-4)
    #[arg(short, action = ArgAction::Count)]
    v: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.v)?;

    let api = ApiClient::new(&cli.url, cli.cookie.as_deref())
        .map_err(|err| anyhow!("building API client: {err}"))?;

    let principal = api.session().await.context("querying session info")?;
    let Some(principal) = principal.filter(|principal| principal.is_authenticated()) else {
        return Err(anyhow!(
            "Not signed in. Log in to {} in a browser and pass the session cookie with --cookie.",
            cli.url
        ));
    };
    println!(
        "Signed in as {} via {}",
        Color::Green.paint(principal.user_details.as_str()),
        principal.identity_provider
    );

    let cache_dir = cli
        .cache_dir
        .or_else(|| home::home_dir().map(|dir| dir.join(".draftpad")))
        .ok_or_else(|| anyhow!("Could not determine a cache directory."))?;

    let mut controller = SyncController::new(api, CacheStore::new(cache_dir));

    let mut config = controller
        .config()
        .await
        .context("loading repository config")?;
    println!(
        "Repository {}/{} ({}): {} document(s)",
        config.owner,
        config.repo,
        config.branch,
        config.documents.len()
    );

    // Reopen the last document when the manifest still lists it.
    if let Some(last) = controller.restore_last_opened(&config) {
        open_document(&mut controller, &last, false).await;
    }

    loop {
        print_status(&controller);

        let actions = if controller.state() == SessionState::Loaded {
            vec![
                ACTION_EDIT,
                ACTION_SEARCH_REPLACE,
                ACTION_SAVE,
                ACTION_OPEN,
                ACTION_REFRESH,
                ACTION_QUIT,
            ]
        } else {
            vec![ACTION_OPEN, ACTION_REFRESH, ACTION_QUIT]
        };

        match Select::new("Action:", actions).prompt()? {
            ACTION_EDIT => edit_document(&mut controller)?,
            ACTION_SEARCH_REPLACE => search_replace(&mut controller)?,
            ACTION_SAVE => save_document(&mut controller).await?,
            ACTION_OPEN => {
                let Some(path) = pick_document(&config)? else {
                    continue;
                };
                let discard_changes = if controller.is_dirty() {
                    Confirm::new("Discard unsaved changes?")
                        .with_default(false)
                        .prompt()?
                } else {
                    false
                };
                open_document(&mut controller, &path, discard_changes).await;
            }
            ACTION_REFRESH => match controller.refresh_config().await {
                Ok(fresh) => {
                    println!("Manifest refreshed: {} document(s)", fresh.documents.len());
                    config = fresh;
                }
                Err(err) => print_error(&err.to_string()),
            },
            ACTION_QUIT => {
                if controller.is_dirty()
                    && !Confirm::new("Discard unsaved changes?")
                        .with_default(false)
                        .prompt()?
                {
                    continue;
                }
                break;
            }
            _ => unreachable!("unknown action"),
        }
    }

    Ok(())
}

/// Offer the manifest's documents and return the chosen path.
fn pick_document(config: &RepoConfig) -> Result<Option<String>> {
    if config.documents.is_empty() {
        println!("The manifest lists no documents.");
        return Ok(None);
    }

    let labels: Vec<String> = config
        .documents
        .iter()
        .map(|document| {
            if document.description.is_empty() {
                document.label().to_string()
            } else {
                format!("{} ({})", document.label(), document.description)
            }
        })
        .collect();

    let picked = Select::new("Document:", labels.clone()).prompt()?;
    let index = labels
        .iter()
        .position(|label| *label == picked)
        .ok_or_else(|| anyhow!("selection disappeared from the manifest"))?;

    Ok(Some(config.documents[index].path.clone()))
}

async fn open_document(controller: &mut SyncController, path: &str, discard_changes: bool) {
    match controller.select_document(path, discard_changes).await {
        SelectOutcome::Loaded => println!("Opened {}", path),
        SelectOutcome::Declined => println!("Keeping your changes."),
        SelectOutcome::Failed => {
            if let Some(err) = controller.take_error() {
                print_error(&err);
            }
        }
    }
}

/// Round-trip the working copy through $EDITOR.
fn edit_document(controller: &mut SyncController) -> Result<()> {
    let extension = controller
        .selected_path()
        .and_then(|path| std::path::Path::new(path).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| ".txt".to_string());

    let edited = Editor::new("Edit document")
        .with_predefined_text(controller.content())
        .with_file_extension(&extension)
        .prompt()?;

    controller.set_content(edited);
    Ok(())
}

fn search_replace(controller: &mut SyncController) -> Result<()> {
    let search = Text::new("Search for:").prompt()?;
    if search.is_empty() {
        println!("Nothing to search for.");
        return Ok(());
    }
    let replacement = Text::new("Replace with:").prompt()?;

    let occurrences = controller.content().matches(&search).count();
    if occurrences == 0 {
        println!("No matches.");
        return Ok(());
    }

    let all = Confirm::new(&format!("Replace all {} occurrence(s)?", occurrences))
        .with_default(true)
        .prompt()?;

    if all {
        controller.replace_all(&search, &replacement);
        println!("Replaced {} occurrence(s).", occurrences);
    } else {
        controller.replace_once(&search, &replacement);
        println!("Replaced the first occurrence.");
    }
    Ok(())
}

async fn save_document(controller: &mut SyncController) -> Result<()> {
    let path = controller.selected_path().unwrap_or_default().to_string();
    let default_message = format!("Update {}", path);
    let message = Text::new("Commit message:")
        .with_default(&default_message)
        .prompt()?;

    match controller.save(&message).await {
        Ok(SaveOutcome::Saved) => println!(
            "{} New revision {}",
            Color::Green.paint("Saved."),
            controller.sha()
        ),
        Ok(SaveOutcome::Clean) => println!("No changes to save."),
        Ok(SaveOutcome::NotLoaded) => println!("No document loaded."),
        Err(_) => {
            if let Some(err) = controller.take_error() {
                print_error(&err);
            }
        }
    }
    Ok(())
}

fn print_status(controller: &SyncController) {
    match controller.selected_path() {
        Some(path) => {
            let marker = if controller.is_dirty() {
                " (modified)"
            } else {
                ""
            };
            println!(
                "\n{}{} | Lines: {} | Characters: {}",
                Color::Cyan.paint(path),
                marker,
                editor::line_count(controller.content()),
                editor::char_count(controller.content())
            );
        }
        None => println!("\nNo document loaded"),
    }
}

fn print_error(message: &str) {
    eprintln!("{} {}", Color::Red.paint("Error:"), message);
}

/// Initializes the tracing subscriber from the `-v` count.
fn init_tracing(verbosity: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(match verbosity {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|err| anyhow!(err))?;

    Ok(())
}
