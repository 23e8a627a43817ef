use clap::{Parser, Subcommand};
use kiosk_canvas::render;
use tracing_subscriber::EnvFilter;

use kiosk_editor::config::{ConfigError, EditorConfig};
use kiosk_editor::services::editor::{EditorSession, Outcome};
use kiosk_editor::services::persistence::PersistenceError;
use kiosk_editor::store::{self, StoreError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Persistence(#[from] PersistenceError),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Parser, Debug)]
#[command(name = "kiosk", about = "Kiosk canvas layout editor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the grid, the palette and any disabled widgets.
    Show,
    /// List the widgets waiting in the palette.
    Palette,
    /// Place a widget with its top-left at (row, col), or at the first free slot.
    Place {
        id: String,
        #[arg(requires = "col")]
        row: Option<u32>,
        col: Option<u32>,
    },
    /// Change a placed widget's span, keeping its top-left cell.
    Resize { id: String, rows: u32, cols: u32 },
    /// Return a widget to the palette.
    Remove { id: String },
    /// Change the grid size, evicting widgets that no longer fit.
    Grid { rows: u32, cols: u32 },
    /// Let a widget be placed and shown again.
    Enable { id: String },
    /// Hide a widget from the canvas and the palette, keeping its position.
    Disable { id: String },
    /// Return every widget to the palette.
    Reset,
    /// Save the current layout as-is.
    Save,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env()?;
    let store = store::open(&config.store)?;
    let mut session = EditorSession::open(store).await?;

    let outcome = match cli.command {
        Command::Show => {
            print_canvas(&session);
            return Ok(());
        }
        Command::Palette => {
            print_palette(&session);
            return Ok(());
        }
        Command::Save => {
            session.save_now().await?;
            println!("Layout saved");
            return Ok(());
        }
        Command::Place { id, row: Some(row), col: Some(col) } => session.place(&id, row, col).await,
        Command::Place { id, .. } => session.place_anywhere(&id).await,
        Command::Resize { id, rows, cols } => session.resize(&id, rows, cols).await,
        Command::Remove { id } => session.remove(&id).await,
        Command::Grid { rows, cols } => session.set_grid_size(rows, cols).await,
        Command::Enable { id } => session.set_enabled(&id, true).await,
        Command::Disable { id } => session.set_enabled(&id, false).await,
        Command::Reset => session.reset().await,
    };

    finish(&session, outcome).await
}

async fn finish(session: &EditorSession, outcome: Outcome) -> Result<(), CliError> {
    if outcome.notice.is_error() {
        return Err(CliError::Rejected(outcome.notice.message));
    }
    if outcome.action.changes_layout() {
        session.save_now().await?;
    }
    print_canvas(session);
    println!("{}", outcome.notice.message);
    Ok(())
}

fn print_canvas(session: &EditorSession) {
    let engine = session.engine();
    let dims = engine.grid_size();
    println!("Grid {}x{}", dims.rows, dims.cols);
    print!("{}", render::to_text(&engine.occupancy()));
    print_palette(session);

    let disabled: Vec<&str> = engine
        .registry
        .widgets()
        .iter()
        .filter(|w| !w.enabled)
        .map(|w| w.id.as_str())
        .collect();
    if !disabled.is_empty() {
        println!("Disabled: {}", disabled.join(", "));
    }
}

fn print_palette(session: &EditorSession) {
    let palette = session.engine().palette();
    if palette.is_empty() {
        println!("Palette: (empty)");
        return;
    }
    println!("Palette:");
    for widget in palette {
        let span = widget.span();
        println!("  {:<16} {:<24} {}x{}", widget.id, widget.name, span.rows, span.cols);
    }
}
