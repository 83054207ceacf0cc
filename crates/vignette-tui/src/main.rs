//! Standalone TUI binary for Vignette.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use vignette_core::{DeckError, ScenarioGraph, Session, deck};
use vignette_tui::app::App;

#[derive(Parser)]
#[command(
    name = "vignette",
    about = "Single-screen interactive fiction in the terminal",
    version
)]
struct Args {
    /// Path to a scenario deck (JSON); defaults to the built-in deck
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Write a markdown transcript of the session here on exit
    #[arg(long)]
    transcript: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let graph = match load_graph(args.deck.as_deref()) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("error: {e}");
            if let DeckError::Integrity(graph_err) = &e {
                for violation in graph_err.violations() {
                    eprintln!("  {violation}");
                }
            }
            process::exit(1);
        }
    };

    let mut app = App::new(Session::new(graph));

    if let Err(e) = vignette_tui::terminal::run(&mut app) {
        eprintln!("error: {e}");
        process::exit(1);
    }

    if let Some(path) = &args.transcript {
        let markdown = app.session.transcript().export_markdown();
        if let Err(e) = std::fs::write(path, markdown) {
            eprintln!("error: failed to write transcript: {e}");
            process::exit(1);
        }
        println!("Transcript written to {}", path.display());
    }
}

/// Load the graph from a deck file, or fall back to the built-in deck.
fn load_graph(path: Option<&Path>) -> Result<ScenarioGraph, DeckError> {
    match path {
        Some(path) => deck::load_path(path),
        None => Ok(deck::know_your_rights()),
    }
}
