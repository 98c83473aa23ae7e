use std::path::PathBuf;

use anyhow::Result;
use autodefine_config::Config;
use clap::{Parser, Subcommand};

pub mod bulk;
pub mod commands;
pub mod enrich;
pub mod logging;
pub mod media;
pub mod render;
pub mod state;
pub mod store;


use self::logging::LogFormat;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "autodefine",
    version,
    about = "Fill Anki notes with Oxford Learner's Dictionaries definitions"
)]
struct Cli {
    /// JSON config file
    #[arg(short = 'c', long = "config", global = true, default_value = "autodefine.json")]
    config: PathBuf,

    #[arg(long = "log-format", global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Define one existing note
    Define {
        note_id: u64,

        /// Use the dictionary's spelling when it differs from the note's word
        #[arg(long = "accept-found-word")]
        accept_found_word: bool,
    },

    /// Create a note for a word and define it
    Add {
        word: String,

        #[arg(short = 'd', long = "deck")]
        deck: Option<String>,
    },

    /// Define many notes, by id and/or search query
    Bulk {
        #[arg(short = 'q', long = "query")]
        query: Option<String>,

        note_ids: Vec<u64>,
    },

    /// Print what a note for the word would contain, without touching Anki
    Preview { word: String },

    /// Create or update the bundled note type
    InstallModel,

    /// Mark a word and its forms in a sentence
    Highlight {
        /// Word or phrase to mark, repeatable
        #[arg(short = 't', long = "target", required = true)]
        targets: Vec<String>,

        sentence: String,

        /// Prepend the not-replaced marker when nothing matched
        #[arg(long = "flag")]
        flag: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.log_format)?;

    let config = Config::load(&cli.config)?;
    let state = AppState::new(config)?;

    match cli.command {
        Command::Define {
            note_id,
            accept_found_word,
        } => commands::handle_define(&state, note_id, accept_found_word).await,
        Command::Add { word, deck } => commands::handle_add(&state, &word, deck.as_deref()).await,
        Command::Bulk { query, note_ids } => {
            commands::handle_bulk(&state, query.as_deref(), &note_ids).await
        }
        Command::Preview { word } => commands::handle_preview(&state, &word).await,
        Command::InstallModel => commands::handle_install_model(&state).await,
        Command::Highlight {
            targets,
            sentence,
            flag,
        } => commands::handle_highlight(&state.config, &targets, &sentence, flag),
    }
}
