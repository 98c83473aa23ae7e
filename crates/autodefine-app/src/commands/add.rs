use autodefine_anki::{NoteType, add_word_note, install_model};

use crate::commands::define::define_and_save;
use crate::state::AppState;

pub async fn handle_add(state: &AppState, word: &str, deck: Option<&str>) -> anyhow::Result<()> {
    let config = &state.config;
    state.anki.check_connection().await?;

    if config.anki.use_default_template {
        install_model(&state.anki, &NoteType::autodefine(config)).await?;
    }

    let deck = deck.unwrap_or(&config.anki.deck);
    let id = add_word_note(&state.anki, config, deck, word).await?;
    println!("Added note {id}");

    let mut note = state.anki.note(id).await?;
    define_and_save(state, &mut note, false).await
}
