use anyhow::Context;
use autodefine_anki::AnkiNote;

use crate::enrich::Mode;
use crate::state::AppState;

pub async fn handle_define(
    state: &AppState,
    note_id: u64,
    accept_found_word: bool,
) -> anyhow::Result<()> {
    let mut note = state.anki.note(note_id).await?;
    define_and_save(state, &mut note, accept_found_word).await
}

/// Define a single note, save it, then report the outcome.
pub(crate) async fn define_and_save(
    state: &AppState,
    note: &mut AnkiNote,
    accept_found_word: bool,
) -> anyhow::Result<()> {
    let media = state.anki_media();
    let result = state
        .pipeline(&media)
        .define_note(note, Mode::Single { accept_found_word })
        .await;

    state
        .anki
        .save_note(note)
        .await
        .with_context(|| format!("Failed to save note {}", note.id))?;

    let link = result.with_context(|| format!("Note {} was not defined", note.id))?;
    if let Some(link) = link {
        println!("Image search: {link}");
    }

    Ok(())
}
