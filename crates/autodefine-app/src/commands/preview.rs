use autodefine_anki::NoteType;
use autodefine_core::{MemoryNote, insert_into_field};

use crate::enrich::Mode;
use crate::media::DiscardMedia;
use crate::state::AppState;

/// Run the pipeline on a throwaway note and print its fields.
pub async fn handle_preview(state: &AppState, word: &str) -> anyhow::Result<()> {
    let config = &state.config;
    let mut note = MemoryNote::with_fields(config.max_field_index() + 1);
    insert_into_field(&mut note, word, config.word.source_field, true)?;

    let media = DiscardMedia;
    let result = state
        .pipeline(&media)
        .define_note(&mut note, Mode::Single { accept_found_word: true })
        .await;

    let names = NoteType::autodefine(config).fields;
    for (name, value) in names.iter().zip(&note.fields) {
        println!("== {name}\n{value}\n");
    }
    println!("== Tags\n{}", note.tags.join(" "));

    if let Some(link) = result? {
        println!("\nImage search: {link}");
    }
    Ok(())
}
