mod client;
mod note;
mod template;

pub use client::AnkiConnectClient;
pub use note::{AnkiNote, FieldInfo, NoteInfo};
pub use template::{CardTemplate, Installed, NoteType, install_model};

use anyhow::Result;
use autodefine_config::Config;
use serde_json::{Map, Value};

/// Create a note of the configured type holding only `word`, returns its id.
pub async fn add_word_note(
    client: &AnkiConnectClient,
    config: &Config,
    deck: &str,
    word: &str,
) -> Result<u64> {
    ensure_deck(&client.deck_names().await?, deck)?;

    let fields = client.model_field_names(&config.anki.model_name).await?;
    let source = fields.get(config.word.source_field).ok_or_else(|| {
        anyhow::anyhow!(
            "Note type {} has no field at index {}",
            config.anki.model_name,
            config.word.source_field
        )
    })?;

    let mut values = Map::new();
    values.insert(source.clone(), Value::String(word.to_string()));

    let id = client
        .add_note(deck, &config.anki.model_name, values, &[])
        .await?;
    tracing::info!("Added note {} for '{}' to {}", id, word, deck);
    Ok(id)
}

/// Notes are only added to decks that already exist.
fn ensure_deck(decks: &[String], deck: &str) -> Result<()> {
    anyhow::ensure!(
        decks.iter().any(|name| name == deck),
        "Deck '{}' does not exist",
        deck
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_deck() {
        let decks = vec!["Default".to_string(), "English::Vocabulary".to_string()];
        assert!(ensure_deck(&decks, "English::Vocabulary").is_ok());

        let err = ensure_deck(&decks, "English").unwrap_err();
        assert_eq!(err.to_string(), "Deck 'English' does not exist");
    }
}
