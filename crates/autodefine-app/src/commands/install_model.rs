use autodefine_anki::{Installed, NoteType, install_model};

use crate::state::AppState;

pub async fn handle_install_model(state: &AppState) -> anyhow::Result<()> {
    let version = state.anki.check_connection().await?;
    tracing::debug!("AnkiConnect version {}", version);

    let model = NoteType::autodefine(&state.config);

    match install_model(&state.anki, &model).await? {
        Installed::Created => println!("Created note type {}", model.name),
        Installed::Updated => println!("Updated note type {}", model.name),
    }

    Ok(())
}
