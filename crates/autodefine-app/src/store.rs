use async_trait::async_trait;
use autodefine_anki::{AnkiConnectClient, AnkiNote};
use autodefine_core::Note;

/// Where bulk processing loads notes from and saves them back to.
#[async_trait]
pub trait NoteStore: Send + Sync {
    type Note: Note + Send;

    async fn load(&self, id: u64) -> anyhow::Result<Self::Note>;
    async fn save(&self, note: &Self::Note) -> anyhow::Result<()>;
}

#[async_trait]
impl NoteStore for AnkiConnectClient {
    type Note = AnkiNote;

    async fn load(&self, id: u64) -> anyhow::Result<AnkiNote> {
        self.note(id).await
    }

    async fn save(&self, note: &AnkiNote) -> anyhow::Result<()> {
        self.save_note(note).await
    }
}
