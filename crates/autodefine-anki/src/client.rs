use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::note::{AnkiNote, NoteInfo};
use crate::template::NoteType;

const API_VERSION: u32 = 6;

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Check that AnkiConnect is reachable and new enough, returns its version
    pub async fn check_connection(&self) -> Result<u32> {
        let response: AnkiResponse<u32> = self
            .invoke("version", json!({}))
            .await
            .with_context(|| format!("AnkiConnect is not reachable at {}", self.base_url))?;
        supported_version(response.into_result()?)
    }

    /// Get list of deck names
    pub async fn deck_names(&self) -> Result<Vec<String>> {
        let response: AnkiResponse<Vec<String>> = self.invoke("deckNames", json!({})).await?;
        response.into_result()
    }

    /// Get list of model (note type) names
    pub async fn model_names(&self) -> Result<Vec<String>> {
        let response: AnkiResponse<Vec<String>> = self.invoke("modelNames", json!({})).await?;
        response.into_result()
    }

    pub async fn model_field_names(&self, model: &str) -> Result<Vec<String>> {
        let response: AnkiResponse<Vec<String>> = self
            .invoke("modelFieldNames", json!({ "modelName": model }))
            .await?;
        response.into_result()
    }

    /// Note ids matching a browser search query
    pub async fn find_notes(&self, query: &str) -> Result<Vec<u64>> {
        let response: AnkiResponse<Vec<u64>> =
            self.invoke("findNotes", json!({ "query": query })).await?;
        response.into_result()
    }

    pub async fn notes_info(&self, ids: &[u64]) -> Result<Vec<NoteInfo>> {
        let response: AnkiResponse<Vec<NoteInfo>> =
            self.invoke("notesInfo", json!({ "notes": ids })).await?;
        response.into_result()
    }

    /// Load one note with its fields in note type order
    pub async fn note(&self, id: u64) -> Result<AnkiNote> {
        let info = self
            .notes_info(&[id])
            .await?
            .into_iter()
            .next()
            .filter(|info| info.note_id.is_some())
            .with_context(|| format!("Note {id} does not exist"))?;

        AnkiNote::try_from(info)
    }

    /// Add a note to Anki
    pub async fn add_note(
        &self,
        deck: &str,
        model: &str,
        fields: Map<String, Value>,
        tags: &[&str],
    ) -> Result<u64> {
        let params = json!({
            "note": {
                "deckName": deck,
                "modelName": model,
                "fields": fields,
                "options": { "allowDuplicate": true },
                "tags": tags
            }
        });

        let response: AnkiResponse<u64> = self.invoke("addNote", params).await?;
        response.into_result()
    }

    pub async fn update_note_fields(&self, id: u64, fields: Map<String, Value>) -> Result<()> {
        let params = json!({ "note": { "id": id, "fields": fields } });
        self.invoke::<Value>("updateNoteFields", params)
            .await?
            .into_unit()
    }

    /// Tags are passed space separated
    pub async fn add_tags(&self, ids: &[u64], tags: &str) -> Result<()> {
        self.invoke::<Value>("addTags", json!({ "notes": ids, "tags": tags }))
            .await?
            .into_unit()
    }

    pub async fn remove_tags(&self, ids: &[u64], tags: &str) -> Result<()> {
        self.invoke::<Value>("removeTags", json!({ "notes": ids, "tags": tags }))
            .await?
            .into_unit()
    }

    /// Write fields and the tag changes of a loaded note back
    pub async fn save_note(&self, note: &AnkiNote) -> Result<()> {
        self.update_note_fields(note.id, note.field_map())
            .await
            .with_context(|| format!("Failed to update fields of note {}", note.id))?;

        let (added, removed) = note.tag_changes();
        if !added.is_empty() {
            self.add_tags(&[note.id], &added.join(" ")).await?;
        }
        if !removed.is_empty() {
            self.remove_tags(&[note.id], &removed.join(" ")).await?;
        }

        tracing::debug!(
            "Saved note {} (+{} -{} tags)",
            note.id,
            added.len(),
            removed.len()
        );
        Ok(())
    }

    /// Media file names matching a glob pattern
    pub async fn get_media_files_names(&self, pattern: &str) -> Result<Vec<String>> {
        let response: AnkiResponse<Vec<String>> = self
            .invoke("getMediaFilesNames", json!({ "pattern": pattern }))
            .await?;
        response.into_result()
    }

    /// Store a file in the media collection, returns the stored name
    pub async fn store_media_file(&self, filename: &str, data: &[u8]) -> Result<String> {
        let params = json!({
            "filename": filename,
            "data": STANDARD.encode(data),
            "deleteExisting": false
        });

        let response: AnkiResponse<String> = self.invoke("storeMediaFile", params).await?;
        response.into_result()
    }

    pub async fn create_model(&self, model: &NoteType) -> Result<()> {
        let templates: Vec<Value> = model
            .templates
            .iter()
            .map(|template| {
                json!({
                    "Name": template.name,
                    "Front": template.front,
                    "Back": template.back
                })
            })
            .collect();

        let params = json!({
            "modelName": model.name,
            "inOrderFields": model.fields,
            "css": model.css,
            "isCloze": false,
            "cardTemplates": templates
        });

        self.invoke::<Value>("createModel", params)
            .await?
            .into_unit()
    }

    pub async fn update_model_templates(&self, model: &NoteType) -> Result<()> {
        let templates: Map<String, Value> = model
            .templates
            .iter()
            .map(|template| {
                (
                    template.name.clone(),
                    json!({ "Front": template.front, "Back": template.back }),
                )
            })
            .collect();

        let params = json!({ "model": { "name": model.name, "templates": templates } });
        self.invoke::<Value>("updateModelTemplates", params)
            .await?
            .into_unit()
    }

    pub async fn update_model_styling(&self, model: &NoteType) -> Result<()> {
        let params = json!({ "model": { "name": model.name, "css": model.css } });
        self.invoke::<Value>("updateModelStyling", params)
            .await?
            .into_unit()
    }

    /// Invoke an AnkiConnect API action
    async fn invoke<T>(&self, action: &str, params: serde_json::Value) -> Result<AnkiResponse<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action: action.to_string(),
            version: API_VERSION,
            params,
        };

        tracing::debug!("AnkiConnect: {}", action);
        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to send {action} to AnkiConnect"))?;

        response
            .json::<AnkiResponse<T>>()
            .await
            .context("Failed to parse AnkiConnect response")
    }
}

fn supported_version(version: u32) -> Result<u32> {
    anyhow::ensure!(
        version >= API_VERSION,
        "AnkiConnect version {} is too old, {} or newer is required",
        version,
        API_VERSION
    );
    Ok(version)
}

#[derive(Serialize)]
struct AnkiRequest {
    action: String,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T> {
        if let Some(error) = self.error {
            anyhow::bail!("AnkiConnect error: {}", error);
        }

        self.result.context("AnkiConnect returned null result")
    }

    /// For actions whose result is always null
    fn into_unit(self) -> Result<()> {
        if let Some(error) = self.error {
            anyhow::bail!("AnkiConnect error: {}", error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_wins() {
        let response: AnkiResponse<u64> =
            serde_json::from_str(r#"{"result": null, "error": "deck was not found"}"#).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.to_string(), "AnkiConnect error: deck was not found");
    }

    #[test]
    fn test_null_result() {
        let response: AnkiResponse<Value> =
            serde_json::from_str(r#"{"result": null, "error": null}"#).unwrap();
        assert!(response.into_unit().is_ok());

        let response: AnkiResponse<u64> =
            serde_json::from_str(r#"{"result": null, "error": null}"#).unwrap();
        assert!(response.into_result().is_err());
    }

    #[test]
    fn test_old_anki_connect_is_rejected() {
        assert_eq!(supported_version(6).unwrap(), 6);
        assert_eq!(supported_version(7).unwrap(), 7);

        let err = supported_version(5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "AnkiConnect version 5 is too old, 6 or newer is required"
        );
    }

    #[test]
    fn test_request_shape() {
        let request = AnkiRequest {
            action: "findNotes".to_string(),
            version: 6,
            params: json!({ "query": "deck:English" }),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "action": "findNotes", "version": 6, "params": { "query": "deck:English" } })
        );
    }
}
