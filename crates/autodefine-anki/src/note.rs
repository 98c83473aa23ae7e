use std::collections::HashMap;

use anyhow::{Context, Result};
use autodefine_core::Note;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One entry of a `notesInfo` result. Unknown ids come back as `{}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    pub note_id: Option<u64>,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fields: HashMap<String, FieldInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldInfo {
    pub value: String,
    pub order: usize,
}

/// A note loaded from Anki, editable through [`Note`].
#[derive(Debug, Clone)]
pub struct AnkiNote {
    pub id: u64,
    pub model_name: String,
    field_names: Vec<String>,
    fields: Vec<String>,
    tags: Vec<String>,
    loaded_tags: Vec<String>,
}

impl TryFrom<NoteInfo> for AnkiNote {
    type Error = anyhow::Error;

    fn try_from(info: NoteInfo) -> Result<Self> {
        let id = info.note_id.context("Note info without id")?;

        let mut fields: Vec<(String, FieldInfo)> = info.fields.into_iter().collect();
        fields.sort_by_key(|(_, field)| field.order);
        let (field_names, fields) = fields
            .into_iter()
            .map(|(name, field)| (name, field.value))
            .unzip();

        Ok(Self {
            id,
            model_name: info.model_name,
            field_names,
            fields,
            loaded_tags: info.tags.clone(),
            tags: info.tags,
        })
    }
}

impl AnkiNote {
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// All fields by name, as `updateNoteFields` expects them
    pub fn field_map(&self) -> Map<String, Value> {
        self.field_names
            .iter()
            .zip(&self.fields)
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect()
    }

    /// Tags added and removed since the note was loaded
    pub fn tag_changes(&self) -> (Vec<&str>, Vec<&str>) {
        let added = self
            .tags
            .iter()
            .filter(|tag| !self.loaded_tags.contains(tag))
            .map(String::as_str)
            .collect();
        let removed = self
            .loaded_tags
            .iter()
            .filter(|tag| !self.tags.contains(tag))
            .map(String::as_str)
            .collect();

        (added, removed)
    }
}

impl Note for AnkiNote {
    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        self.fields.get_mut(index)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn add_tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
    }

    fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }
}

#[cfg(test)]
mod tests {
    use autodefine_core::insert_into_field;

    use super::*;

    fn love_note() -> AnkiNote {
        let info: NoteInfo = serde_json::from_str(
            r#"{
                "noteId": 1502298033753,
                "modelName": "AutoDefineOxfordLearnersDictionary",
                "tags": ["english", "AutoDefine_Error"],
                "fields": {
                    "DefinitionAndExamples": {"value": "", "order": 1},
                    "Word": {"value": "love", "order": 0},
                    "Audio": {"value": "", "order": 2}
                },
                "cards": [1498938915662]
            }"#,
        )
        .unwrap();
        AnkiNote::try_from(info).unwrap()
    }

    #[test]
    fn test_fields_follow_note_type_order() {
        let note = love_note();
        assert_eq!(note.field_names(), ["Word", "DefinitionAndExamples", "Audio"]);
        assert_eq!(note.field(0), Some("love"));
        assert_eq!(note.field_count(), 3);
    }

    #[test]
    fn test_tag_changes() {
        let mut note = love_note();
        note.set_tag("AutoDefine_Error", false);
        note.set_tag("AutoDefine_WordNotReplaced", true);
        note.add_tag("english");

        let (added, removed) = note.tag_changes();
        assert_eq!(added, vec!["AutoDefine_WordNotReplaced"]);
        assert_eq!(removed, vec!["AutoDefine_Error"]);
    }

    #[test]
    fn test_field_map_carries_edits() {
        let mut note = love_note();
        insert_into_field(&mut note, "<h4>affection</h4>", 1, true).unwrap();
        let map = note.field_map();
        assert_eq!(map["DefinitionAndExamples"], "<h4>affection</h4>");
        assert_eq!(map["Word"], "love");
    }

    #[test]
    fn test_missing_note() {
        let info: NoteInfo = serde_json::from_str("{}").unwrap();
        assert!(AnkiNote::try_from(info).is_err());
    }
}
