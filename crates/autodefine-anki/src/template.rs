use anyhow::Result;
use autodefine_config::Config;
use serde::{Deserialize, Serialize};

use crate::client::AnkiConnectClient;

const STYLE: &str = include_str!("../assets/style.css");
const NORMAL_FRONT: &str = include_str!("../assets/normal_front.html");
const NORMAL_BACK: &str = include_str!("../assets/normal_back.html");
const REVERSE_FRONT: &str = include_str!("../assets/reverse_front.html");
const REVERSE_BACK: &str = include_str!("../assets/reverse_back.html");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    pub front: String,
    pub back: String,
}

impl CardTemplate {
    pub fn new(name: &str, front: &str, back: &str) -> Self {
        Self {
            name: name.to_string(),
            front: front.to_string(),
            back: back.to_string(),
        }
    }
}

/// A note type: ordered field names, card templates and shared styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteType {
    pub name: String,
    pub fields: Vec<String>,
    pub css: String,
    pub templates: Vec<CardTemplate>,
}

impl NoteType {
    /// The bundled note type, fields placed at their configured indices.
    pub fn autodefine(config: &Config) -> Self {
        let mut fields = [
            (config.word.source_field, "Word"),
            (config.definition.field, "DefinitionAndExamples"),
            (config.pronunciation.audio_field, "Audio"),
            (config.pronunciation.phonetics_field, "Phonetics"),
            (config.verb_forms.field, "VerbForms"),
            (config.image.field, "Image"),
            (config.vietnamese.field, "VietnameseDefinition"),
        ];
        fields.sort_by_key(|(index, _)| *index);

        Self {
            name: config.anki.model_name.clone(),
            fields: fields.iter().map(|(_, name)| name.to_string()).collect(),
            css: STYLE.to_string(),
            templates: vec![
                CardTemplate::new("Normal", NORMAL_FRONT, NORMAL_BACK),
                CardTemplate::new("Reverse", REVERSE_FRONT, REVERSE_BACK),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installed {
    Created,
    Updated,
}

/// Create the note type, or refresh templates and styling of an existing one.
pub async fn install_model(client: &AnkiConnectClient, model: &NoteType) -> Result<Installed> {
    let models = client.model_names().await?;

    if !models.contains(&model.name) {
        client.create_model(model).await?;
        tracing::info!("Created note type {}", model.name);
        return Ok(Installed::Created);
    }

    let existing = client.model_field_names(&model.name).await?;
    if existing != model.fields {
        tracing::warn!(
            "Note type {} has fields {:?}, expected {:?}",
            model.name,
            existing,
            model.fields
        );
    }

    client.update_model_templates(model).await?;
    client.update_model_styling(model).await?;
    tracing::info!("Updated note type {}", model.name);
    Ok(Installed::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_field_order() {
        let model = NoteType::autodefine(&Config::default());
        assert_eq!(model.name, "AutoDefineOxfordLearnersDictionary");
        assert_eq!(
            model.fields,
            [
                "Word",
                "DefinitionAndExamples",
                "Audio",
                "Phonetics",
                "VerbForms",
                "Image",
                "VietnameseDefinition",
            ]
        );
    }

    #[test]
    fn test_fields_follow_configured_indices() {
        let mut config = Config::default();
        config.vietnamese.field = 2;
        config.pronunciation.audio_field = 6;

        let model = NoteType::autodefine(&config);
        assert_eq!(model.fields[2], "VietnameseDefinition");
        assert_eq!(model.fields[6], "Audio");
    }

    #[test]
    fn test_templates() {
        let model = NoteType::autodefine(&Config::default());
        let names: Vec<_> = model.templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Normal", "Reverse"]);
        assert!(model.templates[0].front.contains("{{Word}} {{Audio}}"));
        assert!(model.templates[1].front.contains("{{type:Word}}"));
        assert!(model.templates[1].back.starts_with("{{FrontSide}}"));
        assert!(model.css.contains("h3.wordform"));
    }
}
