use autodefine_core::HighlightConfig;
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_definition_field() -> usize {
    1
}

fn default_replace_by() -> String {
    HighlightConfig::default().replace_by
}

fn default_not_replaced_marker() -> String {
    HighlightConfig::default().not_replaced_marker
}

fn default_max_examples() -> Option<usize> {
    Some(2)
}

fn default_max_definitions() -> Option<usize> {
    Some(3)
}

fn default_verb_forms_field() -> usize {
    4
}

fn default_vietnamese_field() -> usize {
    6
}

/// English definitions and examples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_definition_field")]
    pub field: usize,
    /// Marker for the headword in examples, `$` stands for the word
    #[serde(default = "default_replace_by")]
    pub replace_by: String,
    #[serde(default = "default_not_replaced_marker")]
    pub not_replaced_marker: String,
    /// `null` for no limit
    #[serde(default = "default_max_examples")]
    pub max_examples_per_definition: Option<usize>,
    /// `null` for no limit
    #[serde(default = "default_max_definitions")]
    pub max_definitions_per_part_of_speech: Option<usize>,
}

impl Default for DefinitionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            field: default_definition_field(),
            replace_by: default_replace_by(),
            not_replaced_marker: default_not_replaced_marker(),
            max_examples_per_definition: default_max_examples(),
            max_definitions_per_part_of_speech: default_max_definitions(),
        }
    }
}

impl DefinitionConfig {
    pub fn highlight(&self) -> HighlightConfig {
        HighlightConfig {
            replace_by: self.replace_by.clone(),
            not_replaced_marker: self.not_replaced_marker.clone(),
            ..HighlightConfig::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbFormsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_verb_forms_field")]
    pub field: usize,
}

impl Default for VerbFormsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            field: default_verb_forms_field(),
        }
    }
}

/// English-Vietnamese definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VietnameseConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_vietnamese_field")]
    pub field: usize,
}

impl Default for VietnameseConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            field: default_vietnamese_field(),
        }
    }
}
