use serde::{Deserialize, Serialize};

fn default_source_field() -> usize {
    0
}

fn default_clean_html() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordConfig {
    /// Field holding the word to define
    #[serde(default = "default_source_field")]
    pub source_field: usize,
    /// Write the cleaned word back into the source field
    #[serde(default = "default_clean_html")]
    pub clean_html_in_source_field: bool,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            source_field: default_source_field(),
            clean_html_in_source_field: default_clean_html(),
        }
    }
}
