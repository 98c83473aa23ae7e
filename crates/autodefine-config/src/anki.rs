use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_deck() -> String {
    "Default".to_string()
}

fn default_use_default_template() -> bool {
    true
}

fn default_model_name() -> String {
    "AutoDefineOxfordLearnersDictionary".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Deck for notes created with `add`
    #[serde(default = "default_deck")]
    pub deck: String,
    /// Install and use the bundled note type
    #[serde(default = "default_use_default_template")]
    pub use_default_template: bool,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            deck: default_deck(),
            use_default_template: default_use_default_template(),
            model_name: default_model_name(),
        }
    }
}
