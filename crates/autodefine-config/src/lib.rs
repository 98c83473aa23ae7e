use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::dictionary::{DefinitionConfig, VerbFormsConfig, VietnameseConfig};
use self::image::ImageConfig;
use self::network::NetworkConfig;
use self::pronunciation::PronunciationConfig;
use self::word::WordConfig;

pub mod anki;
pub mod dictionary;
pub mod image;
pub mod network;
pub mod pronunciation;
pub mod word;

fn default_error_tag() -> String {
    "AutoDefine_Error".to_string()
}

fn default_word_not_replaced_tag() -> String {
    "AutoDefine_WordNotReplaced".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Set on notes whose processing failed
    #[serde(default = "default_error_tag")]
    pub error: String,
    /// Set when an example sentence does not contain the word
    #[serde(default = "default_word_not_replaced_tag")]
    pub word_not_replaced: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            error: default_error_tag(),
            word_not_replaced: default_word_not_replaced_tag(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub word: WordConfig,
    pub definition: DefinitionConfig,
    pub pronunciation: PronunciationConfig,
    pub verb_forms: VerbFormsConfig,
    pub image: ImageConfig,
    pub vietnamese: VietnameseConfig,
    pub anki: AnkiConfig,
    pub network: NetworkConfig,
    pub tags: TagsConfig,
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn new() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load a JSON config file. Missing sections and keys keep their defaults,
    /// a missing file means all defaults. Environment overrides apply last.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            tracing::info!("Loading config from {}", path.display());
            let data = std::fs::read_to_string(path)?;
            Self::from_json(&data)?
        } else {
            tracing::warn!("Config {} not found, using defaults", path.display());
            Config::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("ANKI_CONNECT_URL") {
            self.anki.url = url;
        }

        if let Ok(value) = env::var("AUTODEFINE_TIMEOUT_SECONDS") {
            self.network.timeout_seconds =
                value.parse().map_err(|_| ConfigError::InvalidEnv {
                    name: "AUTODEFINE_TIMEOUT_SECONDS",
                    value: value.clone(),
                })?;
        }

        if let Ok(value) = env::var("AUTODEFINE_CORPUS") {
            self.pronunciation.corpus = value.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "AUTODEFINE_CORPUS",
                value: value.clone(),
            })?;
        }

        Ok(())
    }

    /// Highest field index the configuration refers to.
    pub fn max_field_index(&self) -> usize {
        [
            self.word.source_field,
            self.definition.field,
            self.pronunciation.audio_field,
            self.pronunciation.phonetics_field,
            self.verb_forms.field,
            self.image.field,
            self.vietnamese.field,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}
