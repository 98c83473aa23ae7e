use autodefine_core::dictionary::{AudioFormat, Corpus};
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_audio_field() -> usize {
    2
}

fn default_phonetics_field() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PronunciationConfig {
    pub corpus: Corpus,
    #[serde(default = "default_enabled")]
    pub audio: bool,
    #[serde(default = "default_audio_field")]
    pub audio_field: usize,
    #[serde(default = "default_enabled")]
    pub phonetics: bool,
    #[serde(default = "default_phonetics_field")]
    pub phonetics_field: usize,
    pub audio_format: AudioFormat,
}

impl Default for PronunciationConfig {
    fn default() -> Self {
        Self {
            corpus: Corpus::default(),
            audio: default_enabled(),
            audio_field: default_audio_field(),
            phonetics: default_enabled(),
            phonetics_field: default_phonetics_field(),
            audio_format: AudioFormat::default(),
        }
    }
}
