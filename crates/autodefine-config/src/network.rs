use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/118.0.0.0 Safari/537.36"
        .to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_audio_timeout_seconds() -> u64 {
    5
}

/// Settings for requests to the dictionary websites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_audio_timeout_seconds")]
    pub audio_timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            audio_timeout_seconds: default_audio_timeout_seconds(),
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn audio_timeout(&self) -> Duration {
        Duration::from_secs(self.audio_timeout_seconds)
    }
}
