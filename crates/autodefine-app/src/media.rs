use std::time::Duration;

use async_trait::async_trait;
use autodefine_anki::AnkiConnectClient;
use autodefine_dictionary::{Fetcher, LookupError};

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to download {name}: {source}")]
    Download {
        name: String,
        #[source]
        source: LookupError,
    },

    #[error("Failed to store {name}: {source}")]
    Store {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Destination for pronunciation recordings.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Make sure a file called `name` exists, downloading it from `url` if needed.
    async fn ensure(&self, name: &str, url: &str) -> Result<(), MediaError>;
}

/// Stores files in the Anki media collection.
pub struct AnkiMedia {
    client: AnkiConnectClient,
    fetcher: Fetcher,
    timeout: Duration,
}

impl AnkiMedia {
    pub fn new(client: AnkiConnectClient, fetcher: Fetcher, timeout: Duration) -> Self {
        Self {
            client,
            fetcher,
            timeout,
        }
    }
}

#[async_trait]
impl MediaStore for AnkiMedia {
    async fn ensure(&self, name: &str, url: &str) -> Result<(), MediaError> {
        let store_error = |source| MediaError::Store {
            name: name.to_string(),
            source,
        };

        let existing = self
            .client
            .get_media_files_names(name)
            .await
            .map_err(store_error)?;
        if existing.iter().any(|file| file == name) {
            tracing::debug!("Media {} already stored", name);
            return Ok(());
        }

        let data = self
            .fetcher
            .get_bytes(url, self.timeout)
            .await
            .map_err(|source| MediaError::Download {
                name: name.to_string(),
                source,
            })?;

        self.client
            .store_media_file(name, &data)
            .await
            .map_err(store_error)?;
        tracing::info!("Stored {} ({} bytes)", name, data.len());
        Ok(())
    }
}

/// Keeps nothing, for previews.
pub struct DiscardMedia;

#[async_trait]
impl MediaStore for DiscardMedia {
    async fn ensure(&self, name: &str, _url: &str) -> Result<(), MediaError> {
        tracing::debug!("Not storing {}", name);
        Ok(())
    }
}
