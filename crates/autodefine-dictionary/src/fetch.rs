use std::time::Duration;

use reqwest::StatusCode;

use crate::types::LookupError;

/// HTTP client shared by the dictionary sources.
///
/// Sends a desktop browser user agent and keeps no cookies.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// GET a page. A 404 means `word` does not exist in the dictionary.
    pub async fn get_html(
        &self,
        url: &str,
        query: &[(&str, &str)],
        word: &str,
    ) -> Result<String, LookupError> {
        tracing::debug!("GET {} {:?}", url, query);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(word.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Http(status));
        }

        Ok(response.text().await?)
    }

    /// Download a binary asset such as a pronunciation recording.
    pub async fn get_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, LookupError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
