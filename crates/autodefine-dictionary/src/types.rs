use async_trait::async_trait;

/// An online dictionary that can look up a single word.
#[async_trait]
pub trait Dictionary: Send + Sync {
    type Entry: Send;

    /// Shown in lookup errors and logs.
    fn name(&self) -> &str;

    /// Fetch and parse everything the dictionary has for `word`.
    async fn lookup(&self, word: &str) -> Result<Self::Entry, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Word '{0}' not found in the dictionary")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}
