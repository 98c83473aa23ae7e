use serde::{Deserialize, Serialize};

fn default_open_images() -> bool {
    true
}

fn default_search_append() -> String {
    " AND (picture OR clipart OR illustration OR art)".to_string()
}

fn default_search_link() -> String {
    "https://www.google.com/search?q=$&tbm=isch&safe=off&tbs&hl=en&sa=X".to_string()
}

fn default_field() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Offer an image search link after defining a single note
    #[serde(default = "default_open_images")]
    pub open_images: bool,
    #[serde(default = "default_search_append")]
    pub search_append: String,
    /// `$` is replaced by the query
    #[serde(default = "default_search_link")]
    pub search_link: String,
    #[serde(default = "default_field")]
    pub field: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            open_images: default_open_images(),
            search_append: default_search_append(),
            search_link: default_search_link(),
            field: default_field(),
        }
    }
}

impl ImageConfig {
    pub fn search_url(&self, word: &str) -> String {
        let query = format!("{word}{}", self.search_append);
        self.search_link.replace('$', &query)
    }
}
