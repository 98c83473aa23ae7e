pub mod fetch;
pub mod html;
pub mod sources;
mod types;

pub use fetch::Fetcher;
pub use sources::laban::LabanDictionary;
pub use sources::oxford::OxfordDictionary;
pub use types::{Dictionary, LookupError};
