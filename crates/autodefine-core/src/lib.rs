pub mod dictionary;
pub mod error;
pub mod highlight;
pub mod note;
pub mod preprocess;
pub mod tokenize;

pub use error::{HighlightError, NoteError};
pub use highlight::{HighlightConfig, MatchTarget, MatchTargets, highlight, normalize};
pub use note::{MemoryNote, Note, insert_into_field};
