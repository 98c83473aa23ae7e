/// Broken invariants inside the highlighter.
///
/// Neither variant is a user-facing condition: both mean the span bookkeeping
/// is wrong. Callers abort the current sentence and report the note as failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    #[error("token '{token}' does not match text '{found}' at offset {start}")]
    SpanMismatch {
        token: String,
        start: usize,
        found: String,
    },

    #[error("incorrect gap width {width} before token '{token}'")]
    NegativeGap { token: String, width: isize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteError {
    #[error(
        "Tried to insert '{text}' into user-configured field number {index} (0-indexed), \
         but note type only has {len} fields. Use a different note type with {needed} or more \
         fields, or change the index in the configuration.",
        needed = .index + 1
    )]
    FieldOutOfRange {
        text: String,
        index: usize,
        len: usize,
    },
}
