use crate::error::NoteError;

/// What the enrichment needs from a flashcard: positional text fields and tags.
pub trait Note {
    fn field_count(&self) -> usize;

    fn field(&self, index: usize) -> Option<&str>;

    fn field_mut(&mut self, index: usize) -> Option<&mut String>;

    fn tags(&self) -> &[String];

    fn add_tag(&mut self, tag: &str);

    fn remove_tag(&mut self, tag: &str);

    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// Add the tag when `present`, otherwise drop it.
    fn set_tag(&mut self, tag: &str, present: bool) {
        match (present, self.has_tag(tag)) {
            (true, false) => self.add_tag(tag),
            (false, true) => self.remove_tag(tag),
            _ => {}
        }
    }
}

/// Write `text` into field `index`, replacing or appending to its content.
pub fn insert_into_field<N>(
    note: &mut N,
    text: &str,
    index: usize,
    overwrite: bool,
) -> Result<(), NoteError>
where
    N: Note + ?Sized,
{
    let len = note.field_count();
    let field = note
        .field_mut(index)
        .ok_or_else(|| NoteError::FieldOutOfRange {
            text: text.to_string(),
            index,
            len,
        })?;

    if overwrite {
        field.clear();
    }
    field.push_str(text);

    Ok(())
}

/// Note kept entirely in memory, used for previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryNote {
    pub fields: Vec<String>,
    pub tags: Vec<String>,
}

impl MemoryNote {
    pub fn with_fields(count: usize) -> Self {
        Self {
            fields: vec![String::new(); count],
            tags: Vec::new(),
        }
    }
}

impl Note for MemoryNote {
    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        self.fields.get_mut(index)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn add_tag(&mut self, tag: &str) {
        self.tags.push(tag.to_string());
    }

    fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_or_appends() {
        let mut note = MemoryNote::with_fields(2);
        insert_into_field(&mut note, "old", 1, true).unwrap();
        insert_into_field(&mut note, " more", 1, false).unwrap();
        assert_eq!(note.field(1), Some("old more"));

        insert_into_field(&mut note, "new", 1, true).unwrap();
        assert_eq!(note.field(1), Some("new"));
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut note = MemoryNote::with_fields(3);
        let err = insert_into_field(&mut note, "x", 6, true).unwrap_err();
        assert_eq!(
            err,
            NoteError::FieldOutOfRange {
                text: "x".to_string(),
                index: 6,
                len: 3
            }
        );
        assert!(err.to_string().contains("with 7 or more fields"));
    }

    #[test]
    fn test_set_tag_is_idempotent() {
        let mut note = MemoryNote::default();
        note.set_tag("AutoDefine_Error", true);
        note.set_tag("AutoDefine_Error", true);
        assert_eq!(note.tags, vec!["AutoDefine_Error"]);

        note.set_tag("AutoDefine_Error", false);
        assert!(note.tags.is_empty());
    }
}
