use autodefine_config::Config;
use autodefine_core::dictionary::{LabanEntry, OxfordLookup};
use autodefine_core::preprocess::{DefaultPreprocessor, Preprocessor};
use autodefine_core::{HighlightError, Note, NoteError, insert_into_field};
use autodefine_dictionary::{Dictionary, LookupError};

use crate::media::{MediaError, MediaStore};
use crate::render;

#[derive(Debug, thiserror::Error)]
pub enum DefineError {
    #[error("There is no word in the source field")]
    EmptyWord,

    #[error("Word '{word}' not found in {dictionary}")]
    NotFound { word: String, dictionary: String },

    #[error("Found definition for word '{found}' instead of '{requested}'")]
    FoundOtherWord { requested: String, found: String },

    #[error(transparent)]
    Field(#[from] NoteError),

    #[error("Highlighting failed: {0}")]
    Highlight(#[from] HighlightError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// How a note is being defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One note on request. `accept_found_word` replaces the word with the
    /// dictionary's spelling instead of failing.
    Single { accept_found_word: bool },
    Bulk,
}

/// The word a note asks for, cleaned of markup and extra whitespace.
pub fn note_word<N: Note + ?Sized>(note: &N, config: &Config) -> Option<String> {
    let raw = note.field(config.word.source_field)?;
    let word = DefaultPreprocessor.process(raw);
    (!word.is_empty()).then_some(word)
}

/// Everything `define_note` talks to.
pub struct Pipeline<'a> {
    pub config: &'a Config,
    pub oxford: &'a dyn Dictionary<Entry = OxfordLookup>,
    pub laban: &'a dyn Dictionary<Entry = LabanEntry>,
    pub media: &'a dyn MediaStore,
}

impl Pipeline<'_> {
    /// Fill the note's fields from the dictionaries.
    ///
    /// Returns the image search link in single mode. The error tag is set
    /// or cleared either way; saving the note is up to the caller.
    pub async fn define_note<N>(&self, note: &mut N, mode: Mode) -> Result<Option<String>, DefineError>
    where
        N: Note + Send + ?Sized,
    {
        let result = self.define(note, mode).await;

        if let Err(e) = &result {
            tracing::warn!("Failed to define note: {}", e);
        }
        note.set_tag(&self.config.tags.error, result.is_err());

        result
    }

    async fn define<N>(&self, note: &mut N, mode: Mode) -> Result<Option<String>, DefineError>
    where
        N: Note + Send + ?Sized,
    {
        let config = self.config;
        let source_field = config.word.source_field;

        let mut word = note_word(note, config).ok_or(DefineError::EmptyWord)?;
        if config.word.clean_html_in_source_field {
            insert_into_field(note, &word, source_field, true)?;
        }

        tracing::debug!("Looking up '{}' in {}", word, self.oxford.name());
        let lookup = self.oxford.lookup(&word).await?;
        let found = lookup
            .name()
            .ok_or_else(|| DefineError::NotFound {
                word: word.clone(),
                dictionary: self.oxford.name().to_string(),
            })?
            .to_string();

        if found != word {
            match mode {
                Mode::Single {
                    accept_found_word: true,
                } => {
                    tracing::info!("Replacing '{}' with '{}'", word, found);
                    insert_into_field(note, &found, source_field, true)?;
                    word = found;
                }
                _ => {
                    return Err(DefineError::FoundOtherWord {
                        requested: word,
                        found,
                    });
                }
            }
        }

        let verb_forms = lookup.verb_forms();
        tracing::debug!("Defining '{}' with verb forms {:?}", word, verb_forms);

        if config.definition.enabled {
            insert_into_field(note, "", config.definition.field, true)?;
            let (html, need_tag) = render::definition_html(
                &lookup.entries,
                &verb_forms,
                &lookup.idioms,
                &config.definition,
                &config.definition.highlight(),
            )?;
            insert_into_field(note, &html, config.definition.field, false)?;
            note.set_tag(&config.tags.word_not_replaced, need_tag);
        }

        if config.vietnamese.enabled {
            tracing::debug!("Looking up '{}' in {}", word, self.laban.name());
            let entry = self.laban.lookup(&word).await?;
            let html = render::laban_html(&entry, &word, &config.definition.highlight())?;
            insert_into_field(note, &html, config.vietnamese.field, true)?;
        }

        let pronunciation = &config.pronunciation;
        if pronunciation.phonetics {
            let html = render::phonetics_html(&lookup.entries, pronunciation.corpus);
            insert_into_field(note, &html, pronunciation.phonetics_field, true)?;
        }

        if pronunciation.audio {
            let html = render::audio_html(
                &lookup.entries,
                pronunciation.corpus,
                pronunciation.audio_format,
                self.media,
            )
            .await?;
            insert_into_field(note, &html, pronunciation.audio_field, true)?;
        }

        if config.verb_forms.enabled {
            insert_into_field(note, &verb_forms.join(" "), config.verb_forms.field, true)?;
        }

        let link = match mode {
            Mode::Single { .. } if config.image.open_images => Some(config.image.search_url(&word)),
            _ => None,
        };

        tracing::info!("Defined '{}'", word);
        Ok(link)
    }
}
