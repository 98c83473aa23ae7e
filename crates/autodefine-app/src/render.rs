//! HTML written into the note fields.

use autodefine_config::dictionary::DefinitionConfig;
use autodefine_core::dictionary::{AudioFormat, Corpus, Idiom, LabanEntry, Pronunciation, WordEntry};
use autodefine_core::{HighlightConfig, HighlightError, MatchTargets, highlight};

use crate::media::{MediaError, MediaStore};

const NO_PHONETICS: &str = r#"<span class="hidden">No phonetics found</span>"#;
const NO_AUDIO: &str = r#"<span class="do_not_show">No audio found</span>"#;

/// Definitions and examples of every entry followed by the idioms.
///
/// The flag tells whether some example does not contain the word.
pub fn definition_html(
    entries: &[WordEntry],
    verb_forms: &[String],
    idioms: &[Idiom],
    limits: &DefinitionConfig,
    config: &HighlightConfig,
) -> Result<(String, bool), HighlightError> {
    let targets_for = |name: &str| {
        MatchTargets::new(std::iter::once(name).chain(verb_forms.iter().map(String::as_str)))
    };
    // idioms reuse the targets of the last rendered entry
    let mut targets = targets_for(entries.first().map_or("", |entry| entry.name.as_str()));

    let mut parts: Vec<String> = Vec::new();
    let mut need_word_not_replaced_tag = false;

    for entry in entries {
        let senses: Vec<_> = entry.senses().collect();
        if senses.is_empty() {
            continue;
        }
        targets = targets_for(&entry.name);

        if let Some(wordform) = &entry.wordform {
            parts.push(format!(r#"<h3 class="wordform">{wordform}</h3>"#));
        }

        let senses = limited(senses, limits.max_definitions_per_part_of_speech);
        let mut previous_without_examples = false;

        for sense in senses {
            if let Some(description) = &sense.description {
                let (_, description) = highlight(&targets, description, false, config)?;
                if previous_without_examples {
                    parts.push("<br/>".to_string());
                }
                parts.push(format!(r#"<h4 class="description">{description}</h4>"#));
            }

            let examples: Vec<_> = sense.examples.iter().chain(&sense.extra_examples).collect();
            let examples = limited(examples, limits.max_examples_per_definition);

            if examples.is_empty() {
                previous_without_examples = true;
                continue;
            }

            parts.push(r#"<ul class="examples">"#.to_string());
            for example in examples {
                let example = example.replace('/', " / ");
                let (replaced, example) = highlight(&targets, &example, true, config)?;
                need_word_not_replaced_tag |= !replaced;
                parts.push(format!("<li>{example}</li>"));
            }
            parts.push("</ul>".to_string());
            previous_without_examples = false;
        }

        parts.push("<hr/>".to_string());
    }
    parts.pop();

    if !idioms.is_empty() {
        parts.push("<hr/>".to_string());
        parts.push(r#"<h3 class="idiom-title">Idioms</h3>"#.to_string());
    }

    for idiom in idioms {
        let (_, name) = highlight(&targets, &idiom.name, false, config)?;
        parts.push(format!(r#"<h4 class="idiom">{name}</h4>"#));

        for sense in &idiom.definitions {
            let (_, description) = highlight(&targets, &sense.description, false, config)?;
            parts.push(format!(r#"<p class="idiom-description">{description}</p>"#));

            if sense.examples.is_empty() {
                continue;
            }
            parts.push(r#"<ul class="idiom-examples">"#.to_string());
            for example in &sense.examples {
                let (_, example) = highlight(&targets, example, true, config)?;
                parts.push(format!("<li>{example}</li>"));
            }
            parts.push("</ul>".to_string());
        }
    }

    Ok((parts.concat(), need_word_not_replaced_tag))
}

/// Vietnamese definitions with translated examples.
pub fn laban_html(
    entry: &LabanEntry,
    word: &str,
    config: &HighlightConfig,
) -> Result<String, HighlightError> {
    let targets = MatchTargets::new([word]);
    let mut parts: Vec<String> = Vec::new();

    for wordform in &entry.definitions {
        parts.push(format!(r#"<h3 class="wordform">{}</h3>"#, wordform.wordform));

        for sense in &wordform.definitions {
            let (_, description) = highlight(&targets, &sense.description, false, config)?;
            parts.push(format!(r#"<h4 class="description">{description}</h4>"#));

            parts.push(r#"<ul class="examples">"#.to_string());
            for example in &sense.examples {
                let (_, text) = highlight(&targets, &example.example, true, config)?;
                parts.push(format!("<li>{text}: <span>{}</span></li>", example.translation));
            }
            parts.push("</ul>".to_string());
        }

        parts.push("<hr/>".to_string());
    }
    parts.pop();

    if !entry.idioms.is_empty() {
        parts.push("<hr/>".to_string());
        parts.push(r#"<h3 class="idiom-title">Idioms</h3>"#.to_string());
    }

    for idiom in &entry.idioms {
        let (_, name) = highlight(&targets, &idiom.name, false, config)?;
        parts.push(format!(r#"<h4 class="idiom">{name}</h4>"#));

        for sense in &idiom.definitions {
            let (_, description) = highlight(&targets, &sense.description, false, config)?;
            parts.push(format!(r#"<p class="idiom-description">{description}</p>"#));

            if sense.examples.is_empty() {
                continue;
            }
            parts.push(r#"<ul class="idiom-examples">"#.to_string());
            for example in &sense.examples {
                let (_, text) = highlight(&targets, &example.example, true, config)?;
                parts.push(format!("<li>{text}: <span>{}</span></li>", example.translation));
            }
            parts.push("</ul>".to_string());
        }
    }

    Ok(parts.concat())
}

pub fn phonetics_html(entries: &[WordEntry], corpus: Corpus) -> String {
    let mut groups = Groups::default();

    for entry in entries {
        if let Some(pronunciation) = preferred(&entry.pronunciations, corpus, |_| true) {
            groups.add(pronunciation.ipa.replace('/', ""), wordform(entry));
        }
    }

    groups.render(NO_PHONETICS, |ipa| format!("[{ipa}]"))
}

/// `[sound:…]` references, storing each recording once.
pub async fn audio_html(
    entries: &[WordEntry],
    corpus: Corpus,
    format: AudioFormat,
    media: &dyn MediaStore,
) -> Result<String, MediaError> {
    let mut groups = Groups::default();

    for entry in entries {
        let has_audio = |p: &Pronunciation| !p.audio_url(format).is_empty();
        let Some(pronunciation) = preferred(&entry.pronunciations, corpus, has_audio) else {
            continue;
        };

        let url = pronunciation.audio_url(format);
        let name = file_name(url);
        if !groups.contains(name) {
            media.ensure(name, url).await?;
        }
        groups.add(name.to_string(), wordform(entry));
    }

    Ok(groups.render(NO_AUDIO, |name| format!("[sound:{name}]")))
}

fn limited<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

fn wordform(entry: &WordEntry) -> String {
    entry.wordform.clone().unwrap_or_else(|| "none".to_string())
}

fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// First pronunciation of the most preferred accent that has one.
fn preferred<F>(pronunciations: &[Pronunciation], corpus: Corpus, usable: F) -> Option<&Pronunciation>
where
    F: Fn(&Pronunciation) -> bool,
{
    corpus.prioritized_tags().into_iter().find_map(|tag| {
        pronunciations
            .iter()
            .find(|p| p.prefix == tag && usable(p))
    })
}

/// Keys in insertion order, each with the wordforms that share it.
#[derive(Default)]
struct Groups(Vec<(String, Vec<String>)>);

impl Groups {
    fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    fn add(&mut self, key: String, wordform: String) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, wordforms)) => wordforms.push(wordform),
            None => self.0.push((key, vec![wordform])),
        }
    }

    fn render<F>(&self, empty: &str, label: F) -> String
    where
        F: Fn(&str) -> String,
    {
        match self.0.as_slice() {
            [] => empty.to_string(),
            [(key, _)] => label(key),
            groups => groups
                .iter()
                .map(|(key, wordforms)| format!("{} - {}", label(key), wordforms.join(", ")))
                .collect::<Vec<_>>()
                .join("<br/>"),
        }
    }
}
