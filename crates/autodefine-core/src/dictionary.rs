use serde::{Deserialize, Serialize};

/// Pronunciation of a headword in one accent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    /// Accent tag, "BrE" or "nAmE"
    pub prefix: String,
    pub ipa: String,
    pub mp3: String,
    pub ogg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbForms {
    pub third_person: Option<String>,
    pub past: Option<String>,
    pub past_participle: Option<String>,
    pub present_participle: Option<String>,
}

impl VerbForms {
    /// Known forms in declared order: thirdps, past, pastpart, prespart.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            &self.third_person,
            &self.past,
            &self.past_participle,
            &self.present_participle,
        ]
        .into_iter()
        .filter_map(|form| form.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub description: Option<String>,
    pub examples: Vec<String>,
    pub extra_examples: Vec<String>,
}

/// Senses grouped under an optional shortcut heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseGroup {
    pub namespace: Option<String>,
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdiomSense {
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    pub name: String,
    pub definitions: Vec<IdiomSense>,
}

/// Another entry listed next to the current one, e.g. a homonym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntry {
    pub id: String,
    pub name: String,
    pub wordform: Option<String>,
}

/// One learner's dictionary entry, i.e. one part of speech of a headword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub name: String,
    pub wordform: Option<String>,
    pub pronunciations: Vec<Pronunciation>,
    pub definitions: Vec<SenseGroup>,
    pub verb_forms: Option<VerbForms>,
    pub idioms: Vec<Idiom>,
    pub other_results: Vec<RelatedEntry>,
}

impl WordEntry {
    pub fn senses(&self) -> impl Iterator<Item = &Sense> {
        self.definitions.iter().flat_map(|group| group.senses.iter())
    }
}

/// Everything found for a word in the learner's dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OxfordLookup {
    /// Main entry first, then same-name homonyms
    pub entries: Vec<WordEntry>,
    /// Idioms of the main entry
    pub idioms: Vec<Idiom>,
}

impl OxfordLookup {
    /// Headword of the main entry
    pub fn name(&self) -> Option<&str> {
        self.entries.first().map(|entry| entry.name.as_str())
    }

    /// Verb forms of all entries, in entry order
    pub fn verb_forms(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| entry.verb_forms.as_ref())
            .flat_map(|forms| forms.iter().map(str::to_string))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedExample {
    pub example: String,
    pub translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabanSense {
    pub description: String,
    pub examples: Vec<TranslatedExample>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabanWordform {
    pub wordform: String,
    pub definitions: Vec<LabanSense>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabanIdiom {
    pub name: String,
    pub definitions: Vec<LabanSense>,
}

/// English-Vietnamese bilingual entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabanEntry {
    pub definitions: Vec<LabanWordform>,
    pub idioms: Vec<LabanIdiom>,
}

/// Accent whose pronunciations are preferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corpus {
    #[default]
    American,
    British,
}

impl Corpus {
    pub fn prioritized_tags(&self) -> [&'static str; 2] {
        match self {
            Corpus::American => ["nAmE", "BrE"],
            Corpus::British => ["BrE", "nAmE"],
        }
    }
}

impl std::str::FromStr for Corpus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "american" => Ok(Corpus::American),
            "british" => Ok(Corpus::British),
            other => Err(format!("Unknown corpus {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Ogg,
}

impl Pronunciation {
    pub fn audio_url(&self, format: AudioFormat) -> &str {
        match format {
            AudioFormat::Mp3 => &self.mp3,
            AudioFormat::Ogg => &self.ogg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_forms_keep_declared_order() {
        let forms = VerbForms {
            third_person: Some("runs".into()),
            past: Some("ran".into()),
            past_participle: None,
            present_participle: Some("running".into()),
        };
        assert_eq!(forms.iter().collect::<Vec<_>>(), vec!["runs", "ran", "running"]);
        assert!(VerbForms::default().is_empty());
    }

    #[test]
    fn test_lookup_collects_verb_forms_of_all_entries() {
        let lookup = OxfordLookup {
            entries: vec![
                WordEntry {
                    name: "love".into(),
                    ..WordEntry::default()
                },
                WordEntry {
                    name: "love".into(),
                    verb_forms: Some(VerbForms {
                        third_person: Some("loves".into()),
                        past: Some("loved".into()),
                        ..VerbForms::default()
                    }),
                    ..WordEntry::default()
                },
            ],
            idioms: vec![],
        };
        assert_eq!(lookup.name(), Some("love"));
        assert_eq!(lookup.verb_forms(), vec!["loves", "loved"]);
    }

    #[test]
    fn test_corpus_priority() {
        assert_eq!(Corpus::American.prioritized_tags(), ["nAmE", "BrE"]);
        assert_eq!("British".parse::<Corpus>(), Ok(Corpus::British));
        assert!("Australian".parse::<Corpus>().is_err());
    }
}
