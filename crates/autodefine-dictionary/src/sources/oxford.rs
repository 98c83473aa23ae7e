use async_trait::async_trait;
use autodefine_core::dictionary::{
    Idiom, IdiomSense, OxfordLookup, Pronunciation, RelatedEntry, Sense, SenseGroup, VerbForms,
    WordEntry,
};
use kuchiki::NodeRef;

use crate::fetch::Fetcher;
use crate::html;
use crate::types::{Dictionary, LookupError};

const SEARCH_URL: &str = "https://www.oxfordlearnersdictionaries.com/search/english/";
const ENTRY_URL: &str = "https://www.oxfordlearnersdictionaries.com/definition/english/";

const PRONUNCIATION_PREFIXES: [(&str, &str); 2] = [(".phons_br", "BrE"), (".phons_n_am", "nAmE")];

/// Oxford Learner's Dictionaries scraper.
#[derive(Clone)]
pub struct OxfordDictionary {
    fetcher: Fetcher,
}

impl OxfordDictionary {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Best entry for a free-form query; the site redirects to it.
    async fn search(&self, word: &str) -> Result<WordEntry, LookupError> {
        let query = word.replace(' ', "-").to_lowercase();
        let page = self
            .fetcher
            .get_html(SEARCH_URL, &[("q", query.as_str())], word)
            .await?;
        parse_entry(&page, word)
    }

    async fn entry(&self, id: &str) -> Result<WordEntry, LookupError> {
        let url = format!("{ENTRY_URL}{id}");
        let page = self.fetcher.get_html(&url, &[], id).await?;
        parse_entry(&page, id)
    }
}

#[async_trait]
impl Dictionary for OxfordDictionary {
    type Entry = OxfordLookup;

    fn name(&self) -> &str {
        "Oxford Learner's Dictionaries"
    }

    /// Main entry plus every homonym listed under "All matches" with the same
    /// name. An unknown word gives an empty lookup.
    async fn lookup(&self, word: &str) -> Result<OxfordLookup, LookupError> {
        let main = match self.search(word).await {
            Ok(entry) => entry,
            Err(e) if e.is_not_found() => {
                tracing::debug!("Oxford: '{}' not found", word);
                return Ok(OxfordLookup::default());
            }
            Err(e) => return Err(e),
        };

        let name = main.name.to_lowercase();
        let related: Vec<String> = main
            .other_results
            .iter()
            .filter(|other| other.id != main.id && other.name.trim().to_lowercase() == name)
            .map(|other| other.id.clone())
            .collect();

        let idioms = main.idioms.clone();
        let mut entries = vec![main];

        for id in related {
            match self.entry(&id).await {
                Ok(entry) if entry.name.to_lowercase() == name => entries.push(entry),
                Ok(entry) => tracing::debug!("Oxford: skipping '{}' ({})", entry.name, id),
                Err(e) if e.is_not_found() => tracing::debug!("Oxford: entry {} not found", id),
                Err(e) => return Err(e),
            }
        }

        tracing::debug!("Oxford: {} entries for '{}'", entries.len(), word);
        Ok(OxfordLookup { entries, idioms })
    }
}

/// Parse an entry page. A page without a headword (e.g. a spelling
/// suggestion list) is `NotFound`.
pub fn parse_entry(page: &str, word: &str) -> Result<WordEntry, LookupError> {
    let document = html::parse(page);

    let name = html::select_first(&document, ".webtop .headword")
        .map(|node| html::collapsed_text(&node))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| LookupError::NotFound(word.to_string()))?;

    let id = html::select_first(&document, ".entry")
        .and_then(|node| html::attr(&node, "id"))
        .unwrap_or_else(|| word.to_string());

    let wordform = html::select_first(&document, ".webtop .pos")
        .map(|node| html::collapsed_text(&node))
        .filter(|pos| !pos.is_empty());

    Ok(WordEntry {
        id,
        name,
        wordform,
        pronunciations: parse_pronunciations(&document),
        definitions: parse_sense_groups(&document)?,
        verb_forms: parse_verb_forms(&document),
        idioms: parse_idioms(&document)?,
        other_results: parse_related(&document)?,
    })
}

fn parse_pronunciations(document: &NodeRef) -> Vec<Pronunciation> {
    let mut pronunciations = Vec::new();

    for (selector, prefix) in PRONUNCIATION_PREFIXES {
        let Some(phons) = html::select_first(document, &format!(".webtop {selector}")) else {
            continue;
        };
        let Some(ipa) = html::select_first(&phons, ".phon").map(|node| html::collapsed_text(&node))
        else {
            continue;
        };
        let sound = html::select_first(&phons, ".sound");
        let source = |name: &str| {
            sound
                .as_ref()
                .and_then(|node| html::attr(node, name))
                .unwrap_or_default()
        };

        pronunciations.push(Pronunciation {
            prefix: prefix.to_string(),
            ipa,
            mp3: source("data-src-mp3"),
            ogg: source("data-src-ogg"),
        });
    }

    pronunciations
}

/// Senses outside the idiom section, grouped by their shortcut heading.
fn parse_sense_groups(document: &NodeRef) -> Result<Vec<SenseGroup>, LookupError> {
    let mut groups: Vec<SenseGroup> = Vec::new();

    for node in html::select_all(document, "li.sense")? {
        if html::has_ancestor_with_class(&node, "idioms") {
            continue;
        }

        let namespace = node
            .ancestors()
            .find(|ancestor| html::has_class(ancestor, "shcut-g"))
            .and_then(|group| html::select_first(&group, ".shcut"))
            .map(|heading| html::collapsed_text(&heading));

        let sense = parse_sense(&node)?;
        match groups.last_mut() {
            Some(group) if group.namespace == namespace => group.senses.push(sense),
            _ => groups.push(SenseGroup {
                namespace,
                senses: vec![sense],
            }),
        }
    }

    Ok(groups)
}

fn parse_sense(node: &NodeRef) -> Result<Sense, LookupError> {
    let description = html::select_first(node, ".def")
        .map(|def| html::collapsed_text(&def))
        .filter(|def| !def.is_empty());

    let examples = html::select_all(node, ".examples .x")?
        .iter()
        .map(html::collapsed_text)
        .collect();

    let extra_examples = html::select_all(node, ".unbox .unx")?
        .iter()
        .map(html::collapsed_text)
        .collect();

    Ok(Sense {
        description,
        examples,
        extra_examples,
    })
}

fn parse_verb_forms(document: &NodeRef) -> Option<VerbForms> {
    let table = html::select_first(document, ".verb_forms_table")?;

    let form = |key: &str| {
        let cell = html::select_first(&table, &format!("tr[data-key=\"{key}\"] .verb_form"))?;
        let mut text = html::collapsed_text(&cell);
        if let Some(prefix) = html::select_first(&cell, ".vf_prefix") {
            text = text.replacen(&html::collapsed_text(&prefix), "", 1);
        }
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    };

    let forms = VerbForms {
        third_person: form("thirdps"),
        past: form("past"),
        past_participle: form("pastpart"),
        present_participle: form("prespart"),
    };

    (!forms.is_empty()).then_some(forms)
}

fn parse_idioms(document: &NodeRef) -> Result<Vec<Idiom>, LookupError> {
    let mut idioms = Vec::new();

    for group in html::select_all(document, ".idioms .idm-g")? {
        let Some(name) = html::select_first(&group, ".idm").map(|node| html::collapsed_text(&node))
        else {
            continue;
        };

        let mut definitions = Vec::new();
        for node in html::select_all(&group, "li.sense")? {
            let sense = parse_sense(&node)?;
            definitions.push(IdiomSense {
                description: sense.description.unwrap_or_default(),
                examples: sense.examples,
            });
        }

        idioms.push(Idiom { name, definitions });
    }

    Ok(idioms)
}

/// Entries listed under "All matches" in the side column.
fn parse_related(document: &NodeRef) -> Result<Vec<RelatedEntry>, LookupError> {
    let mut related = Vec::new();

    for title in html::select_all(document, "#relatedentries dt")? {
        if html::collapsed_text(&title) != "All matches" {
            continue;
        }
        let Some(list) = html::following_elements(&title).find(|node| html::is_tag(node, "dd"))
        else {
            continue;
        };

        for link in html::select_all(&list, "li a")? {
            let Some(id) = html::attr(&link, "href")
                .and_then(|href| href.trim_end_matches('/').rsplit('/').next().map(str::to_string))
            else {
                continue;
            };

            let wordform = html::select_first(&link, ".pos").map(|pos| html::collapsed_text(&pos));
            let mut name = html::collapsed_text(&link);
            if let Some(pos) = &wordform {
                name = name.trim_end_matches(pos.as_str()).trim().to_string();
            }

            related.push(RelatedEntry { id, name, wordform });
        }
    }

    Ok(related)
}
