use async_trait::async_trait;
use autodefine_core::dictionary::{
    LabanEntry, LabanIdiom, LabanSense, LabanWordform, TranslatedExample,
};
use kuchiki::NodeRef;

use crate::fetch::Fetcher;
use crate::html;
use crate::types::{Dictionary, LookupError};

const FIND_URL: &str = "https://dict.laban.vn/find";

const CONTENT: &str = ".slide_content:not(.hidden) #content_selectable";
const WORDFORM_HEADER: &str = "div.bg-grey.bold.font-large.m-top20";
const IDIOM_HEADER: &str = "div.bold.dot-blue.m-top15";

/// Siblings scanned after a wordform header.
const WORDFORM_SIBLING_LIMIT: usize = 20;

/// English-Vietnamese dictionary at dict.laban.vn.
#[derive(Clone)]
pub struct LabanDictionary {
    fetcher: Fetcher,
}

impl LabanDictionary {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Dictionary for LabanDictionary {
    type Entry = LabanEntry;

    fn name(&self) -> &str {
        "Laban"
    }

    async fn lookup(&self, word: &str) -> Result<LabanEntry, LookupError> {
        let page = self
            .fetcher
            .get_html(FIND_URL, &[("type", "1"), ("query", word)], word)
            .await?;

        let entry = parse_entry(&page)?;
        tracing::debug!(
            "Laban: {} wordforms, {} idioms for '{}'",
            entry.definitions.len(),
            entry.idioms.len(),
            word
        );
        Ok(entry)
    }
}

pub fn parse_entry(page: &str) -> Result<LabanEntry, LookupError> {
    let document = html::parse(page);
    let mut entry = LabanEntry::default();

    for content in html::select_all(&document, CONTENT)? {
        for header in html::select_all(&content, WORDFORM_HEADER)? {
            entry.definitions.push(parse_wordform(&header));
        }
        for header in html::select_all(&content, IDIOM_HEADER)? {
            entry.idioms.push(parse_idiom(&header));
        }
    }

    Ok(entry)
}

/// Collects senses while the caller walks a run of siblings.
#[derive(Default)]
struct SenseBuilder {
    senses: Vec<LabanSense>,
    current: LabanSense,
}

impl SenseBuilder {
    fn start(&mut self, description: String) {
        let previous = std::mem::replace(
            &mut self.current,
            LabanSense {
                description,
                examples: Vec::new(),
            },
        );
        self.keep(previous);
    }

    fn example(&mut self, node: &NodeRef) {
        let translation = html::following_elements(node)
            .find(|sibling| html::is_tag(sibling, "div") && html::has_class(sibling, "margin25"))
            .map(|sibling| html::stripped_text(&sibling, ""))
            .unwrap_or_default();

        self.current.examples.push(TranslatedExample {
            example: html::stripped_text(node, " "),
            translation,
        });
    }

    fn keep(&mut self, sense: LabanSense) {
        if !sense.description.is_empty() {
            self.senses.push(sense);
        }
    }

    fn finish(mut self) -> Vec<LabanSense> {
        let last = std::mem::take(&mut self.current);
        self.keep(last);
        self.senses
    }
}

fn parse_wordform(header: &NodeRef) -> LabanWordform {
    let mut builder = SenseBuilder::default();

    let siblings = html::following_elements(header)
        .filter(|sibling| html::is_tag(sibling, "div"))
        .take(WORDFORM_SIBLING_LIMIT);

    for sibling in siblings {
        if is_wordform_header(&sibling) {
            break;
        }
        if html::has_class(&sibling, "green") && html::has_class(&sibling, "bold") {
            builder.start(html::stripped_text(&sibling, ""));
        } else if html::has_class(&sibling, "color-light-blue") {
            builder.example(&sibling);
        }
    }

    LabanWordform {
        wordform: html::stripped_text(header, ""),
        definitions: builder.finish(),
    }
}

fn parse_idiom(header: &NodeRef) -> LabanIdiom {
    let mut builder = SenseBuilder::default();

    for sibling in html::following_elements(header) {
        if html::has_class(&sibling, "grey") && html::has_class(&sibling, "bold") {
            builder.start(html::stripped_text(&sibling, ""));
        } else if html::has_class(&sibling, "color-light-blue") {
            builder.example(&sibling);
        } else if !html::has_class(&sibling, "margin25") {
            break;
        }
    }

    LabanIdiom {
        name: html::stripped_text(header, ""),
        definitions: builder.finish(),
    }
}

fn is_wordform_header(node: &NodeRef) -> bool {
    ["bg-grey", "bold", "font-large", "m-top20"]
        .iter()
        .all(|class| html::has_class(node, class))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOVE: &str = r##"
<html><body>
<div class="slide_content hidden"><div id="content_selectable">
  <div class="bg-grey bold font-large m-top20">Ignored</div>
  <div class="green bold margin25 m-top15">không được hiển thị</div>
</div></div>
<div class="slide_content"><div id="content_selectable" class="content">
  <div class="bg-grey bold font-large m-top20"><span>Danh từ</span></div>
  <div class="green bold margin25 m-top15">tình yêu, tình thương</div>
  <div class="color-light-blue margin25 m-top15"><a href="#">a mother's</a> love for her children</div>
  <div class="margin25">tình thương của mẹ đối với con cái</div>
  <div class="color-light-blue margin25 m-top15">love of [ <i>one's</i> ] country</div>
  <div class="margin25">tình yêu đất nước</div>
  <div class="green bold margin25 m-top15">(tôn giáo) lòng nhân từ của Chúa</div>
  <div class="green bold margin25 m-top15"></div>
  <div class="bg-grey bold font-large m-top20">Động từ</div>
  <div class="green bold margin25 m-top15">yêu, yêu thương</div>
  <div class="color-light-blue margin25 m-top15">love one another</div>
  <div class="margin25">yêu thương nhau</div>
  <div class="bold dot-blue m-top15">fall in love [with somebody]</div>
  <div class="grey bold margin25">phải lòng ai</div>
  <div class="bold dot-blue m-top15">give (send) somebody one's love</div>
  <div class="grey bold margin25">gửi lời chào (tới ai)</div>
  <div class="color-light-blue margin25 m-top15">please give your sister my love</div>
  <div class="margin25">xin cho gửi lời chào chị anh nhé</div>
  <div class="bold dot-blue m-top15">a labour of love</div>
  <div class="bg-grey m-top20">Từ liên quan</div>
</div></div>
</body></html>
"##;

    #[test]
    fn test_parse_wordforms() {
        let entry = parse_entry(LOVE).unwrap();
        assert_eq!(entry.definitions.len(), 2);

        let noun = &entry.definitions[0];
        assert_eq!(noun.wordform, "Danh từ");
        // the empty sense is dropped
        assert_eq!(noun.definitions.len(), 2);
        assert_eq!(noun.definitions[0].description, "tình yêu, tình thương");
        assert_eq!(
            noun.definitions[0].examples,
            vec![
                TranslatedExample {
                    example: "a mother's love for her children".to_string(),
                    translation: "tình thương của mẹ đối với con cái".to_string(),
                },
                TranslatedExample {
                    example: "love of [ one's ] country".to_string(),
                    translation: "tình yêu đất nước".to_string(),
                },
            ]
        );
        assert!(noun.definitions[1].examples.is_empty());

        let verb = &entry.definitions[1];
        assert_eq!(verb.wordform, "Động từ");
        assert_eq!(verb.definitions.len(), 1);
        assert_eq!(verb.definitions[0].examples[0].translation, "yêu thương nhau");
    }

    #[test]
    fn test_parse_idioms_skip_translations() {
        let entry = parse_entry(LOVE).unwrap();
        let names: Vec<_> = entry.idioms.iter().map(|idiom| idiom.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "fall in love [with somebody]",
                "give (send) somebody one's love",
                "a labour of love",
            ]
        );

        assert_eq!(entry.idioms[0].definitions[0].description, "phải lòng ai");
        let give = &entry.idioms[1].definitions[0];
        assert_eq!(give.examples.len(), 1);
        assert_eq!(give.examples[0].example, "please give your sister my love");
        assert!(entry.idioms[2].definitions.is_empty());
    }

    #[test]
    fn test_empty_page_has_no_entries() {
        let entry = parse_entry("<html><body><p>Không tìm thấy</p></body></html>").unwrap();
        assert!(entry.definitions.is_empty());
        assert!(entry.idioms.is_empty());
    }
}
