use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<.*?>").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Drop markup tags and turn `&nbsp;` into plain spaces.
pub fn clean_html(raw: &str) -> String {
    TAG_RE.replace_all(raw, "").replace("&nbsp;", " ")
}

pub trait Preprocessor {
    // Default English source-field preprocessor
    fn process(&self, text: &str) -> String {
        let text = clean_html(text);

        // NFKC folds more than spacing: fullwidth letters and ligatures become
        // plain ASCII, so the cleaned word written back may differ from the typed one
        let text: String = text.nfkc().collect();

        WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
