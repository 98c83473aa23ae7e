use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use crate::error::HighlightError;
use crate::tokenize::{TokenSpan, collect_spans, tokenize};

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

fn default_replace_by() -> String {
    "#$#".to_string()
}

fn default_placeholder() -> char {
    '$'
}

fn default_not_replaced_marker() -> String {
    r#"<font color="red">Word_not_replaced</font>"#.to_string()
}

/// How matched tokens are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Marker template, every `placeholder` is substituted with the token
    #[serde(default = "default_replace_by")]
    pub replace_by: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: char,
    /// Prepended to flagged sentences in which nothing was replaced
    #[serde(default = "default_not_replaced_marker")]
    pub not_replaced_marker: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            replace_by: default_replace_by(),
            placeholder: default_placeholder(),
            not_replaced_marker: default_not_replaced_marker(),
        }
    }
}

impl HighlightConfig {
    pub fn replacement(&self, token: &str) -> String {
        self.replace_by.replace(self.placeholder, token)
    }
}

/// Matching key of a token: lower-cased, then stemmed.
pub fn normalize(token: &str) -> String {
    STEMMER.stem(&token.to_lowercase()).into_owned()
}

/// A single word form to search for, as a sequence of normalized tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchTarget(Vec<String>);

impl MatchTarget {
    /// `None` when `words` contains no token at all.
    pub fn parse(words: &str) -> Option<Self> {
        let forms: Vec<String> = tokenize(words).into_iter().map(normalize).collect();
        (!forms.is_empty()).then_some(Self(forms))
    }

    pub fn forms(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches_at(&self, spans: &[TokenSpan<'_>], position: usize) -> bool {
        let rest = &spans[position..];
        rest.len() >= self.0.len()
            && self
                .0
                .iter()
                .zip(rest)
                .all(|(form, span)| normalize(span.text) == *form)
    }
}

/// Ordered, duplicate-free set of targets.
///
/// Order matters: each target rewrites the output of the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTargets(Vec<MatchTarget>);

impl MatchTargets {
    /// Build targets from the headword followed by its inflections.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut targets: Vec<MatchTarget> = Vec::new();
        for target in words.into_iter().filter_map(|w| MatchTarget::parse(w.as_ref())) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        Self(targets)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchTarget> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mark every occurrence of any target in `sentence`.
///
/// Returns whether anything was replaced and the rewritten sentence. With
/// `highlight` set, a sentence in which nothing matched gets the
/// not-replaced marker in front.
pub fn highlight(
    targets: &MatchTargets,
    sentence: &str,
    highlight: bool,
    config: &HighlightConfig,
) -> Result<(bool, String), HighlightError> {
    if targets.is_empty() {
        return Ok((false, sentence.to_string()));
    }

    let mut replaced_anything = false;
    let mut current = sentence.to_string();

    for target in targets.iter() {
        let spans = collect_spans(&current)?;
        let (replaced, rewritten) = rewrite(&current, &spans, target, config)?;
        replaced_anything |= replaced;
        current = rewritten;
    }

    if !replaced_anything && highlight {
        current = format!("{} {}", config.not_replaced_marker, current);
    }

    Ok((replaced_anything, current))
}

/// One left-to-right pass for a single target.
fn rewrite(
    source: &str,
    spans: &[TokenSpan<'_>],
    target: &MatchTarget,
    config: &HighlightConfig,
) -> Result<(bool, String), HighlightError> {
    let mut out = Rewriter::new(source);
    let mut replaced = false;
    let mut position = 0;

    while position < spans.len() {
        if target.matches_at(spans, position) {
            for span in &spans[position..position + target.len()] {
                out.push(span, &config.replacement(span.text))?;
            }
            position += target.len();
            replaced = true;
        } else {
            let span = &spans[position];
            out.push(span, span.text)?;
            position += 1;
        }
    }

    Ok((replaced, out.finish()))
}

struct Rewriter<'a> {
    source: &'a str,
    result: String,
    written_chars: usize,
    /// Characters removed by replacements so far, negative when they grew
    delta: isize,
    /// Byte offset in `source` just past the last emitted token
    consumed: usize,
}

impl<'a> Rewriter<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            result: String::with_capacity(source.len()),
            written_chars: 0,
            delta: 0,
            consumed: 0,
        }
    }

    fn push(&mut self, span: &TokenSpan<'_>, text: &str) -> Result<(), HighlightError> {
        let width = span.char_start as isize - self.written_chars as isize - self.delta;
        let gap = self
            .source
            .get(self.consumed..span.start)
            .filter(|gap| width >= 0 && gap.chars().count() == width as usize)
            .ok_or_else(|| HighlightError::NegativeGap {
                token: span.text.to_string(),
                width,
            })?;

        let text_chars = text.chars().count();
        self.result.push_str(gap);
        self.result.push_str(text);
        self.written_chars += width as usize + text_chars;
        self.delta += span.text.chars().count() as isize - text_chars as isize;
        self.consumed = span.end;

        Ok(())
    }

    fn finish(mut self) -> String {
        self.result.push_str(&self.source[self.consumed..]);
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(targets: &[&str], sentence: &str, flag: bool) -> (bool, String) {
        let targets = MatchTargets::new(targets.iter().copied());
        highlight(&targets, sentence, flag, &HighlightConfig::default()).unwrap()
    }

    #[test]
    fn test_single_word_is_marked() {
        assert_eq!(
            run(&["love"], "a mother's love for her children", true),
            (true, "a mother's #love# for her children".to_string())
        );
    }

    #[test]
    fn test_case_and_inflections_match() {
        let (replaced, out) = run(&["love"], "Love is loved by the loving ones who loves", false);
        assert!(replaced);
        assert_eq!(out, "#Love# is #loved# by the #loving# ones who #loves#");
    }

    #[test]
    fn test_ied_and_ying_forms_fold_into_the_headword() {
        let (replaced, out) = run(&["die"], "He dies and she died, dying slowly", true);
        assert!(replaced);
        assert_eq!(out, "He #dies# and she #died#, #dying# slowly");
    }

    #[test]
    fn test_normalize_lowercases_before_stemming() {
        assert_eq!(normalize("Dying"), "die");
        assert_eq!(normalize("LOVES"), normalize("love"));
    }

    #[test]
    fn test_irregular_form_matches_through_verb_form_target() {
        let (replaced, out) = run(&["run", "runs", "ran", "run", "running"], "he ran and runs", false);
        assert!(replaced);
        assert_eq!(out, "he #ran# and #runs#");
    }

    #[test]
    fn test_phrase_tokens_are_marked_independently() {
        let (replaced, out) = run(&["give up"], "please give up now", false);
        assert!(replaced);
        assert_eq!(out, "please #give# #up# now");
    }

    #[test]
    fn test_phrase_running_out_of_tokens_is_no_match() {
        assert_eq!(
            run(&["give up"], "never give", false),
            (false, "never give".to_string())
        );
    }

    #[test]
    fn test_no_match_returns_sentence_verbatim() {
        for sentence in ["a   love story", "  tabs\tand trailing  ", "what a day !"] {
            assert_eq!(run(&["zebra"], sentence, false), (false, sentence.to_string()));
        }
    }

    #[test]
    fn test_not_replaced_marker_only_with_flag() {
        let (replaced, out) = run(&["zebra"], "a love story", true);
        assert!(!replaced);
        assert_eq!(out, r#"<font color="red">Word_not_replaced</font> a love story"#);

        let (_, out) = run(&["love"], "a love story", true);
        assert!(!out.starts_with("<font"));
    }

    #[test]
    fn test_empty_target_set_leaves_sentence_alone() {
        assert_eq!(run(&[], "a love story", true), (false, "a love story".to_string()));
        assert_eq!(run(&["", "  "], "a love story", true), (false, "a love story".to_string()));
    }

    #[test]
    fn test_output_length_accounts_only_for_replacements() {
        let sentence = "their  love has cooled, love  of [ one's ] country";
        let (_, out) = run(&["love"], sentence, false);
        let config = HighlightConfig::default();
        let grown: usize = 2 * (config.replacement("love").len() - "love".len());
        assert_eq!(out.chars().count(), sentence.chars().count() + grown);
    }

    #[test]
    fn test_whitespace_around_replacements_is_kept() {
        let (_, out) = run(&["love"], "  love   love\u{a0}love ", false);
        assert_eq!(out, "  #love#   #love#\u{a0}#love# ");
    }

    #[test]
    fn test_targets_apply_in_order_to_rewritten_text() {
        let config = HighlightConfig {
            replace_by: "<b>$</b>".to_string(),
            ..HighlightConfig::default()
        };
        let targets = MatchTargets::new(["read", "b"]);
        let (replaced, out) = highlight(&targets, "I read books", false, &config).unwrap();
        assert!(replaced);
        // the second target sees the markup inserted by the first
        assert_eq!(out, "I <<b>b</b>>read</<b>b</b>> books");
    }

    #[test]
    fn test_duplicate_targets_are_collapsed() {
        let targets = MatchTargets::new(["love", "loves", "Loved", "love it"]);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets.iter().next().unwrap().forms(), ["love"]);
    }

    #[test]
    fn test_custom_template_and_placeholder() {
        let config = HighlightConfig {
            replace_by: "[%]".to_string(),
            placeholder: '%',
            ..HighlightConfig::default()
        };
        let targets = MatchTargets::new(["love"]);
        let (_, out) = highlight(&targets, "my love.", false, &config).unwrap();
        assert_eq!(out, "my [love].");
    }

    #[test]
    fn test_overlapping_spans_are_a_negative_gap() {
        let source = "love love";
        let mut spans = collect_spans(source).unwrap();
        spans[1] = spans[0];
        let target = MatchTarget::parse("love").unwrap();

        let err = rewrite(source, &spans, &target, &HighlightConfig::default()).unwrap_err();
        assert!(matches!(err, HighlightError::NegativeGap { width, .. } if width < 0));
    }
}
