use lazy_static::lazy_static;
use regex::Regex;

use crate::error::HighlightError;

lazy_static! {
    static ref WORDPUNCT_RE: Regex = Regex::new(r"\w+|[^\w\s]+").unwrap();
}

/// Split text into runs of word characters and runs of punctuation.
///
/// "don't stop/go" becomes `["don", "'", "t", "stop", "/", "go"]`.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORDPUNCT_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// A token together with its position in the source string.
///
/// `start..end` are byte offsets, `char_start..char_end` the same span counted
/// in characters. Both are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub char_start: usize,
    pub char_end: usize,
}

/// Locates tokens in their source by searching forward from the end of the
/// previous token, so repeated substrings resolve in order.
///
/// Single pass. Stops after the first error.
pub struct TokenSpans<'a, I> {
    source: &'a str,
    tokens: I,
    offset: usize,
    char_offset: usize,
    failed: bool,
}

impl<'a, I> TokenSpans<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn new(source: &'a str, tokens: I) -> Self {
        Self {
            source,
            tokens,
            offset: 0,
            char_offset: 0,
            failed: false,
        }
    }

    fn locate(&mut self, token: &'a str) -> Result<TokenSpan<'a>, HighlightError> {
        let rest = &self.source[self.offset..];
        let Some(relative) = rest.find(token) else {
            return Err(HighlightError::SpanMismatch {
                token: token.to_string(),
                start: self.offset,
                found: rest.chars().take(token.chars().count()).collect(),
            });
        };

        let start = self.offset + relative;
        let end = start + token.len();
        let found = self.source.get(start..end).unwrap_or_default();
        if found != token {
            return Err(HighlightError::SpanMismatch {
                token: token.to_string(),
                start,
                found: found.to_string(),
            });
        }

        let char_start = self.char_offset + rest[..relative].chars().count();
        let char_end = char_start + token.chars().count();

        self.offset = end;
        self.char_offset = char_end;

        Ok(TokenSpan {
            text: token,
            start,
            end,
            char_start,
            char_end,
        })
    }
}

impl<'a, I> Iterator for TokenSpans<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = Result<TokenSpan<'a>, HighlightError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let token = self.tokens.next()?;
        let span = self.locate(token);
        self.failed = span.is_err();
        Some(span)
    }
}

/// Lazily tokenize `text` and pair every token with its span.
pub fn token_spans(text: &str) -> TokenSpans<'_, impl Iterator<Item = &str>> {
    TokenSpans::new(text, WORDPUNCT_RE.find_iter(text).map(|m| m.as_str()))
}

/// Materialize all spans of `text` for positional access.
pub fn collect_spans(text: &str) -> Result<Vec<TokenSpan<'_>>, HighlightError> {
    token_spans(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(
            tokenize("we'd love you to come/go!"),
            vec!["we", "'", "d", "love", "you", "to", "come", "/", "go", "!"]
        );
    }

    #[test]
    fn test_empty_string_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert_eq!(token_spans("").count(), 0);
        assert!(collect_spans("   ").unwrap().is_empty());
    }

    #[test]
    fn test_spans_rebuild_source() {
        let text = "  a love   story, of love.";
        let spans = collect_spans(text).unwrap();

        let mut rebuilt = String::new();
        let mut last = 0;
        for span in &spans {
            assert_eq!(&text[span.start..span.end], span.text);
            rebuilt.push_str(&text[last..span.start]);
            rebuilt.push_str(span.text);
            last = span.end;
        }
        rebuilt.push_str(&text[last..]);

        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_repeated_tokens_resolve_in_order() {
        let spans = collect_spans("love love").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 4));
        assert_eq!((spans[1].start, spans[1].end), (5, 9));
    }

    #[test]
    fn test_char_offsets_differ_from_bytes_after_multibyte_text() {
        let spans = collect_spans("tình yêu love").unwrap();
        let love = spans.last().unwrap();
        assert_eq!(love.text, "love");
        assert_eq!(love.char_start, 9);
        assert_eq!(love.char_end, 13);
        assert!(love.start > love.char_start);
    }

    #[test]
    fn test_unlocatable_token_is_a_span_mismatch() {
        let mut spans = TokenSpans::new("give up", ["give", "down", "up"].into_iter());

        assert!(spans.next().unwrap().is_ok());
        let err = spans.next().unwrap().unwrap_err();
        assert!(matches!(err, HighlightError::SpanMismatch { ref token, .. } if token == "down"));
        assert!(spans.next().is_none());
    }
}
