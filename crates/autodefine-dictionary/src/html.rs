//! Small helpers over the kuchiki DOM used by the scrapers.

use kuchiki::NodeRef;
use kuchiki::traits::*;

use crate::types::LookupError;

pub fn parse(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// All elements under `node` matching `selector`, in document order.
pub fn select_all(node: &NodeRef, selector: &str) -> Result<Vec<NodeRef>, LookupError> {
    let matches = node
        .select(selector)
        .map_err(|_| LookupError::Parse(format!("invalid selector '{selector}'")))?;

    Ok(matches.map(|element| element.as_node().clone()).collect())
}

pub fn select_first(node: &NodeRef, selector: &str) -> Option<NodeRef> {
    node.select_first(selector)
        .ok()
        .map(|element| element.as_node().clone())
}

/// Text pieces below `node`, each trimmed, empty ones dropped, joined by `separator`.
pub fn stripped_text(node: &NodeRef, separator: &str) -> String {
    node.descendants()
        .text_nodes()
        .map(|text| text.borrow().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Whole text content with runs of whitespace collapsed.
pub fn collapsed_text(node: &NodeRef) -> String {
    node.text_contents()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()
        .and_then(|element| element.attributes.borrow().get(name).map(str::to_string))
}

pub fn has_class(node: &NodeRef, class: &str) -> bool {
    attr(node, "class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.as_element()
        .is_some_and(|element| &*element.name.local == tag)
}

pub fn has_ancestor_with_class(node: &NodeRef, class: &str) -> bool {
    node.ancestors().any(|ancestor| has_class(&ancestor, class))
}

/// Element siblings after `node`.
pub fn following_elements(node: &NodeRef) -> impl Iterator<Item = NodeRef> {
    node.following_siblings()
        .filter(|sibling| sibling.as_element().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripped_text_joins_pieces() {
        let doc = parse("<div id='x'> love <b>of</b> [ <i>one's</i> ] country </div>");
        let div = select_first(&doc, "#x").unwrap();
        assert_eq!(stripped_text(&div, " "), "love of [ one's ] country");
        assert_eq!(stripped_text(&div, ""), "loveof[one's] country");
        assert_eq!(collapsed_text(&div), "love of [ one's ] country");
    }

    #[test]
    fn test_classes_and_siblings() {
        let doc = parse(
            "<div id='root'><div class='a b'>1</div>text<span class='b'>2</span><div>3</div></div>",
        );
        let first = select_first(&doc, ".a").unwrap();
        assert!(has_class(&first, "b"));
        assert!(!has_class(&first, "c"));

        let siblings: Vec<_> = following_elements(&first).collect();
        assert_eq!(siblings.len(), 2);
        assert!(is_tag(&siblings[0], "span"));
        assert!(is_tag(&siblings[1], "div"));
        assert!(!has_ancestor_with_class(&siblings[1], "a"));
    }
}
