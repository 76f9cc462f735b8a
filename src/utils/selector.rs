//! CSS selector and element text utilities.

use scraper::{ElementRef, Selector};

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Returns the element's text with NBSPs replaced and whitespace collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_parse_selector_unsafe_accepts_child_combinators() {
        let selector = parse_selector_unsafe(".initial > ul > li > p", "test");
        let html = Html::parse_fragment("<div class=\"initial\"><ul><li><p>x</p></li></ul></div>");
        assert_eq!(html.select(&selector).count(), 1);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_parse_selector_unsafe_panics_on_invalid() {
        parse_selector_unsafe("p[", "test");
    }

    #[test]
    fn test_element_text_normalizes_whitespace() {
        let html = Html::parse_fragment("<p>  Saburtalo\u{a0}District:\n   <b>Pekini</b>  Ave </p>");
        let selector = parse_selector_unsafe("p", "test");
        let p = html.select(&selector).next().expect("p element");
        assert_eq!(element_text(p), "Saburtalo District: Pekini Ave");
    }
}
