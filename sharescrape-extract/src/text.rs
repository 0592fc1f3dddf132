use scraper::ElementRef;

/// Whitespace as share pages have always been cleaned up: the Unicode space
/// separators and line terminators plus the BOM (U+FEFF), but not NEL (U+0085).
pub fn is_page_whitespace(c: char) -> bool {
    match c {
        '\u{feff}' => true,
        '\u{85}' => false,
        c => c.is_whitespace(),
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split(is_page_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip trailing whitespace only, leaving indentation and inner layout alone.
pub fn trim_end_whitespace(text: &str) -> &str {
    text.trim_end_matches(is_page_whitespace)
}

/// Concatenated text of all descendant text nodes, entities decoded.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}
