//! Snippet cleanup
//!
//! MediaWiki wraps matched terms in `<span class="searchmatch">` and escapes
//! the rest of the excerpt. Only those two literal fragments are removed; any
//! other markup is left as-is.

const HIGHLIGHT_OPEN: &str = r#"<span class="searchmatch">"#;
const HIGHLIGHT_CLOSE: &str = "</span>";

/// Appended to every snippet, whether or not the wiki actually truncated it.
pub const ELLIPSIS: &str = "...";

/// Remove the search highlight spans, leaving the highlighted text in place
pub fn strip_highlight(snippet: &str) -> String {
    snippet.replace(HIGHLIGHT_OPEN, "").replace(HIGHLIGHT_CLOSE, "")
}

/// Strip highlight markup, decode HTML entities and append [`ELLIPSIS`]
pub fn clean_snippet(snippet: &str) -> String {
    let stripped = strip_highlight(snippet);
    let mut cleaned = html_escape::decode_html_entities(&stripped).into_owned();
    cleaned.push_str(ELLIPSIS);
    cleaned
}
