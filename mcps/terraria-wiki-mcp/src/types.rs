//! Wire and display types
//!
//! The `Wiki*`/`SearchItem` types mirror the MediaWiki `list=search` JSON
//! payload. The display types are what a launcher host renders.

use serde::{Deserialize, Serialize};

// ============================================================================
// MediaWiki API response types
// ============================================================================

/// Top-level `action=query&list=search` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiSearchResponse {
    #[serde(default)]
    pub batchcomplete: Option<String>,
    /// Continuation marker; parsed for diagnostics, never followed
    #[serde(default, rename = "continue")]
    pub continue_info: Option<ContinueInfo>,
    #[serde(default)]
    pub query: Option<QueryInfo>,
}

impl WikiSearchResponse {
    /// The matched items, or `None` when the wiki reported no matches.
    ///
    /// A missing `query`, a missing or `null` `search` array, and an empty
    /// array are all treated the same.
    pub fn items(&self) -> Option<&[SearchItem]> {
        self.query
            .as_ref()
            .and_then(|q| q.search.as_deref())
            .filter(|items| !items.is_empty())
    }

    /// Total hits reported by the wiki, if present
    pub fn total_hits(&self) -> Option<u64> {
        self.query
            .as_ref()
            .and_then(|q| q.searchinfo.as_ref())
            .map(|info| info.totalhits)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContinueInfo {
    #[serde(default)]
    pub sroffset: Option<u32>,
    #[serde(default, rename = "continue")]
    pub continue_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryInfo {
    #[serde(default)]
    pub searchinfo: Option<SearchInfo>,
    #[serde(default)]
    pub search: Option<Vec<SearchItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchInfo {
    #[serde(default)]
    pub totalhits: u64,
}

/// One matched article
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub ns: i64,
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub wordcount: u64,
    /// Excerpt with `searchmatch` highlight spans and HTML entities
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ============================================================================
// Display types
// ============================================================================

/// A single row shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayResult {
    pub title: String,
    pub subtitle: String,
    pub tooltip: ToolTip,
    /// Text the host may put back into its input box when the row is selected
    pub query_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolTip {
    pub title: String,
    pub text: String,
}

impl ToolTip {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// What happens when the user picks a row.
///
/// Kept as plain data so results can be serialized and inspected; see
/// [`Action::invoke`] for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Open the URL in the default browser
    OpenUrl { url: String },
    /// Do nothing; reports "not handled" to the host
    None,
}
