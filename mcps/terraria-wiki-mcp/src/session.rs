//! Search session
//!
//! A [`Session`] owns the transport handle between `open` and `close` and
//! turns wiki responses into [`DisplayResult`] rows.

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::client::WikiClient;
use crate::config::Config;
use crate::error::{WikiError, WikiResult};
use crate::snippet::clean_snippet;
use crate::types::{Action, DisplayResult, SearchItem, ToolTip, WikiSearchResponse};

const FALLBACK_SUBTITLE: &str = "Terraria Wiki Search Result";
const FALLBACK_TOOLTIP: &str = "Search Result from Terraria Wiki";

pub const NO_RESULTS_TITLE: &str = "No results found";
pub const SEARCH_FAILED_TITLE: &str = "Search failed";

pub struct Session {
    client: RwLock<Option<WikiClient>>,
    icon_path: Option<String>,
}

impl Session {
    /// Build the HTTP client and remember the icon path
    pub fn open(config: &Config) -> WikiResult<Self> {
        let client = WikiClient::new(&config.wiki)?;
        info!("Opened wiki session for {}", config.wiki.base_url);

        Ok(Self {
            client: RwLock::new(Some(client)),
            icon_path: config.display.icon_path.clone(),
        })
    }

    /// Release the HTTP client. Returns `false` if it was already closed.
    pub async fn close(&self) -> bool {
        let released = self.client.write().await.take().is_some();
        if released {
            info!("Closed wiki session");
        }
        released
    }

    pub async fn is_open(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Article URL for `title`, or `SessionClosed`
    pub async fn article_url(&self, title: &str) -> WikiResult<String> {
        Ok(self.client().await?.article_url(title))
    }

    /// Search the wiki.
    ///
    /// Always yields at least one row: either one per matched article in API
    /// order, or a single placeholder. Only a closed session is an error.
    pub async fn search(&self, query: &str) -> WikiResult<Vec<DisplayResult>> {
        let client = self.client().await?;

        let results = match client.fetch(query).await {
            Ok(response) => self.map_response(&client, query, &response),
            Err(e) if e.is_transport() => {
                warn!("Wiki search for {:?} failed: {}", query, e);
                vec![self.search_failed(&e)]
            }
            Err(e) => {
                warn!("Treating unusable wiki response as no results: {}", e);
                vec![self.no_results()]
            }
        };

        Ok(results)
    }

    async fn client(&self) -> WikiResult<WikiClient> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(WikiError::SessionClosed)
    }

    fn map_response(
        &self,
        client: &WikiClient,
        query: &str,
        response: &WikiSearchResponse,
    ) -> Vec<DisplayResult> {
        let Some(items) = response.items() else {
            info!("No results for {:?}", query);
            return vec![self.no_results()];
        };

        if response.continue_info.is_some() {
            debug!(
                total_hits = response.total_hits(),
                "More results available; only the first page is shown"
            );
        }
        info!("Found {} results for {:?}", items.len(), query);

        items
            .iter()
            .map(|item| self.to_display_result(client, item))
            .collect()
    }

    fn to_display_result(&self, client: &WikiClient, item: &SearchItem) -> DisplayResult {
        let snippet = item
            .snippet
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(clean_snippet);

        DisplayResult {
            title: item.title.clone(),
            subtitle: snippet
                .clone()
                .unwrap_or_else(|| FALLBACK_SUBTITLE.to_string()),
            tooltip: ToolTip::new(
                item.title.clone(),
                snippet.unwrap_or_else(|| FALLBACK_TOOLTIP.to_string()),
            ),
            query_text: item.title.clone(),
            icon_path: self.icon_path.clone(),
            action: Action::OpenUrl {
                url: client.article_url(&item.title),
            },
        }
    }

    fn no_results(&self) -> DisplayResult {
        DisplayResult {
            title: NO_RESULTS_TITLE.to_string(),
            subtitle: "Try a different search term".to_string(),
            tooltip: ToolTip::new(
                "No results",
                "No articles found on Terraria Wiki for your search term.",
            ),
            query_text: String::new(),
            icon_path: self.icon_path.clone(),
            action: Action::None,
        }
    }

    fn search_failed(&self, err: &WikiError) -> DisplayResult {
        DisplayResult {
            title: SEARCH_FAILED_TITLE.to_string(),
            subtitle: "Could not reach Terraria Wiki".to_string(),
            tooltip: ToolTip::new(SEARCH_FAILED_TITLE, err.to_string()),
            query_text: String::new(),
            icon_path: self.icon_path.clone(),
            action: Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::RecordingOpener;
    use crate::client::parse_response;

    fn session() -> Session {
        Session::open(&Config::default()).unwrap()
    }

    async fn map(session: &Session, body: &str) -> Vec<DisplayResult> {
        let client = session.client().await.unwrap();
        let response = parse_response(body).unwrap();
        session.map_response(&client, "query", &response)
    }

    #[tokio::test]
    async fn test_maps_items_in_order() {
        let session = session();
        let body = r#"{"query":{"search":[
            {"title":"Moon Lord","snippet":"The <span class=\"searchmatch\">Moon</span> Lord"},
            {"title":"Lunar Events","snippet":"Pillars &amp; more"},
            {"title":"Moon Charm","snippet":"worn at night"}
        ]}}"#;

        let results = map(&session, body).await;
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Moon Lord", "Lunar Events", "Moon Charm"]);

        assert_eq!(results[0].subtitle, "The Moon Lord...");
        assert_eq!(results[1].subtitle, "Pillars & more...");
        assert_eq!(results[0].query_text, "Moon Lord");
        assert_eq!(results[0].tooltip, ToolTip::new("Moon Lord", "The Moon Lord..."));
        assert_eq!(results[0].icon_path.as_deref(), Some("Images/favicon.png"));
        assert_eq!(
            results[0].action,
            Action::OpenUrl {
                url: "https://terraria.wiki.gg/wiki/Moon%20Lord".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_snippet_uses_fallbacks() {
        let session = session();
        let results = map(
            &session,
            r#"{"query":{"search":[{"title":"Zenith"},{"title":"Terraprisma","snippet":""}]}}"#,
        )
        .await;

        for result in &results {
            assert_eq!(result.subtitle, FALLBACK_SUBTITLE);
            assert_eq!(result.tooltip.text, FALLBACK_TOOLTIP);
        }
    }

    #[tokio::test]
    async fn test_empty_search_yields_placeholder() {
        let session = session();
        let opener = RecordingOpener::default();

        for body in [r#"{}"#, r#"{"query":{"search":null}}"#, r#"{"query":{"search":[]}}"#] {
            let results = map(&session, body).await;
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].title, NO_RESULTS_TITLE);
            assert_eq!(results[0].subtitle, "Try a different search term");
            assert!(results[0].query_text.is_empty());
            assert!(!results[0].action.invoke(&opener));
        }
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let session = session();
        assert!(session.is_open().await);
        assert!(session.close().await);
        assert!(!session.close().await);
        assert!(!session.is_open().await);
    }

    #[tokio::test]
    async fn test_search_after_close_fails() {
        let session = session();
        session.close().await;
        assert!(matches!(
            session.search("zenith").await,
            Err(WikiError::SessionClosed)
        ));
        assert!(matches!(
            session.article_url("Zenith").await,
            Err(WikiError::SessionClosed)
        ));
    }

    #[test]
    fn test_search_failed_placeholder() {
        let session = session();
        let err = WikiError::Decode("boom".into());
        let result = session.search_failed(&err);
        assert_eq!(result.title, SEARCH_FAILED_TITLE);
        assert_eq!(result.action, Action::None);
        assert!(result.tooltip.text.contains("boom"));
    }
}
