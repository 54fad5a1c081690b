//! MediaWiki search client
//!
//! Owns the reqwest client (and its connection pool). Cloning is cheap and
//! clones share the pool.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::WikiConfig;
use crate::error::{WikiError, WikiResult};
use crate::types::WikiSearchResponse;

/// Longest body excerpt kept in [`WikiError::Status`]
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct WikiClient {
    http: Client,
    api_url: Url,
    article_base: String,
}

impl WikiClient {
    pub fn new(config: &WikiConfig) -> WikiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // gzip/brotli/deflate are negotiated automatically by the enabled features
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| WikiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_url: Url::parse(&config.api_url())?,
            article_base: config.article_base(),
        })
    }

    /// Build the `list=search` request URL for `query`.
    ///
    /// The query is form-encoded into `srsearch`, so it decodes back to the
    /// exact input on the server side.
    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("srsearch", query)
            .append_pair("format", "json");
        url
    }

    /// URL of the article with the given title
    pub fn article_url(&self, title: &str) -> String {
        article_url(&self.article_base, title)
    }

    /// Run one search request.
    ///
    /// Fails with [`WikiError::Network`] when the request can't be sent,
    /// [`WikiError::Status`] for non-2xx answers and [`WikiError::Decode`]
    /// when the body can't be read or is not a search response.
    pub async fn fetch(&self, query: &str) -> WikiResult<WikiSearchResponse> {
        let url = self.search_url(query);
        debug!(url = %url, "Sending wiki search request");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            warn!(status = status.as_u16(), "Wiki search returned an error status");
            return Err(WikiError::Status {
                status: status.as_u16(),
                body: excerpt,
            });
        }

        // The wiki answered; an unreadable body counts as a bad response, not a
        // connectivity problem.
        let body = response
            .text()
            .await
            .map_err(|e| WikiError::Decode(e.to_string()))?;
        parse_response(&body)
    }
}

/// Decode a search response body. Empty bodies and a bare `null` are errors.
pub fn parse_response(body: &str) -> WikiResult<WikiSearchResponse> {
    if body.trim().is_empty() {
        return Err(WikiError::Decode("empty response body".to_string()));
    }

    let parsed: Option<WikiSearchResponse> =
        serde_json::from_str(body).map_err(|e| WikiError::Decode(e.to_string()))?;
    parsed.ok_or_else(|| WikiError::Decode("response body is null".to_string()))
}

/// `<article_base>/<percent-encoded title>`
pub fn article_url(article_base: &str, title: &str) -> String {
    format!(
        "{}/{}",
        article_base.trim_end_matches('/'),
        urlencoding::encode(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikiClient {
        WikiClient::new(&WikiConfig::default()).unwrap()
    }

    #[test]
    fn test_search_url_shape() {
        let url = client().search_url("zenith");
        assert_eq!(
            url.as_str(),
            "https://terraria.wiki.gg/api.php?action=query&list=search&srsearch=zenith&format=json"
        );
    }

    #[test]
    fn test_search_url_round_trips_unsafe_characters() {
        let client = client();
        for query in [
            "moon lord",
            "copper & tin",
            "100% crit",
            "#1 weapon",
            "a=b?c/d",
            "Têrrâria 泰拉",
            "",
        ] {
            let url = client.search_url(query);
            let reparsed = Url::parse(url.as_str()).unwrap();
            let srsearch = reparsed
                .query_pairs()
                .find(|(k, _)| k == "srsearch")
                .map(|(_, v)| v.into_owned());
            assert_eq!(srsearch.as_deref(), Some(query), "round trip of {query:?}");
            assert!(reparsed.fragment().is_none());
            assert_eq!(reparsed.query_pairs().count(), 4);
        }
    }

    #[test]
    fn test_article_url_encodes_title() {
        assert_eq!(
            client().article_url("Moon Lord"),
            "https://terraria.wiki.gg/wiki/Moon%20Lord"
        );
        assert_eq!(
            article_url("https://terraria.wiki.gg/wiki/", "Guide's Voodoo Doll"),
            "https://terraria.wiki.gg/wiki/Guide%27s%20Voodoo%20Doll"
        );
    }

    #[test]
    fn test_parse_response_errors() {
        assert!(matches!(parse_response(""), Err(WikiError::Decode(_))));
        assert!(matches!(parse_response("  \n"), Err(WikiError::Decode(_))));
        assert!(matches!(parse_response("null"), Err(WikiError::Decode(_))));
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(WikiError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_response_ok() {
        let response = parse_response(r#"{"query":{"search":[{"title":"Zenith"}]}}"#).unwrap();
        assert_eq!(response.items().unwrap()[0].title, "Zenith");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = WikiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            WikiClient::new(&config),
            Err(WikiError::InvalidUrl(_))
        ));
    }
}
