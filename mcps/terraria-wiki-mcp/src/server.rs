//! MCP Server implementation for Terraria wiki search
//!
//! Exposes the search session as MCP tools so agents can look things up on
//! the wiki and open articles for the user.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::action::{SystemOpener, UrlOpener};
use crate::config::Config;
use crate::error::WikiError;
use crate::session::Session;
use crate::types::Action;

/// The Terraria Wiki MCP Server
#[derive(Clone)]
pub struct TerrariaWikiMcpServer {
    session: Arc<Session>,
    opener: Arc<dyn UrlOpener>,
    config: Config,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchWikiParams {
    /// The search query
    #[schemars(description = "Text to search for on the Terraria wiki")]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct OpenArticleParams {
    /// Article title
    #[schemars(description = "Exact article title, e.g. \"Moon Lord\"")]
    pub title: String,
}

fn to_mcp_error(e: WikiError) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl TerrariaWikiMcpServer {
    pub fn new(session: Arc<Session>, config: Config) -> Self {
        Self::with_opener(session, config, Arc::new(SystemOpener))
    }

    pub fn with_opener(session: Arc<Session>, config: Config, opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            session,
            opener,
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the Terraria wiki. Returns titles, cleaned snippets and article URLs."
    )]
    async fn search_wiki(
        &self,
        Parameters(params): Parameters<SearchWikiParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Searching wiki for: {}", params.query);

        let results = self
            .session
            .search(&params.query)
            .await
            .map_err(to_mcp_error)?;

        json_success(&results)
    }

    #[tool(description = "Open a Terraria wiki article in the user's default browser.")]
    async fn open_article(
        &self,
        Parameters(params): Parameters<OpenArticleParams>,
    ) -> Result<CallToolResult, McpError> {
        let url = self
            .session
            .article_url(&params.title)
            .await
            .map_err(to_mcp_error)?;

        let action = Action::OpenUrl { url: url.clone() };
        if action.invoke(self.opener.as_ref()) {
            Ok(CallToolResult::success(vec![Content::text(format!(
                "Opened {}",
                url
            ))]))
        } else {
            Ok(CallToolResult::error(vec![Content::text(format!(
                "Could not open {}",
                url
            ))]))
        }
    }

    #[tool(description = "Get the wiki endpoint and session status.")]
    async fn get_config(&self) -> Result<CallToolResult, McpError> {
        #[derive(Serialize)]
        struct ConfigStatus {
            api_url: String,
            article_base: String,
            user_agent: String,
            timeout_seconds: Option<u64>,
            icon_path: Option<String>,
            session_open: bool,
        }

        let status = ConfigStatus {
            api_url: self.config.wiki.api_url(),
            article_base: self.config.wiki.article_base(),
            user_agent: self.config.wiki.user_agent.clone(),
            timeout_seconds: self.config.wiki.timeout_seconds,
            icon_path: self.config.display.icon_path.clone(),
            session_open: self.session.is_open().await,
        };

        json_success(&status)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for TerrariaWikiMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Terraria Wiki MCP Server - search the Terraria wiki.gg wiki and \
                 open articles in the user's browser."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::RecordingOpener;

    fn server(opener: Arc<RecordingOpener>) -> TerrariaWikiMcpServer {
        let config = Config::default();
        let session = Arc::new(Session::open(&config).unwrap());
        TerrariaWikiMcpServer::with_opener(session, config, opener)
    }

    #[tokio::test]
    async fn test_open_article_uses_opener() {
        let opener = Arc::new(RecordingOpener::default());
        let server = server(opener.clone());

        let result = server
            .open_article(Parameters(OpenArticleParams {
                title: "Moon Lord".to_string(),
            }))
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(
            *opener.opened.lock().unwrap(),
            vec!["https://terraria.wiki.gg/wiki/Moon%20Lord".to_string()]
        );
    }

    #[tokio::test]
    async fn test_open_article_reports_failure() {
        let opener = Arc::new(RecordingOpener {
            fail: true,
            ..Default::default()
        });
        let server = server(opener);

        let result = server
            .open_article(Parameters(OpenArticleParams {
                title: "Zenith".to_string(),
            }))
            .await
            .unwrap();

        assert!(result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_search_on_closed_session_is_error() {
        let server = server(Arc::new(RecordingOpener::default()));
        server.session.close().await;

        let result = server
            .search_wiki(Parameters(SearchWikiParams {
                query: "zenith".to_string(),
            }))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_config() {
        let server = server(Arc::new(RecordingOpener::default()));
        let result = server.get_config().await.unwrap();
        assert_eq!(result.content.len(), 1);
    }
}
