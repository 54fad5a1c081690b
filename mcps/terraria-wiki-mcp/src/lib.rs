//! Terraria Wiki MCP Library
//!
//! Searches the Terraria wiki.gg MediaWiki API and turns matches into
//! launcher-style result rows with cleaned snippets and open-in-browser
//! actions.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use terraria_wiki_mcp::{Config, Session, SystemOpener};
//!
//! let session = Session::open(&Config::default())?;
//! let results = session.search("moon lord").await?;
//! results[0].action.invoke(&SystemOpener);
//! session.close().await;
//! ```
//!
//! # Configuration
//! Set `TERRARIA_WIKI_URL` env var or configure in `~/.binks/terraria-wiki.toml`

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod session;
pub mod snippet;
pub mod types;

pub use action::{SystemOpener, UrlOpener};
pub use client::WikiClient;
pub use config::Config;
pub use error::{WikiError, WikiResult};
pub use server::TerrariaWikiMcpServer;
pub use session::Session;
pub use types::{Action, DisplayResult, ToolTip, WikiSearchResponse};
