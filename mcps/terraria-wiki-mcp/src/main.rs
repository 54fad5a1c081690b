//! Terraria Wiki search CLI and MCP server
//!
//! # Configuration
//! Set `TERRARIA_WIKI_URL` env var or configure in `~/.binks/terraria-wiki.toml`

use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};

use terraria_wiki_mcp::logging::init_tracing;
use terraria_wiki_mcp::{Action, Config, DisplayResult, Session, SystemOpener, TerrariaWikiMcpServer};

#[derive(Parser)]
#[command(name = "terraria-wiki-mcp")]
#[command(about = "Search the Terraria wiki.gg wiki")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the wiki and print the results
    Search {
        /// Search text
        query: String,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Open the Nth result (1-based) in the browser after searching
        #[arg(long)]
        open: Option<usize>,
    },
    /// Open an article by title in the default browser
    Open {
        /// Article title
        title: String,
    },
    /// Serve the MCP tools over stdio
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = Config::load()?;
    tracing::info!("Wiki URL: {}", config.wiki.base_url);

    let session = Arc::new(Session::open(&config)?);

    let outcome = match cli.command {
        Commands::Search { query, json, open } => run_search(&session, &query, json, open).await,
        Commands::Open { title } => run_open(&session, &title).await,
        Commands::Serve => run_serve(session.clone(), config).await,
    };

    session.close().await;
    outcome
}

async fn run_search(
    session: &Session,
    query: &str,
    json: bool,
    open: Option<usize>,
) -> anyhow::Result<()> {
    let results = session.search(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    if let Some(index) = open {
        let result = index
            .checked_sub(1)
            .and_then(|i| results.get(i))
            .ok_or_else(|| anyhow::anyhow!("no result #{} (got {})", index, results.len()))?;
        if !result.action.invoke(&SystemOpener) {
            anyhow::bail!("result #{} could not be opened", index);
        }
    }

    Ok(())
}

async fn run_open(session: &Session, title: &str) -> anyhow::Result<()> {
    let url = session.article_url(title).await?;
    let action = Action::OpenUrl { url: url.clone() };
    if !action.invoke(&SystemOpener) {
        anyhow::bail!("could not open {}", url);
    }
    println!("{}", url);
    Ok(())
}

async fn run_serve(session: Arc<Session>, config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Terraria Wiki MCP Server");

    let server = TerrariaWikiMcpServer::new(session, config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

fn print_results(results: &[DisplayResult]) {
    for (i, result) in results.iter().enumerate() {
        println!("{:>2}. {}", i + 1, result.title);
        println!("    {}", result.subtitle);
        if let Action::OpenUrl { url } = &result.action {
            println!("    {}", url);
        }
    }
}
