//! Search MCP server and client.
//!
//! Entry point: `serve` (default) runs the tool server, `search` calls the
//! tool on a running server.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;

use search_mcp::config::{AppConfig, Cli, Command, SearchArgs};
use search_mcp::mcp::{ClientCache, SearchServer};
use search_mcp::search::TavilyClient;
use search_mcp::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    telemetry::init();

    let cli = Cli::parse();
    match cli.command.clone() {
        Some(Command::Search(args)) => run_search(args).await,
        Some(Command::Serve(_)) | None => run_server(&cli).await,
    }
}

async fn run_server(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_cli(cli).context("failed to load configuration")?;
    let settings = config.tavily.settings();

    if cli.serve_args().stdio {
        return SearchServer::new(TavilyClient::new(settings))
            .serve_stdio()
            .await;
    }

    server::start_server(&config, settings).await
}

async fn run_search(args: SearchArgs) -> anyhow::Result<()> {
    let cache = ClientCache::streamable_http();
    let client = cache.get_or_create(&args.url).await?;
    let text = client
        .tavily_search(&args.query, args.topic.as_deref())
        .await?;
    println!("{text}");
    Ok(())
}
