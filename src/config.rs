use clap::{Args, Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::search::TavilySettings;
use crate::search::tavily::DEFAULT_BASE_URL;

/// Prefix for environment overrides, e.g. `SEARCH_MCP__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "SEARCH_MCP";

/// Plain port variable honored when serving, above `SEARCH_MCP__SERVER__PORT`.
pub const PORT_ENV: &str = "PORT";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Serve flags; all unset when no subcommand was given.
    #[must_use]
    pub fn serve_args(&self) -> ServeArgs {
        match &self.command {
            Some(Command::Serve(args)) => args.clone(),
            _ => ServeArgs::default(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the tavily_search tool (default)
    Serve(ServeArgs),
    /// Call tavily_search on a running server
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Serve over stdin/stdout instead of HTTP
    #[arg(long)]
    pub stdio: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// MCP endpoint of the search server
    #[arg(long, env = "SEARCH_MCP_URL", default_value = "http://localhost:8080/mcp")]
    pub url: String,

    /// Text to search for
    #[arg(short, long)]
    pub query: String,

    /// Search category: general, news or finance
    #[arg(short, long)]
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub tavily: TavilyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TavilyConfig {
    pub base_url: String,
}

impl TavilyConfig {
    /// Adapter settings for this endpoint, with the key from `TAVILY_API_KEY`.
    #[must_use]
    pub fn settings(&self) -> TavilySettings {
        TavilySettings::from_env(self.base_url.clone())
    }
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Layered load. Priority: CLI flag > `PORT` > `SEARCH_MCP__*` > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("tavily.base_url", DEFAULT_BASE_URL)?;

        // Explicit path must exist; ./config.{yaml,toml,json} is picked up if present.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder = builder.set_override_option("server.port", std::env::var(PORT_ENV).ok())?;

        let serve = cli.serve_args();
        if let Some(port) = serve.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = &serve.host {
            builder = builder.set_override("server.host", host.as_str())?;
        }

        builder.build()?.try_deserialize()
    }
}
