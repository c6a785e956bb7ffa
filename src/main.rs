//! StackQuery - paginated full-text search over a question/answer corpus
//!
//! Runs the HTTP search service, or answers a single search from the command
//! line against the database or a JSON fixture.

use clap::{Parser, Subcommand};
use stackquery_core::search::{
    MemorySearchSource, PagingInfo, SearchOrchestrator, SearchOutcome, SearchQuery,
};
use stackquery_core::{Result, StackQueryConfig, StackQueryError};
use stackquery_infra::{apply_env, init_logger, LoggerConfig};
use stackquery_serve::links::{configured_base_url, endpoint, QueryLinkBuilder, SEARCH_PATH};
use stackquery_serve::{AppState, ServerConfig, StackQueryServer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use url::Url;

#[derive(Parser)]
#[command(name = "stackquery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "StackQuery - paginated full-text search API")]
#[command(long_about = r#"
StackQuery serves ranked full-text search results over a question/answer
corpus stored in PostgreSQL. Results are paginated and every page carries
absolute links to its neighbours.

Search methods: "bestmatch", "bestmatchranked", "bestmatchweighted", "matchall".
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP search service
    Serve {
        /// Server host address
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(short, long)]
        port: Option<u16>,

        /// PostgreSQL connection string
        #[arg(long)]
        database_url: Option<String>,

        /// Externally visible base URL used in navigation links
        #[arg(long)]
        public_url: Option<Url>,
    },

    /// Run one search and print the result page
    Search {
        /// Search text
        text: String,

        /// Search method token
        #[arg(short, long)]
        method: Option<String>,

        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: u32,

        /// Results per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Sort key (rank or id)
        #[arg(long)]
        sortby: Option<String>,

        /// Sort direction (asc or desc)
        #[arg(long)]
        orderby: Option<String>,

        /// PostgreSQL connection string
        #[arg(long, conflicts_with = "fixture")]
        database_url: Option<String>,

        /// Answer from a JSON fixture instead of the database
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file path
        config: PathBuf,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Validate { ref config } = cli.command {
        return handle_validate(config);
    }
    if let Commands::Version = cli.command {
        println!("{}", stackquery_core::version_info());
        return Ok(());
    }

    let config = load_config(&cli)?;
    init_logging(&cli, &config)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            database_url,
            public_url,
        } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(url) = database_url {
                config.database.url = url;
            }
            if public_url.is_some() {
                config.server.public_base_url = public_url;
            }
            config.validate()?;

            handle_serve(&config).await?;
        }

        Commands::Search {
            text,
            method,
            page,
            page_size,
            sortby,
            orderby,
            database_url,
            fixture,
        } => {
            let mut config = config;
            if let Some(url) = database_url {
                config.database.url = url;
            }

            let paging = PagingInfo::new(
                page,
                page_size.unwrap_or(config.search.default_page_size),
            );
            let query = SearchQuery::new(text)
                .with_method(method)
                .with_sort_by(sortby)
                .with_order_by(orderby)
                .with_paging(paging);

            handle_search(&config, query, fixture).await?;
        }

        Commands::Validate { .. } | Commands::Version => {}
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<StackQueryConfig> {
    let mut config = match cli.config {
        Some(ref path) => StackQueryConfig::from_file(path)?,
        None => StackQueryConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn init_logging(cli: &Cli, config: &StackQueryConfig) -> Result<()> {
    let mut logger = apply_env(LoggerConfig::from(&config.logging));
    if cli.verbose {
        logger.level = "debug".to_string();
    }
    if cli.json_logs {
        logger.json_format = true;
    }
    init_logger(logger)
}

async fn handle_serve(config: &StackQueryConfig) -> Result<()> {
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting StackQuery server"
    );

    let server = StackQueryServer::new(ServerConfig::from(config)).await?;
    server.start().await
}

async fn handle_search(
    config: &StackQueryConfig,
    query: SearchQuery,
    fixture: Option<PathBuf>,
) -> Result<()> {
    let server_config = ServerConfig::from(config);

    let orchestrator = match fixture {
        Some(path) => {
            info!(fixture = %path.display(), "Searching fixture");
            SearchOrchestrator::new(Arc::new(MemorySearchSource::from_json_file(&path)?))
                .with_timeout(Duration::from_millis(server_config.source_timeout_ms))
                .with_max_page_size(server_config.max_page_size)
        }
        None => {
            info!("Searching database");
            AppState::new(server_config.clone()).await?.search
        }
    };

    let query = SearchQuery {
        paging: query.paging.with_max_page_size(orchestrator.max_page_size()),
        ..query
    };

    let base = configured_base_url(&server_config).map_err(StackQueryError::from)?;
    let links = QueryLinkBuilder::for_search(endpoint(&base, SEARCH_PATH), &query);

    match orchestrator.search(&query, &links).await {
        Ok(SearchOutcome::MissingQuery) => println!("No query provided"),
        Ok(SearchOutcome::NoResults(_)) => {
            println!("No results found for '{}'", query.text);
        }
        Ok(SearchOutcome::Page(envelope)) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Err(e) => {
            error!(error = %e, "Search failed");
            return Err(e);
        }
    }

    Ok(())
}

fn handle_validate(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(StackQueryError::not_found(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = StackQueryConfig::from_file(config_path)?;

    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid");
            println!(
                "  Listening on {}:{}",
                config.server.host, config.server.port
            );
            println!(
                "  Page size: default {}, max {}",
                config.search.default_page_size, config.search.max_page_size
            );
            Ok(())
        }
        Err(e) => {
            println!("Configuration is invalid: {}", e);
            Err(e)
        }
    }
}
