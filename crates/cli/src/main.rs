//! WikiQA CLI
//!
//! Main entry point for the wikiqa command-line tool.
//! Answers questions from encyclopedia articles and exposes the individual
//! pipeline stages for inspection.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ArticleCommand, AskCommand, DbCommand, SearchCommand, SuggestCommand};
use std::path::PathBuf;
use wikiqa_core::{config::AppConfig, logging, AppResult};

/// WikiQA - answers questions from encyclopedia articles
#[derive(Parser, Debug)]
#[command(name = "wikiqa")]
#[command(about = "Answer questions from encyclopedia articles", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "WIKIQA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "WIKIQA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Encyclopedia language edition (en, de, fr, ...)
    #[arg(short, long, global = true, env = "WIKIQA_LANGUAGE")]
    language: Option<String>,

    /// Explicit api.php endpoint
    #[arg(short, long, global = true, env = "WIKIQA_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question
    Ask(AskCommand),

    /// Search for articles
    Search(SearchCommand),

    /// Fetch one article by exact title
    Article(ArticleCommand),

    /// Show the fallback query for a search
    Suggest(SuggestCommand),

    /// Inspect the offline article database
    Db(DbCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load configuration from the selected workspace and file
    let config = AppConfig::load_for(cli.workspace.clone(), cli.config.clone())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.language,
        cli.endpoint,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("WikiQA CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Endpoint: {}", config.wiki.api_endpoint());

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Search(_) => "search",
        Commands::Article(_) => "article",
        Commands::Suggest(_) => "suggest",
        Commands::Db(_) => "db",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Article(cmd) => cmd.execute(&config).await,
        Commands::Suggest(cmd) => cmd.execute(&config).await,
        Commands::Db(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
