use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use google_access_token::config::loader::file_to_config;
use google_access_token::server;
use google_access_token::token::GoogleTokenFetcher;
use google_access_token::utils::constants::DEFAULT_CONFIG_PATH;
use google_access_token::utils::logging::{self, LogLevel};
use reqwest::Client;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one access token and print it as JSON
    Token {
        /// Space-delimited scopes; defaults to settings.default_scope
        #[arg(short, long)]
        scope: Option<String>,
    },
    /// Serve tokens over HTTP (default)
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build fetcher
    // -------------------------------

    let settings = Arc::new(service_config.settings);
    let fetcher = GoogleTokenFetcher::from_settings(settings.clone(), Client::new());

    // -------------------------------
    // 3. Run command
    // -------------------------------

    match args.command.unwrap_or(Command::Serve) {
        Command::Token { scope } => {
            let scope = scope.unwrap_or_else(|| settings.default_scope.clone());
            let token = fetcher.get_access_token(&scope).await?;
            println!("{}", serde_json::to_string(&token)?);
        }
        Command::Serve => {
            info!("Service starting...");
            server::server::start(settings, fetcher).await?;
        }
    }

    Ok(())
}
