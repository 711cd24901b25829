//! Amadeus CLI - issue one authenticated call against the Amadeus API
//!
//! Prints the JSON result on stdout. Failures are printed as a structured
//! error payload and signalled through a non-zero exit status.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use amadeus_core::{ClientError, Config, Method, Params, RequestExecutor};

/// Amadeus API client
#[derive(Parser, Debug)]
#[command(name = "amadeus")]
#[command(about = "Authenticated, cached calls against the Amadeus travel API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET a resource (cached unless --no-cache)
    ///
    /// Example:
    ///   amadeus get /v1/reference-data/locations -p keyword=BCN -p subType=AIRPORT
    Get {
        /// Endpoint path, e.g. /v2/shopping/flight-offers
        path: String,
        /// Query parameter, repeatable
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Bypass the response cache
        #[arg(long)]
        no_cache: bool,
    },
    /// POST a JSON body to a resource (never cached)
    Post {
        /// Endpoint path, e.g. /v1/shopping/flight-offers/pricing
        path: String,
        /// JSON request body
        #[arg(long)]
        body: String,
        /// Query parameter, repeatable
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Obtain a token and print its expiry details
    Token,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() {
    // .env must be loaded before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(value) => {
            println!("{}", to_pretty(&value));
        }
        Err(err) => {
            let (payload, code) = match err.downcast_ref::<ClientError>() {
                Some(client_err @ ClientError::Config(_)) => (client_err.to_payload(), 2),
                Some(client_err) => (client_err.to_payload(), 1),
                None => (
                    json!({ "error": { "kind": "usage_error", "message": format!("{:#}", err) } }),
                    1,
                ),
            };
            println!("{}", to_pretty(&payload));
            std::process::exit(code);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Value> {
    let config = Config::from_env().map_err(ClientError::from)?;
    info!(environment = %config.environment, "Configuration loaded");
    debug!(?config, "Effective configuration");

    let executor = RequestExecutor::new(&config)?;

    let value = match cli.command {
        Command::Get {
            path,
            params,
            no_cache,
        } => {
            let params: Params = params.into_iter().collect();
            executor
                .execute(Method::GET, &path, &params, None, !no_cache)
                .await?
        }
        Command::Post { path, body, params } => {
            let body: Value = serde_json::from_str(&body).context("--body is not valid JSON")?;
            let params: Params = params.into_iter().collect();
            executor.post(&path, &body, &params).await?
        }
        Command::Token => {
            executor
                .tokens()
                .get_token()
                .await
                .map_err(ClientError::from)?;
            let info = executor.tokens().credential_info().await;
            let stats = executor.tokens().stats().await;
            json!({ "credential": info, "stats": stats })
        }
    };

    if let Some(stats) = executor.cache_stats().await {
        debug!(?stats, "Cache statistics");
    }

    Ok(value)
}

/// Defaults to "info" level, can be overridden with RUST_LOG env var
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "amadeus_core=info,amadeus=info".into())
}

fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
