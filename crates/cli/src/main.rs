//! Vani CLI - outbound dialer for the voice-agent console

mod agents;
mod bulk;
mod input;
mod logging;
mod numbers;
mod output;
mod token_store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use input::NumberSource;
use std::sync::Arc;
use std::time::Duration;
use token_store::{mask_token, resolve_token, TokenStore};
use tracing::debug;
use vani_core::application::CallService;
use vani_core::domain::analyze_numbers;
use vani_infra_http::config::DEFAULT_API_URL;
use vani_infra_http::{CallListQuery, HttpApiClient, HttpClientConfig};

#[derive(Parser)]
#[command(name = "vani")]
#[command(about = "Outbound voice-agent dialer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Console API base URL
    #[arg(long, global = true, env = "VANI_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token (falls back to the stored token)
    #[arg(long, global = true, env = "VANI_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "VANI_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a list of numbers without calling
    Validate {
        #[command(flatten)]
        source: NumberSource,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Place a single outbound call
    Call {
        /// E.164 number, e.g. +918267818161
        number: String,

        /// Agent ID ("default" lets the server choose)
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// Call every valid number in a list
    Bulk(bulk::BulkArgs),

    /// List recent calls
    Calls {
        #[arg(long)]
        page: Option<u32>,

        /// Search by number or agent
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        status: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(long)]
        json: bool,
    },

    /// Show one call
    CallInfo {
        /// Call ID
        id: String,

        /// Include the transcript
        #[arg(short, long)]
        transcript: bool,

        #[arg(long)]
        json: bool,
    },

    /// Browse, inspect and delete agents
    Agents {
        #[command(subcommand)]
        action: agents::AgentsAction,
    },

    /// Phone lines, agent assignment and SIP credentials
    Numbers {
        #[command(subcommand)]
        action: numbers::NumbersAction,
    },

    /// Manage the stored API token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Save a token for later runs
    Set { token: String },
    /// Remove the stored token
    Clear,
    /// Show which token is in use (masked)
    Show,
}

fn build_client(cli: &Cli, store: &TokenStore) -> Result<HttpApiClient> {
    let token = resolve_token(cli.token.clone(), store)?;
    debug!(api_url = %cli.api_url, has_token = token.is_some(), "Building API client");

    let config = HttpClientConfig::new(cli.api_url.clone())
        .with_token(token)
        .with_request_timeout(Duration::from_secs(cli.timeout_secs.max(1)));
    HttpApiClient::new(config).context("Failed to create API client")
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let cli = Cli::parse();
    let store = TokenStore::from_env();

    match &cli.command {
        Commands::Validate { source, json } => {
            let analysis = analyze_numbers(&source.read()?);
            if *json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                output::print_analysis(&analysis);
            }
        }

        Commands::Call { number, agent } => {
            let client = build_client(&cli, &store)?;
            let service = CallService::new(Arc::new(client));
            let response = service
                .place(number, agent.as_deref())
                .await
                .with_context(|| format!("Call to {} failed", number))?;

            println!("{}", "✓ Call queued".green().bold());
            if let Some(id) = response.id {
                println!("  {} {}", "Call ID:".bold(), id);
            }
        }

        Commands::Bulk(args) => {
            let client = build_client(&cli, &store)?;
            bulk::run(Arc::new(client), args.clone()).await?;
        }

        Commands::Calls {
            page,
            search,
            status,
            from,
            to,
            limit,
            json,
        } => {
            let client = build_client(&cli, &store)?;
            let query = CallListQuery {
                page: *page,
                search: search.clone(),
                status: status.clone(),
                from: from.clone(),
                to: to.clone(),
                limit: *limit,
            };
            let calls = client
                .list_calls(&query)
                .await
                .context("Failed to list calls")?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&calls)?);
            } else {
                output::print_calls(&calls);
            }
        }

        Commands::CallInfo {
            id,
            transcript,
            json,
        } => {
            let client = build_client(&cli, &store)?;
            let call = client
                .call_info(id)
                .await
                .with_context(|| format!("Failed to fetch call {}", id))?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&call)?);
            } else {
                output::print_call_detail(&call, *transcript);
            }
        }

        Commands::Agents { action } => {
            let client = build_client(&cli, &store)?;
            agents::run(&client, action).await?;
        }

        Commands::Numbers { action } => {
            let client = build_client(&cli, &store)?;
            numbers::run(&client, action).await?;
        }

        Commands::Token { action } => match action {
            TokenAction::Set { token } => {
                store.save(token)?;
                println!(
                    "{}",
                    format!("✓ Token saved to {}", store.path().display())
                        .green()
                        .bold()
                );
            }
            TokenAction::Clear => {
                if store.clear()? {
                    println!("{}", "✓ Token cleared".green().bold());
                } else {
                    println!("{}", "No stored token".yellow());
                }
            }
            TokenAction::Show => {
                let source = if cli.token.as_deref().is_some_and(|t| !t.trim().is_empty()) {
                    "flag/env"
                } else {
                    "stored"
                };
                match resolve_token(cli.token.clone(), &store)? {
                    Some(token) => {
                        println!("  {} {} ({})", "Token:".bold(), mask_token(&token), source)
                    }
                    None => println!("{}", "No token configured".yellow()),
                }
            }
        },
    }

    Ok(())
}
