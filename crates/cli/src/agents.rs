// `vani agents` - browse and remove voice agents

use crate::input::ensure_confirmed;
use crate::output::{print_agent_detail, print_agent_stats, print_agents};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use vani_infra_http::HttpApiClient;

#[derive(Subcommand, Clone, Debug)]
pub enum AgentsAction {
    /// List agents
    List {
        #[arg(short, long)]
        search: Option<String>,

        /// Only agents that can take calls
        #[arg(long)]
        active: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show one agent with its call statistics
    Show {
        /// Agent ID
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Totals across all agents
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Delete an agent
    Delete {
        /// Agent ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(client: &HttpApiClient, action: &AgentsAction) -> Result<()> {
    match action {
        AgentsAction::List {
            search,
            active,
            json,
        } => {
            let mut agents = client
                .list_agents(search.as_deref())
                .await
                .context("Failed to list agents")?;
            if *active {
                agents.retain(|a| a.is_active());
            }

            if *json {
                println!("{}", serde_json::to_string_pretty(&agents)?);
            } else {
                print_agents(&agents);
            }
        }

        AgentsAction::Show { id, json } => {
            let agent = client
                .agent(id)
                .await
                .with_context(|| format!("Failed to fetch agent {}", id))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&agent)?);
            } else {
                print_agent_detail(&agent);
            }
        }

        AgentsAction::Stats { json } => {
            let stats = client
                .agent_stats()
                .await
                .context("Failed to fetch agent statistics")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_agent_stats(&stats);
            }
        }

        AgentsAction::Delete { id, yes } => {
            ensure_confirmed(*yes, &format!("agent {}", id))?;
            client
                .delete_agent(id)
                .await
                .with_context(|| format!("Failed to delete agent {}", id))?;
            println!("{}", format!("✓ Agent {} deleted", id).green().bold());
        }
    }
    Ok(())
}
