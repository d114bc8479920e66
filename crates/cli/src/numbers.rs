// `vani numbers` - phone lines and their agent assignment

use crate::input::ensure_confirmed;
use crate::output::{print_credentials, print_phone_lines};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use tracing::warn;
use vani_core::domain::{AssignAgentRequest, UNASSIGNED_SENTINEL};
use vani_infra_http::HttpApiClient;

#[derive(Subcommand, Clone, Debug)]
pub enum NumbersAction {
    /// List imported numbers and SIP lines with their agents
    List {
        #[arg(long)]
        json: bool,
    },

    /// Route a line to an agent
    Assign {
        /// Phone number ID
        id: String,

        /// Agent's assistant ID, or "unassigned" to detach
        #[arg(default_value = UNASSIGNED_SENTINEL)]
        assistant: String,
    },

    /// Remove a line from the console
    Delete {
        /// Phone number ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List SIP trunk credentials
    Credentials {
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(client: &HttpApiClient, action: &NumbersAction) -> Result<()> {
    match action {
        NumbersAction::List { json } => {
            let lines = client
                .list_phone_numbers()
                .await
                .context("Failed to list phone numbers")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&lines)?);
                return Ok(());
            }
            // Names are cosmetic; a failed agent lookup still shows the lines
            let agents = match client.list_agents(None).await {
                Ok(agents) => agents,
                Err(e) => {
                    warn!(error = %e, "Agent lookup failed");
                    Vec::new()
                }
            };
            print_phone_lines(&lines, &agents);
        }

        NumbersAction::Assign { id, assistant } => {
            let detaching = AssignAgentRequest::from_selection(Some(assistant.as_str()))
                .assistant_id
                .is_none();
            client
                .assign_phone_number(id, Some(assistant.as_str()))
                .await
                .with_context(|| format!("Failed to update phone number {}", id))?;
            if detaching {
                println!("{}", format!("✓ Agent unassigned from {}", id).green().bold());
            } else {
                println!(
                    "{}",
                    format!("✓ Agent {} assigned to {}", assistant.trim(), id)
                        .green()
                        .bold()
                );
            }
        }

        NumbersAction::Delete { id, yes } => {
            ensure_confirmed(*yes, &format!("phone number {}", id))?;
            client
                .delete_phone_number(id)
                .await
                .with_context(|| format!("Failed to delete phone number {}", id))?;
            println!("{}", format!("✓ Phone number {} deleted", id).green().bold());
        }

        NumbersAction::Credentials { json } => {
            let credentials = client
                .list_credentials()
                .await
                .context("Failed to list SIP credentials")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&credentials)?);
            } else {
                print_credentials(&credentials);
            }
        }
    }
    Ok(())
}
