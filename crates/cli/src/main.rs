//! Muster CLI - Command-line interface for the Muster queue engine
//!
//! Operator tooling: attach test actors, drive joins, inspect tickets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9538";

#[derive(Parser)]
#[command(name = "muster")]
#[command(about = "Muster Queue Engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "MUSTER_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Attach an actor to the gate
    Attach {
        /// Actor ID
        actor_id: u64,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Character level
        #[arg(short, long)]
        level: u32,

        /// Role tag (e.g., healer, tank, damage)
        #[arg(short, long, default_value = "damage")]
        role: String,

        /// Current map ID
        #[arg(short, long, default_value = "0")]
        map: u32,

        /// Mark the actor as restricted (deserter)
        #[arg(long)]
        restricted: bool,

        /// Grant privileged (GM) status
        #[arg(long)]
        privileged: bool,
    },

    /// Detach an actor, cancelling its tickets
    Detach {
        /// Actor ID
        actor_id: u64,
    },

    /// Join an activity queue
    Join {
        /// Actor ID
        actor_id: u64,

        /// Activity ID
        activity: u32,

        /// Team size (0 = unrated)
        #[arg(short, long, default_value = "0")]
        team_size: u8,

        /// Party ID for group joins
        #[arg(short, long)]
        party: Option<u64>,
    },

    /// Leave an activity queue
    Leave {
        /// Actor ID
        actor_id: u64,

        /// Activity ID
        activity: u32,

        /// Team size (0 = unrated)
        #[arg(short, long, default_value = "0")]
        team_size: u8,
    },

    /// Assign a waiting ticket to an instance
    Assign {
        /// Actor ID
        actor_id: u64,

        /// Activity ID
        activity: u32,

        /// Instance ID
        instance: u64,

        /// Team size (0 = unrated)
        #[arg(short, long, default_value = "0")]
        team_size: u8,
    },

    /// Show the tickets an actor holds
    Status {
        /// Actor ID
        actor_id: u64,
    },

    /// Show gate-wide statistics
    Stats,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct TicketRow {
    activity: u32,
    team_size: u8,
    bracket: u8,
    slot: usize,
    waited_ms: i64,
    wait_estimate_ms: u64,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Attach {
            actor_id,
            name,
            level,
            role,
            map,
            restricted,
            privileged,
        } => {
            let params = json!({
                "actor_id": actor_id,
                "name": name,
                "level": level,
                "role": role,
                "map_id": map,
                "restricted": restricted,
                "privileged": privileged,
            });

            call_rpc(&cli.rpc_url, "actor.attach.v1", params).await?;

            println!(
                "{}",
                format!("✓ Actor {} attached", actor_id).green().bold()
            );
        }

        Commands::Detach { actor_id } => {
            let params = json!({
                "actor_id": actor_id,
            });

            let result = call_rpc(&cli.rpc_url, "actor.detach.v1", params).await?;

            println!(
                "{}",
                format!(
                    "✓ Actor {} detached ({} ticket(s) cancelled)",
                    actor_id, result["cancelled_tickets"]
                )
                .green()
                .bold()
            );
        }

        Commands::Join {
            actor_id,
            activity,
            team_size,
            party,
        } => {
            let params = json!({
                "actor_id": actor_id,
                "activity": activity,
                "team_size": team_size,
                "party": party,
            });

            let result = call_rpc(&cli.rpc_url, "queue.join.v1", params).await?;

            if result["accepted"].as_bool().unwrap_or(false) {
                println!("{}", "✓ Queued".green().bold());
                println!();
                println!("  {} {}", "Ticket:".bold(), result["ticket"]);
                println!("  {} {}", "Bracket:".bold(), result["bracket"]);
                println!("  {} {}", "Slot:".bold(), result["slot"]);
                let estimate_s =
                    result["wait_estimate_ms"].as_u64().unwrap_or(0) as f64 / 1000.0;
                println!("  {} {:.0}s", "Estimated wait:".bold(), estimate_s);
            } else {
                println!("{}", "✗ Rejected".red().bold());
                println!();
                println!("  {} {}", "Reason:".bold(), result["reason"]);
                if let Some(message) = result["message"].as_str() {
                    println!("  {} {}", "Detail:".bold(), message);
                }
            }
        }

        Commands::Leave {
            actor_id,
            activity,
            team_size,
        } => {
            let params = json!({
                "actor_id": actor_id,
                "activity": activity,
                "team_size": team_size,
            });

            call_rpc(&cli.rpc_url, "queue.leave.v1", params).await?;

            println!(
                "{}",
                format!("✓ Actor {} left activity {}", actor_id, activity)
                    .green()
                    .bold()
            );
        }

        Commands::Assign {
            actor_id,
            activity,
            instance,
            team_size,
        } => {
            let params = json!({
                "actor_id": actor_id,
                "activity": activity,
                "team_size": team_size,
                "instance": instance,
            });

            call_rpc(&cli.rpc_url, "queue.assign.v1", params).await?;

            println!(
                "{}",
                format!(
                    "✓ Actor {} assigned to instance {} for activity {}",
                    actor_id, instance, activity
                )
                .green()
                .bold()
            );
        }

        Commands::Status { actor_id } => {
            let params = json!({
                "actor_id": actor_id,
            });

            let result = call_rpc(&cli.rpc_url, "queue.status.v1", params).await?;

            println!(
                "{}",
                format!("Tickets for actor {}", actor_id).cyan().bold()
            );
            println!();

            let tickets: Vec<TicketRow> =
                serde_json::from_value(result["tickets"].clone()).unwrap_or_default();

            if tickets.is_empty() {
                println!("  {}", "No tickets held".yellow());
            } else {
                let table = Table::new(tickets).to_string();
                println!("{}", table);
            }
        }

        Commands::Stats => {
            println!("{}", "Gate Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Actors:".bold(), stats["actors"]);
                    println!("  {} {}", "Open Queues:".bold(), stats["open_queues"]);
                    println!("  {} {}", "Active Tickets:".bold(), stats["active_tickets"]);
                    println!();
                    println!("  {} {} seconds", "Uptime:".bold(), stats["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
