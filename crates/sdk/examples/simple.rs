//! Simple SDK Example
//!
//! Demonstrates basic usage of the Muster SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package muster-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use muster_sdk::{AttachRequest, JoinRequest, MusterClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Muster SDK - Simple Example");
    println!("============================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = MusterClient::connect("http://127.0.0.1:9538").await?;
    println!("   ✓ Connected\n");

    // 2. Attach an actor
    println!("2. Attaching actor...");
    let attach_response = client
        .attach(AttachRequest {
            actor_id: 42,
            name: "Aldra".to_string(),
            level: 70,
            role: "healer".to_string(),
            map_id: 1,
            restricted: false,
            privileged: false,
            unlocks: vec![],
            lfg_state: None,
        })
        .await?;
    println!("   ✓ Attached actor {}\n", attach_response.actor_id);

    // 3. Join a queue
    println!("3. Joining activity 489...");
    let join_response = client
        .join(JoinRequest {
            actor_id: 42,
            activity: 489,
            team_size: 0,
            party: None,
        })
        .await?;

    if join_response.accepted {
        println!("   ✓ Queued:");
        println!("     - Ticket: {}", join_response.ticket.unwrap_or_default());
        println!("     - Bracket: {}", join_response.bracket.unwrap_or(0));
        println!(
            "     - Estimate: {}ms\n",
            join_response.wait_estimate_ms.unwrap_or(0)
        );
    } else {
        println!(
            "   ⚠ Rejected: {} ({})\n",
            join_response.reason.unwrap_or_default(),
            join_response.message.unwrap_or_default()
        );
    }

    // 4. Check status
    println!("4. Fetching status...");
    let status_response = client.status(42).await?;
    println!("   ✓ Holding {} ticket(s)", status_response.tickets.len());
    for ticket in &status_response.tickets {
        println!(
            "     | activity {} slot {} waited {}ms",
            ticket.activity, ticket.slot, ticket.waited_ms
        );
    }
    println!();

    // 5. Leave the queue
    println!("5. Leaving queue...");
    let leave_response = client.leave(42, 489, 0).await?;

    if leave_response.left {
        println!("   ✓ Ticket cancelled");
    } else {
        println!("   ⚠ No ticket to cancel");
    }

    // 6. Detach
    println!("6. Detaching actor...");
    client.detach(42).await?;
    println!("   ✓ Detached");

    println!("\n✓ Example completed successfully!");

    Ok(())
}
