//! `outq status` – list queued requests, including ones that cannot be read back.

use anyhow::Result;
use outq_core::OfflineError;

use crate::cli::Client;

/// One line per queued key, in key order.
pub async fn status_lines(client: &Client) -> Result<Vec<String>> {
    let queue = client.queue();
    let mut lines = Vec::new();
    for key in queue.keys().await? {
        match queue.load(&key).await {
            Ok(Some(p)) => {
                let url = p.request.to_request().full_url();
                lines.push(format!("{:<58} {:<7} {}", key, p.request.method, url));
            }
            // Delivered by a concurrent drain.
            Ok(None) => {}
            Err(OfflineError::Decode { .. }) => {
                lines.push(format!("{:<58} {:<7} {}", key, "-", "(unreadable)"));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(lines)
}

pub async fn run_status(client: &Client) -> Result<()> {
    let lines = status_lines(client).await?;
    if lines.is_empty() {
        println!("No queued requests.");
        return Ok(());
    }
    println!("{:<58} {:<7} {}", "KEY", "METHOD", "URL");
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
