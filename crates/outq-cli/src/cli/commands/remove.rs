//! `outq remove <key>` – drop a queued request without sending it.

use anyhow::{bail, Result};
use outq_core::KeyValueStore;

use crate::cli::Client;

/// Removes the record under `key`. Unreadable records can be removed too.
pub async fn run_remove(client: &Client, key: &str) -> Result<()> {
    let queue = client.queue();
    if !queue.owns(key) {
        bail!("{key} is not a key under {}_", queue.prefix());
    }
    if queue.store().get_item(key).await?.is_none() {
        bail!("no queued request {key}");
    }
    queue.remove(key).await?;
    println!("Removed {key}");
    Ok(())
}
