//! `outq drain` – replay the queue once.

use anyhow::Result;

use crate::cli::Client;

pub async fn run_drain(client: &Client) -> Result<()> {
    let report = client.drain_queue().await?;
    for key in &report.delivered {
        println!("delivered {key}");
    }
    for key in &report.skipped {
        println!("skipped   {key} (unreadable)");
    }
    for err in &report.failures {
        println!("failed    {}: {err}", err.key().unwrap_or("-"));
    }
    println!(
        "{} delivered, {} failed, {} skipped",
        report.delivered.len(),
        report.failures.len(),
        report.skipped.len()
    );
    report.into_result()?;
    Ok(())
}
