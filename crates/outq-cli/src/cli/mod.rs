//! CLI for the outq offline request queue.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use outq_core::{config, CurlTransport, Method, OfflineOptions, OfflineTransport, SqliteStore};

use commands::{run_drain, run_remove, run_send, run_status, SendArgs};

/// Client used by every command: curl transport over the default SQLite store.
pub type Client = OfflineTransport<CurlTransport, SqliteStore>;

/// Top-level CLI for outq.
#[derive(Debug, Parser)]
#[command(name = "outq")]
#[command(about = "outq: send HTTP requests now, or queue them and send later", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send a request; queue it if the network is unreachable.
    Send {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS).
        method: Method,
        /// Request path, or an absolute URL.
        url: String,
        /// Base URL the path is resolved against.
        #[arg(long)]
        base_url: Option<String>,
        /// Extra header as "Name: value". Repeatable.
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,
        /// JSON request body.
        #[arg(long, value_parser = parse_json)]
        data: Option<serde_json::Value>,
        /// Print a 202 placeholder instead of an error when the request is queued.
        #[arg(long)]
        placeholder: bool,
    },

    /// Replay every queued request.
    Drain,

    /// List queued requests.
    Status,

    /// Drop a queued request by key.
    Remove {
        /// Queue key, as shown by `outq status`.
        key: String,
    },
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {s:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_json(s: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON body: {e}"))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let store = SqliteStore::open_default().await?;
        let transport = CurlTransport::from_config(&cfg.transport_config());
        let options = OfflineOptions::from_config(&cfg);

        match cli.command {
            CliCommand::Send {
                method,
                url,
                base_url,
                headers,
                data,
                placeholder,
            } => {
                let args = SendArgs {
                    method,
                    url,
                    base_url,
                    headers,
                    data,
                    placeholder,
                };
                run_send(transport, store, options, args).await?;
            }
            CliCommand::Drain => run_drain(&Client::with_options(transport, store, options)).await?,
            CliCommand::Status => run_status(&Client::with_options(transport, store, options)).await?,
            CliCommand::Remove { key } => {
                run_remove(&Client::with_options(transport, store, options), &key).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
