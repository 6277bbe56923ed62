//! `outq send <METHOD> <URL>` – send one request through the offline layer.

use anyhow::{bail, Result};
use outq_core::{
    CurlTransport, HttpRequest, HttpResponse, Method, OfflineOptions, SqliteStore, Transport,
};

use crate::cli::Client;

#[derive(Debug)]
pub struct SendArgs {
    pub method: Method,
    pub url: String,
    pub base_url: Option<String>,
    pub headers: Vec<(String, String)>,
    pub data: Option<serde_json::Value>,
    pub placeholder: bool,
}

impl SendArgs {
    pub fn to_request(&self) -> HttpRequest {
        let mut req = HttpRequest::new(self.method, self.url.clone());
        if let Some(base) = &self.base_url {
            req = req.with_base_url(base.clone());
        }
        for (name, value) in &self.headers {
            req = req.with_header(name.clone(), value.clone());
        }
        if let Some(body) = &self.data {
            req = req.with_body(body.clone());
        }
        req
    }
}

/// Response printed for a request that went to the queue.
fn queued_placeholder() -> HttpResponse {
    let mut resp = HttpResponse::new(202);
    resp.headers
        .insert("content-type".to_string(), "application/json".to_string());
    resp.body = br#"{"queued":true}"#.to_vec();
    resp
}

pub async fn run_send(
    transport: CurlTransport,
    store: SqliteStore,
    mut options: OfflineOptions,
    args: SendArgs,
) -> Result<()> {
    if args.placeholder {
        options = options.with_placeholder(|_, _| queued_placeholder());
    }
    let client = Client::with_options(transport, store, options);
    let request = args.to_request();

    match client.send(&request).await {
        Ok(resp) => {
            println!("{} {}", resp.status, String::from_utf8_lossy(&resp.body));
            Ok(())
        }
        Err(err) => {
            let queued = client.queue().len().await.unwrap_or(0);
            if let Some(resp) = &err.response {
                eprintln!("{}", String::from_utf8_lossy(&resp.body));
            }
            bail!("{} {}: {} ({} queued)", request.method, request.full_url(), err, queued)
        }
    }
}
