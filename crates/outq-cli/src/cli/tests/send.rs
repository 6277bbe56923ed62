//! Tests for `outq send` parsing and request building.

use super::parse;
use crate::cli::commands::SendArgs;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use outq_core::Method;

#[test]
fn cli_parse_send_minimal() {
    match parse(&["outq", "send", "get", "https://api.example.com/items"]) {
        CliCommand::Send {
            method,
            url,
            base_url,
            headers,
            data,
            placeholder,
        } => {
            assert_eq!(method, Method::Get);
            assert_eq!(url, "https://api.example.com/items");
            assert!(base_url.is_none());
            assert!(headers.is_empty());
            assert!(data.is_none());
            assert!(!placeholder);
        }
        _ => panic!("expected Send"),
    }
}

#[test]
fn cli_parse_send_full() {
    match parse(&[
        "outq",
        "send",
        "POST",
        "/orders",
        "--base-url",
        "https://api.example.com",
        "-H",
        "Authorization: Bearer t",
        "--header",
        "X-Trace:abc",
        "--data",
        r#"{"sku":"A1"}"#,
        "--placeholder",
    ]) {
        CliCommand::Send {
            method,
            url,
            base_url,
            headers,
            data,
            placeholder,
        } => {
            assert_eq!(method, Method::Post);
            assert_eq!(url, "/orders");
            assert_eq!(base_url.as_deref(), Some("https://api.example.com"));
            assert_eq!(
                headers,
                vec![
                    ("Authorization".to_string(), "Bearer t".to_string()),
                    ("X-Trace".to_string(), "abc".to_string()),
                ]
            );
            assert_eq!(data, Some(serde_json::json!({ "sku": "A1" })));
            assert!(placeholder);
        }
        _ => panic!("expected Send"),
    }
}

#[test]
fn cli_send_rejects_bad_input() {
    assert!(Cli::try_parse_from(["outq", "send", "FETCH", "/x"]).is_err());
    assert!(Cli::try_parse_from(["outq", "send", "GET", "/x", "-H", "no-colon"]).is_err());
    assert!(Cli::try_parse_from(["outq", "send", "POST", "/x", "--data", "{oops"]).is_err());
    assert!(Cli::try_parse_from(["outq", "send", "GET"]).is_err());
}

#[test]
fn send_args_build_request() {
    let args = SendArgs {
        method: Method::Put,
        url: "/carts/7".to_string(),
        base_url: Some("http://localhost:8080".to_string()),
        headers: vec![("X-Trace".to_string(), "abc".to_string())],
        data: Some(serde_json::json!([1, 2])),
        placeholder: false,
    };
    let req = args.to_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.full_url(), "http://localhost:8080/carts/7");
    assert_eq!(req.header("x-trace"), Some("abc"));
    assert_eq!(req.body, Some(serde_json::json!([1, 2])));
}
